use crate::shared::errors::AppResult;
use std::path::Path;

/// Load `.env` from the working directory or one of its parents.
///
/// A missing file is not an error. A file that exists but cannot be read or
/// parsed is reported as [`AppError::ConfigError`](crate::shared::errors::AppError).
pub fn load_dotenv() -> AppResult<()> {
    ignore_missing(dotenvy::dotenv().map(|_| ()))
}

/// Same as [`load_dotenv`] for an explicit file
pub fn load_dotenv_from(path: impl AsRef<Path>) -> AppResult<()> {
    ignore_missing(dotenvy::from_path(path.as_ref()))
}

fn ignore_missing(result: Result<(), dotenvy::Error>) -> AppResult<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.into()),
    }
}
