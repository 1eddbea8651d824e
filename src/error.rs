#[derive(Debug)]
pub enum Error {
    NotFound(String),
    Validation(String),
    Conflict(String),
    Unauthorized(String),
    Store(sqlx::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NotFound(msg) => write!(f, "Not Found: {msg}"),
            Error::Validation(msg) => write!(f, "Validation: {msg}"),
            Error::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Error::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            Error::Store(err) => write!(f, "Store Error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                Error::Conflict("unique constraint violated".to_string())
            }
            _ => Error::Store(err),
        }
    }
}
