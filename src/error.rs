use crate::{fetch, parse};
use std::fmt::{self, Display, Formatter};

#[derive(Debug)]
pub enum Error {
    Parse(parse::Error),
    Fetch(fetch::Error),
    Config(String),
    Io(std::io::Error),
    Json(serde_json::Error),
    Internal(String),
}

impl From<parse::Error> for Error {
    fn from(e: parse::Error) -> Self {
        Error::Parse(e)
    }
}

impl From<fetch::Error> for Error {
    fn from(e: fetch::Error) -> Self {
        Error::Fetch(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "Parse error: {}", e),
            Error::Fetch(e) => write!(f, "Fetch error: {}", e),
            Error::Config(msg) => write!(f, "Config error: {}", msg),
            Error::Io(e) => write!(f, "Io error: {}", e),
            Error::Json(e) => write!(f, "Json error: {}", e),
            Error::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
