use std::fmt::{self, Display, Formatter};

use crate::parse;

/// Anything that stops the notes backend exchange.
#[derive(Debug)]
pub enum Error {
    Request(reqwest::Error),
    Url(url::ParseError),
    Parse(parse::Error),
    /// The student's identity could not be obtained.
    Identity(String),
}

impl Error {
    /// The connect page did not hand out a session url.
    pub fn is_extraction(&self) -> bool {
        matches!(self, Self::Parse(parse::Error::MissingUrl(_)))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Self::Url(e)
    }
}

impl From<parse::Error> for Error {
    fn from(e: parse::Error) -> Self {
        Self::Parse(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(e) => write!(f, "Request error: {e}"),
            Self::Url(e) => write!(f, "Url error: {e}"),
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::Identity(msg) => write!(f, "Identity error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
