use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    Xml(String),
    MissingUrl(String),
}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e.to_string())
    }
}

impl Error {
    pub fn xml_error(msg: &str) -> Self {
        Self::Xml(msg.to_string())
    }
    pub fn missing_url_error(msg: &str) -> Self {
        Self::MissingUrl(msg.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Xml(msg) => write!(f, "XML Parse Error: {msg}"),
            Self::MissingUrl(msg) => write!(f, "Couldn't extract URL: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
