use std::{env, path::PathBuf};

use url::Url;

use crate::error::Error;
use crate::fetch::Backend;

/// Where the identity fields are kept between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySource {
    File(PathBuf),
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Saved copy of the grade page.
    pub page: PathBuf,
    pub identity: IdentitySource,
    /// `None` when the notes backend should not be contacted.
    pub backend: Option<Backend>,
    pub output: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> crate::Result<Self> {
        let page = lookup("PAGE")
            .map(PathBuf::from)
            .ok_or_else(|| Error::Config("env var PAGE not set".into()))?;

        let identity = match lookup("IDENTITY").as_deref() {
            Some(":memory:") => IdentitySource::Memory,
            Some(p) => IdentitySource::File(p.into()),
            None => {
                log::warn!("env var IDENTITY not set, using identity.json.");
                IdentitySource::File("identity.json".into())
            }
        };

        let backend = if lookup("SKIP_REMOTE").is_some() {
            None
        } else {
            let mut backend = Backend::default();
            if let Some(base) = lookup("REMOTE_BASE") {
                backend.base = Url::parse(&base)
                    .map_err(|e| Error::Config(format!("REMOTE_BASE is not a url: {e}")))?;
            }
            if let Some(year) = lookup("ACADEMIC_YEAR") {
                if year.is_empty() || !year.chars().all(|c| c.is_ascii_digit()) {
                    return Err(Error::Config(format!("ACADEMIC_YEAR is not a year: {year}")));
                }
                backend.academic_year = year;
            }
            Some(backend)
        };

        Ok(Self {
            page,
            identity,
            backend,
            output: lookup("OUTPUT").map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> crate::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("PAGE", "grades.html")]).unwrap();
        assert_eq!(config.page, PathBuf::from("grades.html"));
        assert_eq!(config.identity, IdentitySource::File("identity.json".into()));
        assert_eq!(config.backend, Some(Backend::default()));
        assert_eq!(config.output, None);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("PAGE", "grades.html"),
            ("IDENTITY", ":memory:"),
            ("REMOTE_BASE", "http://localhost:8080"),
            ("ACADEMIC_YEAR", "2019"),
            ("OUTPUT", "report.json"),
        ])
        .unwrap();
        assert_eq!(config.identity, IdentitySource::Memory);
        let backend = config.backend.unwrap();
        assert_eq!(backend.base.as_str(), "http://localhost:8080/");
        assert_eq!(backend.academic_year, "2019");
        assert_eq!(config.output, Some(PathBuf::from("report.json")));
    }

    #[test]
    fn test_skip_remote() {
        let config = config(&[("PAGE", "grades.html"), ("SKIP_REMOTE", "1")]).unwrap();
        assert!(config.backend.is_none());
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(config(&[]), Err(Error::Config(_))));
        assert!(config(&[("PAGE", "p"), ("REMOTE_BASE", "not a url")]).is_err());
        assert!(config(&[("PAGE", "p"), ("ACADEMIC_YEAR", "twenty")]).is_err());
    }
}
