use std::sync::OnceLock;

use regex::Regex;

use super::{Error, Result};

/// Pulls the session url out of the `var _PU_ = "...";` assignment of the connect page.
pub fn action_url(body: &str) -> Result<&str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r#"var\s+_PU_\s*=\s*"([^"]+)"\s*;"#).expect("regex should be valid")
    });
    re.captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| Error::missing_url_error("no _PU_ assignment in the connect page"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_url() {
        let body = r#"<script>var _AWP_ = 1;
            var   _PU_ ="/WD210AWP/WD210Awp.exe/CTX_4-1-1234/IUT_Note_Etudiant/SYNC_1" ;
        </script>"#;
        assert_eq!(
            action_url(body).unwrap(),
            "/WD210AWP/WD210Awp.exe/CTX_4-1-1234/IUT_Note_Etudiant/SYNC_1"
        );
    }

    #[test]
    fn test_missing() {
        for body in ["", "<html></html>", r#"var _PU_ = "";"#, "var _PU_ = '/x';"] {
            assert!(
                matches!(action_url(body), Err(Error::MissingUrl(_))),
                "{body:?}"
            );
        }
    }
}
