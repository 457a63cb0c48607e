mod local;

use std::io::{self, BufRead, Write};
use std::path::Path;

use local::FileStore;

/// Who the notes backend should look up.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Identity {
    /// `LAST FIRST`, upper-cased.
    pub name: String,
    pub email: String,
    pub student_id: String,
}

impl Identity {
    pub fn display_name(first: &str, last: &str) -> String {
        format!("{} {}", last.trim().to_uppercase(), first.trim().to_uppercase())
    }

    /// Student cards print ids as `p1234567`; the backend wants `11234567`.
    pub fn normalize_student_id(id: &str) -> String {
        id.trim().replacen('p', "1", 1)
    }
}

/// Whatever has been persisted so far. Any field may still be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoredIdentity {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "id")]
    pub student_id: Option<String>,
}

impl StoredIdentity {
    fn complete(&self) -> Option<Identity> {
        Some(Identity {
            name: self.name.clone()?,
            email: self.email.clone()?,
            student_id: self.student_id.clone()?,
        })
    }
}

/// Asks the user for a missing identity field.
pub trait Prompt {
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

/// Prompts on stderr, reads answers from stdin.
#[derive(Debug, Default)]
pub struct Terminal;

impl Prompt for Terminal {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        let mut stderr = io::stderr().lock();
        write!(stderr, "{question}: ")?;
        stderr.flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer.trim().to_owned())
    }
}

#[derive(Debug)]
#[non_exhaustive]
pub enum Store {
    Local(FileStore),
    AdHoc(StoredIdentity),
}

impl Store {
    #[inline]
    pub fn local(p: impl AsRef<Path>) -> Self {
        Self::Local(FileStore::open(p))
    }

    pub async fn load(&self) -> crate::Result<StoredIdentity> {
        match self {
            Self::Local(f) => f.load().await,
            Self::AdHoc(stored) => Ok(stored.clone()),
        }
    }

    pub async fn save(&mut self, data: &StoredIdentity) -> crate::Result<()> {
        match self {
            Self::Local(f) => f.save(data).await,
            Self::AdHoc(stored) => {
                *stored = data.clone();
                Ok(())
            }
        }
    }

    /// Loads the stored identity, asking for and persisting whatever is missing.
    pub async fn get_or_prompt(&mut self, prompt: &mut impl Prompt) -> crate::Result<Identity> {
        let mut stored = self.load().await?;
        if let Some(identity) = stored.complete() {
            return Ok(identity);
        }

        if stored.name.is_none() {
            let first = prompt.ask("First name")?;
            let last = prompt.ask("Last name")?;
            stored.name = Some(Identity::display_name(&first, &last));
        }
        if stored.email.is_none() {
            stored.email = Some(prompt.ask("IUT Email")?.trim().to_owned());
        }
        if stored.student_id.is_none() {
            let id = prompt.ask("Student ID")?;
            stored.student_id = Some(Identity::normalize_student_id(&id));
        }
        self.save(&stored).await?;
        log::info!("saved identity fields");

        stored
            .complete()
            .ok_or_else(|| crate::error::Error::Internal("identity still incomplete".into()))
    }
}
