mod stats;

use std::fmt::{self, Display, Formatter};

use crate::parse::GradeToken;

pub use stats::{nan_from_null, Stats, GRADE_SCALE};

/// Where a section's grades came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Source {
    /// Read from the grade page itself.
    Local,
    /// Returned by the legacy notes backend.
    External,
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "Tomuss"),
            Self::External => write!(f, "external(IUT)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Section {
    name: Option<String>,
    source: Source,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    kind: Option<String>,
    tokens: Vec<GradeToken>,
    #[serde(flatten)]
    stats: Stats,
}

impl Section {
    pub fn local(name: Option<String>, tokens: Vec<GradeToken>) -> Self {
        let stats = Stats::aggregate(&tokens);
        Self {
            name,
            source: Source::Local,
            kind: None,
            tokens,
            stats,
        }
    }

    pub const fn external(name: Option<String>, kind: Option<String>, total: f64) -> Self {
        Self {
            name,
            source: Source::External,
            kind,
            tokens: Vec::new(),
            stats: Stats::from_total(total),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub const fn source(&self) -> Source {
        self.source
    }

    #[cfg(test)]
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    #[cfg(test)]
    pub fn tokens(&self) -> &[GradeToken] {
        &self.tokens
    }

    #[cfg(test)]
    pub fn normal_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.tokens.iter().filter_map(GradeToken::normal_value)
    }

    pub fn bonus_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.tokens.iter().filter_map(GradeToken::bonus_value)
    }

    pub fn has_bonus_grades(&self) -> bool {
        self.bonus_values().next().is_some()
    }

    pub const fn average(&self) -> f64 {
        self.stats.average
    }

    pub const fn bonus(&self) -> f64 {
        self.stats.bonus
    }

    pub const fn total(&self) -> f64 {
        self.stats.total
    }
}
