use std::sync::OnceLock;

use regex::Regex;

/// One parsed grade cell.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GradeToken {
    /// A score out of a denominator, already divided down to a fraction.
    Normal {
        #[serde(deserialize_with = "crate::section::nan_from_null")]
        value: f64,
    },
    /// An additive bonus. The range is kept as written on the page but nothing reads it.
    Bonus { value: f64, range: (f64, f64) },
    Unparseable,
}

fn out_of_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([+-]?[0-9]+(?:\.[0-9]+)?)/([0-9]+)$").expect("regex should be valid")
    })
}

fn interval_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^([+-]?[0-9]+(?:\.[0-9]+)?)\[([+-]?[0-9]+(?:\.[0-9]+)?);([+-]?[0-9]+(?:\.[0-9]+)?)\]$",
        )
        .expect("regex should be valid")
    })
}

fn number(caps: &regex::Captures, i: usize) -> Option<f64> {
    caps.get(i)?.as_str().parse().ok()
}

impl GradeToken {
    /// Parses grade text like `15/20` or `0.5[0;1]`.
    ///
    /// Only ascii digits count. A zero denominator is not special-cased and
    /// yields an infinite or NaN value.
    pub fn parse(text: &str) -> Self {
        Self::parse_out_of(text)
            .or_else(|| Self::parse_interval(text))
            .unwrap_or(Self::Unparseable)
    }

    fn parse_out_of(text: &str) -> Option<Self> {
        let caps = out_of_regex().captures(text)?;
        Some(Self::Normal {
            value: number(&caps, 1)? / number(&caps, 2)?,
        })
    }

    fn parse_interval(text: &str) -> Option<Self> {
        let caps = interval_regex().captures(text)?;
        Some(Self::Bonus {
            value: number(&caps, 1)?,
            range: (number(&caps, 2)?, number(&caps, 3)?),
        })
    }

    pub fn normal_value(&self) -> Option<f64> {
        match self {
            Self::Normal { value } => Some(*value),
            _ => None,
        }
    }

    pub fn bonus_value(&self) -> Option<f64> {
        match self {
            Self::Bonus { value, .. } => Some(*value),
            _ => None,
        }
    }
}
