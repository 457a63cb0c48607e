use crate::parse::GradeToken;

/// Scale applied to the mean of normal grades, which are fractions of 1.
pub const GRADE_SCALE: f64 = 20.0;

/// Json has no NaN or infinity, serde_json writes them as `null`; read that back as NaN.
pub fn nan_from_null<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value: Option<f64> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.unwrap_or(f64::NAN))
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stats {
    #[serde(deserialize_with = "nan_from_null")]
    pub average: f64,
    #[serde(deserialize_with = "nan_from_null")]
    pub bonus: f64,
    #[serde(deserialize_with = "nan_from_null")]
    pub total: f64,
}

impl Stats {
    /// Averages the normal grades out of 20 and adds the mean bonus.
    ///
    /// With no normal grades the average is NaN, and so is the total.
    /// Unparseable tokens are ignored.
    pub fn aggregate(tokens: &[GradeToken]) -> Self {
        let normal: Vec<f64> = tokens.iter().filter_map(GradeToken::normal_value).collect();
        let bonuses: Vec<f64> = tokens.iter().filter_map(GradeToken::bonus_value).collect();

        #[allow(clippy::cast_precision_loss)]
        let average = normal.iter().sum::<f64>() / normal.len() as f64 * GRADE_SCALE;
        #[allow(clippy::cast_precision_loss)]
        let bonus = if bonuses.is_empty() {
            0.0
        } else {
            bonuses.iter().sum::<f64>() / bonuses.len() as f64
        };

        Self {
            average,
            bonus,
            total: average + bonus,
        }
    }

    /// Stats for a row that only reports a final mark.
    pub const fn from_total(total: f64) -> Self {
        Self {
            average: total,
            bonus: 0.0,
            total,
        }
    }
}
