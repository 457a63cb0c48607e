use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::present;
use crate::section::{Section, Source};

/// Everything one run computed, ready to be written out as json.
#[derive(Debug, Serialize, Deserialize)]
pub struct Report {
    generated_at: DateTime<Utc>,
    sections: Vec<Section>,
    /// Average box of each local section, in page order.
    cells: Vec<String>,
    summary_table: String,
}

impl Report {
    pub fn new(sections: Vec<Section>) -> Self {
        let cells = sections
            .iter()
            .filter(|section| section.source() == Source::Local)
            .map(present::section_cell)
            .collect();
        let summary_table = present::summary_table(&sections);
        Self {
            generated_at: Utc::now(),
            sections,
            cells,
            summary_table,
        }
    }

    #[inline]
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> crate::Result<()> {
        let bytes = serde_json::to_vec_pretty(self)?;
        tokio::fs::write(path, bytes).await.map_err(From::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::GradeToken;

    #[test]
    fn test_report() {
        let report = Report::new(vec![
            Section::local(Some("Maths".into()), vec![GradeToken::parse("3/4")]),
            Section::external(Some("UE 11".into()), None, 11.0),
        ]);
        assert_eq!(report.sections().len(), 2);
        assert_eq!(report.cells.len(), 1);
        assert!(report.summary_table.contains("UE 11"));
        assert!(report.generated_at <= Utc::now());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["sections"][0]["name"], "Maths");
        assert_eq!(json["sections"][0]["average"], 15.0);
        assert_eq!(json["sections"][1]["source"], "External");
    }

    #[tokio::test]
    async fn test_save() {
        let path = std::env::temp_dir().join(format!("tomuss_average_report_{}.json", std::process::id()));
        let report = Report::new(vec![Section::external(None, None, 9.5)]);
        report.save(&path).await.unwrap();
        let saved: Report =
            serde_json::from_slice(&tokio::fs::read(&path).await.unwrap()).unwrap();
        assert_eq!(saved.sections(), report.sections());
        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[test]
    fn test_empty_section_reads_back() {
        let report = Report::new(vec![Section::local(None, vec![GradeToken::Unparseable])]);
        let json = serde_json::to_string(&report).unwrap();
        let saved: Report = serde_json::from_str(&json).unwrap();
        assert!(saved.sections()[0].average().is_nan());
        assert!(saved.sections()[0].total().is_nan());
    }
}
