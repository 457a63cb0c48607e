use std::{borrow::Cow, sync::OnceLock};

use encoding_rs::{Encoding, UTF_8};
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::bytes::Regex;

use super::{Error, Result};
use crate::section::Section;

const ROW_TAG: &[u8] = b"LIGNE";
const COLUMN_TAG: &[u8] = b"COLONNE";

/// One `LIGNE` of the notes table, as trimmed column texts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row(Vec<String>);

impl Row {
    #[cfg(test)]
    pub fn columns(&self) -> &[String] {
        &self.0
    }

    fn column(&self, i: usize) -> Option<&str> {
        self.0.get(i).map(String::as_str)
    }

    /// Column 3 holds the mark out of 20. Empty, non-numeric or infinite text gives `None`.
    pub fn total(&self) -> Option<f64> {
        let text = self.column(3)?;
        if text.is_empty() {
            return None;
        }
        text.parse::<f64>().ok().filter(|total| total.is_finite())
    }

    pub fn into_section(self) -> Option<Section> {
        let total = self.total()?;
        let name = self.column(1).map(ToOwned::to_owned);
        let kind = self.column(2).map(ToOwned::to_owned);
        Some(Section::external(name, kind, total))
    }

    /// Reads every row of the table document.
    pub fn parse_all(xml: &str) -> Result<Vec<Self>> {
        let mut reader = Reader::from_str(xml);
        let mut rows = Vec::new();
        let mut row: Option<Self> = None;
        let mut column: Option<String> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    ROW_TAG if row.is_none() => row = Some(Self::default()),
                    COLUMN_TAG if row.is_some() && column.is_none() => {
                        column = Some(String::new());
                    }
                    _ => {}
                },
                Event::Empty(e) => {
                    if let (COLUMN_TAG, Some(row)) = (e.local_name().as_ref(), row.as_mut()) {
                        row.0.push(String::new());
                    }
                }
                Event::Text(e) => {
                    if let Some(column) = column.as_mut() {
                        let text = e
                            .unescape()
                            .map_err(|e| Error::xml_error(&e.to_string()))?;
                        column.push_str(&text);
                    }
                }
                Event::CData(e) => {
                    if let Some(column) = column.as_mut() {
                        column.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Event::End(e) => match e.local_name().as_ref() {
                    COLUMN_TAG => {
                        if let (Some(text), Some(row)) = (column.take(), row.as_mut()) {
                            row.0.push(text.trim().to_owned());
                        }
                    }
                    ROW_TAG => {
                        if let Some(row) = row.take() {
                            rows.push(row);
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(rows)
    }
}

/// Decodes the table with the charset named in its xml declaration, utf-8 when there is none.
pub fn decode_table(bytes: &[u8]) -> Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r#"(?-u)^\s*<\?xml[^>]*?encoding\s*=\s*["']([A-Za-z0-9._:-]+)["']"#)
            .expect("regex should be valid")
    });
    let head = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let encoding = re
        .captures(head)
        .and_then(|caps| caps.get(1))
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    log::trace!("decoding notes table as {}", encoding.name());
    encoding.decode(bytes).0
}

/// Sections for every row of the table that carries a numeric mark.
pub fn external_sections(body: &[u8]) -> Result<Vec<Section>> {
    let xml = decode_table(body);
    let rows = Row::parse_all(&xml)?;
    let total_rows = rows.len();
    let sections: Vec<Section> = rows.into_iter().filter_map(Row::into_section).collect();
    log::debug!(
        "kept {} of {total_rows} external rows",
        sections.len()
    );
    Ok(sections)
}
