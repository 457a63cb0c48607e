//! Html and terminal rendering of computed sections.
use std::fmt::Write;

use maud::{html, Markup};

use crate::section::{Section, GRADE_SCALE};

/// Red below 10, green from 10 up, paler the closer the mark is to 10.
pub fn cell_color(total: f64) -> String {
    let hue = if total < 10.0 { 0 } else { 120 };
    let lightness = 100.0 - (total - 10.0).abs() * 5.0;
    format!("hsl({hue},100%,{lightness}%)")
}

// zero and NaN both count as no bonus
fn has_bonus(section: &Section) -> bool {
    let bonus = section.bonus();
    bonus != 0.0 && !bonus.is_nan()
}

/// Tooltip lines; bonus and total only show up when there is a bonus.
fn details(section: &Section, with_bonus: bool) -> Markup {
    html! {
        "Average: " (format!("{:.3}", section.average()))
        @if with_bonus {
            br;
            "Bonus: " (format!("{:.3}", section.bonus()))
            br;
            "Total: " (format!("{:.3}", section.total()))
        }
    }
}

/// The "Average" box placed at the top of a local section.
pub fn section_cell(section: &Section) -> String {
    html! {
        div class="Display DisplayCellBox CellBox DisplayTypeNote CustomAverage TooltipParent"
            style=(format!("background-color: {}", cell_color(section.total()))) {
            div class="Display DisplayCellTitle CellTitle" { "Average" }
            div class="Display DisplayCellValue CellValue" {
                (format!("{:.2}", section.total()))
                small style="font-size: 60%" { (format!("/{GRADE_SCALE}")) }
            }
            span class="Tooltip" { (details(section, section.has_bonus_grades())) }
        }
    }
    .into_string()
}

/// Subject, source and mark of every section, local ones first.
pub fn summary_table(sections: &[Section]) -> String {
    html! {
        table class="AverageList" {
            tr { th { "Subject" } th { "Source" } th { "Average" } }
            @for section in sections {
                @let name = section.name().unwrap_or_default();
                @let source = section.source().to_string();
                tr {
                    td class="TooltipParent" {
                        (name)
                        span class="Tooltip TooltipRight" { (name) }
                    }
                    td class="TooltipParent" {
                        (source)
                        span class="Tooltip" { (source) }
                    }
                    td class="TooltipParent" {
                        (format!("{:.2}", section.total()))
                        small { (format!("/{GRADE_SCALE}")) }
                        span class="Tooltip" { (details(section, has_bonus(section))) }
                    }
                }
            }
        }
    }
    .into_string()
}

/// Plain text version of [`summary_table`].
pub fn text_summary(sections: &[Section]) -> String {
    let rows: Vec<[String; 3]> = sections
        .iter()
        .map(|section| {
            [
                section.name().unwrap_or("-").to_owned(),
                section.source().to_string(),
                format!("{:.2}/{GRADE_SCALE}", section.total()),
            ]
        })
        .collect();
    let header = ["Subject", "Source", "Average"];
    let width = |i: usize| {
        rows.iter()
            .map(|row| row[i].chars().count())
            .chain(std::iter::once(header[i].len()))
            .max()
            .unwrap_or_default()
    };
    let (name_width, source_width) = (width(0), width(1));

    let mut out = format!(
        "{:name_width$}  {:source_width$}  {}\n",
        header[0], header[1], header[2]
    );
    for [name, source, total] in &rows {
        let _ = writeln!(out, "{name:name_width$}  {source:source_width$}  {total}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::GradeToken;

    fn sections() -> Vec<Section> {
        vec![
            Section::local(
                Some("Maths & co".into()),
                vec![GradeToken::parse("15/20"), GradeToken::parse("1[0;2]")],
            ),
            Section::local(None, vec![GradeToken::parse("1/4")]),
            Section::external(Some("UE 11".into()), Some("UE".into()), 12.5),
        ]
    }

    #[test]
    fn test_cell_color() {
        assert_eq!(cell_color(15.0), "hsl(120,100%,75%)");
        assert_eq!(cell_color(8.0), "hsl(0,100%,90%)");
        assert_eq!(cell_color(10.0), "hsl(120,100%,100%)");
    }

    #[test]
    fn test_section_cell() {
        let sections = sections();
        let cell = section_cell(&sections[0]);
        assert!(cell.contains(">16.00<small"));
        assert!(cell.contains("Average: 15.000<br>Bonus: 1.000<br>Total: 16.000"));

        let plain = section_cell(&sections[1]);
        assert!(plain.contains(">5.00<small"));
        assert!(plain.contains(r#"<span class="Tooltip">Average: 5.000</span>"#));
    }

    #[test]
    fn test_empty_section_cell() {
        let cell = section_cell(&Section::local(None, vec![GradeToken::Unparseable]));
        assert!(cell.contains(">NaN<small"));
    }

    #[test]
    fn test_summary_escapes_names() {
        let table = summary_table(&[Section::external(Some("<b>UE</b>".into()), None, 10.0)]);
        assert!(table.contains("&lt;b&gt;UE&lt;/b&gt;"));
        assert!(!table.contains("<b>"));
    }

    #[test]
    fn test_nan_bonus_hidden() {
        let huge = "9".repeat(400);
        let section = Section::local(
            None,
            vec![
                GradeToken::parse("1/2"),
                GradeToken::parse(&format!("{huge}[0;1]")),
                GradeToken::parse(&format!("-{huge}[0;1]")),
            ],
        );
        assert!(section.bonus().is_nan());
        assert!(!summary_table(&[section]).contains("Bonus:"));
    }

    #[test]
    fn test_summary_table() {
        let table = summary_table(&sections());
        assert!(table.starts_with(r#"<table class="AverageList"><tr><th>Subject</th>"#));
        assert_eq!(table.matches("<tr>").count(), 4);
        assert!(table.contains("Maths &amp; co"));
        assert!(table.contains(">external(IUT)<"));
        assert!(table.contains(">12.50<small>/20</small>"));
        assert!(table.ends_with("</table>"));
    }

    #[test]
    fn test_text_summary() {
        let text = text_summary(&sections());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Subject     Source         Average");
        assert_eq!(lines[1], "Maths & co  Tomuss         16.00/20");
        assert_eq!(lines[2], "-           Tomuss         5.00/20");
        assert_eq!(lines[3], "UE 11       external(IUT)  12.50/20");
    }
}
