use scraper::{ElementRef, Html};

use super::text_from_selection::{inner_text, text_from_selection};
use super::{normalize_whitespace, GradeToken};
use crate::section::Section;
use crate::static_selector;

static_selector!(SECTION_SELECTOR <- ".UEGrades");
static_selector!(GRADE_SELECTOR <- ".DisplayTypeNote");
static_selector!(VALUE_SELECTOR <- ".CellValue");
static_selector!(TITLE_SELECTOR <- ".UETitle");

/// Raw text of every grade cell in a section, in page order.
fn grade_texts(section: ElementRef<'_>) -> impl Iterator<Item = String> + '_ {
    section
        .select(&GRADE_SELECTOR)
        .filter_map(|cell| text_from_selection(&VALUE_SELECTOR, cell))
}

fn has_grades(section: ElementRef<'_>) -> bool {
    grade_texts(section).any(|text| !text.trim().is_empty())
}

fn has_nested_sections(section: ElementRef<'_>) -> bool {
    section
        .select(&SECTION_SELECTOR)
        .any(|nested| nested != section)
}

/// The title lives in the element right before the section, not inside it.
fn section_name(section: ElementRef<'_>) -> Option<String> {
    let previous = section.prev_siblings().find_map(ElementRef::wrap)?;
    let title = previous.select(&TITLE_SELECTOR).next()?;
    Some(normalize_whitespace(&inner_text(title)).into_owned())
}

fn from_html_element(section: ElementRef<'_>) -> Section {
    let tokens = grade_texts(section)
        .filter(|text| !text.trim().is_empty())
        .map(|text| GradeToken::parse(text.trim()))
        .collect();
    Section::local(section_name(section), tokens)
}

/// Every leaf grading section of the page that holds at least one grade.
pub fn local_sections(document: &Html) -> Vec<Section> {
    let sections: Vec<Section> = document
        .select(&SECTION_SELECTOR)
        .filter(|section| has_grades(*section))
        .filter(|section| !has_nested_sections(*section))
        .map(from_html_element)
        .collect();
    log::debug!("found {} gradable sections on the page", sections.len());
    sections
}
