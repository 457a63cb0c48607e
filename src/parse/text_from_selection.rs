use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;
use scraper::{ElementRef, Selector};

/// Concatenated text of an element and all of its descendants.
pub fn inner_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text of the first element matching `selector` below `element`, if any.
pub fn text_from_selection(selector: &Selector, element: ElementRef<'_>) -> Option<String> {
    element.select(selector).next().map(inner_text)
}

/// Collapses whitespace runs into single spaces and trims the ends.
pub fn normalize_whitespace(s: &str) -> Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s+").expect("regex should be valid"));
    let trimmed = s.trim();
    if trimmed.split_whitespace().eq(trimmed.split(' ')) {
        return Cow::Borrowed(trimmed);
    }
    Cow::Owned(re.replace_all(trimmed, " ").into_owned())
}
