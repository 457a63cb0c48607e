use std::sync::OnceLock;

use scraper::Selector;

/// A css selector parsed on first use, so it can live in a `static`.
#[derive(Debug)]
pub(super) struct StaticSelector {
    cell: OnceLock<Selector>,
    source: &'static str,
}

impl StaticSelector {
    pub(super) const fn new(source: &'static str) -> Self {
        Self {
            cell: OnceLock::new(),
            source,
        }
    }
}

impl core::ops::Deref for StaticSelector {
    type Target = Selector;

    fn deref(&self) -> &Self::Target {
        self.cell.get_or_init(|| match Selector::parse(self.source) {
            Ok(sel) => sel,
            Err(e) => panic!("Error parsing static selector {}: {:?}", self.source, e),
        })
    }
}

#[macro_export]
macro_rules! static_selector {
    ($x: ident <- $sel: literal) => {
        static $x: $crate::parse::static_selector::StaticSelector =
            $crate::parse::static_selector::StaticSelector::new($sel);
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_static_selector() {
        static_selector!(TITLE <- ".UETitle");
        let html = scraper::Html::parse_fragment(r#"<div><span class="UETitle">a</span></div>"#);
        assert_eq!(html.select(&TITLE).count(), 1);
        // second use goes through the cached selector
        assert_eq!(html.select(&TITLE).count(), 1);
    }
}
