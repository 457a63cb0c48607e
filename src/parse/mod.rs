mod action_url;
mod error;
mod grade;
mod rows;
mod sections;
mod static_selector;
mod text_from_selection;

pub use action_url::action_url;
pub use error::{Error, Result};
pub use grade::GradeToken;
pub use rows::external_sections;
pub use sections::local_sections;
pub use text_from_selection::normalize_whitespace;
