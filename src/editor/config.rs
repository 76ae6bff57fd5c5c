//! Editor configuration.

use crate::editor::domain::DisplayDateFormat;

/// Named mask used when the board does not configure one.
const DEFAULT_FALLBACK_MASK: &str = "default";

/// Settings applied by the editor controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Display mask used when the host sends an empty `dateFormat`.
    pub fallback_date_format: DisplayDateFormat,
    /// Author stamped on newly added comments.
    pub default_comment_author: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            fallback_date_format: DisplayDateFormat::new(DEFAULT_FALLBACK_MASK),
            default_comment_author: String::new(),
        }
    }
}

impl EditorConfig {
    /// Sets the fallback display mask.
    #[must_use]
    pub fn with_fallback_date_format(mut self, mask: impl Into<String>) -> Self {
        self.fallback_date_format = DisplayDateFormat::new(mask);
        self
    }

    /// Sets the author stamped on new comments.
    #[must_use]
    pub fn with_default_comment_author(mut self, author: impl Into<String>) -> Self {
        self.default_comment_author = author.into();
        self
    }
}
