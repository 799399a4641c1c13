//! Documentation links appended to parameter descriptions

use serde::{Deserialize, Serialize};

/// How the allowed values of a parameter are introduced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkMode {
    /// A single value, as a new sentence
    #[default]
    Single,
    /// A single value, continuing the sentence
    SingleCnt,
    /// A combination of flags, as a new sentence
    Bitfield,
    /// A combination of flags, continuing the sentence
    BitfieldCnt,
}

impl LinkMode {
    fn is_continuation(&self) -> bool {
        matches!(self, LinkMode::SingleCnt | LinkMode::BitfieldCnt)
    }

    fn intro(&self, multiple: bool) -> &'static str {
        match (self, multiple) {
            (_, false) if self.is_continuation() => "must be:",
            (_, false) => "Must be:",
            (LinkMode::Single, true) => "One of:",
            (LinkMode::SingleCnt, true) => "one of:",
            (LinkMode::Bitfield, true) => "One or more of:",
            (LinkMode::BitfieldCnt, true) => "one or more of:",
        }
    }

    /// Append the link sentence to `documentation`
    pub fn append_links(&self, documentation: &str, links: &str) -> String {
        let trimmed = documentation.trim();
        let links = links.trim();
        let multiple = links.split_whitespace().nth(1).is_some();

        let mut builder = String::with_capacity(trimmed.len() + links.len() + 20);
        builder.push_str(trimmed);
        if !self.is_continuation() && !trimmed.is_empty() && !trimmed.ends_with('.') {
            builder.push('.');
        }
        if !trimmed.is_empty() {
            builder.push(' ');
        }
        builder.push_str(self.intro(multiple));
        builder.push(' ');
        builder.push_str(links);
        builder
    }
}
