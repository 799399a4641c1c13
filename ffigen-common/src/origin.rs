//! Element origin tracking for error reporting
//!
//! The generator never sees source text, so diagnostics point at the
//! declaration element instead: the enclosing function (when known) and
//! the parameter or return value being lowered.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The declaration element a diagnostic refers to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// A named function parameter
    Parameter(String),
    /// The function's return value
    ReturnValue,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Parameter(name) => write!(f, "parameter `{name}`"),
            ElementKind::ReturnValue => write!(f, "return value"),
        }
    }
}

/// Where in the declared API an element lives
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementOrigin {
    /// Enclosing function, unknown while the element is still being declared
    pub function: Option<String>,
    pub element: ElementKind,
}

impl ElementOrigin {
    pub fn parameter(name: &str) -> Self {
        Self {
            function: None,
            element: ElementKind::Parameter(name.to_string()),
        }
    }

    pub fn return_value() -> Self {
        Self {
            function: None,
            element: ElementKind::ReturnValue,
        }
    }

    /// Attach the enclosing function once it is known
    pub fn in_function(mut self, function: &str) -> Self {
        self.function = Some(function.to_string());
        self
    }
}

impl fmt::Display for ElementOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.function {
            Some(function) => write!(f, "{} of `{function}`", self.element),
            None => write!(f, "{}", self.element),
        }
    }
}
