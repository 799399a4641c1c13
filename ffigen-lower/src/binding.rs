//! Binding context consulted while lowering
//!
//! An API binding stands for a family of functions loaded at runtime
//! through function pointers. When a binding is active the call boundary
//! only sees boundary-safe primitive types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiBinding {
    pub name: String,
    /// The binding exposes per-call capability tables
    #[serde(default)]
    pub has_parameter_capabilities: bool,
}

impl ApiBinding {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            has_parameter_capabilities: false,
        }
    }

    pub fn with_parameter_capabilities(mut self) -> Self {
        self.has_parameter_capabilities = true;
        self
    }
}

/// Which family of overloads is being generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    #[default]
    Normal,
    /// Alternative overloads, where `optional` arguments are always present
    Alternative,
}

/// The enclosing function of a call being lowered
#[derive(Debug, Clone, Copy)]
pub struct CallContext<'a> {
    pub function: &'a str,
    /// The function also gets an unsafe variant receiving raw handles
    pub has_unsafe_method: bool,
    pub binding: Option<&'a ApiBinding>,
}

impl<'a> CallContext<'a> {
    pub fn new(function: &'a str, binding: Option<&'a ApiBinding>) -> Self {
        Self {
            function,
            has_unsafe_method: false,
            binding,
        }
    }

    pub fn with_unsafe_method(mut self) -> Self {
        self.has_unsafe_method = true;
        self
    }
}
