//! Lowering errors
//!
//! Every failure here is a specification error: the declared modifiers or
//! the binding setup do not fit together. None of them are recoverable, the
//! generation run reports the offending element and stops.

use crate::modifiers::ModifierKind;
use ffigen_common::{ElementOrigin, GeneratorError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LowerError {
    #[error("duplicate modifier `{kind}` on {origin}")]
    DuplicateModifier {
        kind: ModifierKind,
        origin: ElementOrigin,
    },

    #[error("modifier `{kind}` is not valid on {origin}: {reason}")]
    InvalidModifier {
        kind: ModifierKind,
        origin: ElementOrigin,
        reason: String,
    },

    #[error("modifiers of {origin} are already set")]
    ModifiersAlreadySet { origin: ElementOrigin },

    #[error("duplicate parameter `{name}` in `{function}`")]
    DuplicateParameter { name: String, function: String },

    #[error("{origin} needs an API binding, the function declares an unsafe variant but has no binding")]
    MissingBinding { origin: ElementOrigin },

    #[error("{origin} cannot be lowered: {reason}")]
    InconsistentType { origin: ElementOrigin, reason: String },
}

impl LowerError {
    pub fn origin(&self) -> ElementOrigin {
        match self {
            LowerError::DuplicateModifier { origin, .. }
            | LowerError::InvalidModifier { origin, .. }
            | LowerError::ModifiersAlreadySet { origin }
            | LowerError::MissingBinding { origin }
            | LowerError::InconsistentType { origin, .. } => origin.clone(),
            LowerError::DuplicateParameter { name, function } => {
                ElementOrigin::parameter(name).in_function(function)
            }
        }
    }
}

impl From<LowerError> for GeneratorError {
    fn from(err: LowerError) -> Self {
        let origin = err.origin();
        match err {
            LowerError::DuplicateModifier { .. }
            | LowerError::InvalidModifier { .. }
            | LowerError::ModifiersAlreadySet { .. }
            | LowerError::DuplicateParameter { .. }
            | LowerError::InconsistentType { .. } => {
                GeneratorError::declaration_error(err.to_string(), origin)
            }
            LowerError::MissingBinding { .. } => GeneratorError::lowering_error(err.to_string(), origin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_generator_error() {
        let err = LowerError::MissingBinding {
            origin: ElementOrigin::parameter("memobj").in_function("clRetainMemObject"),
        };
        let generator: GeneratorError = err.into();
        assert!(matches!(generator, GeneratorError::LoweringError { .. }));
        assert_eq!(
            generator.origin().and_then(|o| o.function.as_deref()),
            Some("clRetainMemObject")
        );

        let err = LowerError::DuplicateParameter {
            name: "x".to_string(),
            function: "glVertex2f".to_string(),
        };
        assert_eq!(err.origin().to_string(), "parameter `x` of `glVertex2f`");
        let generator: GeneratorError = err.into();
        assert!(matches!(generator, GeneratorError::DeclarationError { .. }));
    }
}
