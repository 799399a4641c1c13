//! Function return values

use crate::dsl::IntoModifiers;
use crate::error::LowerError;
use crate::modifiers::ModifierTarget;
use crate::qualified::{Qualified, QualifiedType};
use ffigen_common::{ElementOrigin, SharedType, TypeMapping};
use std::hash::{Hash, Hasher};

/// The qualified result of a function.
///
/// A function has a single return value, so two return values are equal
/// whenever they describe the same native type.
#[derive(Debug, Clone)]
pub struct ReturnValue {
    qualified: QualifiedType,
}

impl ReturnValue {
    pub fn new(native_type: SharedType) -> Self {
        Self {
            qualified: QualifiedType::new(native_type),
        }
    }

    pub fn with_modifiers<M: IntoModifiers>(mut self, modifiers: M) -> Result<Self, LowerError> {
        self.qualified.set_modifiers(
            modifiers.into_modifiers(),
            ModifierTarget::ReturnValue,
            ElementOrigin::return_value,
        )?;
        Ok(self)
    }

    /// No result-capturing statement is emitted for void functions
    pub fn is_void(&self) -> bool {
        self.qualified.native_type().mapping == TypeMapping::Void
    }
}

impl Qualified for ReturnValue {
    fn qualified(&self) -> &QualifiedType {
        &self.qualified
    }
}

impl PartialEq for ReturnValue {
    fn eq(&self, other: &Self) -> bool {
        self.qualified.native_type() == other.qualified.native_type()
    }
}

impl Eq for ReturnValue {}

impl Hash for ReturnValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualified.native_type().hash(state);
    }
}
