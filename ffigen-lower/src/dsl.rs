//! Declaration helpers
//!
//! `returns` pairs modifiers with a return type, so a declaration reads
//! `Modifier::Const.returns(&GLubyte_p)?` or
//! `[Modifier::Const, Modifier::Nullable].returns(&GLubyte_p)?`.

use crate::error::LowerError;
use crate::modifiers::Modifier;
use crate::return_value::ReturnValue;
use ffigen_common::SharedType;
use std::sync::Arc;

/// Anything that can be attached as a list of modifiers
pub trait IntoModifiers {
    fn into_modifiers(self) -> Vec<Modifier>;
}

impl IntoModifiers for Modifier {
    fn into_modifiers(self) -> Vec<Modifier> {
        vec![self]
    }
}

impl<const N: usize> IntoModifiers for [Modifier; N] {
    fn into_modifiers(self) -> Vec<Modifier> {
        Vec::from(self)
    }
}

impl IntoModifiers for Vec<Modifier> {
    fn into_modifiers(self) -> Vec<Modifier> {
        self
    }
}

impl IntoModifiers for &[Modifier] {
    fn into_modifiers(self) -> Vec<Modifier> {
        self.to_vec()
    }
}

pub trait Returns {
    /// Build a return value of `return_type` qualified by these modifiers
    fn returns(self, return_type: &SharedType) -> Result<ReturnValue, LowerError>;
}

impl<M: IntoModifiers> Returns for M {
    fn returns(self, return_type: &SharedType) -> Result<ReturnValue, LowerError> {
        ReturnValue::new(Arc::clone(return_type)).with_modifiers(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::ModifierKind;
    use crate::qualified::Qualified;
    use ffigen_common::NativeType;

    #[test]
    fn test_single_modifier() {
        let ty = NativeType::char_sequence("GLubyte").shared();
        let returns = Modifier::Const.returns(&ty).unwrap();

        assert!(returns.has(ModifierKind::Const));
        assert!(Arc::ptr_eq(returns.qualified().shared_type(), &ty));
    }

    #[test]
    fn test_modifier_array_and_vec() {
        let ty = NativeType::char_sequence("GLubyte").shared();

        let from_array = [Modifier::Const, Modifier::Nullable].returns(&ty).unwrap();
        let from_vec = vec![Modifier::Nullable].returns(&ty).unwrap();
        let from_slice = [Modifier::Const][..].returns(&ty).unwrap();

        assert!(from_array.has(ModifierKind::Const) && from_array.has(ModifierKind::Nullable));
        assert!(!from_vec.has(ModifierKind::Const));
        assert!(from_slice.has(ModifierKind::Const));
        assert_eq!(from_array, from_vec);
    }

    #[test]
    fn test_returns_validates() {
        let ty = NativeType::char_sequence("GLchar").shared();
        assert!(Modifier::AutoSizeResult.returns(&ty).is_err());
        assert!([Modifier::Const, Modifier::Const].returns(&ty).is_err());
    }
}
