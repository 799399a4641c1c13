//! Qualified types
//!
//! A qualified type pairs a shared [`NativeType`] with the modifiers of one
//! parameter or return value. It decides whether the element can be passed
//! through unchanged and what type it is declared with at the native call
//! boundary.

use crate::binding::ApiBinding;
use crate::error::LowerError;
use crate::modifiers::{Modifier, ModifierKind, ModifierTarget, Modifiers};
use ffigen_common::{ElementOrigin, NativeType, SharedType};
use log::trace;

/// Address-sized integer every pointer collapses to under a binding
pub const BOUNDARY_HANDLE_TYPE: &str = "intptr_t";

#[derive(Debug, Clone)]
pub struct QualifiedType {
    native_type: SharedType,
    modifiers: Modifiers,
}

impl QualifiedType {
    pub(crate) fn new(native_type: SharedType) -> Self {
        Self {
            native_type,
            modifiers: Modifiers::new(),
        }
    }

    pub fn native_type(&self) -> &NativeType {
        &self.native_type
    }

    pub fn shared_type(&self) -> &SharedType {
        &self.native_type
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub(crate) fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }

    /// Validate and attach `modifiers`, failing on the first one that does not fit.
    ///
    /// Modifiers are attached once; a second non-empty set is rejected.
    pub(crate) fn set_modifiers(
        &mut self,
        modifiers: Vec<Modifier>,
        target: ModifierTarget,
        origin: impl Fn() -> ElementOrigin,
    ) -> Result<(), LowerError> {
        if !self.modifiers.is_empty() && !modifiers.is_empty() {
            return Err(LowerError::ModifiersAlreadySet { origin: origin() });
        }

        for modifier in modifiers {
            let kind = modifier.kind();
            modifier
                .validate(&self.native_type, target)
                .map_err(|reason| LowerError::InvalidModifier {
                    kind,
                    origin: origin(),
                    reason,
                })?;
            self.modifiers
                .insert(modifier)
                .map_err(|_| LowerError::DuplicateModifier { kind, origin: origin() })?;
        }
        Ok(())
    }

    /// Pointer to raw data, always needs a buffer-aware wrapper
    pub fn is_buffer_pointer(&self) -> bool {
        self.native_type.is_pointer_data()
    }

    pub fn is_special(&self) -> bool {
        self.is_buffer_pointer() || self.modifiers.is_special()
    }

    /// Type text for a native declaration.
    ///
    /// Without a binding, and for the call-context parameter or a struct
    /// passed by value, this is the declared type. Under a binding every
    /// other type collapses to a boundary-safe primitive, so generated glue
    /// never needs the native headers.
    pub fn lower_type(&self, binding: Option<&ApiBinding>, pointer_mode: bool, is_call_context: bool) -> String {
        let ty = &*self.native_type;
        let mut builder = String::new();

        if self.modifiers.has(ModifierKind::Const) {
            builder.push_str("const ");
        }

        if binding.is_none() || is_call_context || (ty.is_struct() && !ty.includes_pointer) {
            builder.push_str(&ty.name);
            if ty.is_pointer_kind() && !ty.includes_pointer && (pointer_mode || !ty.is_struct()) {
                if !ty.name.ends_with('*') {
                    builder.push(' ');
                }
                builder.push('*');
            }
        } else if ty.is_pointer_like() {
            builder.push_str(BOUNDARY_HANDLE_TYPE);
        } else {
            builder.push_str(ty.jni_function_type());
        }

        trace!("lowered `{}` to `{}` (binding: {})", ty.name, builder, binding.is_some());
        builder
    }
}

/// Behavior shared by parameters and return values
pub trait Qualified {
    fn qualified(&self) -> &QualifiedType;

    /// Whether this is the implicit call-context parameter
    fn is_call_context(&self) -> bool {
        false
    }

    fn native_type(&self) -> &NativeType {
        self.qualified().native_type()
    }

    /// Type name on the managed side of the binding
    fn java_method_type(&self) -> &str {
        self.qualified().native_type().java_method_type()
    }

    fn has(&self, kind: ModifierKind) -> bool {
        self.qualified().modifiers().has(kind)
    }

    /// Needs specialized generation instead of a direct passthrough
    fn is_special(&self) -> bool {
        self.qualified().is_special()
    }

    fn to_native_type(&self, binding: Option<&ApiBinding>, pointer_mode: bool) -> String {
        self.qualified()
            .lower_type(binding, pointer_mode, self.is_call_context())
    }
}
