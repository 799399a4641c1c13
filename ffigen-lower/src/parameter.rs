//! Function parameters
//!
//! Besides the qualified type, a parameter knows its name, its direction
//! and its documentation. It produces the text of its declaration in the
//! native call prototype and the expression passed at the call site.

use crate::binding::{CallContext, GenerationMode};
use crate::dsl::IntoModifiers;
use crate::error::LowerError;
use crate::links::LinkMode;
use crate::modifiers::{ModifierKind, ModifierTarget};
use crate::qualified::{Qualified, QualifiedType};
use ffigen_common::{
    ElementOrigin, NativeKind, NativeType, PointerMapping, PrimitiveMapping, SharedType, TypeMapping,
};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Accessor yielding the address of a struct or object wrapper
pub const ADDRESS: &str = "address()";
/// Null sentinel passed for absent struct and object arguments
pub const NULL: &str = "NULL";
/// Address of a buffer, null for a null buffer
pub const MEM_ADDRESS_SAFE: &str = "memAddressSafe";
/// Address of a buffer that must not be null
pub const MEM_ADDRESS: &str = "memAddress";

/// Name of the implicit call-context parameter
pub const CALL_CONTEXT_NAME: &str = "__env";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    #[default]
    In,
    Out,
    #[serde(rename = "inout")]
    InOut,
}

/// How a parameter's argument is passed at the call site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallCategory {
    /// Struct or wrapped object, passed by its address
    Wrapped,
    /// Fixed array, decays to its own address
    FixedArray,
    Data,
    Boolean4,
    Passthrough,
}

impl CallCategory {
    /// `None` when the kind and the mapping of `ty` disagree
    fn of(ty: &NativeType) -> Option<Self> {
        use PointerMapping as P;

        let category = match (ty.kind, ty.mapping) {
            (NativeKind::Struct, TypeMapping::Pointer(P::Struct))
            | (NativeKind::Object, TypeMapping::Pointer(P::OpaquePointer)) => CallCategory::Wrapped,
            (NativeKind::Array { length }, TypeMapping::Pointer(m)) if length > 0 && m.is_data() => {
                CallCategory::FixedArray
            }
            (NativeKind::CharSequence, TypeMapping::Pointer(P::DataByte)) => CallCategory::Data,
            (NativeKind::Pointer, TypeMapping::Pointer(P::OpaquePointer)) => CallCategory::Passthrough,
            (NativeKind::Pointer, TypeMapping::Pointer(m)) if m.is_data() => CallCategory::Data,
            (NativeKind::Primitive, TypeMapping::Primitive(PrimitiveMapping::Boolean4)) => CallCategory::Boolean4,
            (NativeKind::Primitive, TypeMapping::Primitive(_)) | (NativeKind::Void, TypeMapping::Void) => {
                CallCategory::Passthrough
            }
            _ => return None,
        };
        Some(category)
    }
}

/// A qualified function argument.
///
/// Parameter names are unique within a signature, so equality and hashing
/// only consider the name.
#[derive(Debug, Clone)]
pub struct Parameter {
    qualified: QualifiedType,
    name: String,
    param_type: ParameterType,
    documentation: String,
    is_call_context: bool,
}

impl Parameter {
    pub fn new(native_type: SharedType, name: &str, param_type: ParameterType, documentation: &str) -> Self {
        Self {
            qualified: QualifiedType::new(native_type),
            name: name.to_string(),
            param_type,
            documentation: documentation.to_string(),
            is_call_context: false,
        }
    }

    /// The implicit call-context parameter, declared with its full native type
    pub fn call_context(native_type: SharedType) -> Self {
        Self {
            is_call_context: true,
            ..Self::new(native_type, CALL_CONTEXT_NAME, ParameterType::In, "the call context")
        }
    }

    /// Append the allowed values to the documentation
    pub fn with_links(mut self, links: &str, link_mode: LinkMode) -> Self {
        if !links.trim().is_empty() {
            self.documentation = link_mode.append_links(&self.documentation, links);
        }
        self
    }

    pub fn with_modifiers<M: IntoModifiers>(mut self, modifiers: M) -> Result<Self, LowerError> {
        let name = self.name.clone();
        self.qualified.set_modifiers(
            modifiers.into_modifiers(),
            ModifierTarget::Parameter,
            || ElementOrigin::parameter(&name),
        )?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param_type(&self) -> ParameterType {
        self.param_type
    }

    pub fn documentation(&self) -> &str {
        &self.documentation
    }

    pub fn origin(&self) -> ElementOrigin {
        ElementOrigin::parameter(&self.name)
    }

    /// Output parameter whose buffer size the generator computes
    pub fn is_auto_size_result_out(&self) -> bool {
        self.param_type == ParameterType::Out && self.has(ModifierKind::AutoSizeResult)
    }

    pub fn has_array_modifiers(&self) -> bool {
        ModifierKind::ARRAY_FAMILY.iter().any(|&kind| self.has(kind))
    }

    /// Declaration of this parameter in the managed method
    pub fn as_java_method_param(&self) -> String {
        format!("{} {}", self.java_method_type(), self.name)
    }

    /// Declaration of this parameter in the native call prototype
    pub fn as_native_method_param(&self) -> String {
        format!("{} {}", self.native_type().native_method_type(), self.name)
    }

    /// Expression passed for this parameter at the native call site
    pub fn as_native_method_call_param(
        &self,
        call: &CallContext<'_>,
        mode: GenerationMode,
    ) -> Result<String, LowerError> {
        let name = &self.name;
        let ty = self.native_type();

        let category = CallCategory::of(ty).ok_or_else(|| LowerError::InconsistentType {
            origin: self.origin().in_function(call.function),
            reason: ty
                .inconsistency()
                .unwrap_or_else(|| format!("native type `{}` has no call category", ty.name)),
        })?;

        let expr = match category {
            CallCategory::Wrapped => {
                if self.has(ModifierKind::Nullable) {
                    format!("{name} == null ? {NULL} : {name}.{ADDRESS}")
                } else if ty.is_object() && call.has_unsafe_method && self.binding_has_capabilities(call)? {
                    name.clone()
                } else {
                    format!("{name}.{ADDRESS}")
                }
            }
            CallCategory::FixedArray => name.clone(),
            CallCategory::Data => {
                let null_safe = self.has(ModifierKind::Nullable)
                    || (self.has(ModifierKind::Optional) && mode == GenerationMode::Normal);
                if !self.is_auto_size_result_out() && null_safe {
                    format!("{MEM_ADDRESS_SAFE}({name})")
                } else {
                    format!("{MEM_ADDRESS}({name})")
                }
            }
            CallCategory::Boolean4 => format!("{name} ? 1 : 0"),
            CallCategory::Passthrough => name.clone(),
        };

        trace!("call argument for `{}` in `{}`: {}", name, call.function, expr);
        Ok(expr)
    }

    fn binding_has_capabilities(&self, call: &CallContext<'_>) -> Result<bool, LowerError> {
        call.binding
            .map(|binding| binding.has_parameter_capabilities)
            .ok_or_else(|| LowerError::MissingBinding {
                origin: self.origin().in_function(call.function),
            })
    }

    /// Strip the array and variadic modifiers, turning this parameter into
    /// the form used by the plain overload.
    pub fn remove_array_modifiers(&mut self) -> &mut Self {
        let modifiers = self.qualified.modifiers_mut();

        // A variadic optional argument is never null-checked at the call site
        if modifiers.has(ModifierKind::Optional) && modifiers.has(ModifierKind::MultiType) {
            modifiers.remove(ModifierKind::Nullable);
        }

        let removed: Vec<ModifierKind> = ModifierKind::ARRAY_FAMILY
            .iter()
            .filter_map(|&kind| modifiers.remove(kind).map(|m| m.kind()))
            .collect();

        if !removed.is_empty() {
            debug!("stripped {:?} from parameter `{}`", removed, self.name);
        }
        self
    }
}

impl Qualified for Parameter {
    fn qualified(&self) -> &QualifiedType {
        &self.qualified
    }

    fn is_call_context(&self) -> bool {
        self.is_call_context
    }

    fn is_special(&self) -> bool {
        if self.qualified.is_special() {
            return true;
        }

        let ty = self.native_type();
        match ty.mapping {
            TypeMapping::Pointer(PointerMapping::OpaquePointer) => {
                (ty.is_object() || !self.has(ModifierKind::Nullable)) && !self.is_call_context
            }
            TypeMapping::Primitive(PrimitiveMapping::Boolean4) => true,
            TypeMapping::Void | TypeMapping::Primitive(_) | TypeMapping::Pointer(_) => false,
        }
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Parameter {}

impl Hash for Parameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
