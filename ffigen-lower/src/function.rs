//! Native functions
//!
//! Groups the return value and the ordered parameters of one bound
//! function and renders the native-side text built from them.

use crate::binding::{ApiBinding, CallContext, GenerationMode};
use crate::error::LowerError;
use crate::parameter::Parameter;
use crate::qualified::Qualified;
use crate::return_value::ReturnValue;
use ffigen_common::ElementOrigin;
use log::debug;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct NativeFunction {
    pub name: String,
    /// An unsafe variant taking raw handles is generated as well
    pub has_unsafe_method: bool,
    return_value: ReturnValue,
    parameters: Vec<Parameter>,
}

impl NativeFunction {
    pub fn new(name: &str, return_value: ReturnValue, parameters: Vec<Parameter>) -> Result<Self, LowerError> {
        if let Some(reason) = return_value.native_type().inconsistency() {
            return Err(LowerError::InconsistentType {
                origin: ElementOrigin::return_value().in_function(name),
                reason,
            });
        }

        let mut seen = HashSet::with_capacity(parameters.len());
        for param in &parameters {
            if let Some(reason) = param.native_type().inconsistency() {
                return Err(LowerError::InconsistentType {
                    origin: param.origin().in_function(name),
                    reason,
                });
            }
            if !seen.insert(param) {
                return Err(LowerError::DuplicateParameter {
                    name: param.name().to_string(),
                    function: name.to_string(),
                });
            }
        }

        Ok(Self {
            name: name.to_string(),
            has_unsafe_method: false,
            return_value,
            parameters,
        })
    }

    pub fn with_unsafe_method(mut self) -> Self {
        self.has_unsafe_method = true;
        self
    }

    pub fn return_value(&self) -> &ReturnValue {
        &self.return_value
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    pub fn call_context<'a>(&'a self, binding: Option<&'a ApiBinding>) -> CallContext<'a> {
        CallContext {
            function: &self.name,
            has_unsafe_method: self.has_unsafe_method,
            binding,
        }
    }

    /// Whether any element rules out a direct passthrough
    pub fn is_special(&self) -> bool {
        self.return_value.is_special() || self.parameters.iter().any(Qualified::is_special)
    }

    /// Whether array or variadic overloads can be derived from this function
    pub fn has_array_overloads(&self) -> bool {
        self.parameters.iter().any(Parameter::has_array_modifiers)
    }

    /// Managed method declaration, e.g. `void glBufferData(int target, long size, ByteBuffer data, int usage)`
    pub fn java_method_declaration(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .filter(|p| !p.is_call_context())
            .map(Parameter::as_java_method_param)
            .collect();

        format!("{} {}({})", self.return_value.java_method_type(), self.name, params.join(", "))
    }

    /// Native method declaration, e.g. `void nglBufferData(int target, long size, long data, int usage)`
    pub fn native_method_declaration(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .filter(|p| !p.is_call_context())
            .map(Parameter::as_native_method_param)
            .collect();

        format!(
            "{} n{}({})",
            self.return_value.native_type().native_method_type(),
            self.name,
            params.join(", ")
        )
    }

    /// Function pointer typedef used to invoke the native function
    pub fn function_pointer_typedef(&self, binding: Option<&ApiBinding>) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| p.to_native_type(binding, false))
            .collect();
        let params = if params.is_empty() {
            "void".to_string()
        } else {
            params.join(", ")
        };

        format!(
            "typedef {} (APIENTRY *{}PROC) ({});",
            self.return_value.to_native_type(binding, false),
            self.name,
            params
        )
    }

    /// Native call expression passing every non-context parameter
    pub fn native_call(&self, binding: Option<&ApiBinding>, mode: GenerationMode) -> Result<String, LowerError> {
        let call = self.call_context(binding);
        let args = self
            .parameters
            .iter()
            .filter(|p| !p.is_call_context())
            .map(|p| p.as_native_method_call_param(&call, mode))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(format!("n{}({})", self.name, args.join(", ")))
    }

    /// The plain overload, with every array and variadic modifier stripped
    pub fn base_overload(&self) -> NativeFunction {
        let mut base = self.clone();
        for param in &mut base.parameters {
            param.remove_array_modifiers();
        }
        debug!("derived base overload of `{}`", self.name);
        base
    }
}
