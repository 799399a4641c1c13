//! FFI binding generator - Call-Boundary Lowering
//! 
//! This crate qualifies the parameters and return values of bound functions
//! and lowers them to the native call boundary:
//! 
//! - Modifiers: qualifiers attached to a parameter or return value
//! - Qualified types: specialness and native declaration types
//! - Parameters: prototype declarations and call-site expressions
//! - Return values and the `returns` composition helper
//! - Native functions: prototypes, calls and base overloads

pub mod binding;
pub mod dsl;
pub mod error;
pub mod function;
pub mod links;
pub mod modifiers;
pub mod parameter;
pub mod qualified;
pub mod return_value;
#[cfg(test)]
mod lowering_tests;

pub use binding::{ApiBinding, CallContext, GenerationMode};
pub use dsl::{IntoModifiers, Returns};
pub use error::LowerError;
pub use function::NativeFunction;
pub use links::LinkMode;
pub use modifiers::{Modifier, ModifierKind, ModifierTarget, Modifiers};
pub use parameter::{Parameter, ParameterType};
pub use qualified::{Qualified, QualifiedType};
pub use return_value::ReturnValue;
