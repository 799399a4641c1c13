//! FFI binding generator - Common Types and Utilities
//! 
//! This crate contains the native type model consumed by the lowering core,
//! along with the error definitions and diagnostic reporting shared by
//! every component of the generator.

pub mod error;
pub mod types;
pub mod origin;

pub use error::{GeneratorError, ErrorReporter, Diagnostic, Severity};
pub use types::*;
pub use origin::ElementOrigin;
