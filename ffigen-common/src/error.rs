//! Error handling for the FFI binding generator
//!
//! This module defines the top-level error type and the diagnostic
//! reporting utilities used by every phase of generation.

use crate::origin::ElementOrigin;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main generator error type that encompasses all phases of generation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("Declaration error in {origin}: {message}")]
    DeclarationError {
        origin: ElementOrigin,
        message: String,
    },

    #[error("Lowering error in {origin}: {message}")]
    LoweringError {
        origin: ElementOrigin,
        message: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Internal generator error: {message}")]
    InternalError { message: String },
}

impl GeneratorError {
    pub fn declaration_error(message: String, origin: ElementOrigin) -> Self {
        GeneratorError::DeclarationError { origin, message }
    }

    pub fn lowering_error(message: String, origin: ElementOrigin) -> Self {
        GeneratorError::LoweringError { origin, message }
    }

    pub fn config_error(message: String) -> Self {
        GeneratorError::ConfigError { message }
    }

    /// The element this error points at, if any
    pub fn origin(&self) -> Option<&ElementOrigin> {
        match self {
            GeneratorError::DeclarationError { origin, .. }
            | GeneratorError::LoweringError { origin, .. } => Some(origin),
            GeneratorError::ConfigError { .. }
            | GeneratorError::IoError { .. }
            | GeneratorError::InternalError { .. } => None,
        }
    }
}

impl From<std::io::Error> for GeneratorError {
    fn from(err: std::io::Error) -> Self {
        GeneratorError::IoError {
            message: err.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A diagnostic message attached to a declaration element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub origin: Option<ElementOrigin>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    fn new(severity: Severity, message: String, origin: Option<ElementOrigin>) -> Self {
        Self {
            severity,
            message,
            origin,
            notes: Vec::new(),
        }
    }

    pub fn error(message: String, origin: Option<ElementOrigin>) -> Self {
        Self::new(Severity::Error, message, origin)
    }

    pub fn warning(message: String, origin: Option<ElementOrigin>) -> Self {
        Self::new(Severity::Warning, message, origin)
    }

    pub fn note(message: String, origin: Option<ElementOrigin>) -> Self {
        Self::new(Severity::Note, message, origin)
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }
}

impl From<&GeneratorError> for Diagnostic {
    fn from(err: &GeneratorError) -> Self {
        Diagnostic::error(err.to_string(), err.origin().cloned())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;

        for note in &self.notes {
            write!(f, "\n  note: {}", note)?;
        }

        Ok(())
    }
}

/// Error reporter for collecting and displaying diagnostics
#[derive(Debug, Default)]
pub struct ErrorReporter {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and update the counters
    pub fn report(&mut self, diagnostic: Diagnostic) -> &mut Diagnostic {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Note => {}
        }
        let index = self.diagnostics.len();
        self.diagnostics.push(diagnostic);
        &mut self.diagnostics[index]
    }

    pub fn error(&mut self, message: String, origin: Option<ElementOrigin>) -> &mut Diagnostic {
        self.report(Diagnostic::error(message, origin))
    }

    pub fn warning(&mut self, message: String, origin: Option<ElementOrigin>) -> &mut Diagnostic {
        self.report(Diagnostic::warning(message, origin))
    }

    pub fn note(&mut self, message: String, origin: Option<ElementOrigin>) -> &mut Diagnostic {
        self.report(Diagnostic::note(message, origin))
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Print all diagnostics to stderr
    pub fn print_diagnostics(&self) {
        for diagnostic in &self.diagnostics {
            eprintln!("{}", diagnostic);
        }
    }

    /// Create a summary string
    pub fn summary(&self) -> String {
        fn plural(n: usize) -> &'static str {
            if n == 1 { "" } else { "s" }
        }

        match (self.error_count, self.warning_count) {
            (0, 0) => "No errors or warnings".to_string(),
            (0, w) => format!("{} warning{}", w, plural(w)),
            (e, 0) => format!("{} error{}", e, plural(e)),
            (e, w) => format!("{} error{} and {} warning{}", e, plural(e), w, plural(w)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_diagnostic_from_error() {
        let origin = ElementOrigin::parameter("pData").in_function("glBufferData");
        let err = GeneratorError::lowering_error("no binding".to_string(), origin.clone());

        let diag = Diagnostic::from(&err);
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.origin, Some(origin));
        assert_eq!(
            diag.message,
            "Lowering error in parameter `pData` of `glBufferData`: no binding"
        );
    }

    #[test]
    fn test_error_reporter() {
        let mut reporter = ErrorReporter::new();
        assert!(!reporter.has_errors());

        reporter
            .error("Bad modifier".to_string(), Some(ElementOrigin::parameter("x")))
            .notes
            .push("remove `nullable`".to_string());
        assert!(reporter.has_errors());
        assert_eq!(reporter.error_count(), 1);
        assert_eq!(reporter.diagnostics()[0].notes.len(), 1);

        reporter.note("Just a note".to_string(), None);
        assert_eq!(reporter.error_count(), 1);
        assert_eq!(reporter.warning_count(), 0);
    }

    #[test]
    fn test_diagnostic_display_with_notes() {
        let diag = Diagnostic::warning("Unused links".to_string(), None)
            .with_note("link mode ignored".to_string());

        assert_eq!(diag.to_string(), "warning: Unused links\n  note: link mode ignored");
    }

    #[test]
    fn test_summary() {
        let mut reporter = ErrorReporter::new();
        assert_eq!(reporter.summary(), "No errors or warnings");

        reporter.error("Error 1".to_string(), None);
        assert_eq!(reporter.summary(), "1 error");

        reporter.error("Error 2".to_string(), None);
        assert_eq!(reporter.summary(), "2 errors");

        reporter.warning("Warning 1".to_string(), None);
        assert_eq!(reporter.summary(), "2 errors and 1 warning");
    }
}
