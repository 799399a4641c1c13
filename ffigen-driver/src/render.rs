//! Lowering report
//!
//! Renders the text of each function: the managed method declaration, the
//! native method declaration, the function pointer typedef and the call
//! expression.

use ffigen_common::{Diagnostic, ErrorReporter, GeneratorError};
use ffigen_lower::{ApiBinding, GenerationMode, NativeFunction};

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub mode: GenerationMode,
    /// Also render the plain overload of functions with array modifiers
    pub base_overloads: bool,
}

pub fn render_function(
    out: &mut String,
    function: &NativeFunction,
    binding: Option<&ApiBinding>,
    mode: GenerationMode,
    label: &str,
) -> Result<(), GeneratorError> {
    let routing = if function.is_special() { "special" } else { "passthrough" };
    let call = function.native_call(binding, mode)?;

    out.push_str(&format!("// {}{} [{}]\n", function.name, label, routing));
    out.push_str(&format!("managed: {}\n", function.java_method_declaration()));
    out.push_str(&format!("{}\n", function.native_method_declaration()));
    out.push_str(&format!("{}\n", function.function_pointer_typedef(binding)));
    out.push_str(&format!("call: {}\n", call));
    Ok(())
}

/// Render every function, collecting failures into `reporter`
pub fn render_all(
    functions: &[NativeFunction],
    binding: Option<&ApiBinding>,
    options: RenderOptions,
    reporter: &mut ErrorReporter,
) -> String {
    let mut out = String::new();

    for function in functions {
        if let Err(err) = render_function(&mut out, function, binding, options.mode, "") {
            reporter.report(Diagnostic::from(&err));
            continue;
        }

        if options.base_overloads && function.has_array_overloads() {
            let base = function.base_overload();
            if let Err(err) = render_function(&mut out, &base, binding, options.mode, " (base overload)") {
                reporter.report(Diagnostic::from(&err));
            }
        }
        out.push('\n');
    }

    out
}
