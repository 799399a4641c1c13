//! Declaration files
//!
//! A declaration file is JSON describing one API binding: the native types
//! it uses and the functions to lower. Types are resolved by key and shared
//! between every element that names them.

use ffigen_common::{ElementOrigin, GeneratorError, NativeType, SharedType};
use ffigen_lower::{ApiBinding, LinkMode, Modifier, NativeFunction, Parameter, ParameterType, ReturnValue};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Key that always resolves to the void type
const VOID_KEY: &str = "void";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclarationFile {
    #[serde(default)]
    pub binding: Option<ApiBinding>,
    #[serde(default)]
    pub types: BTreeMap<String, NativeType>,
    pub functions: Vec<FunctionDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    #[serde(default)]
    pub has_unsafe_method: bool,
    #[serde(default)]
    pub returns: ReturnDecl,
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnDecl {
    #[serde(rename = "type")]
    pub type_key: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl Default for ReturnDecl {
    fn default() -> Self {
        Self {
            type_key: VOID_KEY.to_string(),
            modifiers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterDecl {
    #[serde(rename = "type")]
    pub type_key: String,
    pub name: String,
    #[serde(default)]
    pub direction: ParameterType,
    #[serde(default)]
    pub documentation: String,
    #[serde(default)]
    pub links: String,
    #[serde(default)]
    pub link_mode: LinkMode,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Marks the implicit call-context parameter
    #[serde(default)]
    pub call_context: bool,
}

/// Load a declaration file from JSON
pub fn load_declarations(path: &Path) -> Result<DeclarationFile, GeneratorError> {
    let content = std::fs::read_to_string(path)?;
    parse_declarations(&content)
}

pub fn parse_declarations(content: &str) -> Result<DeclarationFile, GeneratorError> {
    serde_json::from_str(content)
        .map_err(|err| GeneratorError::config_error(format!("invalid declaration file: {err}")))
}

impl DeclarationFile {
    /// Validate the declared types and share one instance per key
    pub fn resolve_types(&self) -> Result<HashMap<String, SharedType>, GeneratorError> {
        let mut resolved = HashMap::with_capacity(self.types.len() + 1);
        resolved.insert(VOID_KEY.to_string(), NativeType::void().shared());

        for (key, ty) in &self.types {
            ty.validate()?;
            resolved.insert(key.clone(), ty.clone().shared());
        }
        debug!("resolved {} native types", resolved.len());
        Ok(resolved)
    }

    /// Build every declared function.
    ///
    /// Stops at the first invalid function; use [`FunctionDecl::build`]
    /// directly to collect every error.
    pub fn build_functions(&self) -> Result<Vec<NativeFunction>, GeneratorError> {
        let types = self.resolve_types()?;
        self.functions.iter().map(|decl| decl.build(&types)).collect()
    }
}

impl FunctionDecl {
    pub fn build(&self, types: &HashMap<String, SharedType>) -> Result<NativeFunction, GeneratorError> {
        let returns = ReturnValue::new(self.lookup(types, &self.returns.type_key, ElementOrigin::return_value())?)
            .with_modifiers(self.returns.modifiers.clone())
            .map_err(|err| self.in_function(err.into()))?;

        let mut parameters = Vec::with_capacity(self.parameters.len());
        for decl in &self.parameters {
            let ty = self.lookup(types, &decl.type_key, ElementOrigin::parameter(&decl.name))?;
            let param = if decl.call_context {
                Parameter::call_context(ty)
            } else {
                Parameter::new(ty, &decl.name, decl.direction, &decl.documentation)
                    .with_links(&decl.links, decl.link_mode)
            };
            let param = param
                .with_modifiers(decl.modifiers.clone())
                .map_err(|err| self.in_function(err.into()))?;
            parameters.push(param);
        }

        let function = NativeFunction::new(&self.name, returns, parameters)?;
        Ok(if self.has_unsafe_method {
            function.with_unsafe_method()
        } else {
            function
        })
    }

    fn lookup(
        &self,
        types: &HashMap<String, SharedType>,
        key: &str,
        origin: ElementOrigin,
    ) -> Result<SharedType, GeneratorError> {
        types.get(key).cloned().ok_or_else(|| {
            GeneratorError::declaration_error(
                format!("unknown native type `{key}`"),
                origin.in_function(&self.name),
            )
        })
    }

    /// Attach this function to the origin of a declaration error
    fn in_function(&self, err: GeneratorError) -> GeneratorError {
        match err {
            GeneratorError::DeclarationError { origin, message } => GeneratorError::DeclarationError {
                origin: origin.in_function(&self.name),
                message,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffigen_lower::{ModifierKind, Qualified};
    use pretty_assertions::assert_eq;

    const GL_DECLARATIONS: &str = r##"{
        "binding": { "name": "GL" },
        "types": {
            "GLenum": { "name": "GLenum", "kind": "primitive", "mapping": { "primitive": "int" } },
            "GLsizeiptr": { "name": "GLsizeiptr", "kind": "primitive", "mapping": { "primitive": "pointer" } },
            "void_p": { "name": "void", "kind": "pointer", "mapping": { "pointer": "data" } }
        },
        "functions": [
            {
                "name": "glBufferData",
                "parameters": [
                    { "type": "GLenum", "name": "target", "documentation": "the target",
                      "links": "#ARRAY_BUFFER #ELEMENT_ARRAY_BUFFER" },
                    { "type": "GLsizeiptr", "name": "size" },
                    { "type": "void_p", "name": "data", "modifiers": ["const", "optional"] },
                    { "type": "GLenum", "name": "usage" }
                ]
            }
        ]
    }"##;

    #[test]
    fn test_build_functions() {
        let file = parse_declarations(GL_DECLARATIONS).unwrap();
        let functions = file.build_functions().unwrap();
        assert_eq!(functions.len(), 1);

        let func = &functions[0];
        assert!(func.return_value().is_void());
        assert_eq!(
            func.parameter("target").unwrap().documentation(),
            "the target. One of: #ARRAY_BUFFER #ELEMENT_ARRAY_BUFFER"
        );
        assert!(func.parameter("data").unwrap().has(ModifierKind::Optional));
    }

    #[test]
    fn test_types_are_shared() {
        let file = parse_declarations(GL_DECLARATIONS).unwrap();
        let functions = file.build_functions().unwrap();
        let func = &functions[0];

        let target = func.parameter("target").unwrap().qualified().shared_type();
        let usage = func.parameter("usage").unwrap().qualified().shared_type();
        assert!(std::sync::Arc::ptr_eq(target, usage));
    }

    #[test]
    fn test_unknown_type() {
        let file = parse_declarations(
            r#"{ "functions": [ { "name": "glFinish", "parameters": [ { "type": "GLbogus", "name": "x" } ] } ] }"#,
        )
        .unwrap();

        let err = file.build_functions().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Declaration error in parameter `x` of `glFinish`: unknown native type `GLbogus`"
        );
    }

    #[test]
    fn test_invalid_modifier_reports_function() {
        let file = parse_declarations(
            r#"{
                "types": { "GLint": { "name": "GLint", "kind": "primitive", "mapping": { "primitive": "int" } } },
                "functions": [ { "name": "glLineWidth", "parameters": [
                    { "type": "GLint", "name": "width", "modifiers": ["nullable"] }
                ] } ]
            }"#,
        )
        .unwrap();

        let err = file.build_functions().unwrap_err();
        let origin = err.origin().unwrap();
        assert_eq!(origin.function.as_deref(), Some("glLineWidth"));
    }

    #[test]
    fn test_inconsistent_type_rejected() {
        let file = parse_declarations(
            r#"{
                "types": { "Bad": { "name": "Bad", "kind": "object", "mapping": { "pointer": "data_int" } } },
                "functions": []
            }"#,
        )
        .unwrap();

        assert!(matches!(file.build_functions(), Err(GeneratorError::ConfigError { .. })));
    }

    #[test]
    fn test_demo_declarations() {
        let file = parse_declarations(include_str!("../../demos/gl.json")).unwrap();
        let functions = file.build_functions().unwrap();
        let binding = file.binding.as_ref();
        assert_eq!(functions.len(), 3);

        let info_log = &functions[1];
        assert_eq!(
            info_log.native_call(binding, ffigen_lower::GenerationMode::Normal).unwrap(),
            "nglGetShaderInfoLog(maxLength, memAddress(length), memAddress(infoLog))"
        );

        let is_sync = &functions[2];
        assert!(is_sync.is_special());
        assert_eq!(
            is_sync.function_pointer_typedef(binding),
            "typedef jint (APIENTRY *glIsSyncPROC) (intptr_t);"
        );
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse_declarations("{ \"functions\": 3 }"),
            Err(GeneratorError::ConfigError { .. })
        ));
    }
}
