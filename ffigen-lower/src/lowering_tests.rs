//! Lowering tests across parameters, return values and bindings

use crate::*;
use ffigen_common::{NativeType, PointerMapping, PrimitiveMapping, SharedType};
use pretty_assertions::assert_eq;
use std::collections::HashMap;

fn data_pointer() -> SharedType {
    NativeType::pointer("void", PointerMapping::Data).shared()
}

#[test]
fn test_struct_info_end_to_end() {
    let info = Parameter::new(
        NativeType::structure("VkInstanceCreateInfo", true).shared(),
        "info",
        ParameterType::In,
        "the instance create info",
    );
    let binding = ApiBinding::new("VK");
    let call = CallContext::new("vkCreateInstance", Some(&binding));

    assert_eq!(
        info.as_native_method_call_param(&call, GenerationMode::Normal).unwrap(),
        "info.address()"
    );
    assert_eq!(info.as_native_method_param(), "long info");
    assert_eq!(info.to_native_type(Some(&binding), false), "intptr_t");
    assert!(!info.is_special());
}

#[test]
fn test_lowering_is_deterministic() {
    let binding = ApiBinding::new("GL").with_parameter_capabilities();
    let call = CallContext::new("glGetIntegerv", Some(&binding)).with_unsafe_method();
    let params = Parameter::new(
        NativeType::pointer("GLint", PointerMapping::DataInt).shared(),
        "params",
        ParameterType::Out,
        "",
    )
    .with_modifiers([Modifier::Nullable, Modifier::Optional])
    .unwrap();

    for mode in [GenerationMode::Normal, GenerationMode::Alternative] {
        let first = params.as_native_method_call_param(&call, mode).unwrap();
        let second = params.as_native_method_call_param(&call, mode).unwrap();
        assert_eq!(first, second);
    }
    for pointer_mode in [false, true] {
        assert_eq!(
            params.to_native_type(Some(&binding), pointer_mode),
            params.to_native_type(Some(&binding), pointer_mode)
        );
        assert_eq!(params.to_native_type(None, pointer_mode), params.to_native_type(None, pointer_mode));
    }
}

#[test]
fn test_pointer_decoration_without_binding() {
    let cases = [
        (NativeType::pointer("GLuint", PointerMapping::DataInt), "GLuint *"),
        (NativeType::opaque("GLFWwindow"), "GLFWwindow *"),
        (NativeType::pointer("char*", PointerMapping::DataPointer), "char**"),
        (NativeType::char_sequence("GLchar"), "GLchar *"),
        (NativeType::array("GLfloat", PointerMapping::DataFloat, 16), "GLfloat *"),
    ];

    for (ty, expected) in cases {
        let p = Parameter::new(ty.shared(), "p", ParameterType::In, "");
        let lowered = p.to_native_type(None, false);
        assert!(lowered.ends_with('*'));
        assert_eq!(lowered, expected);
    }
}

#[test]
fn test_boundary_collapse_for_pointer_like_types() {
    let binding = ApiBinding::new("AL");
    let types = [
        NativeType::pointer("ALuint", PointerMapping::DataInt),
        NativeType::opaque("ALCdevice"),
        NativeType::object("cl_kernel"),
        NativeType::structure("VkSwapchainKHR", true),
        NativeType::primitive("size_t", PrimitiveMapping::Pointer),
    ];

    for ty in types {
        let name = ty.name.clone();
        let p = Parameter::new(ty.shared(), "p", ParameterType::In, "");
        let lowered = p.to_native_type(Some(&binding), false);
        assert_eq!(lowered, "intptr_t");
        assert!(!lowered.contains(&name));
    }
}

#[test]
fn test_optional_multi_type_never_keeps_nullable() {
    let combos = [
        vec![Modifier::Optional, Modifier::MultiType { types: vec![PointerMapping::DataInt] }],
        vec![
            Modifier::Optional,
            Modifier::Nullable,
            Modifier::MultiType { types: vec![PointerMapping::DataInt] },
        ],
        vec![
            Modifier::Optional,
            Modifier::Nullable,
            Modifier::Const,
            Modifier::PointerArray { element_type: "GLchar".to_string(), length_param: None },
            Modifier::MultiType { types: vec![PointerMapping::DataFloat, PointerMapping::DataDouble] },
        ],
    ];

    for modifiers in combos {
        let mut p = Parameter::new(data_pointer(), "data", ParameterType::In, "")
            .with_modifiers(modifiers)
            .unwrap();
        p.remove_array_modifiers();
        assert!(!p.has(ModifierKind::Nullable));
        assert!(!p.has_array_modifiers());
    }
}

#[test]
fn test_remove_array_modifiers_is_idempotent() {
    let mut p = Parameter::new(data_pointer(), "data", ParameterType::In, "")
        .with_modifiers(vec![
            Modifier::Const,
            Modifier::Optional,
            Modifier::Nullable,
            Modifier::SingleValue { name: "value".to_string() },
            Modifier::MultiType { types: vec![PointerMapping::DataInt] },
        ])
        .unwrap();

    p.remove_array_modifiers();
    let once = p.qualified().modifiers().clone();
    p.remove_array_modifiers();
    assert_eq!(p.qualified().modifiers(), &once);
    assert_eq!(
        once.iter().map(Modifier::kind).collect::<Vec<_>>(),
        vec![ModifierKind::Const, ModifierKind::Optional]
    );
}

#[test]
fn test_auto_size_out_null_safety_precedence() {
    // Auto-size output wins over nullable and optional in every mode
    let length = Parameter::new(
        NativeType::pointer("GLsizei", PointerMapping::DataInt).shared(),
        "length",
        ParameterType::Out,
        "",
    )
    .with_modifiers([Modifier::AutoSizeResult, Modifier::Nullable, Modifier::Optional])
    .unwrap();
    let call = CallContext::new("glGetShaderInfoLog", None);

    assert_eq!(
        length.as_native_method_call_param(&call, GenerationMode::Alternative).unwrap(),
        "memAddress(length)"
    );
    assert_eq!(
        length.as_native_method_call_param(&call, GenerationMode::Normal).unwrap(),
        "memAddress(length)"
    );
}

#[test]
fn test_boolean4_flag() {
    let flag = Parameter::new(
        NativeType::primitive("VkBool32", PrimitiveMapping::Boolean4).shared(),
        "flag",
        ParameterType::In,
        "",
    );
    let binding = ApiBinding::new("VK");
    let call = CallContext::new("vkCmdSetDepthTestEnable", Some(&binding));

    assert_eq!(flag.as_native_method_call_param(&call, GenerationMode::Normal).unwrap(), "flag ? 1 : 0");
    assert!(flag.is_special());
}

#[test]
fn test_identity_semantics() {
    let ty = data_pointer();

    let mut by_name = HashMap::new();
    by_name.insert(Parameter::new(ty.clone(), "data", ParameterType::In, "the data"), 0);
    let replaced = by_name.insert(
        Parameter::new(NativeType::opaque("GLsync").shared(), "data", ParameterType::Out, "")
            .with_modifiers(Modifier::Nullable)
            .unwrap(),
        1,
    );
    assert_eq!(replaced, Some(0));
    assert_eq!(by_name.len(), 1);

    let mut by_type = HashMap::new();
    by_type.insert(ReturnValue::new(ty.clone()), "plain");
    let replaced = by_type.insert(Modifier::Nullable.returns(&ty).unwrap(), "nullable");
    assert_eq!(replaced, Some("plain"));

    // Equality looks at the type itself, not the shared allocation
    let copy = NativeType::pointer("void", PointerMapping::Data).shared();
    assert!(by_type.contains_key(&ReturnValue::new(copy)));
}

#[test]
fn test_shared_type_across_threads() {
    let ty = NativeType::pointer("GLfloat", PointerMapping::DataFloat).shared();

    let handles: Vec<_> = ["v0", "v1", "v2"]
        .into_iter()
        .map(|name| {
            let ty = ty.clone();
            std::thread::spawn(move || {
                let p = Parameter::new(ty, name, ParameterType::In, "").with_modifiers(Modifier::Const).unwrap();
                p.to_native_type(None, false)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "const GLfloat *");
    }
}
