//! Native type model
//!
//! This module describes the native types that bound functions declare:
//! their category, how they map onto the call boundary, and the textual
//! forms the generator emits for them. Types are immutable once built and
//! are shared between every parameter and return value that uses them.

use crate::error::GeneratorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A native type shared by reference between qualified elements
pub type SharedType = Arc<NativeType>;

/// Mappings for types passed by value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveMapping {
    /// 1-byte boolean
    Boolean,
    /// 4-byte boolean (e.g. `BOOL`, `VkBool32`), converted at the boundary
    Boolean4,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    /// Pointer-sized integer (`size_t`, `intptr_t`, handles passed as values)
    Pointer,
}

impl PrimitiveMapping {
    /// Boundary-safe primitive name
    pub fn jni_function_type(&self) -> &'static str {
        match self {
            PrimitiveMapping::Boolean => "jboolean",
            PrimitiveMapping::Boolean4 => "jint",
            PrimitiveMapping::Byte => "jbyte",
            PrimitiveMapping::Short => "jshort",
            PrimitiveMapping::Int => "jint",
            PrimitiveMapping::Long => "jlong",
            PrimitiveMapping::Float => "jfloat",
            PrimitiveMapping::Double => "jdouble",
            PrimitiveMapping::Pointer => "jlong",
        }
    }

    /// Type name used in generated call prototypes
    pub fn native_method_type(&self) -> &'static str {
        match self {
            PrimitiveMapping::Boolean => "boolean",
            PrimitiveMapping::Boolean4 => "int",
            PrimitiveMapping::Byte => "byte",
            PrimitiveMapping::Short => "short",
            PrimitiveMapping::Int => "int",
            PrimitiveMapping::Long => "long",
            PrimitiveMapping::Float => "float",
            PrimitiveMapping::Double => "double",
            PrimitiveMapping::Pointer => "long",
        }
    }

    /// Type name on the managed side of the binding
    pub fn java_method_type(&self) -> &'static str {
        match self {
            PrimitiveMapping::Boolean | PrimitiveMapping::Boolean4 => "boolean",
            PrimitiveMapping::Byte => "byte",
            PrimitiveMapping::Short => "short",
            PrimitiveMapping::Int => "int",
            PrimitiveMapping::Long | PrimitiveMapping::Pointer => "long",
            PrimitiveMapping::Float => "float",
            PrimitiveMapping::Double => "double",
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            PrimitiveMapping::Byte
                | PrimitiveMapping::Short
                | PrimitiveMapping::Int
                | PrimitiveMapping::Long
                | PrimitiveMapping::Pointer
        )
    }
}

/// Mappings for types passed by address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerMapping {
    /// Address the generator never looks through
    OpaquePointer,
    /// Address of a struct definition known to the generator
    Struct,
    /// Untyped data (`void *`)
    Data,
    DataByte,
    DataShort,
    DataInt,
    DataLong,
    DataFloat,
    DataDouble,
    /// Array of pointers
    DataPointer,
}

impl PointerMapping {
    /// True for every mapping that points at raw element data
    pub fn is_data(&self) -> bool {
        !matches!(self, PointerMapping::OpaquePointer | PointerMapping::Struct)
    }

    /// Managed buffer type for data mappings, a raw address otherwise
    pub fn java_method_type(&self) -> &'static str {
        match self {
            PointerMapping::OpaquePointer | PointerMapping::Struct => "long",
            PointerMapping::Data | PointerMapping::DataByte => "ByteBuffer",
            PointerMapping::DataShort => "ShortBuffer",
            PointerMapping::DataInt => "IntBuffer",
            PointerMapping::DataLong => "LongBuffer",
            PointerMapping::DataFloat => "FloatBuffer",
            PointerMapping::DataDouble => "DoubleBuffer",
            PointerMapping::DataPointer => "PointerBuffer",
        }
    }
}

/// How a type crosses the native call boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeMapping {
    Void,
    Primitive(PrimitiveMapping),
    Pointer(PointerMapping),
}

impl TypeMapping {
    pub fn jni_function_type(&self) -> &'static str {
        match self {
            TypeMapping::Void => "void",
            TypeMapping::Primitive(p) => p.jni_function_type(),
            TypeMapping::Pointer(_) => "jlong",
        }
    }

    pub fn native_method_type(&self) -> &'static str {
        match self {
            TypeMapping::Void => "void",
            TypeMapping::Primitive(p) => p.native_method_type(),
            TypeMapping::Pointer(_) => "long",
        }
    }

    pub fn java_method_type(&self) -> &'static str {
        match self {
            TypeMapping::Void => "void",
            TypeMapping::Primitive(p) => p.java_method_type(),
            TypeMapping::Pointer(p) => p.java_method_type(),
        }
    }
}

/// Category of a declared native type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeKind {
    Void,
    Primitive,
    /// Plain pointer type
    Pointer,
    /// Pointer to a struct definition
    Struct,
    /// Handle to a wrapped native object
    Object,
    /// Fixed-size array, decays to its own address
    Array { length: u32 },
    /// Pointer to encoded character data
    CharSequence,
}

/// A declared native type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NativeType {
    /// Declaration name as written in native headers
    pub name: String,
    pub kind: NativeKind,
    pub mapping: TypeMapping,
    /// The canonical form already denotes a pointer (e.g. `HWND`, `cl_mem`)
    #[serde(default)]
    pub includes_pointer: bool,
}

impl NativeType {
    pub fn void() -> Self {
        Self {
            name: "void".to_string(),
            kind: NativeKind::Void,
            mapping: TypeMapping::Void,
            includes_pointer: false,
        }
    }

    pub fn primitive(name: &str, mapping: PrimitiveMapping) -> Self {
        Self {
            name: name.to_string(),
            kind: NativeKind::Primitive,
            mapping: TypeMapping::Primitive(mapping),
            includes_pointer: false,
        }
    }

    pub fn pointer(name: &str, mapping: PointerMapping) -> Self {
        Self {
            name: name.to_string(),
            kind: NativeKind::Pointer,
            mapping: TypeMapping::Pointer(mapping),
            includes_pointer: false,
        }
    }

    /// Opaque pointer, e.g. `void` declared as `void *`
    pub fn opaque(name: &str) -> Self {
        Self::pointer(name, PointerMapping::OpaquePointer)
    }

    pub fn structure(name: &str, includes_pointer: bool) -> Self {
        Self {
            name: name.to_string(),
            kind: NativeKind::Struct,
            mapping: TypeMapping::Pointer(PointerMapping::Struct),
            includes_pointer,
        }
    }

    /// Wrapped object handles are pointer typedefs
    pub fn object(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: NativeKind::Object,
            mapping: TypeMapping::Pointer(PointerMapping::OpaquePointer),
            includes_pointer: true,
        }
    }

    pub fn array(name: &str, mapping: PointerMapping, length: u32) -> Self {
        Self {
            name: name.to_string(),
            kind: NativeKind::Array { length },
            mapping: TypeMapping::Pointer(mapping),
            includes_pointer: false,
        }
    }

    pub fn char_sequence(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: NativeKind::CharSequence,
            mapping: TypeMapping::Pointer(PointerMapping::DataByte),
            includes_pointer: false,
        }
    }

    pub fn shared(self) -> SharedType {
        Arc::new(self)
    }

    /// Boundary-safe primitive name
    pub fn jni_function_type(&self) -> &'static str {
        self.mapping.jni_function_type()
    }

    /// Managed-side type name; structs and objects use their wrapper class
    pub fn java_method_type(&self) -> &str {
        match self.kind {
            NativeKind::Struct | NativeKind::Object => &self.name,
            _ => self.mapping.java_method_type(),
        }
    }

    /// Type name used in generated call prototypes
    pub fn native_method_type(&self) -> &'static str {
        self.mapping.native_method_type()
    }

    /// Every category that is passed by address
    pub fn is_pointer_kind(&self) -> bool {
        matches!(
            self.kind,
            NativeKind::Pointer
                | NativeKind::Struct
                | NativeKind::Object
                | NativeKind::Array { .. }
                | NativeKind::CharSequence
        )
    }

    /// Points at raw element data rather than a struct, array or object
    pub fn is_pointer_data(&self) -> bool {
        self.is_pointer_kind() && matches!(self.mapping, TypeMapping::Pointer(m) if m.is_data())
    }

    /// Collapses to an address-sized handle at the call boundary
    pub fn is_pointer_like(&self) -> bool {
        self.mapping == TypeMapping::Primitive(PrimitiveMapping::Pointer) || self.is_pointer_kind()
    }

    pub fn is_struct(&self) -> bool {
        self.kind == NativeKind::Struct
    }

    pub fn is_object(&self) -> bool {
        self.kind == NativeKind::Object
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, NativeKind::Array { .. })
    }

    /// Describe why the category and the mapping disagree, if they do
    pub fn inconsistency(&self) -> Option<String> {
        let consistent = match (self.kind, self.mapping) {
            (NativeKind::Void, TypeMapping::Void) => true,
            (NativeKind::Primitive, TypeMapping::Primitive(_)) => true,
            (NativeKind::Pointer, TypeMapping::Pointer(m)) => m != PointerMapping::Struct,
            (NativeKind::Struct, TypeMapping::Pointer(m)) => m == PointerMapping::Struct,
            (NativeKind::Object, TypeMapping::Pointer(m)) => m == PointerMapping::OpaquePointer,
            (NativeKind::Array { .. }, TypeMapping::Pointer(m)) => m.is_data(),
            (NativeKind::CharSequence, TypeMapping::Pointer(m)) => m == PointerMapping::DataByte,
            _ => false,
        };

        if !consistent {
            return Some(format!(
                "native type `{}` has kind {:?} incompatible with mapping {:?}",
                self.name, self.kind, self.mapping
            ));
        }

        if let NativeKind::Array { length: 0 } = self.kind {
            return Some(format!("native array type `{}` must have a non-zero length", self.name));
        }

        None
    }

    /// Check that the category and the mapping agree.
    ///
    /// The constructors always produce consistent types, but types loaded
    /// from declaration files are checked before use.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        match self.inconsistency() {
            Some(message) => Err(GeneratorError::config_error(message)),
            None => Ok(()),
        }
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
