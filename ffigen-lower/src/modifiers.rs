//! Modifiers attachable to parameters and return values
//!
//! A qualified element carries at most one modifier of each kind. Modifiers
//! are attached while the element is declared; afterwards the only mutation
//! is the array-family removal performed by
//! [`Parameter::remove_array_modifiers`](crate::Parameter::remove_array_modifiers).

use ffigen_common::{NativeType, PointerMapping, TypeMapping};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Discriminant of a [`Modifier`], used as the key of a [`Modifiers`] set
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    Const,
    Nullable,
    Optional,
    AutoSizeResult,
    PointerArray,
    Return,
    SingleValue,
    MultiType,
}

impl ModifierKind {
    /// Modifiers that only exist to derive array and variadic overloads
    pub const ARRAY_FAMILY: [ModifierKind; 4] = [
        ModifierKind::PointerArray,
        ModifierKind::Return,
        ModifierKind::SingleValue,
        ModifierKind::MultiType,
    ];
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModifierKind::Const => write!(f, "const"),
            ModifierKind::Nullable => write!(f, "nullable"),
            ModifierKind::Optional => write!(f, "optional"),
            ModifierKind::AutoSizeResult => write!(f, "AutoSizeResult"),
            ModifierKind::PointerArray => write!(f, "PointerArray"),
            ModifierKind::Return => write!(f, "Return"),
            ModifierKind::SingleValue => write!(f, "SingleValue"),
            ModifierKind::MultiType => write!(f, "MultiType"),
        }
    }
}

/// The element a modifier is being attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierTarget {
    Parameter,
    ReturnValue,
}

/// A qualifier on a parameter or return value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Const,
    /// The argument may be null
    Nullable,
    /// The argument may be omitted in normal generation mode
    Optional,
    /// Output parameter receiving the size of the returned buffer
    AutoSizeResult,
    /// Pointer to an array of pointers, mirrored as an array of the element type
    PointerArray {
        element_type: String,
        #[serde(default)]
        length_param: Option<String>,
    },
    /// Output parameter that an overload returns as its result
    Return {
        length_param: String,
        #[serde(default)]
        max_length: Option<String>,
    },
    /// Buffer parameter that an overload accepts as a single value
    SingleValue { name: String },
    /// Untyped buffer accepted as any of the given element mappings
    MultiType { types: Vec<PointerMapping> },
}

impl Modifier {
    pub fn kind(&self) -> ModifierKind {
        match self {
            Modifier::Const => ModifierKind::Const,
            Modifier::Nullable => ModifierKind::Nullable,
            Modifier::Optional => ModifierKind::Optional,
            Modifier::AutoSizeResult => ModifierKind::AutoSizeResult,
            Modifier::PointerArray { .. } => ModifierKind::PointerArray,
            Modifier::Return { .. } => ModifierKind::Return,
            Modifier::SingleValue { .. } => ModifierKind::SingleValue,
            Modifier::MultiType { .. } => ModifierKind::MultiType,
        }
    }

    /// Whether this modifier alone forces specialized generation
    pub fn is_special(&self) -> bool {
        match self {
            Modifier::Const | Modifier::Nullable | Modifier::Optional => false,
            Modifier::AutoSizeResult
            | Modifier::PointerArray { .. }
            | Modifier::Return { .. }
            | Modifier::SingleValue { .. }
            | Modifier::MultiType { .. } => true,
        }
    }

    /// Check that this modifier can qualify `native_type` on `target`.
    /// Returns the reason on failure.
    pub fn validate(&self, native_type: &NativeType, target: ModifierTarget) -> Result<(), String> {
        let parameter_only = !matches!(self, Modifier::Const | Modifier::Nullable);
        if parameter_only && target == ModifierTarget::ReturnValue {
            return Err("only parameters accept this modifier".to_string());
        }

        match self {
            Modifier::Const => Ok(()),
            Modifier::Nullable
            | Modifier::Optional
            | Modifier::PointerArray { .. }
            | Modifier::Return { .. }
            | Modifier::SingleValue { .. } => {
                if native_type.is_pointer_kind() {
                    Ok(())
                } else {
                    Err(format!("`{}` is not a pointer type", native_type.name))
                }
            }
            Modifier::AutoSizeResult => match native_type.mapping {
                TypeMapping::Primitive(p) if p.is_integer() => Ok(()),
                _ if native_type.is_pointer_data() => Ok(()),
                _ => Err(format!(
                    "`{}` is neither an integer nor a data pointer",
                    native_type.name
                )),
            },
            Modifier::MultiType { types } => {
                if !native_type.is_pointer_data() {
                    Err(format!("`{}` is not a data pointer", native_type.name))
                } else if types.is_empty() {
                    Err("at least one element type is required".to_string())
                } else {
                    Ok(())
                }
            }
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())
    }
}

/// Set of modifiers, unique per kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modifiers {
    entries: BTreeMap<ModifierKind, Modifier>,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, kind: ModifierKind) -> bool {
        self.entries.contains_key(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modifier> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_special(&self) -> bool {
        self.entries.values().any(Modifier::is_special)
    }

    /// Insert a modifier, handing it back if its kind is already present
    pub(crate) fn insert(&mut self, modifier: Modifier) -> Result<(), Modifier> {
        let kind = modifier.kind();
        if self.entries.contains_key(&kind) {
            return Err(modifier);
        }
        self.entries.insert(kind, modifier);
        Ok(())
    }

    pub(crate) fn remove(&mut self, kind: ModifierKind) -> Option<Modifier> {
        self.entries.remove(&kind)
    }
}
