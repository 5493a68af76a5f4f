//! Typed package description records.
//!
//! A [`Package`] is built once from a structurally valid document and never
//! mutated afterwards. Field names follow the document keys (`dependsOn`,
//! `impl`) through serde renames.

mod ordered;

pub use ordered::{OrderedMap, OrderedSet};

use serde::{Deserialize, Serialize};

/// A complete package description.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Package {
    /// Package identifier, also used in output file names.
    pub name: String,
    pub exports: Exports,
    pub storage: Storage,
    #[serde(rename = "impl")]
    pub implementation: Implementation,
    #[serde(rename = "dependsOn", default)]
    pub depends_on: Vec<Dependency>,
}

/// Exported ABI surface.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Exports {
    pub functions: Vec<Function>,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// An exported function.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Function {
    pub name: String,
    /// Input type descriptors in declaration order.
    pub inputs: Vec<String>,
    /// Output type descriptors in declaration order.
    pub outputs: Vec<String>,
    /// Dispatch selector, expected as `0x` followed by 8 hex digits.
    pub selector: String,
}

/// An exported event.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Event {
    pub name: String,
    pub inputs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Storage {
    pub layout: Vec<StorageSlot>,
}

/// A declared storage slot.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StorageSlot {
    pub slot: String,
    #[serde(rename = "type")]
    pub slot_type: String,
}

/// Implementation side of the package: which symbol implements each
/// function, what each symbol touches, and the facet grouping them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Implementation {
    /// Function name → implementation symbol, in document order.
    pub bindings: OrderedMap<String>,
    /// Implementation symbol → storage footprint, in document order.
    pub footprints: OrderedMap<Footprint>,
    pub facet: String,
}

/// Slots an implementation symbol reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Footprint {
    #[serde(default)]
    pub reads: Vec<String>,
    #[serde(default)]
    pub writes: Vec<String>,
}

/// A package this one depends on.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Dependency {
    pub name: String,
}

impl Package {
    /// Whether an exported function with this name exists.
    pub fn exports_function(&self, name: &str) -> bool {
        self.exports.functions.iter().any(|f| f.name == name)
    }

    /// Whether a storage slot with this identifier is declared.
    pub fn declares_slot(&self, slot: &str) -> bool {
        self.storage.layout.iter().any(|s| s.slot == slot)
    }
}
