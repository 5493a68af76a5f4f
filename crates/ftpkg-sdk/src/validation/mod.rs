//! Semantic validation of a structurally valid [`Package`].
//!
//! Checks run in a fixed order and stop at the first violation:
//!
//! 1. every binding key names an exported function
//! 2. selectors are pairwise distinct, compared case-insensitively
//! 3. every selector is `0x` followed by 8 hex digits
//! 4. every footprint slot is declared in the storage layout

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::Package;

static SELECTOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[0-9a-f]{8}$").expect("selector regex is valid"));

/// Which side of a footprint referenced a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FootprintAccess {
    Read,
    Write,
}

impl fmt::Display for FootprintAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FootprintAccess::Read => write!(f, "reads"),
            FootprintAccess::Write => write!(f, "writes"),
        }
    }
}

/// First semantic inconsistency found in a package.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Binding refers to non-exported function: {function}")]
    Binding { function: String },

    #[error("Duplicate function selector detected: {selector}")]
    DuplicateSelector { selector: String },

    #[error("Bad selector format (want 0x + 8 hex): {selector}")]
    SelectorFormat { selector: String },

    #[error("Footprint {access} unknown slot: {implementation} -> {slot}")]
    UnknownSlot {
        implementation: String,
        slot: String,
        access: FootprintAccess,
    },
}

impl ValidationError {
    /// Machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::Binding { .. } => "BINDING_ERROR",
            ValidationError::DuplicateSelector { .. } => "DUPLICATE_SELECTOR",
            ValidationError::SelectorFormat { .. } => "SELECTOR_FORMAT",
            ValidationError::UnknownSlot { .. } => "UNKNOWN_SLOT",
        }
    }
}

/// Run all semantic checks, failing fast on the first violation.
pub fn validate_package(pkg: &Package) -> Result<(), ValidationError> {
    check_bindings(pkg)?;
    check_selector_uniqueness(pkg)?;
    check_selector_format(pkg)?;
    check_footprints(pkg)?;

    tracing::debug!(package = %pkg.name, "Package passed semantic validation");
    Ok(())
}

fn check_bindings(pkg: &Package) -> Result<(), ValidationError> {
    match pkg
        .implementation
        .bindings
        .keys()
        .find(|name| !pkg.exports_function(name))
    {
        Some(name) => Err(ValidationError::Binding {
            function: name.to_string(),
        }),
        None => Ok(()),
    }
}

fn check_selector_uniqueness(pkg: &Package) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for f in &pkg.exports.functions {
        let selector = f.selector.to_lowercase();
        if !seen.insert(selector.clone()) {
            return Err(ValidationError::DuplicateSelector { selector });
        }
    }
    Ok(())
}

fn check_selector_format(pkg: &Package) -> Result<(), ValidationError> {
    for f in &pkg.exports.functions {
        let selector = f.selector.to_lowercase();
        if !SELECTOR_RE.is_match(&selector) {
            return Err(ValidationError::SelectorFormat { selector });
        }
    }
    Ok(())
}

fn check_footprints(pkg: &Package) -> Result<(), ValidationError> {
    for (implementation, footprint) in pkg.implementation.footprints.iter() {
        let accesses = footprint
            .reads
            .iter()
            .map(|s| (s, FootprintAccess::Read))
            .chain(footprint.writes.iter().map(|s| (s, FootprintAccess::Write)));

        for (slot, access) in accesses {
            if !pkg.declares_slot(slot) {
                return Err(ValidationError::UnknownSlot {
                    implementation: implementation.to_string(),
                    slot: slot.clone(),
                    access,
                });
            }
        }
    }
    Ok(())
}
