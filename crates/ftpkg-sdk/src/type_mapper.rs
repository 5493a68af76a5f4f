//! Solidity type descriptor to B type symbol mapping.
//!
//! The mapping is total: anything outside the closed set of recognized shapes
//! becomes [`TypeSymbol::Opaque`]. Distinct unrecognized types are not told
//! apart.

use std::fmt;

use serde::{Serialize, Serializer};

/// Unsigned integer spellings that map to `t_UINT`.
const UINT_WIDTHS: &[&str] = &[
    "uint", "uint8", "uint16", "uint32", "uint64", "uint128", "uint256",
];

const NESTED_ADDR_MAPPING_PREFIX: &str = "mapping(address=>mapping(address=>uint";
const ADDR_MAPPING_PREFIX: &str = "mapping(address=>uint";

/// B type symbol for a source type descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeSymbol {
    Addr,
    Uint,
    MapAddrUint,
    MapAddrAddrUint,
    Opaque,
}

impl TypeSymbol {
    pub const ALL: [TypeSymbol; 5] = [
        TypeSymbol::Addr,
        TypeSymbol::Uint,
        TypeSymbol::MapAddrUint,
        TypeSymbol::MapAddrAddrUint,
        TypeSymbol::Opaque,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TypeSymbol::Addr => "t_ADDR",
            TypeSymbol::Uint => "t_UINT",
            TypeSymbol::MapAddrUint => "t_MAP_ADDR_UINT",
            TypeSymbol::MapAddrAddrUint => "t_MAP_ADDR_ADDR_UINT",
            TypeSymbol::Opaque => "t_OPAQUE",
        }
    }

    pub fn is_mapping(self) -> bool {
        matches!(self, TypeSymbol::MapAddrUint | TypeSymbol::MapAddrAddrUint)
    }

    /// Atom symbols a composite symbol is built from. Empty for atoms.
    pub fn atoms(self) -> &'static [TypeSymbol] {
        match self {
            TypeSymbol::MapAddrUint | TypeSymbol::MapAddrAddrUint => {
                &[TypeSymbol::Addr, TypeSymbol::Uint]
            }
            _ => &[],
        }
    }
}

impl fmt::Display for TypeSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TypeSymbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Map a source type descriptor to its B type symbol.
///
/// All whitespace is removed before matching, so `mapping(address => uint256)`
/// and `mapping(address=>uint256)` are equivalent. Mapping shapes are matched by
/// prefix and checked nested-first.
pub fn map_type(descriptor: &str) -> TypeSymbol {
    let t: String = descriptor.chars().filter(|c| !c.is_whitespace()).collect();

    if t == "address" {
        return TypeSymbol::Addr;
    }
    if UINT_WIDTHS.contains(&t.as_str()) {
        return TypeSymbol::Uint;
    }
    if t.starts_with(NESTED_ADDR_MAPPING_PREFIX) {
        return TypeSymbol::MapAddrAddrUint;
    }
    if t.starts_with(ADDR_MAPPING_PREFIX) {
        return TypeSymbol::MapAddrUint;
    }
    TypeSymbol::Opaque
}

/// Map an ordered list of descriptors, keeping declaration order.
pub fn map_types<S: AsRef<str>>(descriptors: &[S]) -> Vec<TypeSymbol> {
    descriptors.iter().map(|d| map_type(d.as_ref())).collect()
}
