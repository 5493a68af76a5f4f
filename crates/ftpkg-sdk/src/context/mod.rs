//! Symbol and relation derivation for the B artifacts.
//!
//! [`build_context`] turns a validated [`Package`] into a flat
//! [`PackageContext`] whose fields are already in their textual B form.
//! Nothing in the context contains whitespace except the `funSig(...) = ...`
//! and `eventSig(...) = ...` definition lines.
//!
//! Ordering: `type_syms` is sorted; every other list keeps declaration order,
//! and `impl_syms` keeps first-occurrence order among the bindings.

pub mod symbols;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::{OrderedSet, Package};
use crate::type_mapper::{map_type, map_types, TypeSymbol};

use symbols::{
    event_symbol, function_symbol, interface_ident, maplet, sanitize_ident, selector_symbol,
    PLACEHOLDER_VERSION,
};

/// Everything the `refinement` and `glue_machine` templates consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageContext {
    pub pkg_name: String,
    pub iface_name: String,

    pub func_syms: Vec<String>,
    pub event_syms: Vec<String>,
    pub slot_syms: Vec<String>,
    pub type_syms: Vec<String>,
    pub selector_syms: Vec<String>,
    pub impl_syms: Vec<String>,
    pub facet_sym: String,

    /// `funSig(f_x) = ([in..],[out..])`
    pub funsig_lines: Vec<String>,
    /// `eventSig(e_x) = [in..]`
    pub eventsig_lines: Vec<String>,
    /// `f_x|->(<in..>,<out..>)`
    pub funsig_map: Vec<String>,
    /// `e_x|-><in..>`
    pub eventsig_map: Vec<String>,

    /// `selector(f_x)=sel_x`
    pub selector_bindings: Vec<String>,
    pub slot_type_pairs: Vec<String>,
    pub ext_to_impl_pairs: Vec<String>,
    pub impl_to_facet_pairs: Vec<String>,
    pub read_pairs: Vec<String>,
    pub write_pairs: Vec<String>,
    pub requires_pairs: Vec<String>,
}

/// Set of type symbols that stays closed under mapping components.
#[derive(Debug, Default)]
struct TypeInventory {
    symbols: BTreeSet<&'static str>,
}

impl TypeInventory {
    fn add(&mut self, sym: TypeSymbol) {
        self.symbols.insert(sym.as_str());
        for atom in sym.atoms() {
            self.symbols.insert(atom.as_str());
        }
    }

    fn extend(&mut self, syms: &[TypeSymbol]) {
        for &sym in syms {
            self.add(sym);
        }
    }

    /// Lexicographically sorted symbol names.
    fn into_sorted(self) -> Vec<String> {
        self.symbols.into_iter().map(str::to_string).collect()
    }
}

fn comma_join(syms: &[TypeSymbol]) -> String {
    syms.iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// Derive the full symbol/relation model from a validated package.
pub fn build_context(pkg: &Package) -> PackageContext {
    let functions = &pkg.exports.functions;
    let events = &pkg.exports.events;
    let mut types = TypeInventory::default();

    let mut slot_type_pairs = Vec::with_capacity(pkg.storage.layout.len());
    for slot in &pkg.storage.layout {
        let sym = map_type(&slot.slot_type);
        types.add(sym);
        slot_type_pairs.push(maplet(&slot.slot, sym.as_str()));
    }

    let mut funsig_lines = Vec::with_capacity(functions.len());
    let mut funsig_map = Vec::with_capacity(functions.len());
    for f in functions {
        let inputs = map_types(&f.inputs);
        let outputs = map_types(&f.outputs);
        types.extend(&inputs);
        types.extend(&outputs);

        let fsym = function_symbol(&f.name);
        let ins = comma_join(&inputs);
        let outs = comma_join(&outputs);
        funsig_lines.push(format!("funSig({fsym}) = ([{ins}],[{outs}])"));
        funsig_map.push(maplet(&fsym, &format!("(<{ins}>,<{outs}>)")));
    }

    let mut eventsig_lines = Vec::with_capacity(events.len());
    let mut eventsig_map = Vec::with_capacity(events.len());
    for e in events {
        let inputs = map_types(&e.inputs);
        types.extend(&inputs);

        let esym = event_symbol(&e.name);
        let ins = comma_join(&inputs);
        eventsig_lines.push(format!("eventSig({esym}) = [{ins}]"));
        eventsig_map.push(maplet(&esym, &format!("<{ins}>")));
    }

    let selector_bindings = functions
        .iter()
        .map(|f| {
            format!(
                "selector({})={}",
                function_symbol(&f.name),
                selector_symbol(&f.name)
            )
        })
        .collect();

    let bindings = &pkg.implementation.bindings;
    let ext_to_impl_pairs = bindings
        .iter()
        .map(|(fname, impl_sym)| maplet(&function_symbol(fname), impl_sym))
        .collect();

    let impl_syms: OrderedSet = bindings.values().map(String::as_str).collect();
    let facet_sym = pkg.implementation.facet.clone();
    let impl_to_facet_pairs = impl_syms
        .iter()
        .map(|impl_sym| maplet(impl_sym, &facet_sym))
        .collect();

    let mut read_pairs = Vec::new();
    let mut write_pairs = Vec::new();
    for (impl_sym, footprint) in pkg.implementation.footprints.iter() {
        read_pairs.extend(footprint.reads.iter().map(|slot| maplet(impl_sym, slot)));
        write_pairs.extend(footprint.writes.iter().map(|slot| maplet(impl_sym, slot)));
    }

    let requires_pairs = pkg
        .depends_on
        .iter()
        .map(|dep| maplet(&sanitize_ident(&dep.name), PLACEHOLDER_VERSION))
        .collect();

    let ctx = PackageContext {
        pkg_name: pkg.name.clone(),
        iface_name: interface_ident(&pkg.name),
        func_syms: functions.iter().map(|f| function_symbol(&f.name)).collect(),
        event_syms: events.iter().map(|e| event_symbol(&e.name)).collect(),
        slot_syms: pkg.storage.layout.iter().map(|s| s.slot.clone()).collect(),
        type_syms: types.into_sorted(),
        selector_syms: functions.iter().map(|f| selector_symbol(&f.name)).collect(),
        impl_syms: impl_syms.into_vec(),
        facet_sym,
        funsig_lines,
        eventsig_lines,
        funsig_map,
        eventsig_map,
        selector_bindings,
        slot_type_pairs,
        ext_to_impl_pairs,
        impl_to_facet_pairs,
        read_pairs,
        write_pairs,
        requires_pairs,
    };

    tracing::debug!(
        package = %ctx.pkg_name,
        functions = ctx.func_syms.len(),
        types = ctx.type_syms.len(),
        impls = ctx.impl_syms.len(),
        "Built package context"
    );
    ctx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn erc20() -> Package {
        serde_yaml::from_str(include_str!("../../tests/fixtures/erc20_token.yaml")).unwrap()
    }

    fn minimal() -> Package {
        serde_yaml::from_str(include_str!("../../tests/fixtures/minimal.yaml")).unwrap()
    }

    #[test]
    fn test_identifiers() {
        let ctx = build_context(&erc20());
        assert_eq!(ctx.pkg_name, "erc20_token");
        assert_eq!(ctx.iface_name, "ERC20_TOKEN");
        assert_eq!(ctx.facet_sym, "ERC20Facet");
    }

    #[test]
    fn test_transfer_signature() {
        let ctx = build_context(&erc20());
        assert_eq!(ctx.func_syms[0], "f_transfer");
        assert_eq!(ctx.selector_syms[0], "sel_transfer");
        assert_eq!(
            ctx.funsig_lines[0],
            "funSig(f_transfer) = ([t_ADDR,t_UINT],[t_OPAQUE])"
        );
        assert_eq!(ctx.funsig_map[0], "f_transfer|->(<t_ADDR,t_UINT>,<t_OPAQUE>)");
        assert_eq!(ctx.selector_bindings[0], "selector(f_transfer)=sel_transfer");
    }

    #[test]
    fn test_empty_signature_lists() {
        let ctx = build_context(&erc20());
        let total_supply = ctx
            .funsig_lines
            .iter()
            .find(|l| l.starts_with("funSig(f_totalSupply)"))
            .unwrap();
        assert_eq!(total_supply, "funSig(f_totalSupply) = ([],[t_UINT])");
        assert!(ctx
            .funsig_map
            .contains(&"f_totalSupply|->(<>,<t_UINT>)".to_string()));

        let ctx = build_context(&minimal());
        assert_eq!(ctx.funsig_lines, vec!["funSig(f_reset) = ([],[])"]);
        assert_eq!(ctx.funsig_map, vec!["f_reset|->(<>,<>)"]);
    }

    fn input_arity(tuple: &str) -> usize {
        if tuple.is_empty() {
            0
        } else {
            tuple.split(',').count()
        }
    }

    const PAUSABLE: &str = r#"
name: pausable
exports:
  functions:
    - name: pause
      inputs: []
      outputs: []
      selector: "0x8456cb59"
  events:
    - name: Paused
      inputs: []
    - name: PausedBy
      inputs: [address]
    - name: Swept
      inputs: [address, uint256, "mapping(address => uint256)"]
storage:
  layout: []
impl:
  bindings: {}
  footprints: {}
  facet: PausableFacet
"#;

    #[test]
    fn test_signature_arity_matches_declaration() {
        let pkg = erc20();
        let ctx = build_context(&pkg);
        for (f, line) in pkg.exports.functions.iter().zip(&ctx.funsig_map) {
            let (_, sig) = line.split_once("|->").unwrap();
            let sig = sig.trim_start_matches("(<").trim_end_matches(">)");
            let (ins, outs) = sig.split_once(">,<").unwrap();
            assert_eq!(input_arity(ins), f.inputs.len(), "inputs of {}", f.name);
            assert_eq!(input_arity(outs), f.outputs.len(), "outputs of {}", f.name);
        }
    }

    #[test]
    fn test_event_signature_arity_matches_declaration() {
        for pkg in [erc20(), serde_yaml::from_str(PAUSABLE).unwrap()] {
            let ctx = build_context(&pkg);
            assert_eq!(ctx.eventsig_map.len(), pkg.exports.events.len());
            for (e, line) in pkg.exports.events.iter().zip(&ctx.eventsig_map) {
                let (sym, sig) = line.split_once("|->").unwrap();
                assert_eq!(sym, format!("e_{}", e.name));
                let ins = sig.strip_prefix('<').unwrap().strip_suffix('>').unwrap();
                assert_eq!(input_arity(ins), e.inputs.len(), "inputs of {}", e.name);
            }
        }
    }

    #[test]
    fn test_event_without_inputs() {
        let pkg: Package = serde_yaml::from_str(PAUSABLE).unwrap();
        let ctx = build_context(&pkg);
        assert_eq!(ctx.eventsig_map[0], "e_Paused|-><>");
        assert_eq!(ctx.eventsig_lines[0], "eventSig(e_Paused) = []");
        assert_eq!(ctx.eventsig_map[1], "e_PausedBy|-><t_ADDR>");
        assert_eq!(
            ctx.eventsig_map[2],
            "e_Swept|-><t_ADDR,t_UINT,t_MAP_ADDR_UINT>"
        );
    }

    #[test]
    fn test_event_signatures() {
        let ctx = build_context(&erc20());
        assert_eq!(ctx.event_syms, vec!["e_Transfer", "e_Approval"]);
        assert_eq!(
            ctx.eventsig_lines[0],
            "eventSig(e_Transfer) = [t_ADDR,t_ADDR,t_UINT]"
        );
        assert_eq!(ctx.eventsig_map[1], "e_Approval|-><t_ADDR,t_ADDR,t_UINT>");
    }

    #[test]
    fn test_type_inventory_sorted_and_closed() {
        let ctx = build_context(&erc20());
        assert_eq!(
            ctx.type_syms,
            vec![
                "t_ADDR",
                "t_MAP_ADDR_ADDR_UINT",
                "t_MAP_ADDR_UINT",
                "t_OPAQUE",
                "t_UINT"
            ]
        );
    }

    #[test]
    fn test_mapping_slot_forces_atoms() {
        let pkg: Package = serde_yaml::from_str(
            r#"
name: only_map
exports:
  functions: []
storage:
  layout:
    - slot: s0
      type: "mapping(address => uint256)"
impl:
  bindings: {}
  footprints: {}
  facet: F
"#,
        )
        .unwrap();
        let ctx = build_context(&pkg);
        assert_eq!(ctx.slot_type_pairs, vec!["s0|->t_MAP_ADDR_UINT"]);
        assert_eq!(ctx.type_syms, vec!["t_ADDR", "t_MAP_ADDR_UINT", "t_UINT"]);
    }

    #[test]
    fn test_slot_relations() {
        let ctx = build_context(&erc20());
        assert_eq!(
            ctx.slot_syms,
            vec!["s_balances", "s_allowances", "s_totalSupply"]
        );
        assert_eq!(
            ctx.slot_type_pairs,
            vec![
                "s_balances|->t_MAP_ADDR_UINT",
                "s_allowances|->t_MAP_ADDR_ADDR_UINT",
                "s_totalSupply|->t_UINT"
            ]
        );
    }

    #[test]
    fn test_bindings_and_facet_first_occurrence_order() {
        let ctx = build_context(&erc20());
        assert_eq!(
            ctx.ext_to_impl_pairs,
            vec![
                "f_transfer|->impl_transfer",
                "f_approve|->impl_allowance",
                "f_transferFrom|->impl_transfer",
                "f_balanceOf|->impl_views",
                "f_allowance|->impl_views"
            ]
        );
        // Not sorted: impl_allowance would come first alphabetically.
        assert_eq!(
            ctx.impl_syms,
            vec!["impl_transfer", "impl_allowance", "impl_views"]
        );
        assert_eq!(
            ctx.impl_to_facet_pairs,
            vec![
                "impl_transfer|->ERC20Facet",
                "impl_allowance|->ERC20Facet",
                "impl_views|->ERC20Facet"
            ]
        );
    }

    #[test]
    fn test_footprint_relations_kept_separate() {
        let ctx = build_context(&erc20());
        assert_eq!(
            ctx.read_pairs,
            vec![
                "impl_transfer|->s_balances",
                "impl_transfer|->s_allowances",
                "impl_views|->s_balances",
                "impl_views|->s_allowances"
            ]
        );
        assert_eq!(
            ctx.write_pairs,
            vec![
                "impl_transfer|->s_balances",
                "impl_transfer|->s_allowances",
                "impl_allowance|->s_allowances"
            ]
        );
    }

    #[test]
    fn test_requires_pairs_sanitized_not_uppercased() {
        let ctx = build_context(&erc20());
        assert_eq!(
            ctx.requires_pairs,
            vec!["_fevertokens_ownable|->v1", "erc165_core|->v1"]
        );
    }

    #[test]
    fn test_minimal_package_has_empty_collections() {
        let ctx = build_context(&minimal());
        assert!(ctx.event_syms.is_empty());
        assert!(ctx.slot_syms.is_empty());
        assert!(ctx.impl_syms.is_empty());
        assert!(ctx.read_pairs.is_empty());
        assert!(ctx.write_pairs.is_empty());
        assert!(ctx.requires_pairs.is_empty());
        assert_eq!(ctx.type_syms, Vec::<String>::new());
    }

    #[test]
    fn test_relations_have_no_whitespace() {
        let ctx = build_context(&erc20());
        let relations = ctx
            .funsig_map
            .iter()
            .chain(&ctx.eventsig_map)
            .chain(&ctx.selector_bindings)
            .chain(&ctx.slot_type_pairs)
            .chain(&ctx.ext_to_impl_pairs)
            .chain(&ctx.impl_to_facet_pairs)
            .chain(&ctx.read_pairs)
            .chain(&ctx.write_pairs)
            .chain(&ctx.requires_pairs);
        for r in relations {
            assert!(!r.contains(char::is_whitespace), "whitespace in {r:?}");
        }
    }

    #[test]
    fn test_deterministic() {
        let pkg = erc20();
        assert_eq!(build_context(&pkg), build_context(&pkg));
    }
}
