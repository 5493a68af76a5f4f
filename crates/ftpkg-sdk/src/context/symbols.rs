//! Symbol naming rules shared by the context builder and template filters.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static NON_IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("identifier regex is valid"));

/// Version symbol every dependency is related to until real version
/// resolution exists.
pub const PLACEHOLDER_VERSION: &str = "v1";

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
pub fn sanitize_ident(raw: &str) -> Cow<'_, str> {
    NON_IDENT_RE.replace_all(raw, "_")
}

/// Interface identifier: upper-cased package name, then sanitized.
pub fn interface_ident(package_name: &str) -> String {
    sanitize_ident(&package_name.to_uppercase()).into_owned()
}

pub fn function_symbol(name: &str) -> String {
    format!("f_{name}")
}

pub fn event_symbol(name: &str) -> String {
    format!("e_{name}")
}

pub fn selector_symbol(name: &str) -> String {
    format!("sel_{name}")
}

/// `left|->right`, the B maplet form used in every relation.
pub fn maplet(left: &str, right: &str) -> String {
    format!("{left}|->{right}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_ident() {
        assert_eq!(sanitize_ident("erc20_token"), "erc20_token");
        assert_eq!(sanitize_ident("@fevertokens/ownable"), "_fevertokens_ownable");
        assert_eq!(sanitize_ident("erc165-core"), "erc165_core");
        assert_eq!(sanitize_ident("a.b c"), "a_b_c");
        assert_eq!(sanitize_ident(""), "");
    }

    #[test]
    fn test_sanitize_replaces_each_non_ascii_char() {
        assert_eq!(sanitize_ident("tök"), "t_k");
    }

    #[test]
    fn test_interface_ident() {
        assert_eq!(interface_ident("erc20-token"), "ERC20_TOKEN");
        assert_eq!(interface_ident("My Pkg.v2"), "MY_PKG_V2");
    }

    #[test]
    fn test_namespaced_symbols() {
        assert_eq!(function_symbol("transfer"), "f_transfer");
        assert_eq!(event_symbol("Transfer"), "e_Transfer");
        assert_eq!(selector_symbol("transfer"), "sel_transfer");
        assert_eq!(maplet("s0", "t_UINT"), "s0|->t_UINT");
    }
}
