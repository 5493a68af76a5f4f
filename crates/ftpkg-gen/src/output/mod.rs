//! Terminal output for `ftpkg-gen`.
//!
//! Only status lines carry colour. Artifact paths and `context` JSON are
//! written unstyled, and `anstream` strips escapes when the stream is not a
//! terminal or `NO_COLOR` is set.

mod styles;

use std::fmt::Display;
use std::io::Write;

pub(crate) use styles::clap_styles;

use styles::{FAIL, PASS};

/// `✓ <msg>` on stdout.
pub(crate) fn success(msg: impl Display) {
    writeln!(anstream::stdout().lock(), "{PASS}✓ {msg}{PASS:#}").ok();
}

/// `✗ <msg>` on stderr. Multi-line messages (schema violations) keep their layout.
pub(crate) fn error(msg: impl Display) {
    writeln!(anstream::stderr().lock(), "{FAIL}✗{FAIL:#} {msg}").ok();
}

pub(crate) fn plain(msg: impl Display) {
    writeln!(anstream::stdout().lock(), "{msg}").ok();
}
