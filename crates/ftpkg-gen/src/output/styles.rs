//! Colours for status lines and `--help`.

use anstyle::{AnsiColor, Color, Effects, Style};

const fn fg(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

pub(crate) const PASS: Style = fg(AnsiColor::Green);
pub(crate) const FAIL: Style = fg(AnsiColor::Red).effects(Effects::BOLD);

const HEADING: Style = fg(AnsiColor::Blue).effects(Effects::BOLD);
const TOKEN: Style = fg(AnsiColor::Cyan);

pub(crate) fn clap_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .header(HEADING)
        .usage(HEADING)
        .literal(TOKEN)
        .placeholder(TOKEN.effects(Effects::ITALIC))
        .error(FAIL)
        .valid(PASS)
        .invalid(fg(AnsiColor::Yellow))
}
