use console::{self, Style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm as Dialog;
use lazy_static::lazy_static;
use std::io::{self, IsTerminal as _, Write};
use std::str::FromStr;
use thiserror::Error;

use rmv::actuator::MoveError;
use rmv::manifest::Route;
use rmv::prompt::{Always, Confirm, LinePrompt};

lazy_static! {
    static ref STYLE_LINE: Style = Style::new();
    static ref STYLE_SOURCE_PATH: Style = Style::new().green();
    static ref STYLE_DESTINATION_PATH: Style = Style::new().red();
    static ref STYLE_WARNING: Style = Style::new().bold();
    static ref STYLE_WARNING_HEADER: Style = Style::new().bold().yellow();
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OptionError {
    #[error("failed to parse option")]
    Parse,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Toggle {
    Always,
    Automatic,
    Never,
}

impl FromStr for Toggle {
    type Err = OptionError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "always" => Ok(Toggle::Always),
            "auto" | "automatic" => Ok(Toggle::Automatic),
            "never" => Ok(Toggle::Never),
            _ => Err(OptionError::Parse),
        }
    }
}

/// Confirms routes with a prompt on an attended terminal.
#[derive(Debug)]
pub struct TerminalPrompt {
    terminal: Term,
}

impl Confirm for TerminalPrompt {
    fn confirm(&mut self, route: &Route) -> io::Result<bool> {
        writeln!(
            self.terminal,
            "{} {} {}",
            STYLE_SOURCE_PATH.apply_to(route.source().display()),
            STYLE_LINE.apply_to("-->"),
            STYLE_DESTINATION_PATH.apply_to(route.destination().display()),
        )?;
        Dialog::with_theme(&ColorfulTheme::default())
            .with_prompt("Move?")
            .default(false)
            .show_default(true)
            .wait_for_newline(true)
            .interact_on(&self.terminal)
    }
}

/// Gets the prompt used to confirm routes.
///
/// When not interactive, all routes are confirmed. Otherwise, a terminal prompt
/// is used if both standard input and standard error are attended, and lines
/// are read from standard input if not (e.g., when input is piped).
pub fn prompt(interactive: bool) -> Box<dyn Confirm> {
    if !interactive {
        Box::new(Always)
    }
    else {
        let terminal = Term::stderr();
        if terminal.is_term() && io::stdin().is_terminal() {
            Box::new(TerminalPrompt { terminal })
        }
        else {
            Box::new(LinePrompt::new(io::stdin().lock(), io::stdout()))
        }
    }
}

pub fn warning(warning: impl AsRef<str>) -> io::Result<()> {
    const HEADER: &str = "Warning";

    writeln!(
        Term::stderr(),
        "{}{} {}",
        STYLE_WARNING_HEADER.apply_to(HEADER),
        STYLE_WARNING.apply_to(":"),
        STYLE_WARNING.apply_to(warning.as_ref()),
    )
}

pub fn print_failures(failures: &[MoveError]) -> io::Result<()> {
    for failure in failures {
        warning(failure.to_string())?;
    }
    Ok(())
}

pub fn toggle_color_output(toggle: Toggle) {
    let enabled = match toggle {
        Toggle::Always => true,
        // `console` detects color support by default.
        Toggle::Automatic => return,
        Toggle::Never => false,
    };
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}
