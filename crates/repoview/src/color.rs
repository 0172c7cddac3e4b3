use crate::cli::ColorChoice;
use std::io::IsTerminal;

/// Decide whether to colorize and apply it globally. Returns the decision.
pub fn init(choice: ColorChoice) -> bool {
    let enabled = should_color(
        choice,
        std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()),
        std::io::stdout().is_terminal(),
    );
    colored::control::set_override(enabled);
    enabled
}

/// `NO_COLOR` (https://no-color.org/) only matters in auto mode
fn should_color(choice: ColorChoice, no_color: bool, stdout_is_terminal: bool) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => !no_color && stdout_is_terminal,
    }
}
