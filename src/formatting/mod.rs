use crate::core::StatusColor;
use colored::*;
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }

    /// Resolve the mode from the `--plain` flag and the environment.
    ///
    /// `--plain` wins, then `NO_COLOR`, `CLICOLOR=0` and `CLICOLOR_FORCE=1`
    /// (per no-color.org and the clicolors convention).
    pub fn from_env(plain: bool) -> Self {
        if plain {
            return Self::Never;
        }
        let mut mode = Self::Auto;
        if env::var("NO_COLOR").is_ok() {
            mode = Self::Never;
        }
        if let Ok(val) = env::var("CLICOLOR") {
            if val == "0" {
                mode = Self::Never;
            }
        }
        if let Ok(val) = env::var("CLICOLOR_FORCE") {
            if val == "1" {
                mode = Self::Always;
            }
        }
        mode
    }

    /// Make the `colored` crate follow this mode for the rest of the process.
    pub fn apply(&self) {
        colored::control::set_override(self.should_use_color());
    }
}

/// Paint `text` in the terminal color of a status tag
pub fn paint(text: &str, color: StatusColor) -> ColoredString {
    match color {
        StatusColor::Green => text.green(),
        StatusColor::Yellow => text.yellow(),
        StatusColor::Orange => text.truecolor(255, 165, 0),
        StatusColor::Red => text.red(),
    }
}

fn detect_color_support() -> bool {
    // Check if we're in a dumb terminal
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    // Check if stdout is a TTY
    std::io::stdout().is_terminal()
}
