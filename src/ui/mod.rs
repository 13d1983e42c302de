//! Terminal rendering of catalog entries.
//!
//! Colors are only emitted when stdout is a terminal and `NO_COLOR` is unset.

use crossterm::style::Stylize;
use crossterm::tty::IsTty;

use crate::core::catalog::Extension;

#[derive(Debug, Clone, Copy)]
pub struct Output {
    color: bool,
}

impl Output {
    pub fn detect() -> Self {
        let color = std::io::stdout().is_tty() && std::env::var_os("NO_COLOR").is_none();
        Self { color }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    /// `Name (uuid) by creator`
    pub fn short_info(&self, extension: &Extension) -> String {
        let uuid = format!("({})", extension.uuid);
        if self.color {
            format!(
                "{} {} {} {}",
                extension.name.as_str().yellow(),
                uuid.green(),
                "by".magenta(),
                extension.creator.as_str().cyan()
            )
        } else {
            format!("{} {} by {}", extension.name, uuid, extension.creator)
        }
    }

    pub fn about(&self, extension: &Extension, extensions_home: &str) -> String {
        let link = format!("{}{}", extensions_home.trim_end_matches('/'), extension.link);
        let versions = extension.shell_versions();
        let versions = if versions.is_empty() {
            "none".to_string()
        } else {
            versions.join(", ")
        };

        format!(
            "{}\n{}\nShell versions: {}\n\n{}",
            self.short_info(extension),
            link,
            versions,
            extension.description.trim_end()
        )
    }

    pub fn restart_hint(&self) -> String {
        let (keys, command) = if self.color {
            ("Alt + F2".yellow().to_string(), "r".yellow().to_string())
        } else {
            ("Alt + F2".to_string(), "r".to_string())
        };
        format!(
            "to activate the extension restart GNOME Shell by pressing {} and enter {}",
            keys, command
        )
    }
}
