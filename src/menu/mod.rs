pub mod commands;
pub mod template;

pub use commands::{CommandTable, HostActions};
pub use template::{ItemKind, MenuItem, MenuTemplate};

use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};

/// Everything a menu entry or shortcut can trigger.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr, StrumDisplay,
)]
#[strum(serialize_all = "kebab-case")]
pub enum MenuCommand {
    CheckForUpdates,
    InstallAndRestart,
    OpenChangelog,
    TogglePreferences,
    Quit,
    About,
    ToggleDevTools,
    Reload,
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,
    Minimize,
    Close,
    Hide,
    HideOthers,
}

impl MenuCommand {
    /// Name of the `app.` action registered for this command.
    pub fn action_name(self) -> &'static str {
        self.into()
    }

    /// Standard edit/window behaviour provided by the toolkit.
    pub fn is_role(self) -> bool {
        matches!(
            self,
            Self::Undo
                | Self::Redo
                | Self::Cut
                | Self::Copy
                | Self::Paste
                | Self::SelectAll
                | Self::Minimize
                | Self::Close
                | Self::Hide
                | Self::HideOthers
        )
    }
}

crate::string_newtype! {
    /// Keyboard shortcut in `CmdOrCtrl+Shift+Z` form.
    pub struct Accelerator;
}

impl Accelerator {
    /// Converts to a GTK accelerator string such as `<Primary><Shift>z`.
    pub fn to_gtk(&self) -> String {
        let mut parts: Vec<&str> = self.as_str().split('+').collect();
        let key = parts.pop().unwrap_or_default();

        let mut out = String::new();
        for modifier in parts {
            let gtk = match modifier.to_ascii_lowercase().as_str() {
                "cmdorctrl" | "commandorcontrol" | "mod" => "<Primary>",
                "cmd" | "command" | "super" => "<Meta>",
                "ctrl" | "control" => "<Control>",
                "alt" | "option" => "<Alt>",
                "shift" => "<Shift>",
                other => {
                    log::warn!("Unknown accelerator modifier '{}' in '{}'", other, self.0);
                    continue;
                }
            };
            out.push_str(gtk);
        }

        match key {
            "," => out.push_str("comma"),
            "." => out.push_str("period"),
            k => out.push_str(&k.to_ascii_lowercase()),
        }
        out
    }
}
