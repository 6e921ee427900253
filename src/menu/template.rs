use super::{Accelerator, MenuCommand};
use strum::IntoEnumIterator;
use crate::config::Platform;
use crate::update::{UpdateMenuController, UpdateMenuEntry};

pub const APP_NAME: &str = "SikhiToTheMax";

#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Normal,
    Separator,
    Submenu(Vec<MenuItem>),
}

/// Declarative menu entry. Behaviour lives in the command table, keyed by `command`.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub label: String,
    pub accelerator: Option<Accelerator>,
    pub command: Option<MenuCommand>,
    pub enabled: bool,
    pub visible: bool,
    pub update_entry: Option<UpdateMenuEntry>,
    pub kind: ItemKind,
}

impl MenuItem {
    pub fn action(label: impl Into<String>, command: MenuCommand) -> Self {
        Self {
            label: label.into(),
            accelerator: None,
            command: Some(command),
            enabled: true,
            visible: true,
            update_entry: None,
            kind: ItemKind::Normal,
        }
    }

    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            accelerator: None,
            command: None,
            enabled: false,
            visible: true,
            update_entry: None,
            kind: ItemKind::Normal,
        }
    }

    pub fn separator() -> Self {
        Self {
            kind: ItemKind::Separator,
            ..Self::label("")
        }
    }

    pub fn submenu(label: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self {
            enabled: true,
            kind: ItemKind::Submenu(items),
            ..Self::label(label)
        }
    }

    pub fn accel(mut self, accelerator: &str) -> Self {
        self.accelerator = Some(Accelerator::new(accelerator));
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    fn tagged(mut self, entry: UpdateMenuEntry) -> Self {
        self.update_entry = Some(entry);
        self
    }

    pub fn children(&self) -> &[MenuItem] {
        match &self.kind {
            ItemKind::Submenu(items) => items,
            _ => &[],
        }
    }
}

/// The application menu for one platform, as data.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuTemplate {
    pub platform: Platform,
    pub menus: Vec<MenuItem>,
}

impl MenuTemplate {
    pub fn build(platform: Platform, version: &str, dev_tools: bool) -> Self {
        let mut menus = match platform {
            Platform::MacOs => vec![
                Self::mac_app_menu(version),
                Self::edit_menu(),
                Self::window_menu(),
            ],
            Platform::Windows | Platform::Linux => vec![
                Self::file_menu(),
                Self::edit_menu(),
                Self::window_menu(),
                Self::help_menu(version),
            ],
        };
        if dev_tools {
            menus.push(Self::dev_menu());
        }
        Self { platform, menus }
    }

    fn update_section(version: &str) -> Vec<MenuItem> {
        vec![
            MenuItem::label(format!("Version {version}")).tagged(UpdateMenuEntry::VersionLabel),
            MenuItem::action("Check for Update", MenuCommand::CheckForUpdates)
                .accel("CmdOrCtrl+U")
                .tagged(UpdateMenuEntry::CheckNow),
            MenuItem::label("Checking for Updates")
                .hidden()
                .tagged(UpdateMenuEntry::CheckingNow),
            MenuItem::label("Downloading Update")
                .hidden()
                .tagged(UpdateMenuEntry::Downloading),
            MenuItem::action("Install and Restart", MenuCommand::InstallAndRestart)
                .hidden()
                .tagged(UpdateMenuEntry::InstallAndRestart),
        ]
    }

    fn mac_app_menu(version: &str) -> MenuItem {
        let mut items = vec![MenuItem::action(format!("About {APP_NAME}"), MenuCommand::About)];
        items.extend(Self::update_section(version));
        items.extend([
            MenuItem::action("Changelog...", MenuCommand::OpenChangelog),
            MenuItem::separator(),
            MenuItem::action("Preferences", MenuCommand::TogglePreferences).accel("Cmd+,"),
            MenuItem::separator(),
            MenuItem::submenu("Services", Vec::new()),
            MenuItem::separator(),
            MenuItem::action(format!("Hide {APP_NAME}"), MenuCommand::Hide).accel("Cmd+H"),
            MenuItem::action("Hide Others", MenuCommand::HideOthers).accel("Cmd+Alt+H"),
            MenuItem::separator(),
            MenuItem::action(format!("Quit {APP_NAME}"), MenuCommand::Quit).accel("CmdOrCtrl+Q"),
        ]);
        MenuItem::submenu(APP_NAME, items)
    }

    fn file_menu() -> MenuItem {
        MenuItem::submenu(
            "File",
            vec![
                MenuItem::action("Preferences", MenuCommand::TogglePreferences).accel("Ctrl+,"),
                MenuItem::separator(),
                MenuItem::action("Quit", MenuCommand::Quit).accel("Ctrl+Q"),
            ],
        )
    }

    fn edit_menu() -> MenuItem {
        MenuItem::submenu(
            "Edit",
            vec![
                MenuItem::action("Undo", MenuCommand::Undo).accel("CmdOrCtrl+Z"),
                MenuItem::action("Redo", MenuCommand::Redo).accel("CmdOrCtrl+Shift+Z"),
                MenuItem::separator(),
                MenuItem::action("Cut", MenuCommand::Cut).accel("CmdOrCtrl+X"),
                MenuItem::action("Copy", MenuCommand::Copy).accel("CmdOrCtrl+C"),
                MenuItem::action("Paste", MenuCommand::Paste).accel("CmdOrCtrl+V"),
                MenuItem::action("Select All", MenuCommand::SelectAll).accel("CmdOrCtrl+A"),
            ],
        )
    }

    fn window_menu() -> MenuItem {
        MenuItem::submenu(
            "Window",
            vec![
                MenuItem::action("Minimize", MenuCommand::Minimize).accel("CmdOrCtrl+M"),
                MenuItem::action("Close", MenuCommand::Close).accel("CmdOrCtrl+W"),
            ],
        )
    }

    fn help_menu(version: &str) -> MenuItem {
        let mut items = vec![MenuItem::label("")];
        items.extend(Self::update_section(version));
        items.push(MenuItem::action("Changelog...", MenuCommand::OpenChangelog));
        MenuItem::submenu("Help", items)
    }

    fn dev_menu() -> MenuItem {
        MenuItem::submenu(
            "Dev",
            vec![
                MenuItem::action("Toggle Developer Tools", MenuCommand::ToggleDevTools)
                    .accel("CmdOrCtrl+Alt+I"),
                MenuItem::action("Reload", MenuCommand::Reload).accel("CmdOrCtrl+R"),
            ],
        )
    }

    fn is_update_section(items: &[MenuItem]) -> bool {
        items
            .iter()
            .any(|i| i.update_entry == Some(UpdateMenuEntry::VersionLabel))
    }

    /// Index of the top-level menu holding the update entries.
    pub fn update_menu_index(&self) -> Option<usize> {
        self.menus
            .iter()
            .position(|m| Self::is_update_section(m.children()))
    }

    pub fn update_section_mut(&mut self) -> Option<&mut Vec<MenuItem>> {
        let idx = self.update_menu_index()?;
        match &mut self.menus[idx].kind {
            ItemKind::Submenu(items) => Some(items),
            _ => None,
        }
    }

    /// Copies the controller's visibility vector into the update entries.
    pub fn apply_update_visibility(&mut self, updates: &UpdateMenuController) {
        let Some(items) = self.update_section_mut() else {
            log::warn!("Menu has no update section");
            return;
        };
        for item in items.iter_mut() {
            if let Some(entry) = item.update_entry {
                item.visible = updates.is_visible(entry);
            }
        }
    }

    /// Every command reachable from the menu, with its shortcut.
    pub fn commands(&self) -> Vec<(MenuCommand, Option<&Accelerator>)> {
        fn walk<'a>(items: &'a [MenuItem], out: &mut Vec<(MenuCommand, Option<&'a Accelerator>)>) {
            for item in items {
                if let Some(cmd) = item.command {
                    out.push((cmd, item.accelerator.as_ref()));
                }
                walk(item.children(), out);
            }
        }

        let mut out = Vec::new();
        walk(&self.menus, &mut out);
        out
    }

    /// Commands this template has no entry for. Quit is bound globally and never listed.
    pub fn absent_commands(&self) -> Vec<MenuCommand> {
        MenuCommand::iter()
            .filter(|c| *c != MenuCommand::Quit && self.find(*c).is_none())
            .collect()
    }

    pub fn find(&self, command: MenuCommand) -> Option<&MenuItem> {
        fn walk(items: &[MenuItem], command: MenuCommand) -> Option<&MenuItem> {
            items.iter().find_map(|item| {
                (item.command == Some(command))
                    .then_some(item)
                    .or_else(|| walk(item.children(), command))
            })
        }
        walk(&self.menus, command)
    }
}
