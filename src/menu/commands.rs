use super::MenuCommand;
use std::collections::HashMap;

/// Procedures the menu delegates to. Implemented by the GTK shell; the update
/// and changelog calls are forwarded to the host process.
pub trait HostActions {
    fn check_for_updates(&self, manual: bool);
    fn quit_and_install(&self);
    fn open_changelog(&self);
    fn toggle_preferences(&self);
    fn quit(&self);
    fn show_about(&self);
    fn toggle_dev_tools(&self);
    fn reload(&self);
    fn perform_role(&self, role: MenuCommand);
}

type Handler = Box<dyn Fn(&dyn HostActions)>;

/// Maps menu commands to their behaviour, separate from the menu data.
pub struct CommandTable {
    handlers: HashMap<MenuCommand, Handler>,
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandTable {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn new() -> Self {
        let mut table = Self::empty();
        table.register(MenuCommand::CheckForUpdates, |h| h.check_for_updates(true));
        table.register(MenuCommand::InstallAndRestart, |h| h.quit_and_install());
        table.register(MenuCommand::OpenChangelog, |h| h.open_changelog());
        table.register(MenuCommand::TogglePreferences, |h| h.toggle_preferences());
        table.register(MenuCommand::Quit, |h| h.quit());
        table.register(MenuCommand::About, |h| h.show_about());
        table.register(MenuCommand::ToggleDevTools, |h| h.toggle_dev_tools());
        table.register(MenuCommand::Reload, |h| h.reload());

        use strum::IntoEnumIterator;
        for role in MenuCommand::iter().filter(|c| c.is_role()) {
            table.register(role, move |h| h.perform_role(role));
        }
        table
    }

    pub fn register(&mut self, command: MenuCommand, handler: impl Fn(&dyn HostActions) + 'static) {
        self.handlers.insert(command, Box::new(handler));
    }

    pub fn contains(&self, command: MenuCommand) -> bool {
        self.handlers.contains_key(&command)
    }

    /// Runs the handler for `command`. Returns `false` when none is registered.
    pub fn invoke(&self, command: MenuCommand, host: &dyn HostActions) -> bool {
        match self.handlers.get(&command) {
            Some(handler) => {
                log::debug!("Menu command '{command}'");
                handler(host);
                true
            }
            None => {
                log::warn!("No handler for menu command '{command}'");
                false
            }
        }
    }
}
