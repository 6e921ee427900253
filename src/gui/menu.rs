use crate::gui::app::AppMsg;
use crate::menu::{ItemKind, MenuCommand, MenuItem, MenuTemplate};
use gtk::gio;
use gtk::prelude::*;
use gtk4 as gtk;
use std::collections::HashMap;

/// Shortcut bound to quit on every platform.
pub const GLOBAL_QUIT_ACCEL: &str = "<Primary>q";

/// Keeps one `gio::Menu` in step with the menu template. The same model backs
/// the menubar and the menu button popover, so rebuilding it in place updates both.
pub struct MenuBridge {
    root: gio::Menu,
}

impl Default for MenuBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuBridge {
    pub fn new() -> Self {
        Self {
            root: gio::Menu::new(),
        }
    }

    pub fn model(&self) -> &gio::Menu {
        &self.root
    }

    pub fn sync(&self, template: &MenuTemplate) {
        self.root.remove_all();
        for menu in template.menus.iter().filter(|m| m.visible) {
            self.root
                .append_submenu(Some(&menu.label), &build_submenu(menu.children()));
        }
    }
}

fn build_submenu(items: &[MenuItem]) -> gio::Menu {
    let menu = gio::Menu::new();
    let mut section = gio::Menu::new();

    for item in items.iter().filter(|i| i.visible) {
        match &item.kind {
            ItemKind::Separator => {
                if section.n_items() > 0 {
                    menu.append_section(None, &section);
                    section = gio::Menu::new();
                }
            }
            ItemKind::Submenu(children) => {
                section.append_submenu(Some(&item.label), &build_submenu(children));
            }
            ItemKind::Normal => section.append_item(&menu_item(item)),
        }
    }
    if section.n_items() > 0 {
        menu.append_section(None, &section);
    }
    menu
}

fn menu_item(item: &MenuItem) -> gio::MenuItem {
    let action = item
        .command
        .filter(|_| item.enabled)
        .map(|c| format!("app.{}", c.action_name()));
    let entry = gio::MenuItem::new(Some(&item.label), action.as_deref());
    if let Some(accel) = &item.accelerator {
        entry.set_attribute_value("accel", Some(&accel.to_gtk().to_variant()));
    }
    entry
}

/// Registers one `app.` action per command in the template and binds its shortcuts.
/// Actions left over from a previous template are removed with their shortcuts.
pub fn register_actions(
    app: &gtk::Application,
    template: &MenuTemplate,
    input: &relm4::Sender<AppMsg>,
) {
    for command in template.absent_commands() {
        let name = command.action_name();
        if app.lookup_action(name).is_some() {
            app.set_accels_for_action(&format!("app.{name}"), &[]);
            app.remove_action(name);
            log::debug!("Removed stale action app.{}", name);
        }
    }

    let mut accels: HashMap<MenuCommand, Vec<String>> = HashMap::new();

    for (command, accel) in template.commands() {
        let name = command.action_name();
        if app.lookup_action(name).is_none() {
            let action = gio::SimpleAction::new(name, None);
            let input = input.clone();
            action.connect_activate(move |_, _| input.emit(AppMsg::Menu(command)));
            app.add_action(&action);
        }

        let bound = accels.entry(command).or_default();
        if let Some(accel) = accel {
            bound.push(accel.to_gtk());
        }
    }

    let quit = accels.entry(MenuCommand::Quit).or_default();
    if !quit.iter().any(|a| a == GLOBAL_QUIT_ACCEL) {
        quit.push(GLOBAL_QUIT_ACCEL.to_string());
    }
    if app.lookup_action(MenuCommand::Quit.action_name()).is_none() {
        let action = gio::SimpleAction::new(MenuCommand::Quit.action_name(), None);
        let input = input.clone();
        action.connect_activate(move |_, _| input.emit(AppMsg::Menu(MenuCommand::Quit)));
        app.add_action(&action);
    }

    for (command, bound) in &accels {
        let refs: Vec<&str> = bound.iter().map(String::as_str).collect();
        app.set_accels_for_action(&format!("app.{}", command.action_name()), &refs);
    }
}
