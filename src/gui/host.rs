use crate::dispatch::Dispatcher;
use crate::events::OutboundMessage;
use crate::gui::app::AppMsg;
use crate::menu::template::APP_NAME;
use crate::menu::{HostActions, MenuCommand};
use async_channel::Sender;
use gtk::prelude::*;
use gtk4 as gtk;

/// Menu behaviour for the GTK shell. Update, changelog and preferences requests
/// go to the host process; window-level actions are handled here.
pub struct ShellHost {
    window: gtk::ApplicationWindow,
    outbound: Dispatcher<Sender<OutboundMessage>>,
    input: relm4::Sender<AppMsg>,
}

impl ShellHost {
    pub fn new(
        window: gtk::ApplicationWindow,
        outbound: Sender<OutboundMessage>,
        input: relm4::Sender<AppMsg>,
    ) -> Self {
        Self {
            window,
            outbound: Dispatcher::new(outbound),
            input,
        }
    }

    pub fn input(&self) -> &relm4::Sender<AppMsg> {
        &self.input
    }

    fn activate_on_focus(&self, action: &str) {
        let Some(widget) = GtkWindowExt::focus(&self.window) else {
            return;
        };
        if let Err(e) = widget.activate_action(action, None) {
            log::debug!("Focused widget has no '{}': {}", action, e);
        }
    }
}

impl HostActions for ShellHost {
    fn check_for_updates(&self, manual: bool) {
        self.outbound
            .post(OutboundMessage::CheckForUpdates { manual });
    }

    fn quit_and_install(&self) {
        self.outbound.post(OutboundMessage::InstallAndRestart);
    }

    fn open_changelog(&self) {
        self.outbound.post(OutboundMessage::OpenChangelog);
    }

    fn toggle_preferences(&self) {
        self.outbound.post(OutboundMessage::TogglePreferences);
    }

    fn quit(&self) {
        relm4::main_application().quit();
    }

    fn show_about(&self) {
        gtk::AboutDialog::builder()
            .transient_for(&self.window)
            .modal(true)
            .program_name(APP_NAME)
            .version(env!("CARGO_PKG_VERSION"))
            .build()
            .present();
    }

    fn toggle_dev_tools(&self) {
        gtk::Window::set_interactive_debugging(true);
    }

    fn reload(&self) {
        self.input.emit(AppMsg::ConfigReload);
    }

    fn perform_role(&self, role: MenuCommand) {
        match role {
            MenuCommand::Undo => self.activate_on_focus("text.undo"),
            MenuCommand::Redo => self.activate_on_focus("text.redo"),
            MenuCommand::Cut => self.activate_on_focus("clipboard.cut"),
            MenuCommand::Copy => self.activate_on_focus("clipboard.copy"),
            MenuCommand::Paste => self.activate_on_focus("clipboard.paste"),
            MenuCommand::SelectAll => self.activate_on_focus("selection.select-all"),
            MenuCommand::Minimize => self.window.minimize(),
            MenuCommand::Close => self.window.close(),
            MenuCommand::Hide => self.window.set_visible(false),
            other => log::debug!("Menu role '{}' not supported here", other),
        }
    }
}
