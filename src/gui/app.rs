use crate::config::{self, Config, Overrides, Platform};
use crate::controller::Controller;
use crate::dispatch::Dispatcher;
use crate::events::{
    AppEvent, InboundMessage, LineId, LinePayload, OutboundMessage, ShabadId, TextPayload,
};
use crate::gui::host::ShellHost;
use crate::gui::menu::{self, MenuBridge};
use crate::gui::surface::{GtkSurface, GtkViewer};
use crate::gui::theme;
use crate::menu::template::APP_NAME;
use crate::menu::{CommandTable, MenuCommand, MenuTemplate};
use async_channel::{Receiver, Sender};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::path::PathBuf;

pub struct AppInit {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub overrides: Overrides,
    pub events: Receiver<AppEvent>,
    pub outbound: Sender<OutboundMessage>,
}

pub struct AppModel {
    controller: Controller<GtkSurface>,
    template: MenuTemplate,
    menu: MenuBridge,
    commands: CommandTable,
    host: ShellHost,
    dispatcher: Dispatcher<Sender<OutboundMessage>>,
    viewer: GtkViewer,
    config: Config,
    config_path: Option<PathBuf>,
    overrides: Overrides,
}

#[derive(Debug)]
pub enum AppMsg {
    Message(InboundMessage),
    Resized,
    Menu(MenuCommand),
    ShowLine(ShabadId, LineId),
    ShowText(String),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Message(InboundMessage::ShowLine(LinePayload { shabad_id, line_id })) => {
                AppMsg::ShowLine(shabad_id, line_id)
            }
            AppEvent::Message(InboundMessage::ShowText(TextPayload { text })) => {
                AppMsg::ShowText(text)
            }
            AppEvent::Message(msg) => AppMsg::Message(msg),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

struct Panes {
    overlay: gtk::Overlay,
    body: gtk::DrawingArea,
    navigator: gtk::DrawingArea,
    layer: gtk::Fixed,
    viewer: gtk::Label,
    entry: gtk::Entry,
}

impl Panes {
    fn build() -> Self {
        let body = gtk::DrawingArea::builder()
            .name("body")
            .hexpand(true)
            .vexpand(true)
            .build();

        let navigator = gtk::DrawingArea::builder()
            .name("navigator")
            .hexpand(true)
            .vexpand(true)
            .visible(false)
            .build();

        let entry = gtk::Entry::builder()
            .placeholder_text("Text to display")
            .valign(gtk::Align::End)
            .margin_bottom(12)
            .margin_start(12)
            .margin_end(12)
            .build();

        let home = gtk::Box::builder()
            .name("home")
            .orientation(gtk::Orientation::Vertical)
            .hexpand(true)
            .vexpand(true)
            .build();
        home.append(&entry);

        let split = gtk::Box::new(gtk::Orientation::Horizontal, 0);
        split.append(&navigator);
        split.append(&home);

        let viewer = gtk::Label::builder()
            .name("viewer")
            .wrap(true)
            .justify(gtk::Justification::Center)
            .visible(false)
            .build();

        let layer = gtk::Fixed::new();
        layer.set_can_target(false);
        layer.put(&viewer, 0.0, 0.0);

        let overlay = gtk::Overlay::new();
        overlay.set_child(Some(&body));
        overlay.add_overlay(&split);
        overlay.set_measure_overlay(&split, true);
        overlay.add_overlay(&layer);

        Self {
            overlay,
            body,
            navigator,
            layer,
            viewer,
            entry,
        }
    }
}

impl AppModel {
    fn rebuild_menu(&mut self) {
        let app = relm4::main_application();
        let platform = self.config.app.platform();
        self.template = MenuTemplate::build(
            platform,
            env!("CARGO_PKG_VERSION"),
            self.config.app.dev_tools,
        );
        self.template
            .apply_update_visibility(self.controller.updates());
        menu::register_actions(&app, &self.template, self.host_input());
        self.menu.sync(&self.template);
    }

    fn sync_menu(&mut self) {
        self.template
            .apply_update_visibility(self.controller.updates());
        self.menu.sync(&self.template);
    }

    fn host_input(&self) -> &relm4::Sender<AppMsg> {
        self.host.input()
    }

    fn reload_config(&mut self) {
        let Some(path) = self.config_path.as_deref() else {
            return;
        };
        match config::load_from(path) {
            Ok(mut new_config) => {
                self.overrides.apply(&mut new_config);
                self.controller.apply_config(&new_config.layout);
                self.controller
                    .surface_mut()
                    .set_padding(new_config.layout.viewer_padding);
                if new_config.ipc != self.config.ipc {
                    log::warn!("Socket changes take effect after a restart");
                }
                self.config = new_config;
                self.rebuild_menu();
                self.controller.refit();
                log::info!("Configuration reloaded");
            }
            Err(e) => log::error!("Failed to reload config: {}", e),
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some(APP_NAME),
            set_default_size: (1280, 800),
            add_css_class: "sttm-window",
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            config,
            config_path,
            overrides,
            events,
            outbound,
        } = init;

        theme::load_css();

        let panes = Panes::build();
        root.set_child(Some(&panes.overlay));

        let surface = GtkSurface::new(
            root.clone(),
            panes.body.clone().upcast(),
            panes.navigator.clone().upcast(),
            panes.layer.clone(),
            panes.viewer.clone().upcast(),
            config.layout.viewer_padding,
        );

        for area in [&panes.body, &panes.navigator] {
            let sender = sender.clone();
            area.connect_resize(move |_, _, _| sender.input(AppMsg::Resized));
        }

        {
            let sender = sender.clone();
            panes.entry.connect_activate(move |entry| {
                sender.input(AppMsg::ShowText(entry.text().to_string()));
            });
        }

        let menu = MenuBridge::new();
        let platform = config.app.platform();
        if platform == Platform::MacOs {
            relm4::main_application().set_menubar(Some(menu.model()));
            root.set_show_menubar(true);
        } else {
            let button = gtk::MenuButton::builder()
                .icon_name("open-menu-symbolic")
                .menu_model(menu.model())
                .build();
            button.add_css_class("menu-button");
            let header = gtk::HeaderBar::new();
            header.pack_end(&button);
            root.set_titlebar(Some(&header));
        }

        let mut model = AppModel {
            controller: Controller::new(surface, &config.layout),
            template: MenuTemplate::build(
                platform,
                env!("CARGO_PKG_VERSION"),
                config.app.dev_tools,
            ),
            menu,
            commands: CommandTable::new(),
            host: ShellHost::new(root.clone(), outbound.clone(), sender.input_sender().clone()),
            dispatcher: Dispatcher::new(outbound),
            viewer: GtkViewer::new(panes.viewer.clone()),
            config,
            config_path,
            overrides,
        };
        model.rebuild_menu();

        let widgets = view_output!();

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = events.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Message(message) => {
                let action = self.controller.handle(message);
                if action.menu_changed {
                    self.sync_menu();
                }
            }
            AppMsg::Resized => {
                self.controller.resized();
            }
            AppMsg::Menu(command) => {
                self.commands.invoke(command, &self.host);
            }
            AppMsg::ShowLine(shabad_id, line_id) => {
                self.dispatcher
                    .send_line(&mut self.viewer, shabad_id, line_id);
            }
            AppMsg::ShowText(text) => {
                self.dispatcher.send_text(&mut self.viewer, text);
            }
            AppMsg::ConfigReload => self.reload_config(),
        }
    }
}
