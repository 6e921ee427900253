use anyhow::Context;
use clap::Parser;
use relm4::prelude::*;
use std::path::PathBuf;
use sttm_shell::config::{self, Overrides, SocketPath};
use sttm_shell::gui::app::{AppInit, AppModel};
use sttm_shell::sys::runtime;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Unix socket shared with the host process
    #[arg(short, long)]
    socket: Option<PathBuf>,

    /// Fit the viewer inside the navigator pane
    #[arg(long)]
    presenter_view: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let overrides = Overrides {
        socket: args.socket.map(SocketPath::new),
        presenter_view: args.presenter_view,
    };

    let config_path = args.config.or_else(|| config::get_config_path().ok());
    let mut config = config::load_or_default(config_path.as_deref());
    overrides.apply(&mut config);

    let (tx, rx) = async_channel::bounded(32);
    let (outbound_tx, outbound_rx) = async_channel::unbounded();

    // Start Background Services
    runtime::start_background_services(
        config.ipc.socket.clone(),
        config_path.clone(),
        tx,
        outbound_rx,
    )
    .context("Failed to start background services")?;

    let app = RelmApp::new("org.khalisfoundation.sttm-shell").with_args(Vec::new());

    app.run::<AppModel>(AppInit {
        config,
        config_path,
        overrides,
        events: rx,
        outbound: outbound_tx,
    });

    Ok(())
}
