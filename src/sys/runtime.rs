use crate::config::SocketPath;
use crate::events::{AppEvent, OutboundMessage};
use async_channel::{Receiver, Sender};
use std::path::PathBuf;
use std::thread;
use tokio::runtime::Runtime;

pub fn start_background_services(
    socket: SocketPath,
    config_path: Option<PathBuf>,
    tx: Sender<AppEvent>,
    outbound: Receiver<OutboundMessage>,
) -> std::io::Result<()> {
    let rt = Runtime::new()?;

    thread::Builder::new()
        .name("sttm-io".into())
        .spawn(move || {
            rt.block_on(async {
                {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        crate::sys::server::run_server(socket, tx, outbound).await;
                    });
                }

                if let Some(path) = config_path {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        crate::config::run_async_watcher(path, tx).await;
                    });
                }

                std::future::pending::<()>().await;
            });
        })?;

    Ok(())
}
