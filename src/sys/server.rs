use crate::config::SocketPath;
use crate::events::{AppEvent, InboundMessage, OutboundMessage};
use async_channel::{Receiver, Sender};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;
use tokio::net::unix::OwnedWriteHalf;

/// Write queues of the connected host processes.
#[derive(Clone, Default)]
pub struct Peers {
    inner: Arc<Mutex<Vec<Sender<String>>>>,
}

impl Peers {
    pub fn subscribe(&self) -> Receiver<String> {
        let (tx, rx) = async_channel::unbounded();
        self.inner.lock().push(tx);
        rx
    }

    /// Queues `line` for every peer, dropping peers whose connection is gone.
    pub fn broadcast(&self, line: &str) -> usize {
        let mut peers = self.inner.lock();
        peers.retain(|p| p.try_send(line.to_string()).is_ok());
        peers.len()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decodes one inbound frame, logging and skipping anything unusable.
pub fn decode_line(line: &str) -> Option<InboundMessage> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match InboundMessage::decode(line) {
        Ok(msg) => Some(msg),
        Err(e) => {
            log::warn!("Ignoring inbound message: {}", e);
            None
        }
    }
}

pub async fn run_server(
    path: SocketPath,
    tx: Sender<AppEvent>,
    outbound: Receiver<OutboundMessage>,
) {
    // Cleanup old socket if it exists
    if std::fs::metadata(&*path).is_ok() {
        let _ = std::fs::remove_file(&*path);
    }

    let listener = match UnixListener::bind(&*path) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket {}: {}", path.display(), e);
            return;
        }
    };
    log::info!("Listening on {}", path.display());

    let peers = Peers::default();

    {
        let peers = peers.clone();
        tokio::spawn(async move {
            run_broadcaster(outbound, peers).await;
        });
    }

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let tx = tx.clone();
                let (read, write) = stream.into_split();

                let queue = peers.subscribe();
                tokio::spawn(async move {
                    run_writer(write, queue).await;
                });

                tokio::spawn(async move {
                    let mut lines = BufReader::new(read).lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        if let Some(msg) = decode_line(&line)
                            && tx.send(AppEvent::Message(msg)).await.is_err()
                        {
                            break;
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

async fn run_broadcaster(outbound: Receiver<OutboundMessage>, peers: Peers) {
    while let Ok(message) = outbound.recv().await {
        match message.encode() {
            Ok(line) => {
                if peers.broadcast(&line) == 0 {
                    log::debug!("No peer connected, dropped {}", line);
                }
            }
            Err(e) => log::error!("Failed to encode outbound message: {}", e),
        }
    }
}

async fn run_writer(mut write: OwnedWriteHalf, queue: Receiver<String>) {
    while let Ok(mut line) = queue.recv().await {
        line.push('\n');
        if let Err(e) = write.write_all(line.as_bytes()).await {
            log::debug!("Peer went away: {}", e);
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::update::UpdateEvent;

    #[test]
    fn test_decode_line_skips_noise() {
        assert_eq!(decode_line("   "), None);
        assert_eq!(decode_line("show"), None);
        assert_eq!(decode_line(r#"{"event":"nope"}"#), None);
        assert_eq!(
            decode_line("  {\"event\":\"update-downloaded\"}\r"),
            Some(InboundMessage::Update(UpdateEvent::UpdateDownloaded))
        );
    }

    #[test]
    fn test_broadcast_prunes_closed_peers() {
        let peers = Peers::default();
        let alive = peers.subscribe();
        let gone = peers.subscribe();
        drop(gone);

        assert_eq!(peers.broadcast("hello"), 1);
        assert_eq!(alive.try_recv().unwrap(), "hello");
        assert_eq!(peers.len(), 1);
    }

    #[tokio::test]
    async fn test_socket_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = SocketPath::new(dir.path().join("shell.sock"));
        let (event_tx, event_rx) = async_channel::unbounded();
        let (out_tx, out_rx) = async_channel::unbounded();

        tokio::spawn(run_server(path.clone(), event_tx, out_rx));

        let mut stream = loop {
            match tokio::net::UnixStream::connect(&*path).await {
                Ok(s) => break s,
                Err(_) => tokio::time::sleep(std::time::Duration::from_millis(10)).await,
            }
        };

        stream
            .write_all(b"{\"event\":\"checking-for-update\"}\n")
            .await
            .unwrap();
        match event_rx.recv().await.unwrap() {
            AppEvent::Message(msg) => {
                assert_eq!(msg, InboundMessage::Update(UpdateEvent::CheckingForUpdate))
            }
            other => panic!("unexpected event {other:?}"),
        }

        out_tx
            .send(OutboundMessage::ShowText {
                text: "Waheguru".to_string(),
            })
            .await
            .unwrap();
        let mut lines = BufReader::new(stream).lines();
        let line = lines.next_line().await.unwrap().unwrap();
        assert_eq!(line, r#"{"event":"show-text","payload":{"text":"Waheguru"}}"#);
    }
}
