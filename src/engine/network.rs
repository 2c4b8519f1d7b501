use std::collections::HashMap;
use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::core::broadcast::Sink;
use crate::core::game::{PendingCommand, Transport};
use crate::core::session::SessionId;
use crate::engine::telnet::LineDecoder;
use crate::engine::EngineEvent;

pub struct NetworkManager {
    listener: TcpListener,
    next_id: u64,
}

impl NetworkManager {
    pub async fn bind(addr: &str) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            next_id: 1,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Background task accepting players; each connection gets its own task.
    pub async fn start_accept_loop(mut self, event_tx: mpsc::UnboundedSender<EngineEvent>) -> anyhow::Result<()> {
        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "accept failed");
                    continue;
                }
            };
            if event_tx.is_closed() {
                return Ok(());
            }

            let id = SessionId(self.next_id);
            self.next_id += 1;
            info!(session = %id, %peer, "connection accepted");
            tokio::spawn(handle_connection(stream, id, event_tx.clone()));
        }
    }
}

async fn handle_connection(stream: TcpStream, id: SessionId, event_tx: mpsc::UnboundedSender<EngineEvent>) {
    let (mut reader, mut writer) = stream.into_split();
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<String>();

    if event_tx.send(EngineEvent::Opened(id, out_tx)).is_err() {
        return;
    }

    // Outgoing text: one message per send, terminated telnet-style.
    let writer_task = tokio::spawn(async move {
        while let Some(text) = out_rx.recv().await {
            let mut bytes = text.into_bytes();
            bytes.extend_from_slice(b"\r\n");
            if writer.write_all(&bytes).await.is_err() {
                break;
            }
        }
    });

    let mut decoder = LineDecoder::new();
    let mut buf = vec![0u8; 1024];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                let delivered = decoder
                    .feed(&buf[..n])
                    .into_iter()
                    .all(|line| event_tx.send(EngineEvent::LineReceived(id, line)).is_ok());
                if !delivered {
                    break;
                }
            }
            Err(e) => {
                debug!(session = %id, error = %e, "read failed");
                break;
            }
        }
    }

    let _ = event_tx.send(EngineEvent::Closed(id));
    writer_task.abort();
}

/// The core's view of the TCP side: queued events in, text out.
pub struct TcpTransport {
    events: mpsc::UnboundedReceiver<EngineEvent>,
    outboxes: HashMap<SessionId, mpsc::UnboundedSender<String>>,
    opened: Vec<SessionId>,
    closed: Vec<SessionId>,
    commands: Vec<PendingCommand>,
}

impl TcpTransport {
    pub fn new(events: mpsc::UnboundedReceiver<EngineEvent>) -> Self {
        Self {
            events,
            outboxes: HashMap::new(),
            opened: Vec::new(),
            closed: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub fn connected(&self) -> usize {
        self.outboxes.len()
    }
}

impl Sink for TcpTransport {
    fn send(&mut self, session: SessionId, text: &str) {
        if let Some(outbox) = self.outboxes.get(&session) {
            let _ = outbox.send(text.to_string());
        }
    }
}

impl Transport for TcpTransport {
    /// Moves everything queued so far into the per-kind buckets without waiting.
    fn poll(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                EngineEvent::Opened(id, outbox) => {
                    self.outboxes.insert(id, outbox);
                    self.opened.push(id);
                }
                EngineEvent::LineReceived(id, line) => {
                    self.commands.push(PendingCommand::parse(id, &line));
                }
                EngineEvent::Closed(id) => {
                    self.outboxes.remove(&id);
                    self.closed.push(id);
                }
            }
        }
    }

    fn new_sessions(&mut self) -> Vec<SessionId> {
        std::mem::take(&mut self.opened)
    }

    fn closed_sessions(&mut self) -> Vec<SessionId> {
        std::mem::take(&mut self.closed)
    }

    fn pending_commands(&mut self) -> Vec<PendingCommand> {
        std::mem::take(&mut self.commands)
    }
}
