use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::core::game::Game;
use crate::core::world::WorldData;
use crate::engine::network::{NetworkManager, TcpTransport};

/// Where the server listens when no address is given.
pub const DEFAULT_ADDR: &str = "0.0.0.0:1234";

pub const DEFAULT_TICK_MS: u64 = 200;

/// Pause between ticks when none is configured.
pub const DEFAULT_TICK: Duration = Duration::from_millis(DEFAULT_TICK_MS);

pub struct MudEngine {
    pub(crate) network: NetworkManager,
    game: Game,
    tick: Duration,
}

impl MudEngine {
    pub async fn new(addr: &str, world: &WorldData) -> anyhow::Result<Self> {
        Ok(Self {
            network: NetworkManager::bind(addr).await?,
            game: Game::new(world),
            tick: DEFAULT_TICK,
        })
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick.max(Duration::from_millis(1));
        self
    }

    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.network.local_addr()
    }

    /// Runs until Ctrl-C.
    pub async fn run(self) -> anyhow::Result<()> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "cannot listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Accepts players and ticks the world until `shutdown` resolves.
    pub async fn run_until<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()>,
    {
        let Self { network, mut game, tick } = self;
        info!(addr = %network.local_addr()?, tick_ms = tick.as_millis() as u64, "server listening");

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let accept_task = tokio::spawn(network.start_accept_loop(event_tx));
        let mut transport = TcpTransport::new(event_rx);

        let mut interval = tokio::time::interval(tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!(players = game.sessions().len(), "shutting down");
                    break;
                }
                _ = interval.tick() => {
                    game.tick(&mut transport);
                }
            }
        }

        accept_task.abort();
        Ok(())
    }
}
