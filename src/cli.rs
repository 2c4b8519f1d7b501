use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use crate::core::world::{WorldData, WorldGraph};
use crate::engine::{MudEngine, DEFAULT_ADDR, DEFAULT_TICK_MS};
use crate::worlds;

#[derive(Parser)]
#[command(name = "towermud")]
#[command(about = "A small multi-user text world served over telnet")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve a world to telnet clients
    Serve {
        /// Address to bind the server to (e.g., "0.0.0.0:1234")
        #[arg(short, long, default_value = DEFAULT_ADDR)]
        addr: String,

        /// Bundled world id or path to a world JSON file
        #[arg(short, long)]
        world: Option<String>,

        /// Pause between world updates, in milliseconds
        #[arg(short, long, default_value_t = DEFAULT_TICK_MS)]
        tick_ms: u64,
    },
    /// Load and validate a world, then print its layout
    Check {
        /// Bundled world id or path to a world JSON file
        #[arg(short, long)]
        world: Option<String>,
    },
    /// List bundled worlds
    List,
}

pub async fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { addr, world, tick_ms }) => serve(&addr, world.as_deref(), tick_ms).await,
        Some(Commands::Check { world }) => {
            let data = load(world.as_deref())?;
            print!("{}", summarize(&data));
            Ok(())
        }
        Some(Commands::List) => {
            println!("Bundled worlds:");
            for entry in worlds::get_all_worlds() {
                println!("  {:<16}{}", entry.id, entry.description);
            }
            Ok(())
        }
        None => serve(DEFAULT_ADDR, None, DEFAULT_TICK_MS).await,
    }
}

fn load(world: Option<&str>) -> anyhow::Result<WorldData> {
    worlds::resolve(world)
        .with_context(|| format!("cannot load world '{}'", world.unwrap_or(worlds::DEFAULT_WORLD)))
}

async fn serve(addr: &str, world: Option<&str>, tick_ms: u64) -> anyhow::Result<()> {
    let data = load(world)?;
    let engine = MudEngine::new(addr, &data)
        .await
        .with_context(|| format!("cannot bind {addr}"))?
        .with_tick(Duration::from_millis(tick_ms));
    engine.run().await
}

/// Human-readable layout of a world, as printed by `check`.
pub fn summarize(data: &WorldData) -> String {
    let graph = WorldGraph::from_rooms(&data.rooms);
    let mut out = format!(
        "World '{}': {} rooms, {} objects, start at '{}'\n",
        data.name,
        data.rooms.len(),
        data.objects.len(),
        data.start
    );
    for room in graph.room_names() {
        let exits: Vec<String> = graph
            .exits(room)
            .into_iter()
            .map(|(keyword, to)| format!("{keyword} -> {to}"))
            .collect();
        out.push_str(&format!("  {room}\n"));
        if !exits.is_empty() {
            out.push_str(&format!("    exits: {}\n", exits.join(", ")));
        }
        for object in data.objects.iter().filter(|o| o.location == room) {
            let kind = if object.portable { "portable" } else { "fixed" };
            out.push_str(&format!("    object: {} ({kind})\n", object.name));
        }
    }
    out
}
