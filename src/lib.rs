pub mod core {
	pub mod broadcast;
	pub mod commands;
	pub mod game;
	pub mod objects;
	pub mod session;
	pub mod world;
}

pub mod cli;
pub mod engine;
pub mod error;
pub mod worlds;

// Re-export for convenience
pub use crate::core::game::{Game, PendingCommand, Transport};
pub use crate::core::session::SessionId;
pub use crate::core::world::WorldData;
