// Core layer - configuration and the map catalog
pub mod core;

// Veto feature - session state machine and single-flight guard
pub mod veto;

// Interaction layer - components, reply routing, Discord prompts
pub mod interaction;

// Application layer
pub mod commands;

// Re-export the types most callers need
pub use core::{Config, MapCatalog};
pub use interaction::{DiscordPrompts, InteractionRouter, VetoChannel};
pub use veto::{SessionGuard, VetoError, VetoSession, VetoState};
