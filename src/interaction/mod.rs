//! # Interaction Layer
//!
//! Everything captain-facing: the component builders (select menu, ban
//! buttons), the router that delivers component interactions to the prompt
//! awaiting them, and the Discord-backed implementation of the session's
//! prompt trait.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Optional prompt timeout
//! - 1.1.0: Route replies through a oneshot registry instead of per-button callbacks
//! - 1.0.0: Initial implementation

pub mod channel;
pub mod components;
pub mod prompt;
pub mod router;

pub use channel::VetoChannel;
pub use prompt::DiscordPrompts;
pub use router::InteractionRouter;
