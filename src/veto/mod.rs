//! # Veto Feature
//!
//! The two-captain map-veto state machine: category negotiation, a random
//! draw from the overlap, and alternating map bans down to a single result.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Guard empty category overlap with an explicit error
//! - 1.1.0: Injectable session guard replaces the module-level flag
//! - 1.0.0: Initial implementation

pub mod guard;
pub mod session;

pub use guard::{SessionGuard, SessionPermit};
pub use session::{CaptainPrompts, VetoError, VetoSession, VetoState, CATEGORY_PICKS};
