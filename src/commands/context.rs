//! Shared context for command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use std::sync::Arc;
use std::time::Duration;

use serenity::model::id::RoleId;

use crate::core::catalog::MapCatalog;
use crate::interaction::InteractionRouter;
use crate::veto::SessionGuard;

/// Shared services for all command handlers:
/// - the map catalog (read-only after startup)
/// - the single-flight session guard
/// - the interaction router prompts await replies through
/// - the role gate and prompt timeout from configuration
#[derive(Clone)]
pub struct CommandContext {
    pub catalog: Arc<MapCatalog>,
    pub guard: SessionGuard,
    pub router: Arc<InteractionRouter>,
    pub required_role_id: RoleId,
    pub prompt_timeout: Option<Duration>,
}

impl CommandContext {
    pub fn new(
        catalog: Arc<MapCatalog>,
        guard: SessionGuard,
        router: Arc<InteractionRouter>,
        required_role_id: RoleId,
        prompt_timeout: Option<Duration>,
    ) -> Self {
        Self {
            catalog,
            guard,
            router,
            required_role_id,
            prompt_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_context_is_clone() {
        // Handlers share the context across spawned sessions.
        fn assert_clone<T: Clone>() {}
        assert_clone::<CommandContext>();
    }
}
