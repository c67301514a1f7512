//! # Interaction Router
//!
//! Delivers message-component interactions to whichever prompt is awaiting
//! them. A prompt registers its message id and the one captain allowed to
//! answer; everyone else gets an ephemeral notice and the prompt keeps
//! waiting. A delivered reply consumes the registration, so each prompt is
//! answered at most once.

use anyhow::Result;
use dashmap::DashMap;
use log::{debug, info};
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::id::{MessageId, UserId};
use serenity::prelude::Context;
use tokio::sync::oneshot;

const NOT_AUTHORIZED: &str = "You're not authorized to interact with this menu.";
const STALE_CONTROL: &str = "This control is no longer active.";

struct PendingPrompt {
    authorized_user: UserId,
    tx: oneshot::Sender<MessageComponentInteraction>,
}

/// Outcome of claiming an interaction for a registered prompt.
enum Claim {
    Deliver(oneshot::Sender<MessageComponentInteraction>),
    NotAuthorized,
    Stale,
}

/// Registry of prompts awaiting a component interaction, keyed by the
/// prompt's message id.
#[derive(Default)]
pub struct InteractionRouter {
    pending: DashMap<MessageId, PendingPrompt>,
}

impl InteractionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a prompt message and its authorized responder. The returned
    /// receiver resolves with the captain's interaction.
    pub fn register(
        &self,
        message_id: MessageId,
        authorized_user: UserId,
    ) -> oneshot::Receiver<MessageComponentInteraction> {
        let (tx, rx) = oneshot::channel();
        self.pending.insert(
            message_id,
            PendingPrompt {
                authorized_user,
                tx,
            },
        );
        debug!("Registered prompt {message_id} for user {authorized_user}");
        rx
    }

    /// Drop a registration (used when a prompt times out).
    pub fn unregister(&self, message_id: MessageId) {
        self.pending.remove(&message_id);
    }

    /// Whether a prompt is still awaiting its reply.
    pub fn is_pending(&self, message_id: MessageId) -> bool {
        self.pending.contains_key(&message_id)
    }

    /// Claim the interaction for the prompt on `message_id`, removing the
    /// registration only when `user` is the authorized responder.
    fn claim(&self, message_id: MessageId, user: UserId) -> Claim {
        if let Some((_, entry)) = self
            .pending
            .remove_if(&message_id, |_, e| e.authorized_user == user)
        {
            return Claim::Deliver(entry.tx);
        }
        if self.pending.contains_key(&message_id) {
            Claim::NotAuthorized
        } else {
            Claim::Stale
        }
    }

    /// Route one component interaction from the gateway event handler.
    pub async fn dispatch(
        &self,
        ctx: &Context,
        interaction: MessageComponentInteraction,
    ) -> Result<()> {
        let message_id = interaction.message.id;
        let user_id = interaction.user.id;

        match self.claim(message_id, user_id) {
            Claim::Deliver(tx) => {
                debug!("Delivering component reply on {message_id} from user {user_id}");
                if let Err(interaction) = tx.send(interaction) {
                    // The awaiting prompt gave up (timeout) between claim and send.
                    ephemeral_notice(ctx, &interaction, STALE_CONTROL).await?;
                }
            }
            Claim::NotAuthorized => {
                info!("User {user_id} tried to answer a prompt reserved for another captain");
                ephemeral_notice(ctx, &interaction, NOT_AUTHORIZED).await?;
            }
            Claim::Stale => {
                debug!("Component interaction on inactive message {message_id}");
                ephemeral_notice(ctx, &interaction, STALE_CONTROL).await?;
            }
        }
        Ok(())
    }
}

async fn ephemeral_notice(
    ctx: &Context,
    interaction: &MessageComponentInteraction,
    text: &str,
) -> Result<()> {
    interaction
        .create_interaction_response(&ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| message.content(text).ephemeral(true))
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(msg: u64, user: u64) -> (MessageId, UserId) {
        (MessageId(msg), UserId(user))
    }

    #[test]
    fn authorized_claim_consumes_registration() {
        let router = InteractionRouter::new();
        let (msg, captain) = ids(10, 1);
        let mut rx = router.register(msg, captain);

        assert!(router.is_pending(msg));
        let claim = router.claim(msg, captain);
        assert!(matches!(claim, Claim::Deliver(_)));
        assert!(!router.is_pending(msg));

        // Dropping the claimed sender closes the receiver.
        drop(claim);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn wrong_user_keeps_prompt_pending() {
        let router = InteractionRouter::new();
        let (msg, captain) = ids(10, 1);
        let _rx = router.register(msg, captain);

        assert!(matches!(router.claim(msg, UserId(2)), Claim::NotAuthorized));
        assert!(router.is_pending(msg));

        // The authorized captain still succeeds afterwards.
        assert!(matches!(router.claim(msg, captain), Claim::Deliver(_)));
    }

    #[test]
    fn unknown_message_is_stale() {
        let router = InteractionRouter::new();
        assert!(matches!(router.claim(MessageId(99), UserId(1)), Claim::Stale));
    }

    #[test]
    fn consumed_registration_routes_as_stale() {
        let router = InteractionRouter::new();
        let (msg, captain) = ids(10, 1);
        let _rx = router.register(msg, captain);

        assert!(matches!(router.claim(msg, captain), Claim::Deliver(_)));
        assert!(matches!(router.claim(msg, captain), Claim::Stale));
    }

    #[test]
    fn unregister_clears_pending_prompt() {
        let router = InteractionRouter::new();
        let (msg, captain) = ids(10, 1);
        let _rx = router.register(msg, captain);

        router.unregister(msg);
        assert!(!router.is_pending(msg));
        assert!(matches!(router.claim(msg, captain), Claim::Stale));
    }
}
