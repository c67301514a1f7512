//! # Discord Prompts
//!
//! The Discord-backed implementation of the session's [`CaptainPrompts`]
//! trait. Each prompt posts a message with components, registers it with the
//! router, suspends until the authorized captain's interaction is delivered,
//! then finalizes the message and posts feedback to the channel.
//!
//! The category prompt is deleted on completion and replaced with a summary
//! line; the ban prompt is edited in place so the banned map shows in red.

use anyhow::Context as _;
use async_trait::async_trait;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::id::{MessageId, UserId};
use serenity::model::mention::Mentionable;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

use crate::interaction::channel::VetoChannel;
use crate::interaction::components::{
    ban_index_from_custom_id, create_ban_buttons, create_category_menu,
    create_resolved_ban_buttons,
};
use crate::interaction::router::InteractionRouter;
use crate::veto::{CaptainPrompts, VetoError, CATEGORY_PICKS};

/// Captain prompts rendered as Discord components.
pub struct DiscordPrompts {
    channel: VetoChannel,
    router: Arc<InteractionRouter>,
    category_names: Vec<String>,
    timeout: Option<Duration>,
}

impl DiscordPrompts {
    pub fn new(
        channel: VetoChannel,
        router: Arc<InteractionRouter>,
        category_names: Vec<String>,
        timeout: Option<Duration>,
    ) -> Self {
        DiscordPrompts {
            channel,
            router,
            category_names,
            timeout,
        }
    }

    /// Wait for the routed reply, honoring the configured timeout. Without a
    /// timeout the prompt waits indefinitely.
    async fn await_reply(
        &self,
        rx: oneshot::Receiver<MessageComponentInteraction>,
        message_id: MessageId,
    ) -> Result<MessageComponentInteraction, VetoError> {
        let received = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, rx).await {
                Ok(received) => received,
                Err(_) => {
                    self.router.unregister(message_id);
                    return Err(VetoError::PromptTimeout);
                }
            },
            None => rx.await,
        };
        received.map_err(|_| {
            VetoError::Channel(anyhow::anyhow!(
                "prompt channel closed before a response arrived"
            ))
        })
    }
}

#[async_trait]
impl CaptainPrompts for DiscordPrompts {
    async fn announce(&self, text: &str) -> Result<(), VetoError> {
        self.channel.say(text).await?;
        Ok(())
    }

    async fn select_categories(&self, captain: UserId) -> Result<Vec<String>, VetoError> {
        let message = self
            .channel
            .prompt(
                &format!(
                    "{}, please select {CATEGORY_PICKS} categories.",
                    captain.mention()
                ),
                create_category_menu(&self.category_names),
            )
            .await?;
        let rx = self.router.register(message.id, captain);
        let interaction = self.await_reply(rx, message.id).await?;

        let picks = interaction.data.values.clone();

        // Acknowledge, drop the menu, summarize the picks in the channel.
        interaction
            .create_interaction_response(self.channel.http(), |response| {
                response.kind(InteractionResponseType::DeferredUpdateMessage)
            })
            .await
            .context("failed to acknowledge category selection")?;
        self.channel.delete(&message).await?;
        self.channel
            .say(&format!(
                "User {} selected {}.",
                captain.mention(),
                picks.join(", ")
            ))
            .await?;

        Ok(picks)
    }

    async fn ban_one(&self, captain: UserId, candidates: &[String]) -> Result<String, VetoError> {
        let message = self
            .channel
            .prompt(
                &format!("{}, please ban one map.", captain.mention()),
                create_ban_buttons(candidates),
            )
            .await?;
        let rx = self.router.register(message.id, captain);
        let interaction = self.await_reply(rx, message.id).await?;

        let index = ban_index_from_custom_id(&interaction.data.custom_id)
            .filter(|i| *i < candidates.len())
            .ok_or_else(|| {
                VetoError::InvalidSelection(format!(
                    "unrecognized ban control '{}'",
                    interaction.data.custom_id
                ))
            })?;
        let banned = candidates[index].clone();

        interaction
            .create_interaction_response(self.channel.http(), |response| {
                response
                    .kind(InteractionResponseType::UpdateMessage)
                    .interaction_response_data(|data| {
                        data.content(format!(
                            "{} banned the map {}.",
                            captain.mention(),
                            banned
                        ))
                        .set_components(create_resolved_ban_buttons(candidates, index))
                    })
            })
            .await
            .context("failed to acknowledge ban pick")?;

        Ok(banned)
    }
}
