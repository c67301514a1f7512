//! Mapvote command handler
//!
//! Handles: mapvote
//!
//! The gateway between the slash command and the veto session: checks the
//! role gate, acknowledges the command, spawns the session, and turns
//! session failures into channel messages. Nothing here crashes the process.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use log::{error, info, warn};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::mention::Mentionable;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::get_user_option;
use crate::interaction::{DiscordPrompts, VetoChannel};
use crate::veto::{VetoError, VetoSession};

const ALREADY_IN_PROGRESS: &str = "A map vote is already in progress.";
const GENERIC_FAILURE: &str = "An error occurred. Please try again.";
const NO_OVERLAP: &str =
    "The captains' category picks have no category in common. Start a new vote and agree on at least one shared category.";

/// Handler for /mapvote - the two-captain map veto
pub struct MapvoteHandler;

#[async_trait]
impl SlashCommandHandler for MapvoteHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["mapvote"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();

        // Role gate runs before any session logic and never touches the guard.
        let authorized = command
            .member
            .as_ref()
            .map(|member| member.roles.contains(&ctx.required_role_id))
            .unwrap_or(false);
        if !authorized {
            info!(
                "[{request_id}] /mapvote denied: user {} lacks the required role",
                command.user.id
            );
            return ephemeral_reply(
                serenity_ctx,
                command,
                &format!(
                    "You need the {} role to use this command.",
                    ctx.required_role_id.mention()
                ),
            )
            .await;
        }

        let captain1 = get_user_option(&command.data.options, "captain1")
            .ok_or_else(|| anyhow::anyhow!("Missing captain1 argument"))?;
        let captain2 = get_user_option(&command.data.options, "captain2")
            .ok_or_else(|| anyhow::anyhow!("Missing captain2 argument"))?;

        // Fail fast on a running vote; the session re-checks atomically when
        // it acquires the guard.
        if ctx.guard.is_active() {
            warn!("[{request_id}] Map vote already in progress");
            return ephemeral_reply(serenity_ctx, command, ALREADY_IN_PROGRESS).await;
        }

        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| {
                        message.content(format!(
                            "Starting a map vote between {} and {}.",
                            captain1.mention(),
                            captain2.mention()
                        ))
                    })
            })
            .await?;

        info!(
            "[{request_id}] Starting map vote in channel {} (captains {captain1}, {captain2})",
            command.channel_id
        );

        let channel = VetoChannel::new(serenity_ctx.http.clone(), command.channel_id);
        let prompts = DiscordPrompts::new(
            channel.clone(),
            ctx.router.clone(),
            ctx.catalog.category_names().map(str::to_string).collect(),
            ctx.prompt_timeout,
        );
        let guard = ctx.guard.clone();
        let catalog = ctx.catalog.clone();

        // The vote can suspend for as long as the captains deliberate, so it
        // runs detached from the interaction handler.
        tokio::spawn(async move {
            let mut session = VetoSession::new(captain1, captain2);
            match session.run(&guard, &catalog, &prompts).await {
                Ok(map) => info!("[{request_id}] Map vote resolved: {map}"),
                Err(err) => {
                    error!("[{request_id}] Map vote failed: {err}");
                    let text = match &err {
                        VetoError::SessionAlreadyActive => ALREADY_IN_PROGRESS,
                        VetoError::NoOverlappingCategory => NO_OVERLAP,
                        _ => GENERIC_FAILURE,
                    };
                    if let Err(send_err) = channel.say(text).await {
                        error!("[{request_id}] Failed to report map vote failure: {send_err}");
                    }
                }
            }
        });

        Ok(())
    }
}

async fn ephemeral_reply(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    text: &str,
) -> Result<()> {
    command
        .create_interaction_response(&serenity_ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| message.content(text).ephemeral(true))
        })
        .await?;
    Ok(())
}
