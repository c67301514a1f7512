use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use serenity::async_trait;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::gateway::Ready;
use serenity::model::id::{GuildId, RoleId};
use serenity::prelude::*;
use std::sync::Arc;

use mapvote::commands::{
    create_all_handlers, register_global_commands, register_guild_commands, CommandContext,
    CommandRegistry,
};
use mapvote::core::{Config, MapCatalog};
use mapvote::interaction::InteractionRouter;
use mapvote::veto::SessionGuard;

struct Handler {
    context: Arc<CommandContext>,
    registry: CommandRegistry,
    router: Arc<InteractionRouter>,
    guild_id: Option<GuildId>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        // Register slash commands - guild commands for development (instant),
        // global for production
        if let Some(guild_id) = self.guild_id {
            info!("🔧 Development mode: Registering commands for guild {guild_id}");
            if let Err(e) = register_guild_commands(&ctx, guild_id).await {
                error!("❌ Failed to register guild slash commands: {e}");
            } else {
                info!("✅ Successfully registered slash commands for guild {guild_id}");
            }
        } else {
            info!("🌍 Production mode: Registering commands globally");
            if let Err(e) = register_global_commands(&ctx).await {
                error!("❌ Failed to register global slash commands: {e}");
            } else {
                info!("✅ Successfully registered slash commands globally (may take up to 1 hour to propagate)");
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::ApplicationCommand(command) => {
                let name = command.data.name.clone();
                match self.registry.get(&name) {
                    Some(handler) => {
                        if let Err(e) = handler
                            .handle(Arc::clone(&self.context), &ctx, &command)
                            .await
                        {
                            error!("Error handling slash command '{name}': {e}");
                            let _ = command
                                .create_interaction_response(&ctx.http, |response| {
                                    response
                                        .kind(InteractionResponseType::ChannelMessageWithSource)
                                        .interaction_response_data(|message| {
                                            message
                                                .content("An error occurred. Please try again.")
                                                .ephemeral(true)
                                        })
                                })
                                .await;
                        }
                    }
                    None => {
                        error!("Received unknown slash command: {name}");
                        let _ = command
                            .create_interaction_response(&ctx.http, |response| {
                                response
                                    .kind(InteractionResponseType::ChannelMessageWithSource)
                                    .interaction_response_data(|message| {
                                        message.content("Unknown command.").ephemeral(true)
                                    })
                            })
                            .await;
                    }
                }
            }
            Interaction::MessageComponent(component) => {
                if let Err(e) = self.router.dispatch(&ctx, component).await {
                    error!("Error routing component interaction: {e}");
                }
            }
            Interaction::Ping(_) => {
                info!("Ping interaction received - Discord health check");
            }
            _ => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Mapvote Discord Bot...");

    let catalog = match &config.map_pool_path {
        Some(path) => {
            let catalog = MapCatalog::load(path)?;
            info!("📄 Loaded map pool from {path}");
            catalog
        }
        None => {
            info!("📄 No MAP_POOL_PATH set - using the built-in map pool");
            MapCatalog::default()
        }
    };
    info!(
        "🗺️ Map pool: {} categories, {} maps",
        catalog.len(),
        catalog.map_count()
    );
    if let Some(timeout) = config.prompt_timeout() {
        info!("⏱️ Prompt timeout: {}s", timeout.as_secs());
    }

    let router = Arc::new(InteractionRouter::new());
    let context = Arc::new(CommandContext::new(
        Arc::new(catalog),
        SessionGuard::new(),
        Arc::clone(&router),
        RoleId(config.required_role_id),
        config.prompt_timeout(),
    ));

    let mut registry = CommandRegistry::new();
    for handler in create_all_handlers() {
        registry.register(handler);
    }

    let guild_id = config.discord_guild_id.map(GuildId);

    let handler = Handler {
        context,
        registry,
        router,
        guild_id,
    };

    let intents = GatewayIntents::GUILDS;

    // Build the Discord client with proper gateway configuration
    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            error!("This could indicate:");
            error!("  - Invalid bot token format");
            error!("  - Network issues reaching Discord API");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");
    info!("Gateway intents: {intents:?}");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        error!("This could be due to:");
        error!("  - Invalid bot token");
        error!("  - Network connectivity issues");
        error!("  - Discord API outage");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
