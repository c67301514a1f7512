//! Thin channel surface the veto flow renders through.

use anyhow::{Context as _, Result};
use serenity::builder::CreateComponents;
use serenity::http::Http;
use serenity::model::channel::Message;
use serenity::model::id::ChannelId;
use std::sync::Arc;

/// The one channel a veto session talks to.
#[derive(Clone)]
pub struct VetoChannel {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl VetoChannel {
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        VetoChannel { http, channel_id }
    }

    pub fn http(&self) -> &Arc<Http> {
        &self.http
    }

    /// Post plain text.
    pub async fn say(&self, content: &str) -> Result<()> {
        self.channel_id
            .say(&self.http, content)
            .await
            .context("failed to send channel message")?;
        Ok(())
    }

    /// Post a prompt message carrying interactive components.
    pub async fn prompt(&self, content: &str, components: CreateComponents) -> Result<Message> {
        self.channel_id
            .send_message(&self.http, |message| {
                message.content(content).set_components(components)
            })
            .await
            .context("failed to send prompt message")
    }

    /// Remove a prompt message.
    pub async fn delete(&self, message: &Message) -> Result<()> {
        self.channel_id
            .delete_message(&self.http, message.id)
            .await
            .context("failed to delete prompt message")?;
        Ok(())
    }
}
