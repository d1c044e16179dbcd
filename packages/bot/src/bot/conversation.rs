//! Discord adapter for the conversation seam

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use serenity::all::{ChannelId, Http, ShardMessenger, UserId};
use serenity::collector::MessageCollector;
use std::sync::Arc;
use std::time::Duration;

use crate::kernel::BaseConversation;

/// One user's interactive exchange in the verification channel.
///
/// Replies are matched on both author and channel, so several users can be
/// mid-flow in the same channel without stealing each other's answers.
pub struct ChannelConversation {
    http: Arc<Http>,
    shard: ShardMessenger,
    channel_id: ChannelId,
    user_id: UserId,
}

impl ChannelConversation {
    pub fn new(
        http: Arc<Http>,
        shard: ShardMessenger,
        channel_id: ChannelId,
        user_id: UserId,
    ) -> Self {
        Self {
            http,
            shard,
            channel_id,
            user_id,
        }
    }
}

#[async_trait]
impl BaseConversation for ChannelConversation {
    async fn say(&self, text: &str) -> Result<()> {
        self.channel_id
            .say(&self.http, text)
            .await
            .context("posting prompt to channel")?;
        Ok(())
    }

    async fn await_reply(&self, timeout: Duration) -> Option<String> {
        MessageCollector::new(self.shard.clone())
            .channel_id(self.channel_id)
            .author_id(self.user_id)
            .timeout(timeout)
            .next()
            .await
            .map(|message| message.content)
    }
}
