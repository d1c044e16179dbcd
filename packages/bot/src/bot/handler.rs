//! Gateway event handler
//!
//! Serenity dispatches each event on its own task, so a flow can sit in a
//! reply wait for minutes without stalling other users' commands.

use serenity::all::{Context, EventHandler, Message, Ready};
use serenity::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::bot::{ChannelConversation, DiscordRoleGranter};
use crate::domains::verification::{run_verification, VerificationError};
use crate::kernel::BotDeps;

const VERIFY_COMMAND: &str = "!verify";

pub struct Handler {
    deps: Arc<BotDeps>,
}

impl Handler {
    pub fn new(deps: Arc<BotDeps>) -> Self {
        Self { deps }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("Logged in as {} ({})", ready.user.name, ready.user.id);
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot || msg.content.trim() != VERIFY_COMMAND {
            return;
        }

        if msg.channel_id.get() != self.deps.config.verify_channel_id {
            warn!(user = %msg.author.id, channel = %msg.channel_id, "Verify command outside designated channel");
            if let Err(e) = msg
                .reply(
                    &ctx.http,
                    "This command can only be used in the designated verification channel.",
                )
                .await
            {
                warn!("Failed to send channel refusal: {e:#}");
            }
            return;
        }

        let Some(guild_id) = msg.guild_id else {
            warn!(user = %msg.author.id, "Verify command without guild context");
            return;
        };

        info!(user = %msg.author.id, "Verification command received");

        let conversation = ChannelConversation::new(
            ctx.http.clone(),
            ctx.shard.clone(),
            msg.channel_id,
            msg.author.id,
        );
        let role_granter = DiscordRoleGranter::new(
            ctx.http.clone(),
            guild_id,
            self.deps.config.verified_role_name.clone(),
        );

        match run_verification(msg.author.id, &conversation, &role_granter, &self.deps).await {
            Ok(()) => info!(user = %msg.author.id, "Verification succeeded"),
            Err(
                err @ (VerificationError::Timeout
                | VerificationError::NotFound
                | VerificationError::AlreadyUsed
                | VerificationError::CodeMismatch),
            ) => info!(user = %msg.author.id, "Verification flow ended: {err}"),
            Err(err) => error!(user = %msg.author.id, "Verification flow failed: {err:#}"),
        }
    }
}
