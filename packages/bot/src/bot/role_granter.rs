//! Discord adapter for the role-grant seam

use async_trait::async_trait;
use serenity::all::{GuildId, Http, UserId};
use std::sync::Arc;

use crate::domains::verification::errors::RoleGrantError;
use crate::kernel::BaseRoleGranter;

/// Grants the configured role by name within one guild
pub struct DiscordRoleGranter {
    http: Arc<Http>,
    guild_id: GuildId,
    role_name: String,
}

impl DiscordRoleGranter {
    pub fn new(http: Arc<Http>, guild_id: GuildId, role_name: String) -> Self {
        Self {
            http,
            guild_id,
            role_name,
        }
    }
}

#[async_trait]
impl BaseRoleGranter for DiscordRoleGranter {
    async fn grant(&self, user_id: UserId) -> Result<(), RoleGrantError> {
        let roles = self
            .guild_id
            .roles(&self.http)
            .await
            .map_err(|e| RoleGrantError::Transport(anyhow::Error::new(e)))?;

        let role = roles
            .values()
            .find(|role| role.name == self.role_name)
            .ok_or(RoleGrantError::RoleMissing)?;

        self.http
            .add_member_role(self.guild_id, user_id, role.id, Some("email verification"))
            .await
            .map_err(classify)?;

        Ok(())
    }
}

/// Map a Discord API error to the seam's taxonomy (403 is permission denied)
fn classify(err: serenity::Error) -> RoleGrantError {
    if let serenity::Error::Http(serenity::http::HttpError::UnsuccessfulRequest(response)) = &err {
        if response.status_code.as_u16() == 403 {
            return RoleGrantError::PermissionDenied;
        }
    }
    RoleGrantError::Transport(anyhow::Error::new(err))
}
