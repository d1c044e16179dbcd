// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// The verification flow depends on these seams so it can run against
// Discord in production and against mocks in tests.

use anyhow::Result;
use async_trait::async_trait;
use serenity::all::UserId;
use std::time::Duration;

use crate::domains::verification::errors::RoleGrantError;

// =============================================================================
// Conversation Trait (Infrastructure - interactive prompt/reply channel)
// =============================================================================

#[async_trait]
pub trait BaseConversation: Send + Sync {
    /// Post a message into the flow's channel
    async fn say(&self, text: &str) -> Result<()>;

    /// Suspend until the flow's user replies in the flow's channel.
    ///
    /// Returns None when no reply arrives within `timeout`.
    async fn await_reply(&self, timeout: Duration) -> Option<String>;
}

// =============================================================================
// Notifier Trait (Infrastructure - passcode delivery)
// =============================================================================

#[async_trait]
pub trait BaseNotifier: Send + Sync {
    /// Deliver a passcode to an email address.
    ///
    /// Fire-and-forget from the flow's perspective: failures are logged by
    /// the caller, never retried.
    async fn send_passcode(&self, email: &str, code: &str) -> Result<()>;
}

// =============================================================================
// Role Granter Trait (Infrastructure - guild role assignment)
// =============================================================================

#[async_trait]
pub trait BaseRoleGranter: Send + Sync {
    /// Grant the configured role to a user
    async fn grant(&self, user_id: UserId) -> Result<(), RoleGrantError>;
}
