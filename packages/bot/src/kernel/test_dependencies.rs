// Mock implementations for testing
//
// Provides mock seams that can be injected into the verification flow.

use anyhow::Result;
use async_trait::async_trait;
use serenity::all::UserId;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domains::verification::errors::RoleGrantError;
use crate::kernel::{BaseConversation, BaseNotifier, BaseRoleGranter};

// =============================================================================
// Mock Notifier
// =============================================================================

pub struct MockNotifier {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// A notifier whose sends always fail. The attempted send is still
    /// recorded, so tests can read the code that would have been delivered.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// All (email, code) pairs handed to this notifier
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// The most recently delivered passcode, if any
    pub fn last_code(&self) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .last()
            .map(|(_, code)| code.clone())
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseNotifier for MockNotifier {
    async fn send_passcode(&self, email: &str, code: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        if self.fail {
            anyhow::bail!("smtp transport unavailable");
        }
        Ok(())
    }
}

// =============================================================================
// Mock Conversation
// =============================================================================

/// One scripted turn of a mock conversation
pub enum ScriptedReply {
    /// Reply with fixed text
    Text(String),
    /// Reply with whatever passcode the notifier delivered last.
    ///
    /// Lets tests script "the user reads the email and types the code in"
    /// without knowing the random code up front.
    DeliveredPasscode(Arc<MockNotifier>),
    /// Never reply; the flow sees a timeout
    NoReply,
}

pub struct MockConversation {
    replies: Mutex<VecDeque<ScriptedReply>>,
    sent: Mutex<Vec<String>>,
}

impl MockConversation {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn with_reply(self, text: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(ScriptedReply::Text(text.to_string()));
        self
    }

    pub fn with_delivered_passcode(self, notifier: Arc<MockNotifier>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(ScriptedReply::DeliveredPasscode(notifier));
        self
    }

    pub fn with_no_reply(self) -> Self {
        self.replies.lock().unwrap().push_back(ScriptedReply::NoReply);
        self
    }

    /// Everything the flow posted into the channel, in order
    pub fn sent_messages(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockConversation {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseConversation for MockConversation {
    async fn say(&self, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn await_reply(&self, _timeout: Duration) -> Option<String> {
        match self.replies.lock().unwrap().pop_front() {
            Some(ScriptedReply::Text(text)) => Some(text),
            Some(ScriptedReply::DeliveredPasscode(notifier)) => notifier.last_code(),
            Some(ScriptedReply::NoReply) | None => None,
        }
    }
}

// =============================================================================
// Mock Role Granter
// =============================================================================

enum GrantOutcome {
    Success,
    RoleMissing,
    PermissionDenied,
    Transport,
}

pub struct MockRoleGranter {
    outcome: GrantOutcome,
    granted: Mutex<Vec<UserId>>,
}

impl MockRoleGranter {
    pub fn new() -> Self {
        Self {
            outcome: GrantOutcome::Success,
            granted: Mutex::new(Vec::new()),
        }
    }

    pub fn role_missing() -> Self {
        Self {
            outcome: GrantOutcome::RoleMissing,
            granted: Mutex::new(Vec::new()),
        }
    }

    pub fn permission_denied() -> Self {
        Self {
            outcome: GrantOutcome::PermissionDenied,
            granted: Mutex::new(Vec::new()),
        }
    }

    pub fn transport_failure() -> Self {
        Self {
            outcome: GrantOutcome::Transport,
            granted: Mutex::new(Vec::new()),
        }
    }

    /// Users this granter successfully granted the role to
    pub fn granted(&self) -> Vec<UserId> {
        self.granted.lock().unwrap().clone()
    }
}

impl Default for MockRoleGranter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRoleGranter for MockRoleGranter {
    async fn grant(&self, user_id: UserId) -> Result<(), RoleGrantError> {
        match self.outcome {
            GrantOutcome::Success => {
                self.granted.lock().unwrap().push(user_id);
                Ok(())
            }
            GrantOutcome::RoleMissing => Err(RoleGrantError::RoleMissing),
            GrantOutcome::PermissionDenied => Err(RoleGrantError::PermissionDenied),
            GrantOutcome::Transport => Err(RoleGrantError::Transport(anyhow::anyhow!(
                "discord api unavailable"
            ))),
        }
    }
}
