use thiserror::Error;

/// Terminal outcomes of a verification flow.
///
/// None of these are retried automatically; the user re-invokes `!verify`
/// to start over. Every variant maps to a user-visible message in
/// `flow::user_message` and a log entry in the handler.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("no matching verification record")]
    NotFound,

    #[error("verification details already used")]
    AlreadyUsed,

    #[error("timed out waiting for a reply")]
    Timeout,

    #[error("submitted passcode did not match")]
    CodeMismatch,

    #[error("configured role not found in guild")]
    RoleMissing,

    #[error("missing permission to assign the role")]
    PermissionDenied,

    #[error("failed to deliver passcode email")]
    Delivery(#[source] anyhow::Error),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

/// Failure modes of the role-grant seam.
///
/// Permission problems and plain transport failures are reported to the
/// user differently, so they stay distinct here.
#[derive(Debug, Error)]
pub enum RoleGrantError {
    #[error("role not found in guild")]
    RoleMissing,

    #[error("missing permission to assign roles")]
    PermissionDenied,

    #[error("role grant request failed")]
    Transport(#[source] anyhow::Error),
}

impl From<RoleGrantError> for VerificationError {
    fn from(err: RoleGrantError) -> Self {
        match err {
            RoleGrantError::RoleMissing => VerificationError::RoleMissing,
            RoleGrantError::PermissionDenied => VerificationError::PermissionDenied,
            RoleGrantError::Transport(e) => {
                VerificationError::Unexpected(e.context("assigning the role"))
            }
        }
    }
}
