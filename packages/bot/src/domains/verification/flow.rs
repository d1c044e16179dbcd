//! Verification flow controller
//!
//! Sequences one end-to-end verification attempt for one user:
//! application number → record lookup → passcode by email → passcode entry
//! → role grant → record marked used. Each step that waits on the user
//! suspends without blocking other users' flows.

use serenity::all::UserId;
use tracing::{info, warn};

use crate::domains::verification::errors::VerificationError;
use crate::domains::verification::models::VerificationRecord;
use crate::kernel::{BaseConversation, BaseRoleGranter, BotDeps};

/// How long to wait for the application number
pub const APPLICATION_NUMBER_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

/// How long to wait for the passcode
pub const PASSCODE_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(300);

/// Run one verification flow and report the outcome to the user.
///
/// Returns the terminal outcome for logging; every outcome, success or
/// failure, has already been messaged to the user when this returns.
pub async fn run_verification(
    user_id: UserId,
    conversation: &dyn BaseConversation,
    role_granter: &dyn BaseRoleGranter,
    deps: &BotDeps,
) -> Result<(), VerificationError> {
    let outcome = drive_flow(user_id, conversation, role_granter, deps).await;

    let text = match &outcome {
        Ok(()) => format!(
            "Verified. Role {} has been assigned.",
            deps.config.verified_role_name
        ),
        Err(err) => user_message(err).to_string(),
    };
    if let Err(e) = conversation.say(&text).await {
        warn!(user = %user_id, "Failed to send outcome message: {e:#}");
    }

    outcome
}

async fn drive_flow(
    user_id: UserId,
    conversation: &dyn BaseConversation,
    role_granter: &dyn BaseRoleGranter,
    deps: &BotDeps,
) -> Result<(), VerificationError> {
    conversation
        .say("Please enter your application number:")
        .await?;
    let application_number = conversation
        .await_reply(APPLICATION_NUMBER_TIMEOUT)
        .await
        .ok_or(VerificationError::Timeout)?;
    info!(user = %user_id, "Application number received");

    let record =
        VerificationRecord::find_by_application_number(&application_number, &deps.db_pool)
            .await?
            .ok_or(VerificationError::NotFound)?;
    if record.used {
        return Err(VerificationError::AlreadyUsed);
    }

    let code = deps.otp_store.issue(user_id).await;
    if let Err(e) = deps.notifier.send_passcode(&record.email, &code).await {
        // Delivery is fire-and-forget: the pending code stays valid, so the
        // user can still finish if the mail arrives late or out of band.
        let err = VerificationError::Delivery(e);
        warn!(user = %user_id, "{err:#}; pending code left in place");
    }

    conversation
        .say("An OTP has been sent to your registered email. Please enter the OTP to complete verification:")
        .await?;
    let submitted = conversation
        .await_reply(PASSCODE_TIMEOUT)
        .await
        .ok_or(VerificationError::Timeout)?;

    // Exact comparison, no trimming. A mismatch does not clear the pending
    // entry: the user can re-invoke the command and submit the original
    // code until it expires.
    if !deps.otp_store.validate(user_id, &submitted).await {
        return Err(VerificationError::CodeMismatch);
    }

    // Role grant failures leave the record unused and the code pending, so
    // a re-invoked flow can complete once the transient problem clears.
    role_granter.grant(user_id).await?;

    record.mark_used(&deps.db_pool).await?;
    deps.otp_store.clear(user_id).await;
    info!(user = %user_id, record = record.id, "Verification completed, record marked used");

    Ok(())
}

/// Map a terminal outcome to its user-facing message
fn user_message(err: &VerificationError) -> &'static str {
    match err {
        VerificationError::NotFound => "Verification failed. No matching record found.",
        VerificationError::AlreadyUsed => "Verification failed. These details have already been used.",
        VerificationError::Timeout => "You took too long to respond. Please try again.",
        VerificationError::CodeMismatch => "Verification failed. Incorrect or expired OTP.",
        VerificationError::RoleMissing => "Role not found.",
        VerificationError::PermissionDenied => "I do not have permission to assign roles.",
        VerificationError::Delivery(_) | VerificationError::Unexpected(_) => {
            "An unexpected error occurred. Please try again later."
        }
    }
}
