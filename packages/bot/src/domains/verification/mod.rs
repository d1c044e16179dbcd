//! Verification domain - email-possession verification via one-time passcodes
//!
//! Flow: `!verify` → application number → record lookup → passcode by email
//! → passcode entry → role grant → record marked used.
//!
//! Responsibilities:
//! - Pending passcode lifecycle (issue / validate / clear / sweep)
//! - Interactive flow sequencing and user-facing outcome messages
//! - Single-use invariant over verification records

pub mod errors;
pub mod flow;
pub mod models;
pub mod otp_store;

pub use errors::{RoleGrantError, VerificationError};
pub use flow::{run_verification, APPLICATION_NUMBER_TIMEOUT, PASSCODE_TIMEOUT};
pub use models::VerificationRecord;
pub use otp_store::OtpStore;
