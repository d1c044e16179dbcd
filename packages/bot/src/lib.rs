// Email Verification Bot - Core
//
// Verifies Discord guild members by proof of email possession: `!verify`
// collects an application number, mails a one-time passcode to the address
// on record, and grants a role on correct entry.
//
// Discord, SQLite, and SMTP sit behind seams in kernel/; the verification
// domain owns the passcode state machine and the interactive flow.

pub mod bot;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
