//! Kernel module - bot infrastructure and dependencies.

pub mod deps;
pub mod mailer;
pub mod scheduled_tasks;
pub mod test_dependencies;
pub mod traits;

pub use deps::BotDeps;
pub use mailer::SmtpNotifier;
pub use scheduled_tasks::start_scheduler;
pub use test_dependencies::{MockConversation, MockNotifier, MockRoleGranter};
pub use traits::*;
