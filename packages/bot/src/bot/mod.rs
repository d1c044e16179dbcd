//! Discord surface - gateway handler and seam adapters (serenity)

pub mod conversation;
pub mod handler;
pub mod role_granter;

pub use conversation::ChannelConversation;
pub use handler::Handler;
pub use role_granter::DiscordRoleGranter;
