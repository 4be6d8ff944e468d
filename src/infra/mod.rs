pub mod memory_token;
pub mod slack;
pub mod zendesk;
