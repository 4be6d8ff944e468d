pub mod helpdesk;
pub mod notifier;
pub mod token_store;

pub use helpdesk::HelpdeskService;
pub use notifier::NotificationService;
pub use token_store::TokenStore;
