//! Application services

mod chat_service;
mod credential_resolver;
mod reading_service;
mod session_store;

pub use chat_service::ChatService;
pub use credential_resolver::{Credential, CredentialResolver, Provider, Resolution};
pub use reading_service::ReadingService;
pub use session_store::SessionRegistry;
