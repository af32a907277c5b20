//! Merchant, user, and product registry.
//!
//! Registration bodies are validated field by field (presence first, then
//! types, then formats) before being stored. Lookups take raw path values and
//! reject identifiers of the wrong length before querying.

mod merchant;
mod product;
mod service;
mod user;

pub use merchant::Merchant;
pub use product::Product;
pub use service::RegistryService;
pub use user::User;
