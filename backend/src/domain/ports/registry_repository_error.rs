//! Error type shared by the merchant, user, and product stores.

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by registry adapters.
    pub enum RegistryRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } => "registry connection failed: {message}",
        /// Query or insert failed during execution.
        Query { message: String } => "registry query failed: {message}",
        /// A unique key already exists.
        Duplicate { message: String } => "{message}",
    }
}
