//! Shared Diesel error mapping for the event and registry repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::RegistryRepositoryError;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(super) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    connection(error.into_message())
}

/// Map Diesel failures into query/connection constructors.
///
/// Closed connections map to `connection`; everything else is a query
/// failure carrying the driver's message.
pub(super) fn map_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            connection(info.message().to_owned())
        }
        other => query(other.to_string()),
    }
}

/// Map a registry insert failure, naming the clashing key on unique
/// violations.
///
/// `duplicate` receives the violated constraint name when the driver reports
/// one.
pub(super) fn map_registry_insert_error<D>(error: DieselError, duplicate: D) -> RegistryRepositoryError
where
    D: FnOnce(Option<&str>) -> String,
{
    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error {
        return RegistryRepositoryError::duplicate(duplicate(info.constraint_name()));
    }
    map_registry_error(error)
}

pub(super) fn map_registry_error(error: DieselError) -> RegistryRepositoryError {
    map_diesel_error(
        error,
        RegistryRepositoryError::query,
        RegistryRepositoryError::connection,
    )
}

pub(super) fn map_registry_pool_error(error: PoolError) -> RegistryRepositoryError {
    map_pool_error(error, RegistryRepositoryError::connection)
}

/// Whether a violated constraint guards an email column.
pub(super) fn is_email_constraint(constraint: Option<&str>) -> bool {
    constraint.is_some_and(|name| name.contains("email"))
}
