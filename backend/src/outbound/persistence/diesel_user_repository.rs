//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::UserId;
use crate::domain::ports::{RegistryRepositoryError, UserRepository};
use crate::domain::registry::User;

use super::diesel_error_mapping::{
    is_email_constraint, map_registry_error, map_registry_insert_error, map_registry_pool_error,
};
use super::models::UserRow;
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id.as_str().to_owned(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            postcode: user.postcode.clone(),
        }
    }
}

fn row_to_user(row: UserRow) -> Result<User, RegistryRepositoryError> {
    let UserRow {
        user_id,
        first_name,
        last_name,
        email,
        postcode,
    } = row;
    let user_id =
        UserId::new(user_id).map_err(|err| RegistryRepositoryError::query(err.to_string()))?;
    Ok(User {
        user_id,
        first_name,
        last_name,
        email,
        postcode,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), RegistryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_registry_pool_error)?;
        diesel::insert_into(users::table)
            .values(UserRow::from(user))
            .execute(&mut conn)
            .await
            .map_err(|err| {
                map_registry_insert_error(err, |constraint| {
                    if is_email_constraint(constraint) {
                        format!("user email {} already registered", user.email)
                    } else {
                        format!("user {} already exists", user.user_id)
                    }
                })
            })?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, RegistryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_registry_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .order(users::user_id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_registry_error)?;
        rows.into_iter().map(row_to_user).collect()
    }

    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, RegistryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_registry_pool_error)?;
        users::table
            .filter(users::user_id.eq(user_id.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_registry_error)?
            .map(row_to_user)
            .transpose()
    }
}
