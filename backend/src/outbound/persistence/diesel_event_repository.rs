//! PostgreSQL-backed `EventRepository` implementation using Diesel ORM.
//!
//! Events are stored with their kind in a column and the type-specific
//! payload as JSONB. Reads return rows in insertion order.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::events::{Event, EventKind, EventPayload};
use crate::domain::ports::{EventRepository, EventRepositoryError};
use crate::domain::{MerchantId, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{EventRow, NewEventRow};
use super::pool::DbPool;
use super::schema::events;

/// Diesel-backed implementation of the event repository port.
#[derive(Clone)]
pub struct DieselEventRepository {
    pool: DbPool,
}

impl DieselEventRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_diesel(error: diesel::result::Error) -> EventRepositoryError {
    map_diesel_error(
        error,
        EventRepositoryError::query,
        EventRepositoryError::connection,
    )
}

/// Convert a database row into a domain event.
fn row_to_event(row: EventRow) -> Result<Event, EventRepositoryError> {
    let EventRow {
        id,
        kind,
        merchant_id,
        user_id,
        data,
        created_at,
    } = row;

    let kind = EventKind::parse(&kind).ok_or_else(|| {
        EventRepositoryError::query(format!("event {id} has unknown kind `{kind}`"))
    })?;
    let payload = EventPayload::from_parts(kind, data)
        .map_err(|err| EventRepositoryError::query(format!("decode event {id} data: {err}")))?;
    let merchant_id = MerchantId::new(merchant_id)
        .map_err(|err| EventRepositoryError::query(format!("event {id}: {err}")))?;
    let user_id = UserId::new(user_id)
        .map_err(|err| EventRepositoryError::query(format!("event {id}: {err}")))?;

    Ok(Event {
        id,
        merchant_id,
        user_id,
        payload,
        created_at,
    })
}

fn rows_to_events(rows: Vec<EventRow>) -> Result<Vec<Event>, EventRepositoryError> {
    rows.into_iter().map(row_to_event).collect()
}

#[async_trait]
impl EventRepository for DieselEventRepository {
    async fn append(&self, event: &Event) -> Result<(), EventRepositoryError> {
        let data = event
            .payload
            .data_json()
            .map_err(|err| EventRepositoryError::query(format!("serialise event data: {err}")))?;
        let row = NewEventRow {
            id: event.id,
            kind: event.kind().as_str(),
            merchant_id: event.merchant_id.as_str(),
            user_id: event.user_id.as_str(),
            data: &data,
            created_at: event.created_at,
        };

        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, EventRepositoryError::connection))?;
        diesel::insert_into(events::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Event>, EventRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, EventRepositoryError::connection))?;
        let rows: Vec<EventRow> = events::table
            .order(events::seq.asc())
            .select(EventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        rows_to_events(rows)
    }

    async fn list_for_merchant(
        &self,
        merchant_id: &MerchantId,
    ) -> Result<Vec<Event>, EventRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, EventRepositoryError::connection))?;
        let rows: Vec<EventRow> = events::table
            .filter(events::merchant_id.eq(merchant_id.as_str()))
            .order(events::seq.asc())
            .select(EventRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        rows_to_events(rows)
    }
}
