//! Analytics event repository.

use chrono::{DateTime, Utc};
use pulse_core::entities::AnalyticsEvent;
use pulse_core::ids::PREFIX_EVENT;

use crate::SqlStore;
use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, get_opt_string, now, parse_datetime, parse_enum, parse_optional_json,
    to_json,
};
use crate::inputs::NewEvent;

fn row_to_event(row: &libsql::Row) -> Result<AnalyticsEvent, DatabaseError> {
    let metadata = get_opt_string(row, 3)?;
    Ok(AnalyticsEvent {
        id: row.get::<String>(0)?,
        business_id: row.get::<String>(1)?,
        event_type: parse_enum(&row.get::<String>(2)?)?,
        metadata: parse_optional_json(metadata.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl SqlStore {
    pub async fn record_event(&self, input: NewEvent) -> Result<AnalyticsEvent, DatabaseError> {
        if self.get_business(&input.business_id).await?.is_none() {
            return Err(DatabaseError::not_found("business", input.business_id));
        }
        let id = self.generate_id(PREFIX_EVENT).await?;
        let created_at = input.created_at.unwrap_or_else(now);
        let metadata = input.metadata.as_ref().map(to_json).transpose()?;
        self.conn
            .execute(
                "INSERT INTO analytics_events (id, business_id, event_type, metadata, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    id.as_str(),
                    input.business_id.as_str(),
                    input.event_type.as_str(),
                    metadata,
                    format_datetime(created_at)
                ],
            )
            .await?;

        Ok(AnalyticsEvent {
            id,
            business_id: input.business_id,
            event_type: input.event_type,
            metadata: input.metadata,
            created_at,
        })
    }

    pub async fn list_events(
        &self,
        business_id: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<AnalyticsEvent>, DatabaseError> {
        let mut rows = match since {
            Some(since) => {
                self.conn
                    .query(
                        "SELECT id, business_id, event_type, metadata, created_at
                         FROM analytics_events WHERE business_id = ?1 AND created_at >= ?2
                         ORDER BY created_at, rowid",
                        libsql::params![business_id, format_datetime(since)],
                    )
                    .await?
            }
            None => {
                self.conn
                    .query(
                        "SELECT id, business_id, event_type, metadata, created_at
                         FROM analytics_events WHERE business_id = ?1
                         ORDER BY created_at, rowid",
                        [business_id],
                    )
                    .await?
            }
        };
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_event(&row)?);
        }
        Ok(results)
    }
}
