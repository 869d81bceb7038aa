//! Feedback submission repository.

use pulse_core::entities::FeedbackSubmission;
use pulse_core::ids::PREFIX_SUBMISSION;
use serde_json::{Map, Value};

use crate::SqlStore;
use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_opt_string, now, parse_datetime, parse_json, to_json};
use crate::inputs::{NewSubmission, SubmissionFilter};

const SUBMISSION_COLUMNS: &str =
    "id, business_id, form_id, user_id, product_id, data, rating, feedback_text, created_at";

fn row_to_submission(row: &libsql::Row) -> Result<FeedbackSubmission, DatabaseError> {
    let data: Map<String, Value> = parse_json(&row.get::<String>(5)?)?;
    Ok(FeedbackSubmission {
        id: row.get::<String>(0)?,
        business_id: row.get::<String>(1)?,
        form_id: get_opt_string(row, 2)?,
        user_id: get_opt_string(row, 3)?,
        product_id: get_opt_string(row, 4)?,
        data,
        rating: row.get::<Option<f64>>(6)?,
        feedback_text: get_opt_string(row, 7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl SqlStore {
    pub async fn create_submission(
        &self,
        input: NewSubmission,
    ) -> Result<FeedbackSubmission, DatabaseError> {
        if self.get_business(&input.business_id).await?.is_none() {
            return Err(DatabaseError::not_found("business", input.business_id));
        }
        let id = self.generate_id(PREFIX_SUBMISSION).await?;
        let created_at = input.created_at.unwrap_or_else(now);
        self.conn
            .execute(
                "INSERT INTO feedback_submissions
                   (id, business_id, form_id, user_id, product_id, data, rating, feedback_text, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                libsql::params![
                    id.as_str(),
                    input.business_id.as_str(),
                    input.form_id.as_deref(),
                    input.user_id.as_deref(),
                    input.product_id.as_deref(),
                    to_json(&input.data)?,
                    input.rating,
                    input.feedback_text.as_deref(),
                    format_datetime(created_at)
                ],
            )
            .await?;
        tracing::debug!(%id, business = %input.business_id, "sql: submission stored");

        Ok(FeedbackSubmission {
            id,
            business_id: input.business_id,
            form_id: input.form_id,
            user_id: input.user_id,
            product_id: input.product_id,
            data: input.data,
            rating: input.rating,
            feedback_text: input.feedback_text,
            created_at,
        })
    }

    pub async fn list_submissions(
        &self,
        business_id: &str,
        filter: &SubmissionFilter,
    ) -> Result<Vec<FeedbackSubmission>, DatabaseError> {
        let mut clauses = vec!["business_id = ?1".to_string()];
        let mut params: Vec<libsql::Value> = vec![business_id.into()];

        if let Some(since) = filter.since {
            params.push(format_datetime(since).into());
            clauses.push(format!("created_at >= ?{}", params.len()));
        }
        if let Some(ref product_id) = filter.product_id {
            params.push(product_id.clone().into());
            clauses.push(format!("product_id = ?{}", params.len()));
        }

        let mut sql = format!(
            "SELECT {SUBMISSION_COLUMNS} FROM feedback_submissions WHERE {}
             ORDER BY created_at DESC, rowid DESC",
            clauses.join(" AND ")
        );
        if let Some(limit) = filter.limit {
            params.push(i64::from(limit).into());
            sql.push_str(&format!(" LIMIT ?{}", params.len()));
        }

        let mut rows = self
            .conn
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_submission(&row)?);
        }
        Ok(results)
    }
}
