//! Feedback form repository: CRUD, status changes, field categorizations.

use pulse_core::entities::{FeedbackForm, FieldCategorization, FormField};
use pulse_core::enums::FormStatus;
use pulse_core::ids::PREFIX_FORM;

use crate::SqlStore;
use crate::error::DatabaseError;
use crate::helpers::{
    format_datetime, get_opt_string, get_unsigned, now, parse_datetime, parse_enum, parse_json,
    parse_optional_datetime, to_json,
};
use crate::inputs::NewForm;
use crate::store::check_transition;
use crate::updates::FormUpdate;

const FORM_COLUMNS: &str =
    "id, business_id, title, description, fields, status, created_at, updated_at, published_at";

fn row_to_form(row: &libsql::Row) -> Result<FeedbackForm, DatabaseError> {
    let fields: Vec<FormField> = parse_json(&row.get::<String>(4)?)?;
    let published_at = get_opt_string(row, 8)?;
    Ok(FeedbackForm {
        id: row.get::<String>(0)?,
        business_id: row.get::<String>(1)?,
        title: row.get::<String>(2)?,
        description: get_opt_string(row, 3)?,
        fields,
        status: parse_enum(&row.get::<String>(5)?)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
        published_at: parse_optional_datetime(published_at.as_deref())?,
    })
}

fn row_to_categorization(row: &libsql::Row) -> Result<FieldCategorization, DatabaseError> {
    Ok(FieldCategorization {
        field_id: row.get::<String>(0)?,
        category: parse_enum(&row.get::<String>(1)?)?,
        priority: get_unsigned(row, 2)?,
        confidence: row.get::<f64>(3)?,
        source: parse_enum(&row.get::<String>(4)?)?,
    })
}

impl SqlStore {
    async fn query_forms(
        &self,
        clause: &str,
        value: &str,
    ) -> Result<Vec<FeedbackForm>, DatabaseError> {
        let sql = format!("SELECT {FORM_COLUMNS} FROM feedback_forms WHERE {clause}");
        let mut rows = self.conn.query(&sql, [value]).await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_form(&row)?);
        }
        Ok(results)
    }

    fn require_form(form: Option<FeedbackForm>, id: &str) -> Result<FeedbackForm, DatabaseError> {
        form.ok_or_else(|| DatabaseError::not_found("form", id))
    }

    pub async fn create_form(&self, input: NewForm) -> Result<FeedbackForm, DatabaseError> {
        if self.get_business(&input.business_id).await?.is_none() {
            return Err(DatabaseError::not_found("business", input.business_id));
        }
        let id = self.generate_id(PREFIX_FORM).await?;
        let ts = now();
        self.conn
            .execute(
                "INSERT INTO feedback_forms (id, business_id, title, description, fields, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
                libsql::params![
                    id.as_str(),
                    input.business_id.as_str(),
                    input.title.as_str(),
                    input.description.as_deref(),
                    to_json(&input.fields)?,
                    FormStatus::Draft.as_str(),
                    format_datetime(ts)
                ],
            )
            .await?;

        Ok(FeedbackForm {
            id,
            business_id: input.business_id,
            title: input.title,
            description: input.description,
            fields: input.fields,
            status: FormStatus::Draft,
            created_at: ts,
            updated_at: ts,
            published_at: None,
        })
    }

    pub async fn get_form(&self, id: &str) -> Result<Option<FeedbackForm>, DatabaseError> {
        Ok(self.query_forms("id = ?1", id).await?.into_iter().next())
    }

    pub async fn list_forms(&self, business_id: &str) -> Result<Vec<FeedbackForm>, DatabaseError> {
        self.query_forms("business_id = ?1 ORDER BY created_at DESC, rowid DESC", business_id)
            .await
    }

    pub async fn update_form(
        &self,
        id: &str,
        update: FormUpdate,
    ) -> Result<FeedbackForm, DatabaseError> {
        let current = Self::require_form(self.get_form(id).await?, id)?;

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref title) = update.title {
            sets.push(format!("title = ?{idx}"));
            params.push(title.clone().into());
            idx += 1;
        }
        if let Some(ref description) = update.description {
            sets.push(format!("description = ?{idx}"));
            params.push(description.clone().map_or(libsql::Value::Null, Into::into));
            idx += 1;
        }
        if let Some(ref fields) = update.fields {
            sets.push(format!("fields = ?{idx}"));
            params.push(to_json(fields)?.into());
            idx += 1;
        }

        if sets.is_empty() {
            return Ok(current);
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(format_datetime(now()).into());
        idx += 1;

        params.push(id.into());
        let sql = format!("UPDATE feedback_forms SET {} WHERE id = ?{idx}", sets.join(", "));
        self.conn.execute(&sql, libsql::params_from_iter(params)).await?;

        Self::require_form(self.get_form(id).await?, id)
    }

    pub async fn set_form_status(
        &self,
        id: &str,
        status: FormStatus,
    ) -> Result<FeedbackForm, DatabaseError> {
        let current = Self::require_form(self.get_form(id).await?, id)?;
        check_transition(&current, status)?;
        if current.status == status {
            return Ok(current);
        }

        let ts = format_datetime(now());
        if status == FormStatus::Published {
            self.conn
                .execute(
                    "UPDATE feedback_forms SET status = ?1, updated_at = ?2, published_at = ?2 WHERE id = ?3",
                    libsql::params![status.as_str(), ts, id],
                )
                .await?;
        } else {
            self.conn
                .execute(
                    "UPDATE feedback_forms SET status = ?1, updated_at = ?2 WHERE id = ?3",
                    libsql::params![status.as_str(), ts, id],
                )
                .await?;
        }
        tracing::debug!(form = id, from = %current.status, to = %status, "sql: form status changed");

        Self::require_form(self.get_form(id).await?, id)
    }

    pub async fn active_form(
        &self,
        business_id: &str,
    ) -> Result<Option<FeedbackForm>, DatabaseError> {
        Ok(self
            .query_forms(
                "business_id = ?1 AND status = 'published'
                 ORDER BY published_at DESC, rowid DESC LIMIT 1",
                business_id,
            )
            .await?
            .into_iter()
            .next())
    }

    pub async fn save_field_categorizations(
        &self,
        form_id: &str,
        categorizations: &[FieldCategorization],
    ) -> Result<(), DatabaseError> {
        if self.get_form(form_id).await?.is_none() {
            return Err(DatabaseError::not_found("form", form_id));
        }

        let tx = self.conn.transaction().await?;
        tx.execute(
            "DELETE FROM field_categorizations WHERE form_id = ?1",
            [form_id],
        )
        .await?;
        for (position, cat) in (0_i64..).zip(categorizations) {
            tx.execute(
                "INSERT INTO field_categorizations
                   (form_id, field_id, position, category, priority, confidence, source)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    form_id,
                    cat.field_id.as_str(),
                    position,
                    cat.category.as_str(),
                    i64::from(cat.priority),
                    cat.confidence,
                    cat.source.as_str()
                ],
            )
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    pub async fn list_field_categorizations(
        &self,
        form_id: &str,
    ) -> Result<Vec<FieldCategorization>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                "SELECT field_id, category, priority, confidence, source
                 FROM field_categorizations WHERE form_id = ?1 ORDER BY position",
                [form_id],
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_categorization(&row)?);
        }
        Ok(results)
    }
}
