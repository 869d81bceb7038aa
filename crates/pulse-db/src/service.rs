//! Service layer: multi-step operations on top of a [`FeedbackStore`].
//!
//! The store is tenant-agnostic. Everything here that takes a `business_id`
//! also enforces that the addressed form or product belongs to it, and
//! reports foreign ids as not found.

use pulse_core::entities::{AnalyticsEvent, FeedbackForm, FeedbackSubmission, FormField, Product};
use pulse_core::enums::{EventType, FormStatus};
use pulse_core::responses::{PublicBusiness, PublicPage};
use pulse_fields::{categorize_form, extract_data_with_fallback};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::DatabaseError;
use crate::inputs::{NewEvent, NewForm, NewSubmission};
use crate::store::FeedbackStore;
use crate::updates::FormUpdate;

/// A customer's answers as posted to the public feedback page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackInput {
    /// Target form; the business's active form when absent.
    #[serde(default)]
    pub form_id: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    /// Answers keyed by field id.
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// Orchestrates store calls that span several tables.
pub struct FeedbackService<S> {
    store: S,
}

impl<S: FeedbackStore> FeedbackService<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// A form owned by `business_id`.
    ///
    /// # Errors
    ///
    /// [`DatabaseError::NotFound`] if the form is missing or belongs to another business.
    pub async fn owned_form(
        &self,
        business_id: &str,
        form_id: &str,
    ) -> Result<FeedbackForm, DatabaseError> {
        match self.store.get_form(form_id).await? {
            Some(form) if form.business_id == business_id => Ok(form),
            _ => Err(DatabaseError::not_found("form", form_id)),
        }
    }

    /// A product owned by `business_id`.
    ///
    /// # Errors
    ///
    /// [`DatabaseError::NotFound`] if the product is missing or belongs to another business.
    pub async fn owned_product(
        &self,
        business_id: &str,
        product_id: &str,
    ) -> Result<Product, DatabaseError> {
        match self.store.get_product(product_id).await? {
            Some(product) if product.business_id == business_id => Ok(product),
            _ => Err(DatabaseError::not_found("product", product_id)),
        }
    }

    /// Create a draft form after checking its title and field ids.
    ///
    /// # Errors
    ///
    /// [`DatabaseError::Validation`] for a blank title or bad field ids.
    pub async fn create_form(&self, input: NewForm) -> Result<FeedbackForm, DatabaseError> {
        if input.title.trim().is_empty() {
            return Err(DatabaseError::Validation("form title is required".into()));
        }
        validate_fields(&input.fields)?;
        self.store.create_form(input).await
    }

    /// Edit a form. Archived forms are read-only. Editing the fields of a
    /// published form re-categorizes them.
    ///
    /// # Errors
    ///
    /// [`DatabaseError::NotFound`], [`DatabaseError::Validation`], or
    /// [`DatabaseError::InvalidState`] for archived forms.
    pub async fn update_form(
        &self,
        business_id: &str,
        form_id: &str,
        update: FormUpdate,
    ) -> Result<FeedbackForm, DatabaseError> {
        let form = self.owned_form(business_id, form_id).await?;
        if form.status == FormStatus::Archived {
            return Err(DatabaseError::InvalidState(format!(
                "form {form_id} is archived"
            )));
        }
        if update.title.as_ref().is_some_and(|t| t.trim().is_empty()) {
            return Err(DatabaseError::Validation("form title is required".into()));
        }
        if let Some(fields) = &update.fields {
            validate_fields(fields)?;
        }

        let updated = self.store.update_form(form_id, update).await?;
        if updated.status == FormStatus::Published && updated.fields != form.fields {
            let categorizations = categorize_form(&updated.fields);
            self.store
                .save_field_categorizations(form_id, &categorizations)
                .await?;
        }
        Ok(updated)
    }

    /// Publish a form: categorize its fields, store the categorizations,
    /// archive the business's other published forms, and mark this one
    /// published. Re-publishing refreshes the categorizations.
    ///
    /// # Errors
    ///
    /// [`DatabaseError::NotFound`] for foreign or unknown forms,
    /// [`DatabaseError::Validation`] for a form without fields.
    pub async fn publish_form(
        &self,
        business_id: &str,
        form_id: &str,
    ) -> Result<FeedbackForm, DatabaseError> {
        let form = self.owned_form(business_id, form_id).await?;
        if form.fields.is_empty() {
            return Err(DatabaseError::Validation(
                "a form needs at least one field to be published".into(),
            ));
        }

        let categorizations = categorize_form(&form.fields);
        self.store
            .save_field_categorizations(form_id, &categorizations)
            .await?;

        for other in self.store.list_forms(business_id).await? {
            if other.id != form.id && other.status == FormStatus::Published {
                self.store
                    .set_form_status(&other.id, FormStatus::Archived)
                    .await?;
                tracing::debug!(form = %other.id, "archived previously published form");
            }
        }

        let published = self
            .store
            .set_form_status(form_id, FormStatus::Published)
            .await?;
        tracing::info!(
            business = business_id,
            form = form_id,
            fields = categorizations.len(),
            "form published"
        );
        Ok(published)
    }

    /// Change a form's status. Publishing goes through [`Self::publish_form`].
    ///
    /// # Errors
    ///
    /// As [`Self::publish_form`] and [`FeedbackStore::set_form_status`].
    pub async fn set_form_status(
        &self,
        business_id: &str,
        form_id: &str,
        status: FormStatus,
    ) -> Result<FeedbackForm, DatabaseError> {
        if status == FormStatus::Published {
            return self.publish_form(business_id, form_id).await;
        }
        self.owned_form(business_id, form_id).await?;
        self.store.set_form_status(form_id, status).await
    }

    /// Accept a submission on a business's public page.
    ///
    /// Resolves the business by slug and the form by id (or the active form),
    /// checks required fields, extracts rating and feedback text with the
    /// stored field categorizations, stores the submission, and records a
    /// `form_submit` event.
    ///
    /// # Errors
    ///
    /// [`DatabaseError::NotFound`] for an unknown slug, form or product,
    /// [`DatabaseError::InvalidState`] for a form that is not published,
    /// [`DatabaseError::Validation`] for missing required answers.
    pub async fn submit_feedback(
        &self,
        slug: &str,
        input: FeedbackInput,
        user_id: Option<String>,
    ) -> Result<FeedbackSubmission, DatabaseError> {
        let business = self
            .store
            .find_business_by_slug(slug)
            .await?
            .ok_or_else(|| DatabaseError::not_found("business", slug))?;

        let form = match &input.form_id {
            Some(form_id) => {
                let form = self.owned_form(&business.id, form_id).await?;
                if form.status != FormStatus::Published {
                    return Err(DatabaseError::InvalidState(format!(
                        "form {form_id} is not accepting submissions"
                    )));
                }
                Some(form)
            }
            None => self.store.active_form(&business.id).await?,
        };

        if let Some(product_id) = &input.product_id {
            let product = self.owned_product(&business.id, product_id).await?;
            if !product.active {
                return Err(DatabaseError::not_found("product", product_id.as_str()));
            }
        }

        let categorizations = match &form {
            Some(form) => {
                check_required(form, &input.data)?;
                let stored = self.store.list_field_categorizations(&form.id).await?;
                if stored.is_empty() {
                    categorize_form(&form.fields)
                } else {
                    stored
                }
            }
            None => Vec::new(),
        };
        let extracted = extract_data_with_fallback(&input.data, Some(categorizations.as_slice()));

        let submission = self
            .store
            .create_submission(NewSubmission {
                business_id: business.id.clone(),
                form_id: form.as_ref().map(|f| f.id.clone()),
                user_id,
                product_id: input.product_id,
                data: input.data,
                rating: extracted.rating,
                feedback_text: extracted.feedback_text,
                created_at: None,
            })
            .await?;

        self.store
            .record_event(
                NewEvent::new(business.id.as_str(), EventType::FormSubmit).with_metadata(json!({
                    "submission_id": submission.id,
                    "form_id": submission.form_id,
                })),
            )
            .await?;

        tracing::info!(
            business = %business.id,
            submission = %submission.id,
            rating = ?submission.rating,
            "feedback submitted"
        );
        Ok(submission)
    }

    /// Record an analytics event against the business behind `slug`.
    ///
    /// # Errors
    ///
    /// [`DatabaseError::NotFound`] for an unknown slug.
    pub async fn record_page_event(
        &self,
        slug: &str,
        event_type: EventType,
        metadata: Option<Value>,
    ) -> Result<AnalyticsEvent, DatabaseError> {
        let business = self
            .store
            .find_business_by_slug(slug)
            .await?
            .ok_or_else(|| DatabaseError::not_found("business", slug))?;
        let mut event = NewEvent::new(business.id, event_type);
        event.metadata = metadata;
        self.store.record_event(event).await
    }

    /// Everything the public feedback page renders.
    ///
    /// # Errors
    ///
    /// [`DatabaseError::NotFound`] for an unknown slug.
    pub async fn public_page(&self, slug: &str) -> Result<PublicPage, DatabaseError> {
        let business = self
            .store
            .find_business_by_slug(slug)
            .await?
            .ok_or_else(|| DatabaseError::not_found("business", slug))?;
        let form = self.store.active_form(&business.id).await?;
        let social_links = self.store.list_social_links(&business.id).await?;
        Ok(PublicPage {
            business: PublicBusiness::from(&business),
            form,
            social_links,
        })
    }
}

/// Field ids must be non-blank and unique within a form.
fn validate_fields(fields: &[FormField]) -> Result<(), DatabaseError> {
    let mut seen = std::collections::HashSet::new();
    for field in fields {
        if field.id.trim().is_empty() {
            return Err(DatabaseError::Validation("field id must not be empty".into()));
        }
        if !seen.insert(field.id.as_str()) {
            return Err(DatabaseError::Validation(format!(
                "duplicate field id: {}",
                field.id
            )));
        }
    }
    Ok(())
}

fn is_answered(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

fn check_required(form: &FeedbackForm, data: &Map<String, Value>) -> Result<(), DatabaseError> {
    let missing: Vec<&str> = form
        .fields
        .iter()
        .filter(|f| f.required && !is_answered(data.get(&f.id)))
        .map(|f| f.label.as_str())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DatabaseError::Validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::enums::FieldType;

    #[test]
    fn duplicate_field_ids_are_rejected() {
        let fields = vec![
            FormField::new("q1", FieldType::Text, "One"),
            FormField::new("q1", FieldType::Text, "Again"),
        ];
        assert!(matches!(
            validate_fields(&fields),
            Err(DatabaseError::Validation(_))
        ));
    }

    #[test]
    fn blank_answers_do_not_satisfy_required() {
        assert!(!is_answered(None));
        assert!(!is_answered(Some(&json!(null))));
        assert!(!is_answered(Some(&json!("  "))));
        assert!(!is_answered(Some(&json!([]))));
        assert!(is_answered(Some(&json!(0))));
        assert!(is_answered(Some(&json!(false))));
    }
}
