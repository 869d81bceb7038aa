//! The storage seam.
//!
//! [`FeedbackStore`] is implemented by [`crate::MemoryStore`] and
//! [`crate::SqlStore`]; [`crate::StoreBackend`] picks one at startup.
//! Every method is tenant-agnostic: callers check `business_id` ownership.

use std::future::Future;

use chrono::{DateTime, Utc};
use pulse_core::entities::{
    AnalyticsEvent, Business, FeedbackForm, FeedbackSubmission, FieldCategorization, Product,
    SocialLink, User, UserBusinessAccess,
};
use pulse_core::enums::{FormStatus, UserRole};

use crate::error::DatabaseError;
use crate::inputs::{
    NewBusiness, NewEvent, NewForm, NewProduct, NewSocialLink, NewSubmission, NewUser,
    SubmissionFilter,
};
use crate::updates::{BusinessUpdate, FormUpdate, ProductUpdate};

pub trait FeedbackStore: Send + Sync {
    /// Short name for health checks and logs (`"memory"`, `"sql"`).
    fn backend_kind(&self) -> &'static str;

    // -- businesses --

    /// Insert a business. Email and slug must be unused.
    ///
    /// # Errors
    ///
    /// [`DatabaseError::Conflict`] when the email or slug is taken.
    fn create_business(
        &self,
        input: NewBusiness,
    ) -> impl Future<Output = Result<Business, DatabaseError>> + Send;

    fn get_business(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Business>, DatabaseError>> + Send;

    /// Case-insensitive lookup.
    fn find_business_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<Business>, DatabaseError>> + Send;

    fn find_business_by_slug(
        &self,
        slug: &str,
    ) -> impl Future<Output = Result<Option<Business>, DatabaseError>> + Send;

    /// Apply a partial profile update and bump `updated_at`.
    ///
    /// # Errors
    ///
    /// [`DatabaseError::NotFound`] for an unknown id, [`DatabaseError::Conflict`]
    /// when a new slug is taken.
    fn update_business(
        &self,
        id: &str,
        update: BusinessUpdate,
    ) -> impl Future<Output = Result<Business, DatabaseError>> + Send;

    // -- users --

    fn create_user(
        &self,
        input: NewUser,
    ) -> impl Future<Output = Result<User, DatabaseError>> + Send;

    fn get_user(&self, id: &str) -> impl Future<Output = Result<Option<User>, DatabaseError>> + Send;

    /// Case-insensitive lookup.
    fn find_user_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>, DatabaseError>> + Send;

    /// Grant (or change) a user's role on a business.
    fn grant_access(
        &self,
        user_id: &str,
        business_id: &str,
        role: UserRole,
    ) -> impl Future<Output = Result<UserBusinessAccess, DatabaseError>> + Send;

    fn list_user_access(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<UserBusinessAccess>, DatabaseError>> + Send;

    // -- forms --

    /// Insert a form in `draft` status.
    fn create_form(
        &self,
        input: NewForm,
    ) -> impl Future<Output = Result<FeedbackForm, DatabaseError>> + Send;

    fn get_form(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<FeedbackForm>, DatabaseError>> + Send;

    /// A business's forms, newest first.
    fn list_forms(
        &self,
        business_id: &str,
    ) -> impl Future<Output = Result<Vec<FeedbackForm>, DatabaseError>> + Send;

    fn update_form(
        &self,
        id: &str,
        update: FormUpdate,
    ) -> impl Future<Output = Result<FeedbackForm, DatabaseError>> + Send;

    /// Move a form to `status`. Setting the current status is a no-op;
    /// entering `published` stamps `published_at`.
    ///
    /// # Errors
    ///
    /// [`DatabaseError::InvalidState`] for a transition the status machine forbids.
    fn set_form_status(
        &self,
        id: &str,
        status: FormStatus,
    ) -> impl Future<Output = Result<FeedbackForm, DatabaseError>> + Send;

    /// The most recently published form that is still published.
    fn active_form(
        &self,
        business_id: &str,
    ) -> impl Future<Output = Result<Option<FeedbackForm>, DatabaseError>> + Send;

    // -- field categorizations --

    /// Replace a form's categorizations, keeping slice order.
    fn save_field_categorizations(
        &self,
        form_id: &str,
        categorizations: &[FieldCategorization],
    ) -> impl Future<Output = Result<(), DatabaseError>> + Send;

    fn list_field_categorizations(
        &self,
        form_id: &str,
    ) -> impl Future<Output = Result<Vec<FieldCategorization>, DatabaseError>> + Send;

    // -- social links --

    /// Ordered by `display_order`.
    fn list_social_links(
        &self,
        business_id: &str,
    ) -> impl Future<Output = Result<Vec<SocialLink>, DatabaseError>> + Send;

    /// Replace all links; list position becomes `display_order`.
    fn replace_social_links(
        &self,
        business_id: &str,
        links: Vec<NewSocialLink>,
    ) -> impl Future<Output = Result<Vec<SocialLink>, DatabaseError>> + Send;

    // -- submissions --

    fn create_submission(
        &self,
        input: NewSubmission,
    ) -> impl Future<Output = Result<FeedbackSubmission, DatabaseError>> + Send;

    /// Newest first, filtered and limited by `filter`.
    fn list_submissions(
        &self,
        business_id: &str,
        filter: &SubmissionFilter,
    ) -> impl Future<Output = Result<Vec<FeedbackSubmission>, DatabaseError>> + Send;

    // -- events --

    fn record_event(
        &self,
        input: NewEvent,
    ) -> impl Future<Output = Result<AnalyticsEvent, DatabaseError>> + Send;

    /// Oldest first, optionally only those at or after `since`.
    fn list_events(
        &self,
        business_id: &str,
        since: Option<DateTime<Utc>>,
    ) -> impl Future<Output = Result<Vec<AnalyticsEvent>, DatabaseError>> + Send;

    // -- products --

    fn create_product(
        &self,
        input: NewProduct,
    ) -> impl Future<Output = Result<Product, DatabaseError>> + Send;

    fn get_product(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Product>, DatabaseError>> + Send;

    /// Oldest first. Inactive products are skipped unless `include_inactive`.
    fn list_products(
        &self,
        business_id: &str,
        include_inactive: bool,
    ) -> impl Future<Output = Result<Vec<Product>, DatabaseError>> + Send;

    fn update_product(
        &self,
        id: &str,
        update: ProductUpdate,
    ) -> impl Future<Output = Result<Product, DatabaseError>> + Send;
}

/// Check a requested status change against the form status machine.
pub(crate) fn check_transition(
    form: &FeedbackForm,
    next: FormStatus,
) -> Result<(), DatabaseError> {
    if form.status == next || form.status.can_transition_to(next) {
        Ok(())
    } else {
        Err(DatabaseError::InvalidState(format!(
            "form {} cannot move from {} to {next}",
            form.id, form.status
        )))
    }
}
