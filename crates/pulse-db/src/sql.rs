//! libSQL-backed [`FeedbackStore`].
//!
//! The queries live in `repos/`, one file per table group, as inherent
//! methods on [`SqlStore`]; the trait impl below forwards to them.

use chrono::{DateTime, Utc};
use libsql::Builder;
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
use crate::store::FeedbackStore;
use crate::updates::{BusinessUpdate, FormUpdate, ProductUpdate};

/// Database handle for all Pulse state.
///
/// Holds one connection; libSQL connections are safe to share across tasks.
pub struct SqlStore {
    #[allow(dead_code)]
    db: libsql::Database,
    pub(crate) conn: libsql::Connection,
    remote: bool,
}

impl SqlStore {
    /// Open a local database file (or `":memory:"`).
    ///
    /// Runs migrations automatically.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let store = Self {
            db,
            conn,
            remote: false,
        };
        store.run_migrations().await?;
        tracing::debug!(path, "sql store opened");
        Ok(store)
    }

    /// Connect to a remote libSQL server (e.g. Turso).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be established or
    /// migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        let conn = db.connect()?;
        let store = Self {
            db,
            conn,
            remote: true,
        };
        store.run_migrations().await?;
        tracing::debug!(url, "remote sql store opened");
        Ok(store)
    }

    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"sub-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT ?1 || '-' || lower(hex(randomblob(4)))", [prefix])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

impl FeedbackStore for SqlStore {
    fn backend_kind(&self) -> &'static str {
        "sql"
    }

    async fn create_business(&self, input: NewBusiness) -> Result<Business, DatabaseError> {
        Self::create_business(self, input).await
    }

    async fn get_business(&self, id: &str) -> Result<Option<Business>, DatabaseError> {
        Self::get_business(self, id).await
    }

    async fn find_business_by_email(&self, email: &str) -> Result<Option<Business>, DatabaseError> {
        Self::find_business_by_email(self, email).await
    }

    async fn find_business_by_slug(&self, slug: &str) -> Result<Option<Business>, DatabaseError> {
        Self::find_business_by_slug(self, slug).await
    }

    async fn update_business(
        &self,
        id: &str,
        update: BusinessUpdate,
    ) -> Result<Business, DatabaseError> {
        Self::update_business(self, id, update).await
    }

    async fn create_user(&self, input: NewUser) -> Result<User, DatabaseError> {
        Self::create_user(self, input).await
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, DatabaseError> {
        Self::get_user(self, id).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        Self::find_user_by_email(self, email).await
    }

    async fn grant_access(
        &self,
        user_id: &str,
        business_id: &str,
        role: UserRole,
    ) -> Result<UserBusinessAccess, DatabaseError> {
        Self::grant_access(self, user_id, business_id, role).await
    }

    async fn list_user_access(
        &self,
        user_id: &str,
    ) -> Result<Vec<UserBusinessAccess>, DatabaseError> {
        Self::list_user_access(self, user_id).await
    }

    async fn create_form(&self, input: NewForm) -> Result<FeedbackForm, DatabaseError> {
        Self::create_form(self, input).await
    }

    async fn get_form(&self, id: &str) -> Result<Option<FeedbackForm>, DatabaseError> {
        Self::get_form(self, id).await
    }

    async fn list_forms(&self, business_id: &str) -> Result<Vec<FeedbackForm>, DatabaseError> {
        Self::list_forms(self, business_id).await
    }

    async fn update_form(
        &self,
        id: &str,
        update: FormUpdate,
    ) -> Result<FeedbackForm, DatabaseError> {
        Self::update_form(self, id, update).await
    }

    async fn set_form_status(
        &self,
        id: &str,
        status: FormStatus,
    ) -> Result<FeedbackForm, DatabaseError> {
        Self::set_form_status(self, id, status).await
    }

    async fn active_form(&self, business_id: &str) -> Result<Option<FeedbackForm>, DatabaseError> {
        Self::active_form(self, business_id).await
    }

    async fn save_field_categorizations(
        &self,
        form_id: &str,
        categorizations: &[FieldCategorization],
    ) -> Result<(), DatabaseError> {
        Self::save_field_categorizations(self, form_id, categorizations).await
    }

    async fn list_field_categorizations(
        &self,
        form_id: &str,
    ) -> Result<Vec<FieldCategorization>, DatabaseError> {
        Self::list_field_categorizations(self, form_id).await
    }

    async fn list_social_links(&self, business_id: &str) -> Result<Vec<SocialLink>, DatabaseError> {
        Self::list_social_links(self, business_id).await
    }

    async fn replace_social_links(
        &self,
        business_id: &str,
        links: Vec<NewSocialLink>,
    ) -> Result<Vec<SocialLink>, DatabaseError> {
        Self::replace_social_links(self, business_id, links).await
    }

    async fn create_submission(
        &self,
        input: NewSubmission,
    ) -> Result<FeedbackSubmission, DatabaseError> {
        Self::create_submission(self, input).await
    }

    async fn list_submissions(
        &self,
        business_id: &str,
        filter: &SubmissionFilter,
    ) -> Result<Vec<FeedbackSubmission>, DatabaseError> {
        Self::list_submissions(self, business_id, filter).await
    }

    async fn record_event(&self, input: NewEvent) -> Result<AnalyticsEvent, DatabaseError> {
        Self::record_event(self, input).await
    }

    async fn list_events(
        &self,
        business_id: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<AnalyticsEvent>, DatabaseError> {
        Self::list_events(self, business_id, since).await
    }

    async fn create_product(&self, input: NewProduct) -> Result<Product, DatabaseError> {
        Self::create_product(self, input).await
    }

    async fn get_product(&self, id: &str) -> Result<Option<Product>, DatabaseError> {
        Self::get_product(self, id).await
    }

    async fn list_products(
        &self,
        business_id: &str,
        include_inactive: bool,
    ) -> Result<Vec<Product>, DatabaseError> {
        Self::list_products(self, business_id, include_inactive).await
    }

    async fn update_product(
        &self,
        id: &str,
        update: ProductUpdate,
    ) -> Result<Product, DatabaseError> {
        Self::update_product(self, id, update).await
    }
}
