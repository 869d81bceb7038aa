//! Runtime choice between the in-memory and libSQL stores.

use chrono::{DateTime, Utc};
use pulse_config::DatabaseConfig;
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
use crate::memory::MemoryStore;
use crate::sql::SqlStore;
use crate::store::FeedbackStore;
use crate::updates::{BusinessUpdate, FormUpdate, ProductUpdate};

/// The store selected from configuration.
pub enum StoreBackend {
    Memory(MemoryStore),
    Sql(SqlStore),
}

impl StoreBackend {
    /// An empty database url selects the in-memory store; `libsql://` and
    /// `http(s)://` urls connect remotely; anything else is a local file path.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if !config.is_configured() {
            tracing::info!("no database url configured, using in-memory store");
            return Ok(Self::Memory(MemoryStore::new()));
        }
        let url = config.url.trim();
        if config.is_remote() {
            tracing::info!(url, "connecting to remote database");
            return Ok(Self::Sql(
                SqlStore::open_remote(url, config.auth_token.trim()).await?,
            ));
        }
        tracing::info!(path = url, "opening local database");
        Ok(Self::Sql(SqlStore::open_local(url).await?))
    }
}

macro_rules! dispatch {
    ($self:ident, $method:ident($($arg:expr),*)) => {
        match $self {
            Self::Memory(store) => FeedbackStore::$method(store, $($arg),*).await,
            Self::Sql(store) => FeedbackStore::$method(store, $($arg),*).await,
        }
    };
}

impl FeedbackStore for StoreBackend {
    fn backend_kind(&self) -> &'static str {
        match self {
            Self::Memory(store) => FeedbackStore::backend_kind(store),
            Self::Sql(store) => FeedbackStore::backend_kind(store),
        }
    }

    async fn create_business(&self, input: NewBusiness) -> Result<Business, DatabaseError> {
        dispatch!(self, create_business(input))
    }

    async fn get_business(&self, id: &str) -> Result<Option<Business>, DatabaseError> {
        dispatch!(self, get_business(id))
    }

    async fn find_business_by_email(&self, email: &str) -> Result<Option<Business>, DatabaseError> {
        dispatch!(self, find_business_by_email(email))
    }

    async fn find_business_by_slug(&self, slug: &str) -> Result<Option<Business>, DatabaseError> {
        dispatch!(self, find_business_by_slug(slug))
    }

    async fn update_business(
        &self,
        id: &str,
        update: BusinessUpdate,
    ) -> Result<Business, DatabaseError> {
        dispatch!(self, update_business(id, update))
    }

    async fn create_user(&self, input: NewUser) -> Result<User, DatabaseError> {
        dispatch!(self, create_user(input))
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, DatabaseError> {
        dispatch!(self, get_user(id))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        dispatch!(self, find_user_by_email(email))
    }

    async fn grant_access(
        &self,
        user_id: &str,
        business_id: &str,
        role: UserRole,
    ) -> Result<UserBusinessAccess, DatabaseError> {
        dispatch!(self, grant_access(user_id, business_id, role))
    }

    async fn list_user_access(
        &self,
        user_id: &str,
    ) -> Result<Vec<UserBusinessAccess>, DatabaseError> {
        dispatch!(self, list_user_access(user_id))
    }

    async fn create_form(&self, input: NewForm) -> Result<FeedbackForm, DatabaseError> {
        dispatch!(self, create_form(input))
    }

    async fn get_form(&self, id: &str) -> Result<Option<FeedbackForm>, DatabaseError> {
        dispatch!(self, get_form(id))
    }

    async fn list_forms(&self, business_id: &str) -> Result<Vec<FeedbackForm>, DatabaseError> {
        dispatch!(self, list_forms(business_id))
    }

    async fn update_form(
        &self,
        id: &str,
        update: FormUpdate,
    ) -> Result<FeedbackForm, DatabaseError> {
        dispatch!(self, update_form(id, update))
    }

    async fn set_form_status(
        &self,
        id: &str,
        status: FormStatus,
    ) -> Result<FeedbackForm, DatabaseError> {
        dispatch!(self, set_form_status(id, status))
    }

    async fn active_form(&self, business_id: &str) -> Result<Option<FeedbackForm>, DatabaseError> {
        dispatch!(self, active_form(business_id))
    }

    async fn save_field_categorizations(
        &self,
        form_id: &str,
        categorizations: &[FieldCategorization],
    ) -> Result<(), DatabaseError> {
        dispatch!(self, save_field_categorizations(form_id, categorizations))
    }

    async fn list_field_categorizations(
        &self,
        form_id: &str,
    ) -> Result<Vec<FieldCategorization>, DatabaseError> {
        dispatch!(self, list_field_categorizations(form_id))
    }

    async fn list_social_links(&self, business_id: &str) -> Result<Vec<SocialLink>, DatabaseError> {
        dispatch!(self, list_social_links(business_id))
    }

    async fn replace_social_links(
        &self,
        business_id: &str,
        links: Vec<NewSocialLink>,
    ) -> Result<Vec<SocialLink>, DatabaseError> {
        dispatch!(self, replace_social_links(business_id, links))
    }

    async fn create_submission(
        &self,
        input: NewSubmission,
    ) -> Result<FeedbackSubmission, DatabaseError> {
        dispatch!(self, create_submission(input))
    }

    async fn list_submissions(
        &self,
        business_id: &str,
        filter: &SubmissionFilter,
    ) -> Result<Vec<FeedbackSubmission>, DatabaseError> {
        dispatch!(self, list_submissions(business_id, filter))
    }

    async fn record_event(&self, input: NewEvent) -> Result<AnalyticsEvent, DatabaseError> {
        dispatch!(self, record_event(input))
    }

    async fn list_events(
        &self,
        business_id: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<AnalyticsEvent>, DatabaseError> {
        dispatch!(self, list_events(business_id, since))
    }

    async fn create_product(&self, input: NewProduct) -> Result<Product, DatabaseError> {
        dispatch!(self, create_product(input))
    }

    async fn get_product(&self, id: &str) -> Result<Option<Product>, DatabaseError> {
        dispatch!(self, get_product(id))
    }

    async fn list_products(
        &self,
        business_id: &str,
        include_inactive: bool,
    ) -> Result<Vec<Product>, DatabaseError> {
        dispatch!(self, list_products(business_id, include_inactive))
    }

    async fn update_product(
        &self,
        id: &str,
        update: ProductUpdate,
    ) -> Result<Product, DatabaseError> {
        dispatch!(self, update_product(id, update))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_url_selects_memory() {
        let backend = StoreBackend::from_config(&DatabaseConfig::default())
            .await
            .unwrap();
        assert_eq!(backend.backend_kind(), "memory");
    }

    #[tokio::test]
    async fn file_path_selects_sql() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("pulse.db");
        let config = DatabaseConfig {
            url: path.to_string_lossy().into_owned(),
            auth_token: String::new(),
        };
        let backend = StoreBackend::from_config(&config).await.unwrap();
        assert_eq!(backend.backend_kind(), "sql");
        assert!(path.exists());
    }
}
