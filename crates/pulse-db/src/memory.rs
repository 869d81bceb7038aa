//! In-memory [`FeedbackStore`].
//!
//! Used when no database URL is configured, and by tests. Tables are plain
//! vectors behind one `tokio::sync::RwLock`; insertion order stands in for
//! SQL's `rowid` when timestamps tie.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use pulse_core::entities::{
    AnalyticsEvent, Business, FeedbackForm, FeedbackSubmission, FieldCategorization, Product,
    SocialLink, User, UserBusinessAccess,
};
use pulse_core::enums::{FormStatus, UserRole};
use pulse_core::ids::{
    self, PREFIX_BUSINESS, PREFIX_EVENT, PREFIX_FORM, PREFIX_PRODUCT, PREFIX_SOCIAL_LINK,
    PREFIX_SUBMISSION, PREFIX_USER,
};
use tokio::sync::RwLock;

use crate::error::DatabaseError;
use crate::helpers::now;
use crate::inputs::{
    NewBusiness, NewEvent, NewForm, NewProduct, NewSocialLink, NewSubmission, NewUser,
    SubmissionFilter,
};
use crate::store::{FeedbackStore, check_transition};
use crate::updates::{BusinessUpdate, FormUpdate, ProductUpdate};

#[derive(Debug, Default)]
struct Tables {
    businesses: Vec<Business>,
    users: Vec<User>,
    access: Vec<UserBusinessAccess>,
    forms: Vec<FeedbackForm>,
    categorizations: HashMap<String, Vec<FieldCategorization>>,
    social_links: Vec<SocialLink>,
    products: Vec<Product>,
    submissions: Vec<FeedbackSubmission>,
    events: Vec<AnalyticsEvent>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn new_id(prefix: &str) -> Result<String, DatabaseError> {
    Ok(ids::generate(prefix)?)
}

/// Newest first; later insertions win timestamp ties.
fn newest_first<T: Clone>(items: &[&T], created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut out: Vec<T> = items.iter().rev().map(|item| (*item).clone()).collect();
    out.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    out
}

impl FeedbackStore for MemoryStore {
    fn backend_kind(&self) -> &'static str {
        "memory"
    }

    async fn create_business(&self, input: NewBusiness) -> Result<Business, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables
            .businesses
            .iter()
            .any(|b| b.email.eq_ignore_ascii_case(&input.email))
        {
            return Err(DatabaseError::Conflict("business email already exists".into()));
        }
        if tables.businesses.iter().any(|b| b.slug == input.slug) {
            return Err(DatabaseError::Conflict("business slug already exists".into()));
        }

        let ts = now();
        let business = Business {
            id: new_id(PREFIX_BUSINESS)?,
            name: input.name,
            email: input.email,
            password_hash: input.password_hash,
            slug: input.slug,
            description: None,
            logo_url: None,
            brand_color: None,
            website: None,
            welcome_message: None,
            created_at: ts,
            updated_at: ts,
        };
        tables.businesses.push(business.clone());
        tracing::debug!(id = %business.id, slug = %business.slug, "memory: business created");
        Ok(business)
    }

    async fn get_business(&self, id: &str) -> Result<Option<Business>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.businesses.iter().find(|b| b.id == id).cloned())
    }

    async fn find_business_by_email(&self, email: &str) -> Result<Option<Business>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .businesses
            .iter()
            .find(|b| b.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_business_by_slug(&self, slug: &str) -> Result<Option<Business>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.businesses.iter().find(|b| b.slug == slug).cloned())
    }

    async fn update_business(
        &self,
        id: &str,
        update: BusinessUpdate,
    ) -> Result<Business, DatabaseError> {
        let mut tables = self.tables.write().await;
        if let Some(slug) = &update.slug {
            if tables.businesses.iter().any(|b| b.id != id && &b.slug == slug) {
                return Err(DatabaseError::Conflict("business slug already exists".into()));
            }
        }
        let business = tables
            .businesses
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| DatabaseError::not_found("business", id))?;

        if update.is_empty() {
            return Ok(business.clone());
        }
        if let Some(name) = update.name {
            business.name = name;
        }
        if let Some(slug) = update.slug {
            business.slug = slug;
        }
        if let Some(description) = update.description {
            business.description = description;
        }
        if let Some(logo_url) = update.logo_url {
            business.logo_url = logo_url;
        }
        if let Some(brand_color) = update.brand_color {
            business.brand_color = brand_color;
        }
        if let Some(website) = update.website {
            business.website = website;
        }
        if let Some(welcome_message) = update.welcome_message {
            business.welcome_message = welcome_message;
        }
        business.updated_at = now();
        Ok(business.clone())
    }

    async fn create_user(&self, input: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&input.email))
        {
            return Err(DatabaseError::Conflict("user email already exists".into()));
        }
        let user = User {
            id: new_id(PREFIX_USER)?,
            email: input.email,
            name: input.name,
            password_hash: input.password_hash,
            role: input.role,
            created_at: now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn grant_access(
        &self,
        user_id: &str,
        business_id: &str,
        role: UserRole,
    ) -> Result<UserBusinessAccess, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.id == user_id) {
            return Err(DatabaseError::not_found("user", user_id));
        }
        if !tables.businesses.iter().any(|b| b.id == business_id) {
            return Err(DatabaseError::not_found("business", business_id));
        }
        if let Some(existing) = tables
            .access
            .iter_mut()
            .find(|a| a.user_id == user_id && a.business_id == business_id)
        {
            existing.role = role;
            return Ok(existing.clone());
        }
        let access = UserBusinessAccess {
            user_id: user_id.to_string(),
            business_id: business_id.to_string(),
            role,
            created_at: now(),
        };
        tables.access.push(access.clone());
        Ok(access)
    }

    async fn list_user_access(
        &self,
        user_id: &str,
    ) -> Result<Vec<UserBusinessAccess>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .access
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_form(&self, input: NewForm) -> Result<FeedbackForm, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.businesses.iter().any(|b| b.id == input.business_id) {
            return Err(DatabaseError::not_found("business", input.business_id));
        }
        let ts = now();
        let form = FeedbackForm {
            id: new_id(PREFIX_FORM)?,
            business_id: input.business_id,
            title: input.title,
            description: input.description,
            fields: input.fields,
            status: FormStatus::Draft,
            created_at: ts,
            updated_at: ts,
            published_at: None,
        };
        tables.forms.push(form.clone());
        Ok(form)
    }

    async fn get_form(&self, id: &str) -> Result<Option<FeedbackForm>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.forms.iter().find(|f| f.id == id).cloned())
    }

    async fn list_forms(&self, business_id: &str) -> Result<Vec<FeedbackForm>, DatabaseError> {
        let tables = self.tables.read().await;
        let owned: Vec<&FeedbackForm> = tables
            .forms
            .iter()
            .filter(|f| f.business_id == business_id)
            .collect();
        Ok(newest_first(&owned, |f| f.created_at))
    }

    async fn update_form(
        &self,
        id: &str,
        update: FormUpdate,
    ) -> Result<FeedbackForm, DatabaseError> {
        let mut tables = self.tables.write().await;
        let form = tables
            .forms
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| DatabaseError::not_found("form", id))?;
        if update.is_empty() {
            return Ok(form.clone());
        }
        if let Some(title) = update.title {
            form.title = title;
        }
        if let Some(description) = update.description {
            form.description = description;
        }
        if let Some(fields) = update.fields {
            form.fields = fields;
        }
        form.updated_at = now();
        Ok(form.clone())
    }

    async fn set_form_status(
        &self,
        id: &str,
        status: FormStatus,
    ) -> Result<FeedbackForm, DatabaseError> {
        let mut tables = self.tables.write().await;
        let form = tables
            .forms
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| DatabaseError::not_found("form", id))?;
        check_transition(form, status)?;
        if form.status == status {
            return Ok(form.clone());
        }
        let ts = now();
        form.status = status;
        form.updated_at = ts;
        if status == FormStatus::Published {
            form.published_at = Some(ts);
        }
        Ok(form.clone())
    }

    async fn active_form(&self, business_id: &str) -> Result<Option<FeedbackForm>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut best: Option<&FeedbackForm> = None;
        for form in tables
            .forms
            .iter()
            .filter(|f| f.business_id == business_id && f.status == FormStatus::Published)
        {
            if best.is_none_or(|top| form.published_at >= top.published_at) {
                best = Some(form);
            }
        }
        Ok(best.cloned())
    }

    async fn save_field_categorizations(
        &self,
        form_id: &str,
        categorizations: &[FieldCategorization],
    ) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.forms.iter().any(|f| f.id == form_id) {
            return Err(DatabaseError::not_found("form", form_id));
        }
        tables
            .categorizations
            .insert(form_id.to_string(), categorizations.to_vec());
        Ok(())
    }

    async fn list_field_categorizations(
        &self,
        form_id: &str,
    ) -> Result<Vec<FieldCategorization>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .categorizations
            .get(form_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_social_links(&self, business_id: &str) -> Result<Vec<SocialLink>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut links: Vec<SocialLink> = tables
            .social_links
            .iter()
            .filter(|l| l.business_id == business_id)
            .cloned()
            .collect();
        links.sort_by_key(|l| l.display_order);
        Ok(links)
    }

    async fn replace_social_links(
        &self,
        business_id: &str,
        links: Vec<NewSocialLink>,
    ) -> Result<Vec<SocialLink>, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.businesses.iter().any(|b| b.id == business_id) {
            return Err(DatabaseError::not_found("business", business_id));
        }
        let mut created = Vec::with_capacity(links.len());
        for (position, link) in (0_u32..).zip(links) {
            created.push(SocialLink {
                id: new_id(PREFIX_SOCIAL_LINK)?,
                business_id: business_id.to_string(),
                platform: link.platform,
                url: link.url,
                display_order: position,
            });
        }
        tables.social_links.retain(|l| l.business_id != business_id);
        tables.social_links.extend(created.iter().cloned());
        Ok(created)
    }

    async fn create_submission(
        &self,
        input: NewSubmission,
    ) -> Result<FeedbackSubmission, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.businesses.iter().any(|b| b.id == input.business_id) {
            return Err(DatabaseError::not_found("business", input.business_id));
        }
        let submission = FeedbackSubmission {
            id: new_id(PREFIX_SUBMISSION)?,
            business_id: input.business_id,
            form_id: input.form_id,
            user_id: input.user_id,
            product_id: input.product_id,
            data: input.data,
            rating: input.rating,
            feedback_text: input.feedback_text,
            created_at: input.created_at.unwrap_or_else(now),
        };
        tables.submissions.push(submission.clone());
        Ok(submission)
    }

    async fn list_submissions(
        &self,
        business_id: &str,
        filter: &SubmissionFilter,
    ) -> Result<Vec<FeedbackSubmission>, DatabaseError> {
        let tables = self.tables.read().await;
        let matching: Vec<&FeedbackSubmission> = tables
            .submissions
            .iter()
            .filter(|s| s.business_id == business_id)
            .filter(|s| filter.since.is_none_or(|since| s.created_at >= since))
            .filter(|s| {
                filter
                    .product_id
                    .as_ref()
                    .is_none_or(|p| s.product_id.as_ref() == Some(p))
            })
            .collect();
        let mut out = newest_first(&matching, |s| s.created_at);
        if let Some(limit) = filter.limit {
            out.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        Ok(out)
    }

    async fn record_event(&self, input: NewEvent) -> Result<AnalyticsEvent, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.businesses.iter().any(|b| b.id == input.business_id) {
            return Err(DatabaseError::not_found("business", input.business_id));
        }
        let event = AnalyticsEvent {
            id: new_id(PREFIX_EVENT)?,
            business_id: input.business_id,
            event_type: input.event_type,
            metadata: input.metadata,
            created_at: input.created_at.unwrap_or_else(now),
        };
        tables.events.push(event.clone());
        Ok(event)
    }

    async fn list_events(
        &self,
        business_id: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<AnalyticsEvent>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut events: Vec<AnalyticsEvent> = tables
            .events
            .iter()
            .filter(|e| e.business_id == business_id)
            .filter(|e| since.is_none_or(|since| e.created_at >= since))
            .cloned()
            .collect();
        events.sort_by_key(|e| e.created_at);
        Ok(events)
    }

    async fn create_product(&self, input: NewProduct) -> Result<Product, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.businesses.iter().any(|b| b.id == input.business_id) {
            return Err(DatabaseError::not_found("business", input.business_id));
        }
        let ts = now();
        let product = Product {
            id: new_id(PREFIX_PRODUCT)?,
            business_id: input.business_id,
            name: input.name,
            description: input.description,
            category: input.category,
            image_url: input.image_url,
            active: true,
            created_at: ts,
            updated_at: ts,
        };
        tables.products.push(product.clone());
        Ok(product)
    }

    async fn get_product(&self, id: &str) -> Result<Option<Product>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.products.iter().find(|p| p.id == id).cloned())
    }

    async fn list_products(
        &self,
        business_id: &str,
        include_inactive: bool,
    ) -> Result<Vec<Product>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut products: Vec<Product> = tables
            .products
            .iter()
            .filter(|p| p.business_id == business_id && (include_inactive || p.active))
            .cloned()
            .collect();
        products.sort_by_key(|p| p.created_at);
        Ok(products)
    }

    async fn update_product(
        &self,
        id: &str,
        update: ProductUpdate,
    ) -> Result<Product, DatabaseError> {
        let mut tables = self.tables.write().await;
        let product = tables
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DatabaseError::not_found("product", id))?;
        if update.is_empty() {
            return Ok(product.clone());
        }
        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(description) = update.description {
            product.description = description;
        }
        if let Some(category) = update.category {
            product.category = category;
        }
        if let Some(image_url) = update.image_url {
            product.image_url = image_url;
        }
        if let Some(active) = update.active {
            product.active = active;
        }
        product.updated_at = now();
        Ok(product.clone())
    }
}

