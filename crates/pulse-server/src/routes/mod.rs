//! Route table.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use pulse_db::FeedbackStore;

use crate::state::ServerState;

pub mod account;
pub mod dashboard;
pub mod forms;
pub mod products;
pub mod profile;
pub mod public;

pub fn routes<S: FeedbackStore + 'static>() -> Router<Arc<ServerState<S>>> {
    Router::new()
        .route("/health", get(public::health::<S>))
        .route("/api/page/{slug}", get(public::page::<S>))
        .route("/api/analytics/{slug}", post(public::record_event::<S>))
        .route("/api/feedback/{slug}", post(public::submit_feedback::<S>))
        .route("/api/auth/register", post(account::register_business::<S>))
        .route("/api/auth/login", post(account::login_business::<S>))
        .route(
            "/api/auth/register-customer",
            post(account::register_customer::<S>),
        )
        .route("/api/auth/login-customer", post(account::login_customer::<S>))
        .route("/api/dashboard", get(dashboard::dashboard::<S>))
        .route("/api/insights", get(dashboard::insights::<S>))
        .route("/api/audience", get(dashboard::audience::<S>))
        .route("/api/ai-insights", get(dashboard::ai_insights::<S>))
        .route("/api/forms", get(forms::list::<S>).post(forms::create::<S>))
        .route("/api/forms/publish", post(forms::publish::<S>))
        .route("/api/forms/status/{id}", put(forms::set_status::<S>))
        .route("/api/forms/{id}", put(forms::update::<S>))
        .route(
            "/api/products",
            get(products::list::<S>).post(products::create::<S>),
        )
        .route(
            "/api/products/{id}",
            get(products::get::<S>).put(products::update::<S>),
        )
        .route(
            "/api/profile",
            get(profile::get::<S>).put(profile::update::<S>),
        )
        .route(
            "/api/profile/social-links",
            put(profile::replace_social_links::<S>),
        )
        .fallback(public::not_found)
}
