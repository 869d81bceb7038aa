//! Demo tenant for local development and the in-memory backend.
//!
//! [`seed`] creates a small café with a published form, a few products and
//! social links, and two weeks of back-dated submissions and page events.
//! Running it twice is a no-op.

use chrono::Duration;
use pulse_core::entities::FormField;
use pulse_core::enums::{EventType, FieldType};
use pulse_fields::extract_data_with_fallback;
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::error::DatabaseError;
use crate::helpers::now;
use crate::inputs::{NewBusiness, NewEvent, NewForm, NewProduct, NewSocialLink, NewSubmission};
use crate::service::FeedbackService;
use crate::store::FeedbackStore;
use crate::updates::BusinessUpdateBuilder;

pub const DEMO_SLUG: &str = "demo-cafe";
pub const DEMO_EMAIL: &str = "demo@pulse.local";
/// Plain-text password of the demo account. Callers hash it for [`seed`].
pub const DEMO_PASSWORD: &str = "demo-password";

/// What [`seed`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub business_id: String,
    /// `false` when the demo business already existed.
    pub created: bool,
    pub submissions: usize,
    pub events: usize,
}

/// (days ago, product index, rating, comment, email)
const SAMPLE_FEEDBACK: &[(i64, Option<usize>, u8, &str, Option<&str>)] = &[
    (13, Some(0), 5, "Best flat white in town, friendly staff.", Some("ana@example.com")),
    (12, Some(1), 4, "Croissant was fresh but a little small.", None),
    (11, None, 2, "Waited twenty minutes for a coffee, too slow.", Some("ben@example.com")),
    (9, Some(0), 5, "Great coffee and cozy atmosphere.", Some("ana@example.com")),
    (8, Some(2), 3, "Sandwich was okay, bread a bit dry.", None),
    (6, None, 4, "Nice music and quick service today.", Some("carla@example.com")),
    (5, Some(1), 5, "Amazing pastries, will come back.", None),
    (3, Some(0), 1, "Coffee was cold and the table was dirty.", Some("ben@example.com")),
    (2, Some(2), 4, "Tasty lunch, good value.", Some("dan@example.com")),
    (1, None, 5, "Friendly staff and great coffee as always.", Some("carla@example.com")),
    (0, Some(0), 4, "Good espresso, a bit pricey.", None),
];

fn demo_fields() -> Vec<FormField> {
    vec![
        FormField::new("overall_rating", FieldType::Rating, "How was your visit?").required(),
        FormField::new("comments", FieldType::Textarea, "Tell us more"),
        FormField::new("email", FieldType::Email, "Email (optional)"),
        FormField {
            options: vec!["Yes".into(), "Maybe".into(), "No".into()],
            ..FormField::new("recommend", FieldType::Radio, "Would you recommend us?")
        },
    ]
}

fn sample_data(rating: u8, comment: &str, email: Option<&str>) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("overall_rating".into(), json!(rating));
    data.insert("comments".into(), json!(comment));
    if let Some(email) = email {
        data.insert("email".into(), json!(email));
    }
    let recommend = match rating {
        4.. => "Yes",
        3 => "Maybe",
        _ => "No",
    };
    data.insert("recommend".into(), json!(recommend));
    data
}

/// Create the demo tenant unless it already exists.
///
/// `password_hash` is the bcrypt hash of [`DEMO_PASSWORD`]; hashing lives in
/// the auth layer.
///
/// # Errors
///
/// Propagates any store error.
pub async fn seed<S: FeedbackStore>(
    service: &FeedbackService<S>,
    password_hash: &str,
) -> Result<SeedReport, DatabaseError> {
    let store = service.store();
    if let Some(existing) = store.find_business_by_slug(DEMO_SLUG).await? {
        tracing::debug!(business = %existing.id, "demo business already seeded");
        return Ok(SeedReport {
            business_id: existing.id,
            created: false,
            submissions: 0,
            events: 0,
        });
    }

    let business = store
        .create_business(NewBusiness {
            name: "Demo Café".into(),
            email: DEMO_EMAIL.into(),
            password_hash: password_hash.into(),
            slug: DEMO_SLUG.into(),
        })
        .await?;
    let business = store
        .update_business(
            &business.id,
            BusinessUpdateBuilder::new()
                .description(Some("Neighbourhood coffee and pastries.".into()))
                .brand_color(Some("#8b5a2b".into()))
                .website(Some("https://demo-cafe.example.com".into()))
                .welcome_message(Some("Thanks for visiting! How did we do?".into()))
                .build(),
        )
        .await?;

    store
        .replace_social_links(
            &business.id,
            vec![
                NewSocialLink {
                    platform: "instagram".into(),
                    url: "https://instagram.com/democafe".into(),
                },
                NewSocialLink {
                    platform: "google".into(),
                    url: "https://g.page/democafe".into(),
                },
            ],
        )
        .await?;

    let mut products = Vec::new();
    for (name, category) in [
        ("Flat White", "coffee"),
        ("Butter Croissant", "pastry"),
        ("Club Sandwich", "lunch"),
    ] {
        let product = store
            .create_product(NewProduct {
                business_id: business.id.clone(),
                name: name.into(),
                description: None,
                category: Some(category.into()),
                image_url: None,
            })
            .await?;
        products.push(product.id);
    }

    let form = service
        .create_form(NewForm {
            business_id: business.id.clone(),
            title: "How was your visit?".into(),
            description: Some("It takes less than a minute.".into()),
            fields: demo_fields(),
        })
        .await?;
    let form = service.publish_form(&business.id, &form.id).await?;
    let categorizations = store.list_field_categorizations(&form.id).await?;

    let today = now();
    let mut events = 0;
    for days_ago in 0..14_i64 {
        let day = today - Duration::days(days_ago);
        let views = 3 + days_ago % 4;
        for n in 0..views {
            store
                .record_event(
                    NewEvent::new(business.id.as_str(), EventType::PageView)
                        .at(day - Duration::minutes(n * 7)),
                )
                .await?;
            events += 1;
        }
    }

    for &(days_ago, product, rating, comment, email) in SAMPLE_FEEDBACK {
        let created_at = today - Duration::days(days_ago) - Duration::hours(1);
        let data = sample_data(rating, comment, email);
        let extracted = extract_data_with_fallback(&data, Some(categorizations.as_slice()));
        let submission = store
            .create_submission(NewSubmission {
                business_id: business.id.clone(),
                form_id: Some(form.id.clone()),
                user_id: None,
                product_id: product.and_then(|i| products.get(i).cloned()),
                data,
                rating: extracted.rating,
                feedback_text: extracted.feedback_text,
                created_at: Some(created_at),
            })
            .await?;
        store
            .record_event(
                NewEvent::new(business.id.as_str(), EventType::FormSubmit)
                    .with_metadata(json!({ "submission_id": submission.id, "form_id": form.id }))
                    .at(created_at),
            )
            .await?;
        events += 1;
    }

    tracing::info!(
        business = %business.id,
        submissions = SAMPLE_FEEDBACK.len(),
        events,
        "demo data seeded"
    );
    Ok(SeedReport {
        business_id: business.id,
        created: true,
        submissions: SAMPLE_FEEDBACK.len(),
        events,
    })
}
