//! One behavioural contract, checked against both store implementations.

use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use pulse_core::entities::{FieldCategorization, FormField};
use pulse_core::enums::{
    CategorizationSource, EventType, FieldCategory, FieldType, FormStatus, UserRole,
};
use pulse_db::{
    BusinessUpdateBuilder, DatabaseError, FeedbackStore, FormUpdateBuilder, MemoryStore, NewBusiness,
    NewEvent, NewForm, NewProduct, NewSocialLink, NewSubmission, NewUser, ProductUpdateBuilder,
    SqlStore, StoreBackend, SubmissionFilter,
};
use rstest::rstest;
use serde_json::{Map, Value, json};

fn new_business(slug: &str, email: &str) -> NewBusiness {
    NewBusiness {
        name: format!("Shop {slug}"),
        email: email.into(),
        password_hash: "$2b$04$hash".into(),
        slug: slug.into(),
    }
}

fn data(value: &Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

fn submission(business_id: &str, days_ago: i64, rating: Option<f64>) -> NewSubmission {
    let base = Utc.with_ymd_and_hms(2026, 3, 20, 12, 0, 0).unwrap();
    NewSubmission {
        business_id: business_id.into(),
        form_id: None,
        user_id: None,
        product_id: None,
        data: data(&json!({ "rating": rating })),
        rating,
        feedback_text: None,
        created_at: Some(base - Duration::days(days_ago)),
    }
}

async fn business_uniqueness(store: &impl FeedbackStore) {
    store
        .create_business(new_business("corner-shop", "owner@corner.test"))
        .await
        .unwrap();

    let same_email = store
        .create_business(new_business("other-shop", "OWNER@corner.test"))
        .await;
    assert!(matches!(same_email, Err(DatabaseError::Conflict(_))));

    let same_slug = store
        .create_business(new_business("corner-shop", "someone@else.test"))
        .await;
    assert!(matches!(same_slug, Err(DatabaseError::Conflict(_))));

    let found = store
        .find_business_by_email("Owner@Corner.Test")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.slug, "corner-shop");
}

async fn business_update_is_partial(store: &impl FeedbackStore) {
    let created = store
        .create_business(new_business("bakery", "bake@example.com"))
        .await
        .unwrap();
    let taken = store
        .create_business(new_business("taken", "taken@example.com"))
        .await
        .unwrap();

    let updated = store
        .update_business(
            &created.id,
            BusinessUpdateBuilder::new()
                .description(Some("Fresh bread".into()))
                .brand_color(Some("#ffcc00".into()))
                .build(),
        )
        .await
        .unwrap();
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.description.as_deref(), Some("Fresh bread"));
    assert!(updated.updated_at >= created.updated_at);

    let cleared = store
        .update_business(
            &created.id,
            BusinessUpdateBuilder::new().description(None).build(),
        )
        .await
        .unwrap();
    assert_eq!(cleared.description, None);
    assert_eq!(cleared.brand_color.as_deref(), Some("#ffcc00"));

    let conflict = store
        .update_business(
            &created.id,
            BusinessUpdateBuilder::new().slug(taken.slug).build(),
        )
        .await;
    assert!(matches!(conflict, Err(DatabaseError::Conflict(_))));

    let missing = store
        .update_business("biz-00000000", BusinessUpdateBuilder::new().name("x").build())
        .await;
    assert!(matches!(missing, Err(ref e) if e.is_not_found()));
}

async fn users_and_access(store: &impl FeedbackStore) {
    let business = store
        .create_business(new_business("team", "team@example.com"))
        .await
        .unwrap();
    let user = store
        .create_user(NewUser {
            email: "Staff@Example.com".into(),
            name: Some("Staff".into()),
            password_hash: "h".into(),
            role: UserRole::Customer,
        })
        .await
        .unwrap();

    let duplicate = store
        .create_user(NewUser {
            email: "staff@example.com".into(),
            name: None,
            password_hash: "h".into(),
            role: UserRole::Customer,
        })
        .await;
    assert!(matches!(duplicate, Err(DatabaseError::Conflict(_))));

    store
        .grant_access(&user.id, &business.id, UserRole::Viewer)
        .await
        .unwrap();
    let changed = store
        .grant_access(&user.id, &business.id, UserRole::Admin)
        .await
        .unwrap();
    assert_eq!(changed.role, UserRole::Admin);

    let access = store.list_user_access(&user.id).await.unwrap();
    assert_eq!(access.len(), 1);
    assert_eq!(access[0].role, UserRole::Admin);

    let found = store
        .find_user_by_email("STAFF@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, user.id);
}

async fn form_lifecycle(store: &impl FeedbackStore) {
    let business = store
        .create_business(new_business("forms", "forms@example.com"))
        .await
        .unwrap();
    let form = store
        .create_form(NewForm {
            business_id: business.id.clone(),
            title: "Visit".into(),
            description: None,
            fields: vec![FormField::new("rating", FieldType::Rating, "Rate us").required()],
        })
        .await
        .unwrap();
    assert_eq!(form.status, FormStatus::Draft);
    assert_eq!(form.published_at, None);
    assert_eq!(store.active_form(&business.id).await.unwrap(), None);

    let renamed = store
        .update_form(&form.id, FormUpdateBuilder::new().title("Your visit").build())
        .await
        .unwrap();
    assert_eq!(renamed.title, "Your visit");
    assert_eq!(renamed.fields, form.fields);

    let published = store
        .set_form_status(&form.id, FormStatus::Published)
        .await
        .unwrap();
    assert_eq!(published.status, FormStatus::Published);
    assert!(published.published_at.is_some());

    let again = store
        .set_form_status(&form.id, FormStatus::Published)
        .await
        .unwrap();
    assert_eq!(again.published_at, published.published_at);

    let active = store.active_form(&business.id).await.unwrap().unwrap();
    assert_eq!(active.id, form.id);

    store
        .set_form_status(&form.id, FormStatus::Archived)
        .await
        .unwrap();
    assert_eq!(store.active_form(&business.id).await.unwrap(), None);

    let unknown = store.set_form_status("frm-00000000", FormStatus::Draft).await;
    assert!(matches!(unknown, Err(ref e) if e.is_not_found()));
}

async fn forms_listed_newest_first(store: &impl FeedbackStore) {
    let business = store
        .create_business(new_business("many-forms", "many@example.com"))
        .await
        .unwrap();
    let mut ids = Vec::new();
    for title in ["first", "second", "third"] {
        let form = store
            .create_form(NewForm {
                business_id: business.id.clone(),
                title: title.into(),
                description: None,
                fields: Vec::new(),
            })
            .await
            .unwrap();
        ids.push(form.id);
    }
    ids.reverse();
    let listed: Vec<String> = store
        .list_forms(&business.id)
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.id)
        .collect();
    assert_eq!(listed, ids);
}

async fn categorizations_replace_in_order(store: &impl FeedbackStore) {
    let business = store
        .create_business(new_business("cats", "cats@example.com"))
        .await
        .unwrap();
    let form = store
        .create_form(NewForm {
            business_id: business.id.clone(),
            title: "t".into(),
            description: None,
            fields: Vec::new(),
        })
        .await
        .unwrap();

    let cat = |field_id: &str, category: FieldCategory| FieldCategorization {
        field_id: field_id.into(),
        category,
        priority: category.default_priority(),
        confidence: 0.7,
        source: CategorizationSource::Pattern,
    };
    store
        .save_field_categorizations(&form.id, &[cat("a", FieldCategory::Custom)])
        .await
        .unwrap();
    let replacement = vec![
        cat("z", FieldCategory::FeedbackText),
        cat("b", FieldCategory::Rating),
    ];
    store
        .save_field_categorizations(&form.id, &replacement)
        .await
        .unwrap();

    assert_eq!(
        store.list_field_categorizations(&form.id).await.unwrap(),
        replacement
    );
    let missing = store
        .save_field_categorizations("frm-00000000", &replacement)
        .await;
    assert!(matches!(missing, Err(ref e) if e.is_not_found()));
}

async fn social_links_replace(store: &impl FeedbackStore) {
    let business = store
        .create_business(new_business("social", "social@example.com"))
        .await
        .unwrap();
    let link = |platform: &str| NewSocialLink {
        platform: platform.into(),
        url: format!("https://{platform}.example.com/shop"),
    };
    store
        .replace_social_links(&business.id, vec![link("facebook")])
        .await
        .unwrap();
    store
        .replace_social_links(&business.id, vec![link("instagram"), link("yelp")])
        .await
        .unwrap();

    let links = store.list_social_links(&business.id).await.unwrap();
    let platforms: Vec<(&str, u32)> = links
        .iter()
        .map(|l| (l.platform.as_str(), l.display_order))
        .collect();
    assert_eq!(platforms, vec![("instagram", 0), ("yelp", 1)]);
}

async fn submissions_filter_and_order(store: &impl FeedbackStore) {
    let business = store
        .create_business(new_business("subs", "subs@example.com"))
        .await
        .unwrap();
    let product = store
        .create_product(NewProduct {
            business_id: business.id.clone(),
            name: "Latte".into(),
            description: None,
            category: None,
            image_url: None,
        })
        .await
        .unwrap();

    for days_ago in [10, 3, 1] {
        store
            .create_submission(submission(&business.id, days_ago, Some(4.0)))
            .await
            .unwrap();
    }
    let mut with_product = submission(&business.id, 2, Some(2.0));
    with_product.product_id = Some(product.id.clone());
    let stored = store.create_submission(with_product).await.unwrap();
    assert_eq!(stored.data.get("rating"), Some(&json!(2.0)));

    let all = store
        .list_submissions(&business.id, &SubmissionFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 4);
    assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    let since = Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap();
    let recent = store
        .list_submissions(&business.id, &SubmissionFilter::default().since(since))
        .await
        .unwrap();
    assert_eq!(recent.len(), 3);

    let by_product = store
        .list_submissions(&business.id, &SubmissionFilter::default().product(&product.id))
        .await
        .unwrap();
    assert_eq!(by_product.len(), 1);
    assert_eq!(by_product[0].id, stored.id);

    let limited = store
        .list_submissions(&business.id, &SubmissionFilter::default().limit(2))
        .await
        .unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].id, all[0].id);
}

async fn events_oldest_first(store: &impl FeedbackStore) {
    let business = store
        .create_business(new_business("events", "events@example.com"))
        .await
        .unwrap();
    let base = Utc.with_ymd_and_hms(2026, 3, 20, 12, 0, 0).unwrap();
    for (hours, kind) in [
        (5, EventType::FormSubmit),
        (30, EventType::PageView),
        (1, EventType::LinkClick),
    ] {
        store
            .record_event(
                NewEvent::new(business.id.as_str(), kind)
                    .with_metadata(json!({ "hours": hours }))
                    .at(base - Duration::hours(hours)),
            )
            .await
            .unwrap();
    }

    let events = store.list_events(&business.id, None).await.unwrap();
    let kinds: Vec<EventType> = events.iter().map(|e| e.event_type).collect();
    assert_eq!(
        kinds,
        vec![EventType::PageView, EventType::FormSubmit, EventType::LinkClick]
    );
    assert_eq!(events[0].metadata, Some(json!({ "hours": 30 })));

    let since = store
        .list_events(&business.id, Some(base - Duration::hours(6)))
        .await
        .unwrap();
    assert_eq!(since.len(), 2);

    let orphan = store
        .record_event(NewEvent::new("biz-00000000", EventType::PageView))
        .await;
    assert!(matches!(orphan, Err(ref e) if e.is_not_found()));
}

async fn products_deactivate(store: &impl FeedbackStore) {
    let business = store
        .create_business(new_business("products", "products@example.com"))
        .await
        .unwrap();
    let mut ids = Vec::new();
    for name in ["Espresso", "Muffin"] {
        let product = store
            .create_product(NewProduct {
                business_id: business.id.clone(),
                name: name.into(),
                description: None,
                category: Some("menu".into()),
                image_url: None,
            })
            .await
            .unwrap();
        assert!(product.active);
        ids.push(product.id);
    }

    let hidden = store
        .update_product(&ids[0], ProductUpdateBuilder::new().active(false).build())
        .await
        .unwrap();
    assert!(!hidden.active);
    assert_eq!(hidden.category.as_deref(), Some("menu"));

    let visible = store.list_products(&business.id, false).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, ids[1]);
    assert_eq!(store.list_products(&business.id, true).await.unwrap().len(), 2);

    let fetched = store.get_product(&ids[0]).await.unwrap().unwrap();
    assert!(!fetched.active);
}

/// Which store a contract case runs against.
#[derive(Debug, Clone, Copy)]
enum Backend {
    Memory,
    Sql,
}

impl Backend {
    async fn open(self) -> StoreBackend {
        match self {
            Self::Memory => StoreBackend::Memory(MemoryStore::new()),
            Self::Sql => StoreBackend::Sql(SqlStore::open_local(":memory:").await.unwrap()),
        }
    }
}

macro_rules! contract {
    ($($name:ident),* $(,)?) => {
        mod contract {
            use super::*;
            $(
                #[rstest]
                #[case::memory(Backend::Memory)]
                #[case::sql(Backend::Sql)]
                #[tokio::test]
                async fn $name(#[case] backend: Backend) {
                    super::$name(&backend.open().await).await;
                }
            )*
        }
    };
}

contract!(
    business_uniqueness,
    business_update_is_partial,
    users_and_access,
    form_lifecycle,
    forms_listed_newest_first,
    categorizations_replace_in_order,
    social_links_replace,
    submissions_filter_and_order,
    events_oldest_first,
    products_deactivate,
);

#[tokio::test]
async fn sql_store_persists_across_reopen() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("pulse.db");
    let path = path.to_str().unwrap();

    let business_id = {
        let store = SqlStore::open_local(path).await.unwrap();
        let business = store
            .create_business(new_business("persist", "persist@example.com"))
            .await
            .unwrap();
        store
            .create_submission(submission(&business.id, 0, Some(5.0)))
            .await
            .unwrap();
        business.id
    };

    let store = SqlStore::open_local(path).await.unwrap();
    let business = store.get_business(&business_id).await.unwrap().unwrap();
    assert_eq!(business.slug, "persist");
    let submissions = store
        .list_submissions(&business_id, &SubmissionFilter::default())
        .await
        .unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].rating, Some(5.0));
}
