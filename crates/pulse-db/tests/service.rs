use pretty_assertions::assert_eq;
use pulse_core::entities::FormField;
use pulse_core::enums::{EventType, FieldCategory, FieldType, FormStatus};
use pulse_db::demo::{self, DEMO_SLUG};
use pulse_db::{
    DatabaseError, FeedbackInput, FeedbackService, FeedbackStore, FormUpdateBuilder, MemoryStore,
    NewBusiness, NewForm, NewProduct, NewSocialLink, ProductUpdateBuilder, SqlStore,
    SubmissionFilter,
};
use serde_json::{Map, Value, json};

struct Fixture<S> {
    service: FeedbackService<S>,
    business_id: String,
}

async fn fixture<S: FeedbackStore>(store: S) -> Fixture<S> {
    let business = store
        .create_business(NewBusiness {
            name: "Harbor Coffee".into(),
            email: "hello@harbor.test".into(),
            password_hash: "h".into(),
            slug: "harbor-coffee".into(),
        })
        .await
        .unwrap();
    Fixture {
        service: FeedbackService::new(store),
        business_id: business.id,
    }
}

fn visit_fields() -> Vec<FormField> {
    vec![
        FormField::new("q1", FieldType::Number, "Score").with_category(FieldCategory::Rating),
        FormField::new("q2", FieldType::Textarea, "Anything else?"),
        FormField::new("name", FieldType::Text, "Your name").required(),
    ]
}

fn answers(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

async fn published_form<S: FeedbackStore>(fx: &Fixture<S>) -> String {
    let form = fx
        .service
        .create_form(NewForm {
            business_id: fx.business_id.clone(),
            title: "Visit".into(),
            description: None,
            fields: visit_fields(),
        })
        .await
        .unwrap();
    fx.service
        .publish_form(&fx.business_id, &form.id)
        .await
        .unwrap();
    form.id
}

#[tokio::test]
async fn create_form_rejects_blank_title_and_duplicate_fields() {
    let fx = fixture(MemoryStore::new()).await;
    let blank = fx
        .service
        .create_form(NewForm {
            business_id: fx.business_id.clone(),
            title: "  ".into(),
            description: None,
            fields: Vec::new(),
        })
        .await;
    assert!(matches!(blank, Err(DatabaseError::Validation(_))));

    let dupes = fx
        .service
        .create_form(NewForm {
            business_id: fx.business_id.clone(),
            title: "Dupes".into(),
            description: None,
            fields: vec![
                FormField::new("a", FieldType::Text, "A"),
                FormField::new("a", FieldType::Text, "B"),
            ],
        })
        .await;
    assert!(matches!(dupes, Err(DatabaseError::Validation(_))));
}

#[tokio::test]
async fn publish_stores_categorizations_and_archives_previous() {
    let fx = fixture(MemoryStore::new()).await;
    let first = published_form(&fx).await;
    let second = published_form(&fx).await;

    let store = fx.service.store();
    let first_form = store.get_form(&first).await.unwrap().unwrap();
    assert_eq!(first_form.status, FormStatus::Archived);
    let active = store.active_form(&fx.business_id).await.unwrap().unwrap();
    assert_eq!(active.id, second);

    let cats = store.list_field_categorizations(&second).await.unwrap();
    let ids: Vec<&str> = cats.iter().map(|c| c.field_id.as_str()).collect();
    assert_eq!(ids, vec!["q1", "q2", "name"]);
    assert_eq!(cats[0].category, FieldCategory::Rating);
    assert!((cats[0].confidence - 0.95).abs() < f64::EPSILON);
}

#[tokio::test]
async fn publish_rejects_empty_and_foreign_forms() {
    let fx = fixture(MemoryStore::new()).await;
    let empty = fx
        .service
        .create_form(NewForm {
            business_id: fx.business_id.clone(),
            title: "Empty".into(),
            description: None,
            fields: Vec::new(),
        })
        .await
        .unwrap();
    let result = fx.service.publish_form(&fx.business_id, &empty.id).await;
    assert!(matches!(result, Err(DatabaseError::Validation(_))));

    let foreign = fx.service.publish_form("biz-00000000", &empty.id).await;
    assert!(matches!(foreign, Err(ref e) if e.is_not_found()));
}

#[tokio::test]
async fn submit_extracts_with_stored_categorizations() {
    let fx = fixture(MemoryStore::new()).await;
    let form_id = published_form(&fx).await;

    let submission = fx
        .service
        .submit_feedback(
            "harbor-coffee",
            FeedbackInput {
                data: answers(json!({ "q1": "4", "q2": "  Lovely place  ", "name": "Sam" })),
                ..FeedbackInput::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(submission.form_id.as_deref(), Some(form_id.as_str()));
    assert_eq!(submission.rating, Some(4.0));
    assert_eq!(submission.feedback_text.as_deref(), Some("Lovely place"));

    let events = fx
        .service
        .store()
        .list_events(&fx.business_id, None)
        .await
        .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, EventType::FormSubmit);
    assert_eq!(
        events[0].metadata.as_ref().and_then(|m| m.get("submission_id")),
        Some(&json!(submission.id))
    );
}

#[tokio::test]
async fn submit_requires_required_fields() {
    let fx = fixture(MemoryStore::new()).await;
    published_form(&fx).await;

    let result = fx
        .service
        .submit_feedback(
            "harbor-coffee",
            FeedbackInput {
                data: answers(json!({ "q1": 5, "name": "   " })),
                ..FeedbackInput::default()
            },
            None,
        )
        .await;
    match result {
        Err(DatabaseError::Validation(msg)) => assert!(msg.contains("Your name"), "{msg}"),
        other => panic!("expected validation error, got {other:?}"),
    }
    let stored = fx
        .service
        .store()
        .list_submissions(&fx.business_id, &SubmissionFilter::default())
        .await
        .unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn submit_without_form_uses_fallback_heuristics() {
    let fx = fixture(MemoryStore::new()).await;
    let submission = fx
        .service
        .submit_feedback(
            "harbor-coffee",
            FeedbackInput {
                data: answers(json!({ "Rating": 4, "message": "ok", "comment": "ignored" })),
                ..FeedbackInput::default()
            },
            Some("usr-00000001".into()),
        )
        .await
        .unwrap();
    assert_eq!(submission.form_id, None);
    assert_eq!(submission.user_id.as_deref(), Some("usr-00000001"));
    assert_eq!(submission.rating, Some(4.0));
    assert_eq!(submission.feedback_text.as_deref(), Some("ok"));
}

#[tokio::test]
async fn submit_rejects_draft_form_and_inactive_product() {
    let fx = fixture(MemoryStore::new()).await;
    let draft = fx
        .service
        .create_form(NewForm {
            business_id: fx.business_id.clone(),
            title: "Draft".into(),
            description: None,
            fields: visit_fields(),
        })
        .await
        .unwrap();
    let result = fx
        .service
        .submit_feedback(
            "harbor-coffee",
            FeedbackInput {
                form_id: Some(draft.id),
                data: answers(json!({ "name": "x" })),
                ..FeedbackInput::default()
            },
            None,
        )
        .await;
    assert!(matches!(result, Err(DatabaseError::InvalidState(_))));

    let store = fx.service.store();
    let product = store
        .create_product(NewProduct {
            business_id: fx.business_id.clone(),
            name: "Old blend".into(),
            description: None,
            category: None,
            image_url: None,
        })
        .await
        .unwrap();
    store
        .update_product(&product.id, ProductUpdateBuilder::new().active(false).build())
        .await
        .unwrap();
    let result = fx
        .service
        .submit_feedback(
            "harbor-coffee",
            FeedbackInput {
                product_id: Some(product.id),
                data: answers(json!({ "rating": 3 })),
                ..FeedbackInput::default()
            },
            None,
        )
        .await;
    assert!(matches!(result, Err(ref e) if e.is_not_found()));

    let unknown = fx
        .service
        .submit_feedback("no-such-shop", FeedbackInput::default(), None)
        .await;
    assert!(matches!(unknown, Err(ref e) if e.is_not_found()));
}

#[tokio::test]
async fn editing_published_fields_recategorizes() {
    let fx = fixture(MemoryStore::new()).await;
    let form_id = published_form(&fx).await;

    fx.service
        .update_form(
            &fx.business_id,
            &form_id,
            FormUpdateBuilder::new()
                .fields(vec![FormField::new("email", FieldType::Email, "Email")])
                .build(),
        )
        .await
        .unwrap();
    let cats = fx
        .service
        .store()
        .list_field_categorizations(&form_id)
        .await
        .unwrap();
    assert_eq!(cats.len(), 1);
    assert_eq!(cats[0].category, FieldCategory::Contact);

    fx.service
        .set_form_status(&fx.business_id, &form_id, FormStatus::Archived)
        .await
        .unwrap();
    let archived = fx
        .service
        .update_form(
            &fx.business_id,
            &form_id,
            FormUpdateBuilder::new().title("Late edit").build(),
        )
        .await;
    assert!(matches!(archived, Err(DatabaseError::InvalidState(_))));
}

#[tokio::test]
async fn public_page_and_page_events() {
    let fx = fixture(SqlStore::open_local(":memory:").await.unwrap()).await;
    let form_id = published_form(&fx).await;
    fx.service
        .store()
        .replace_social_links(
            &fx.business_id,
            vec![NewSocialLink {
                platform: "instagram".into(),
                url: "https://instagram.com/harbor".into(),
            }],
        )
        .await
        .unwrap();

    let page = fx.service.public_page("harbor-coffee").await.unwrap();
    assert_eq!(page.business.slug, "harbor-coffee");
    assert_eq!(page.form.map(|f| f.id), Some(form_id));
    assert_eq!(page.social_links.len(), 1);

    let event = fx
        .service
        .record_page_event(
            "harbor-coffee",
            EventType::LinkClick,
            Some(json!({ "platform": "instagram" })),
        )
        .await
        .unwrap();
    assert_eq!(event.business_id, fx.business_id);

    let missing = fx.service.public_page("nobody").await;
    assert!(matches!(missing, Err(ref e) if e.is_not_found()));
}

#[tokio::test]
async fn demo_seed_is_idempotent() {
    let service = FeedbackService::new(MemoryStore::new());
    let first = demo::seed(&service, "$2b$04$demo").await.unwrap();
    assert!(first.created);
    assert!(first.submissions > 0);

    let second = demo::seed(&service, "$2b$04$demo").await.unwrap();
    assert!(!second.created);
    assert_eq!(second.business_id, first.business_id);

    let store = service.store();
    let page = service.public_page(DEMO_SLUG).await.unwrap();
    assert!(page.form.is_some());
    assert_eq!(page.social_links.len(), 2);

    let submissions = store
        .list_submissions(&first.business_id, &SubmissionFilter::default())
        .await
        .unwrap();
    assert_eq!(submissions.len(), first.submissions);
    assert!(submissions.iter().all(|s| s.rating.is_some() && s.feedback_text.is_some()));
    assert_eq!(
        store.list_products(&first.business_id, false).await.unwrap().len(),
        3
    );
}

#[tokio::test]
async fn demo_seed_works_on_sql_store() {
    let service = FeedbackService::new(SqlStore::open_local(":memory:").await.unwrap());
    let report = demo::seed(&service, "$2b$04$demo").await.unwrap();
    let events = service
        .store()
        .list_events(&report.business_id, None)
        .await
        .unwrap();
    assert_eq!(events.len(), report.events);
}
