use std::path::Path;

use anyhow::{Context, bail};
use pulse_core::entities::FormField;
use pulse_core::responses::ExtractionPreview;
use pulse_fields::extract_with_fields;
use serde_json::{Map, Value};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CategorizeArgs;
use crate::output::output;

pub fn handle(args: &CategorizeArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let preview = preview(args)?;
    output(&preview, flags.format)
}

fn preview(args: &CategorizeArgs) -> anyhow::Result<ExtractionPreview> {
    let fields = parse_fields(load_json(&args.form).context("invalid --form")?)?;
    let submission = match &args.submission {
        Some(source) => match load_json(source).context("invalid --submission")? {
            Value::Object(map) => map,
            other => bail!("--submission must be a JSON object, got {}", kind(&other)),
        },
        None => Map::new(),
    };

    let (categorizations, extracted) = extract_with_fields(&submission, &fields);
    tracing::debug!(
        fields = fields.len(),
        answers = submission.len(),
        "categorized form"
    );
    Ok(ExtractionPreview {
        categorizations,
        rating: extracted.rating,
        feedback_text: extracted.feedback_text,
    })
}

/// Inline JSON when the argument looks like JSON, otherwise a file path.
fn load_json(source: &str) -> anyhow::Result<Value> {
    let trimmed = source.trim_start();
    let text = if trimmed.starts_with('{') || trimmed.starts_with('[') {
        source.to_string()
    } else {
        std::fs::read_to_string(Path::new(source))
            .with_context(|| format!("failed to read {source}"))?
    };
    serde_json::from_str(&text).context("not valid JSON")
}

/// A bare field array, or a form object carrying `fields`.
fn parse_fields(value: Value) -> anyhow::Result<Vec<FormField>> {
    let fields = match value {
        Value::Array(_) => value,
        Value::Object(mut form) => form
            .remove("fields")
            .context("form object has no `fields` array")?,
        other => bail!("--form must be a JSON array or object, got {}", kind(&other)),
    };
    serde_json::from_value(fields).context("form fields do not match the field schema")
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use pulse_core::enums::FieldCategory;

    use super::*;

    fn args(form: &str, submission: Option<&str>) -> CategorizeArgs {
        CategorizeArgs {
            form: form.to_string(),
            submission: submission.map(str::to_string),
        }
    }

    const FORM: &str = r#"{"title": "Visit", "fields": [
        {"id": "q1", "type": "rating", "label": "How would you rate us?"},
        {"id": "q2", "type": "textarea", "label": "Any comments?"}
    ]}"#;

    #[test]
    fn inline_form_and_submission() {
        let preview = preview(&args(FORM, Some(r#"{"q1": "4", "q2": "  Lovely staff "}"#)))
            .expect("preview");
        let categories: Vec<FieldCategory> =
            preview.categorizations.iter().map(|c| c.category).collect();
        assert_eq!(
            categories,
            vec![FieldCategory::Rating, FieldCategory::FeedbackText]
        );
        assert_eq!(preview.rating, Some(4.0));
        assert_eq!(preview.feedback_text.as_deref(), Some("Lovely staff"));
    }

    #[test]
    fn form_from_file_without_submission() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            r#"[{{"id": "email", "type": "email", "label": "Email"}}]"#
        )
        .expect("write");
        let path = file.path().to_string_lossy().to_string();

        let preview = preview(&args(&path, None)).expect("preview");
        assert_eq!(preview.categorizations.len(), 1);
        assert_eq!(preview.categorizations[0].category, FieldCategory::Contact);
        assert_eq!(preview.rating, None);
    }

    #[test]
    fn rejects_wrong_shapes() {
        assert!(preview(&args("42", None)).is_err());
        assert!(preview(&args(r#"{"title": "no fields"}"#, None)).is_err());
        assert!(preview(&args("[]", Some("[1, 2]"))).is_err());
        assert!(preview(&args("/definitely/not/here.json", None)).is_err());
    }
}
