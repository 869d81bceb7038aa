//! The categorization rule table.
//!
//! Each rule is a list of tagged signals. A signal either tests the field id,
//! the field label, or the declared input type. Rules are listed in tie-break
//! order: when two categories score the same, the earlier rule wins.

use std::sync::LazyLock;

use pulse_core::enums::{FieldCategory, FieldType};
use regex::Regex;

/// One piece of evidence a rule looks for, in source form.
#[derive(Debug, Clone, Copy)]
enum Signal {
    Id(&'static str),
    Label(&'static str),
    Type(FieldType),
}

/// A compiled signal.
#[derive(Debug, Clone)]
pub enum Matcher {
    Id(Regex),
    Label(Regex),
    Type(FieldType),
}

/// All signals for one category.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub category: FieldCategory,
    pub priority: u8,
    pub matchers: Vec<Matcher>,
}

impl CategoryRule {
    fn compile(category: FieldCategory, signals: &[Signal]) -> Self {
        let matchers = signals
            .iter()
            .filter_map(|signal| match *signal {
                Signal::Id(pattern) => compile_pattern(pattern).map(Matcher::Id),
                Signal::Label(pattern) => compile_pattern(pattern).map(Matcher::Label),
                Signal::Type(ty) => Some(Matcher::Type(ty)),
            })
            .collect();
        Self {
            category,
            priority: category.default_priority(),
            matchers,
        }
    }

    /// Whether any id pattern matches.
    #[must_use]
    pub fn matches_id(&self, id: &str) -> bool {
        self.matchers
            .iter()
            .any(|m| matches!(m, Matcher::Id(re) if re.is_match(id)))
    }

    /// Whether any label pattern matches.
    #[must_use]
    pub fn matches_label(&self, label: &str) -> bool {
        self.matchers
            .iter()
            .any(|m| matches!(m, Matcher::Label(re) if re.is_match(label)))
    }

    /// Whether the declared type is one this category expects.
    #[must_use]
    pub fn expects_type(&self, ty: FieldType) -> bool {
        self.matchers
            .iter()
            .any(|m| matches!(m, Matcher::Type(expected) if *expected == ty))
    }
}

fn compile_pattern(pattern: &str) -> Option<Regex> {
    match Regex::new(&format!("(?i){pattern}")) {
        Ok(re) => Some(re),
        Err(error) => {
            tracing::error!(%error, pattern, "invalid categorization pattern; skipping");
            None
        }
    }
}

// `[^a-z]` boundaries instead of `\b`: field ids use `_` and `-` as separators
// and `_` is a word character.
const RATING: &[Signal] = &[
    Signal::Id("rating"),
    Signal::Id("(^|[^a-z])rate($|[^a-z])"),
    Signal::Id("score"),
    Signal::Id("(^|[^a-z])stars?($|[^a-z])"),
    Signal::Id("satisf"),
    Signal::Label(r"\brat(e|ing)\b"),
    Signal::Label("satisf"),
    Signal::Label(r"\bstars?\b"),
    Signal::Label(r"\bscore\b"),
    Signal::Label(r"out of (5|10|five|ten)"),
    Signal::Type(FieldType::Rating),
    Signal::Type(FieldType::Number),
];

const FEEDBACK_TEXT: &[Signal] = &[
    Signal::Id("feedback"),
    Signal::Id("comment"),
    Signal::Id("message"),
    Signal::Id("review"),
    Signal::Id("suggest"),
    Signal::Id("opinion"),
    Signal::Id("thought"),
    Signal::Id("(^|[^a-z])notes?($|[^a-z])"),
    Signal::Id("experience"),
    Signal::Id("improve"),
    Signal::Label("feedback"),
    Signal::Label("comment"),
    Signal::Label(r"\btell us\b"),
    Signal::Label(r"\bshare\b"),
    Signal::Label("suggest"),
    Signal::Label("improve"),
    Signal::Label("experience"),
    Signal::Label(r"\bthoughts?\b"),
    Signal::Label(r"anything else"),
    Signal::Type(FieldType::Textarea),
    Signal::Type(FieldType::Text),
];

const RECOMMENDATION: &[Signal] = &[
    Signal::Id("recommend"),
    Signal::Id("(^|[^a-z])nps($|[^a-z])"),
    Signal::Id("refer"),
    Signal::Label("recommend"),
    Signal::Label(r"likely .*\b(friend|colleague|others)\b"),
    Signal::Type(FieldType::Number),
    Signal::Type(FieldType::Rating),
    Signal::Type(FieldType::Radio),
];

const CONTACT: &[Signal] = &[
    Signal::Id("e-?mail"),
    Signal::Id("phone"),
    Signal::Id("mobile"),
    Signal::Id("(^|[^a-z])tel($|[^a-z])"),
    Signal::Id("contact"),
    Signal::Label("e-?mail"),
    Signal::Label("phone"),
    Signal::Label("contact"),
    Signal::Label(r"reach you"),
    Signal::Type(FieldType::Email),
    Signal::Type(FieldType::Tel),
];

const PERSONAL_INFO: &[Signal] = &[
    Signal::Id("name"),
    Signal::Id("address"),
    Signal::Id("(^|[^a-z])city($|[^a-z])"),
    Signal::Id("zip|postal"),
    Signal::Id("company"),
    Signal::Label(r"\bname\b"),
    Signal::Label("address"),
    Signal::Label(r"\bcity\b"),
    Signal::Label("company"),
    Signal::Type(FieldType::Text),
];

const PRODUCT: &[Signal] = &[
    Signal::Id("product"),
    Signal::Id("(^|[^a-z])item($|[^a-z])"),
    Signal::Id("sku"),
    Signal::Id("purchase"),
    Signal::Id("(^|[^a-z])order($|[^a-z])"),
    Signal::Label("product"),
    Signal::Label(r"\bitem\b"),
    Signal::Label("purchase"),
    Signal::Label(r"\border(ed)?\b"),
    Signal::Type(FieldType::Select),
    Signal::Type(FieldType::Radio),
];

const DEMOGRAPHIC: &[Signal] = &[
    Signal::Id("(^|[^a-z])age($|[^a-z])"),
    Signal::Id("gender"),
    Signal::Id("location"),
    Signal::Id("country"),
    Signal::Id("region"),
    Signal::Id("income"),
    Signal::Id("occupation"),
    Signal::Label(r"\bage\b"),
    Signal::Label("gender"),
    Signal::Label(r"where .*\blive\b"),
    Signal::Label("country"),
    Signal::Label("occupation"),
    Signal::Type(FieldType::Select),
    Signal::Type(FieldType::Radio),
    Signal::Type(FieldType::Date),
];

static RULES: LazyLock<Vec<CategoryRule>> = LazyLock::new(|| {
    vec![
        CategoryRule::compile(FieldCategory::Rating, RATING),
        CategoryRule::compile(FieldCategory::FeedbackText, FEEDBACK_TEXT),
        CategoryRule::compile(FieldCategory::Recommendation, RECOMMENDATION),
        CategoryRule::compile(FieldCategory::Contact, CONTACT),
        CategoryRule::compile(FieldCategory::PersonalInfo, PERSONAL_INFO),
        CategoryRule::compile(FieldCategory::Product, PRODUCT),
        CategoryRule::compile(FieldCategory::Demographic, DEMOGRAPHIC),
    ]
});

/// The compiled rule table, in tie-break order.
#[must_use]
pub fn rule_table() -> &'static [CategoryRule] {
    &RULES
}
