//! Input validation for registration and profile edits.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::AuthError;
use crate::password::MIN_PASSWORD_LEN;

pub const SLUG_MIN_LEN: usize = 3;
pub const SLUG_MAX_LEN: usize = 50;
pub const NAME_MAX_LEN: usize = 100;

/// Slugs that would collide with application routes.
pub const RESERVED_SLUGS: &[&str] = &[
    "admin",
    "api",
    "app",
    "audience",
    "auth",
    "dashboard",
    "feedback",
    "forms",
    "health",
    "insights",
    "login",
    "logout",
    "page",
    "products",
    "profile",
    "register",
    "settings",
    "signup",
    "static",
    "www",
];

static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));
static SLUG: LazyLock<Option<Regex>> = LazyLock::new(|| compile(r"^[a-z0-9]+(-[a-z0-9]+)*$"));
static HEX_COLOR: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$"));

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(error) => {
            tracing::error!(%error, pattern, "invalid validation pattern");
            None
        }
    }
}

fn is_match(re: &LazyLock<Option<Regex>>, value: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(value))
}

/// Trimmed, lowercased email address.
///
/// # Errors
///
/// `AuthError::Validation` for anything that doesn't look like `a@b.c`.
pub fn validate_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim();
    if is_match(&EMAIL, email) {
        Ok(email.to_lowercase())
    } else {
        Err(AuthError::invalid("email", "must be a valid email address"))
    }
}

/// # Errors
///
/// `AuthError::Validation` for passwords shorter than [`MIN_PASSWORD_LEN`].
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::invalid(
            "password",
            format!("must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    Ok(())
}

/// Trimmed business name.
///
/// # Errors
///
/// `AuthError::Validation` for a blank or overlong name.
pub fn validate_business_name(name: &str) -> Result<String, AuthError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AuthError::invalid("name", "is required"));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(AuthError::invalid(
            "name",
            format!("must be at most {NAME_MAX_LEN} characters"),
        ));
    }
    Ok(name.to_string())
}

/// Lowercase alphanumerics separated by single hyphens, 3–50 chars, not reserved.
///
/// # Errors
///
/// `AuthError::Validation` naming the broken rule.
pub fn validate_slug(slug: &str) -> Result<(), AuthError> {
    let len = slug.len();
    if !(SLUG_MIN_LEN..=SLUG_MAX_LEN).contains(&len) {
        return Err(AuthError::invalid(
            "slug",
            format!("must be {SLUG_MIN_LEN}-{SLUG_MAX_LEN} characters"),
        ));
    }
    if !is_match(&SLUG, slug) {
        return Err(AuthError::invalid(
            "slug",
            "may only contain lowercase letters, digits and single hyphens",
        ));
    }
    if RESERVED_SLUGS.contains(&slug) {
        return Err(AuthError::invalid("slug", format!("'{slug}' is reserved")));
    }
    Ok(())
}

/// `#rgb` or `#rrggbb`.
///
/// # Errors
///
/// `AuthError::Validation` for any other shape.
pub fn validate_hex_color(color: &str) -> Result<(), AuthError> {
    if is_match(&HEX_COLOR, color) {
        Ok(())
    } else {
        Err(AuthError::invalid(
            "brand_color",
            "must be a hex color like #1a2b3c",
        ))
    }
}

/// Derive a slug from a business name: ASCII alphanumerics kept, everything
/// else collapsed into single hyphens, truncated to [`SLUG_MAX_LEN`].
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.truncate(SLUG_MAX_LEN);
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("owner@shop.com", true)]
    #[case("  padded@shop.io  ", true)]
    #[case("no-at-sign.com", false)]
    #[case("two@@shop.com", false)]
    #[case("missing@tld", false)]
    #[case("spa ce@shop.com", false)]
    fn email_shapes(#[case] email: &str, #[case] ok: bool) {
        assert_eq!(validate_email(email).is_ok(), ok, "{email}");
    }

    #[test]
    fn email_is_normalized() {
        assert_eq!(validate_email(" Ann@Shop.IO ").unwrap(), "ann@shop.io");
    }

    #[rstest]
    #[case("demo-cafe", true)]
    #[case("abc", true)]
    #[case("a1-b2-c3", true)]
    #[case("ab", false)]
    #[case("Demo-Cafe", false)]
    #[case("double--hyphen", false)]
    #[case("-leading", false)]
    #[case("trailing-", false)]
    #[case("under_score", false)]
    #[case("api", false)]
    #[case("dashboard", false)]
    fn slug_rules(#[case] slug: &str, #[case] ok: bool) {
        assert_eq!(validate_slug(slug).is_ok(), ok, "{slug}");
    }

    #[test]
    fn slug_length_limit() {
        assert!(validate_slug(&"a".repeat(50)).is_ok());
        assert!(validate_slug(&"a".repeat(51)).is_err());
    }

    #[rstest]
    #[case("#fff", true)]
    #[case("#1A2b3C", true)]
    #[case("fff", false)]
    #[case("#ffff", false)]
    #[case("#ggg", false)]
    fn hex_colors(#[case] color: &str, #[case] ok: bool) {
        assert_eq!(validate_hex_color(color).is_ok(), ok, "{color}");
    }

    #[test]
    fn password_minimum() {
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("12345678").is_ok());
    }

    #[test]
    fn business_name_trimmed_and_required() {
        assert_eq!(validate_business_name("  Bean There ").unwrap(), "Bean There");
        assert!(validate_business_name("   ").is_err());
        assert!(validate_business_name(&"x".repeat(101)).is_err());
    }

    #[rstest]
    #[case("Demo Café", "demo-caf")]
    #[case("  Joe's   Pizza & Pasta!", "joe-s-pizza-pasta")]
    #[case("123", "123")]
    #[case("!!!", "")]
    fn slugify_names(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(slugify(name), expected);
    }
}
