//! Field validation rules shared by every form.
//!
//! Pure functions returning a user-facing message on failure. Validation here
//! is advisory; the server stays the authority on every submitted payload.

use std::collections::BTreeMap;

use crate::{ACCEPTED_IMAGE_TYPES, DESCRIPTION_MAX_LEN, NAME_MAX_LEN};

/// Per-field error messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    fields: BTreeMap<String, String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: &str, result: Result<(), String>) {
        match result {
            Ok(()) => {
                self.fields.remove(field);
            }
            Err(msg) => {
                self.fields.insert(field.to_string(), msg);
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<String> {
        self.fields.get(field).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }
}

pub fn validate_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name is required".to_string());
    }
    if trimmed.chars().count() > NAME_MAX_LEN {
        return Err(format!("Name must be at most {} characters", NAME_MAX_LEN));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err("Description is required".to_string());
    }
    if trimmed.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(format!(
            "Description must be at most {} characters",
            DESCRIPTION_MAX_LEN
        ));
    }
    Ok(())
}

/// Syntactic email check: one `@`, non-empty local part, domain with a dot,
/// no whitespace anywhere.
pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required".to_string());
    }
    if email.chars().any(char::is_whitespace) {
        return Err("Invalid email".to_string());
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err("Invalid email".to_string());
    };
    let domain_ok = match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    };
    if local.is_empty() || domain.contains('@') || !domain_ok {
        return Err("Invalid email".to_string());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    Ok(())
}

/// Parse and range-check a raw price input.
pub fn validate_price(raw: &str) -> Result<f64, String> {
    let price: f64 = raw
        .trim()
        .parse()
        .map_err(|_| "Price must be a number".to_string())?;
    if !price.is_finite() || price <= 0.0 {
        return Err("Price must be greater than zero".to_string());
    }
    Ok(price)
}

pub fn is_accepted_image_type(mime: &str) -> bool {
    ACCEPTED_IMAGE_TYPES.contains(&mime)
}

/// Check an attachment set: at least one file, every declared type accepted.
pub fn validate_images<'a>(
    count: usize,
    mut types: impl Iterator<Item = &'a str>,
) -> Result<(), String> {
    if count == 0 {
        return Err("At least one image is required".to_string());
    }
    if let Some(bad) = types.find(|t| !is_accepted_image_type(t)) {
        return Err(format!("Unsupported image type: {}", bad));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required_and_bounded() {
        assert!(validate_name("Fruit").is_ok());
        assert_eq!(validate_name("").unwrap_err(), "Name is required");
        assert_eq!(validate_name("   ").unwrap_err(), "Name is required");
        assert!(validate_name(&"x".repeat(255)).is_ok());
        assert_eq!(
            validate_name(&"x".repeat(256)).unwrap_err(),
            "Name must be at most 255 characters"
        );
    }

    #[test]
    fn description_is_required_and_bounded() {
        assert!(validate_description("Fresh fruit").is_ok());
        assert_eq!(
            validate_description("").unwrap_err(),
            "Description is required"
        );
        assert!(validate_description(&"x".repeat(4000)).is_ok());
        assert_eq!(
            validate_description(&"x".repeat(4001)).unwrap_err(),
            "Description must be at most 4000 characters"
        );
    }

    #[test]
    fn email_syntax_matrix() {
        assert!(validate_email("admin@example.com").is_ok());
        assert!(validate_email("a.b+c@sub.example.org").is_ok());
        assert_eq!(validate_email("").unwrap_err(), "Email is required");
        for bad in [
            "admin",
            "admin@",
            "@example.com",
            "admin@example",
            "admin@.com",
            "admin@example.",
            "ad min@example.com",
            "admin@@example.com",
        ] {
            assert_eq!(validate_email(bad).unwrap_err(), "Invalid email", "{bad}");
        }
    }

    #[test]
    fn password_is_required() {
        assert!(validate_password("secret").is_ok());
        assert_eq!(validate_password("").unwrap_err(), "Password is required");
    }

    #[test]
    fn price_must_be_a_positive_number() {
        assert_eq!(validate_price("12.5").unwrap(), 12.5);
        assert_eq!(validate_price(" 3 ").unwrap(), 3.0);
        assert_eq!(validate_price("abc").unwrap_err(), "Price must be a number");
        assert_eq!(
            validate_price("0").unwrap_err(),
            "Price must be greater than zero"
        );
        assert_eq!(
            validate_price("-1").unwrap_err(),
            "Price must be greater than zero"
        );
    }

    #[test]
    fn images_require_at_least_one_accepted_file() {
        assert_eq!(
            validate_images(0, std::iter::empty()).unwrap_err(),
            "At least one image is required"
        );
        assert!(validate_images(2, ["image/png", "image/jpeg"].into_iter()).is_ok());
        assert_eq!(
            validate_images(1, ["application/pdf"].into_iter()).unwrap_err(),
            "Unsupported image type: application/pdf"
        );
    }

    #[test]
    fn form_errors_track_set_and_clear() {
        let mut errors = FormErrors::new();
        assert!(errors.is_empty());

        errors.set("name", Err("Name is required".to_string()));
        assert_eq!(errors.get("name").as_deref(), Some("Name is required"));
        assert!(!errors.is_empty());

        errors.set("name", Ok(()));
        assert!(errors.get("name").is_none());
        assert!(errors.is_empty());
    }
}
