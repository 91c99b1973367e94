use std::borrow::Cow;

use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Body of `POST /api/contact`.
///
/// Required fields are decoded as `Option` so that every missing one is
/// reported in a single validation pass. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ContactSubmissionCreate {
    #[schema(required = true)]
    #[validate(
        required(message = "field required"),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,
    #[schema(required = true)]
    #[validate(
        required(message = "field required"),
        email(message = "value is not a valid email address"),
        custom(function = "dotted_domain")
    )]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[schema(required = true)]
    #[validate(
        required(message = "field required"),
        custom(function = "not_blank")
    )]
    pub service: Option<String>,
    #[schema(required = true)]
    #[validate(
        required(message = "field required"),
        custom(function = "not_blank")
    )]
    pub message: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be empty")));
    }
    Ok(())
}

/// The domain part must contain a dot, so `user@localhost` is rejected.
/// Addresses without `@` are left to the `email` rule.
fn dotted_domain(value: &str) -> Result<(), ValidationError> {
    match value.rsplit_once('@') {
        Some((_, domain)) if !domain.contains('.') => Err(ValidationError::new("email")
            .with_message(Cow::Borrowed("value is not a valid email address"))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> ContactSubmissionCreate {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn accepts_a_complete_submission() {
        let input = parse(json!({
            "name": "Test User",
            "email": "test@example.com",
            "phone": "+91 98765 43210",
            "service": "Bridal Makeup",
            "message": "hello",
        }));
        assert!(input.validate().is_ok());
        assert_eq!(input.phone.as_deref(), Some("+91 98765 43210"));
    }

    #[test]
    fn phone_is_optional_and_extras_are_ignored() {
        let input = parse(json!({
            "name": "A",
            "email": "a@example.com",
            "service": "S",
            "message": "M",
            "referrer": "instagram",
        }));
        assert!(input.validate().is_ok());
        assert!(input.phone.is_none());
    }

    fn valid() -> serde_json::Value {
        json!({
            "name": "A",
            "email": "a@example.com",
            "service": "S",
            "message": "M",
        })
    }

    fn with(field: &str, value: &str) -> ContactSubmissionCreate {
        let mut body = valid();
        body[field] = json!(value);
        parse(body)
    }

    #[test]
    fn every_missing_field_is_reported() {
        let errors = parse(json!({})).validate().unwrap_err();
        let mut fields: Vec<_> = errors.field_errors().into_keys().collect();
        fields.sort();
        assert_eq!(fields, vec!["email", "message", "name", "service"]);
        assert_eq!(errors.field_errors()["name"][0].code, "required");
    }

    #[test]
    fn null_counts_as_missing() {
        let mut body = valid();
        body["service"] = serde_json::Value::Null;
        let errors = parse(body).validate().unwrap_err();
        assert_eq!(errors.field_errors()["service"][0].code, "required");
    }

    #[test]
    fn whitespace_only_text_is_blank() {
        for field in ["name", "service", "message"] {
            let errors = with(field, "   ").validate().unwrap_err();
            assert!(errors.field_errors().contains_key(field), "{field}");
        }
        assert!(with("name", "  Ana ").validate().is_ok());
    }

    #[test]
    fn email_domain_needs_a_dot() {
        for email in ["a@b", "user@localhost"] {
            let errors = with("email", email).validate().unwrap_err();
            assert_eq!(errors.field_errors().len(), 1, "{email}");
            assert!(errors.field_errors().contains_key("email"), "{email}");
        }
        assert!(with("email", "user@mail.example.co.in").validate().is_ok());
    }

    #[test]
    fn address_without_at_sign_reports_once() {
        let errors = with("email", "invalid-email").validate().unwrap_err();
        assert_eq!(errors.field_errors()["email"].len(), 1);
    }

    #[test]
    fn empty_name_and_bad_email_both_reported() {
        let input = parse(json!({
            "name": "",
            "email": "invalid-email",
            "service": "Bridal Makeup",
            "message": "Test message",
        }));
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert_eq!(fields.len(), 2);
    }
}
