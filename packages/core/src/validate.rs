use crate::listing::UpdateListingPayload;
use crate::pricing::{CreatePricingPayload, UpdatePricingPayload};
use crate::user::{CreateUserPayload, UpdateUserPayload};

/// Field-scoped validation error surfaced inline next to the offending
/// form control. Never fatal; nothing is sent while any exist.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Minimal email shape check: one `@` with something on both sides and a
/// dot in the domain. The backend does its own verification.
pub fn is_plausible_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Minimal URL shape check for banner links: an http(s) scheme with a
/// non-empty host part.
pub fn is_plausible_url(value: &str) -> bool {
    let value = value.trim();
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty())
}

/// Validates user data before `POST /user`
pub fn validate_create_user(data: &CreateUserPayload) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if data.first_name.trim().is_empty() {
        errors.push(ValidationError::new("firstName", "First name is required"));
    }
    if data.last_name.trim().is_empty() {
        errors.push(ValidationError::new("lastName", "Last name is required"));
    }
    if !is_plausible_email(&data.email) {
        errors.push(ValidationError::new("email", "Invalid email"));
    }
    if data.phone_number.trim().is_empty() {
        errors.push(ValidationError::new("phoneNumber", "Phone number is required"));
    }
    if data.password.trim().len() < 8 {
        errors.push(ValidationError::new(
            "password",
            "Password must be at least 8 characters",
        ));
    }
    if data.role.trim().is_empty() {
        errors.push(ValidationError::new("role", "Role is required"));
    }

    errors
}

/// Validates user updates before `PUT /user/:id`
pub fn validate_update_user(data: &UpdateUserPayload) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(ref first_name) = data.first_name {
        if first_name.trim().is_empty() {
            errors.push(ValidationError::new("firstName", "First name cannot be empty"));
        }
    }
    if let Some(ref last_name) = data.last_name {
        if last_name.trim().is_empty() {
            errors.push(ValidationError::new("lastName", "Last name cannot be empty"));
        }
    }
    if let Some(ref email) = data.email {
        if !is_plausible_email(email) {
            errors.push(ValidationError::new("email", "Invalid email"));
        }
    }
    if let Some(ref status) = data.status {
        if status.trim().is_empty() {
            errors.push(ValidationError::new("status", "Status cannot be empty"));
        }
    }

    errors
}

/// Validates listing updates before `PUT /featured-listing/:id`
pub fn validate_update_listing(data: &UpdateListingPayload) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(price) = data.price {
        if price < 0.0 {
            errors.push(ValidationError::new("price", "Price cannot be negative"));
        }
    }
    if let Some(ref pet_name) = data.pet_name {
        if pet_name.trim().is_empty() {
            errors.push(ValidationError::new("petName", "Pet name cannot be empty"));
        }
    }
    if let Some(ref pet_type) = data.pet_type {
        if pet_type.trim().is_empty() {
            errors.push(ValidationError::new("type", "Type cannot be empty"));
        }
    }

    errors
}

/// Validates a price range filter: both bounds optional, but when both
/// are present the minimum must not exceed the maximum.
pub fn validate_price_range(min: Option<f64>, max: Option<f64>) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(min) = min {
        if min < 0.0 {
            errors.push(ValidationError::new("minPrice", "Minimum price cannot be negative"));
        }
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            errors.push(ValidationError::new(
                "maxPrice",
                "Maximum price must not be below minimum price",
            ));
        }
    }

    errors
}

/// Validates pricing-plan data before `POST /featured-listing/pricing`
pub fn validate_create_pricing(data: &CreatePricingPayload) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if data.period_time.trim().is_empty() {
        errors.push(ValidationError::new("periodTime", "Period is required"));
    }
    if data.monthly_payment < 0.0 {
        errors.push(ValidationError::new(
            "monthlyPayment",
            "Monthly payment cannot be negative",
        ));
    }
    if !(0.0..=100.0).contains(&data.discount) {
        errors.push(ValidationError::new(
            "discount",
            "Discount must be between 0 and 100",
        ));
    }
    if data.total_payment < 0.0 {
        errors.push(ValidationError::new(
            "totalPayment",
            "Total payment cannot be negative",
        ));
    }

    errors
}

/// Validates pricing-plan updates before `PUT /featured-listing/pricing/:id`
pub fn validate_update_pricing(data: &UpdatePricingPayload) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(ref period_time) = data.period_time {
        if period_time.trim().is_empty() {
            errors.push(ValidationError::new("periodTime", "Period cannot be empty"));
        }
    }
    if let Some(monthly_payment) = data.monthly_payment {
        if monthly_payment < 0.0 {
            errors.push(ValidationError::new(
                "monthlyPayment",
                "Monthly payment cannot be negative",
            ));
        }
    }
    if let Some(discount) = data.discount {
        if !(0.0..=100.0).contains(&discount) {
            errors.push(ValidationError::new(
                "discount",
                "Discount must be between 0 and 100",
            ));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create_user() -> CreateUserPayload {
        CreateUserPayload {
            first_name: "Rosie".to_string(),
            last_name: "Pearson".to_string(),
            email: "rosie@example.com".to_string(),
            phone_number: "+1555000002".to_string(),
            password: "hunter2hunter2".to_string(),
            role: "Breeder".to_string(),
        }
    }

    #[test]
    fn accepts_valid_create_payload() {
        assert!(validate_create_user(&valid_create_user()).is_empty());
    }

    #[test]
    fn rejects_blank_required_fields() {
        let mut data = valid_create_user();
        data.first_name = "  ".to_string();
        data.phone_number = String::new();

        let errors = validate_create_user(&data);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["firstName", "phoneNumber"]);
    }

    #[test]
    fn rejects_malformed_email() {
        assert!(!is_plausible_email("not-an-email"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("user@nodot"));
        assert!(!is_plausible_email("user@.com"));
        assert!(is_plausible_email("user@example.com"));
    }

    #[test]
    fn rejects_malformed_urls() {
        assert!(is_plausible_url("https://example.com/sale"));
        assert!(is_plausible_url("http://example.com"));
        assert!(!is_plausible_url("example.com"));
        assert!(!is_plausible_url("https://"));
        assert!(!is_plausible_url(""));
    }

    #[test]
    fn update_validation_only_checks_set_fields() {
        let errors = validate_update_user(&UpdateUserPayload::default());
        assert!(errors.is_empty());

        let errors = validate_update_user(&UpdateUserPayload {
            email: Some("broken".to_string()),
            ..Default::default()
        });
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
    }

    #[test]
    fn price_range_requires_min_below_max() {
        assert!(validate_price_range(Some(10.0), Some(100.0)).is_empty());
        assert!(validate_price_range(None, Some(100.0)).is_empty());

        let errors = validate_price_range(Some(200.0), Some(100.0));
        assert_eq!(errors[0].field, "maxPrice");
    }

    #[test]
    fn discount_must_be_a_percentage() {
        let data = CreatePricingPayload {
            period_time: "3 months".to_string(),
            monthly_payment: 20.0,
            discount: 120.0,
            total_payment: 48.0,
        };
        let errors = validate_create_pricing(&data);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "discount");
    }
}
