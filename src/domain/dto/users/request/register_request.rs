use serde::Deserialize;
use validator::{Validate, ValidationError};

/// 로컬 계정 등록 요청
///
/// 역할은 받지 않습니다. 등록된 계정은 항상 `User` 역할입니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    #[validate(custom(function = "validate_display_name"))]
    pub name: String,

    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}

fn validate_display_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() || name.chars().any(char::is_control) {
        return Err(ValidationError::new("invalid_name")
            .with_message("Name must not be blank or contain control characters".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_register_request_validation() {
        assert!(request("Jane", "jane@example.com", "password123").validate().is_ok());
        assert!(request("Jane", "not-an-email", "password123").validate().is_err());
        assert!(request("Jane", "jane@example.com", "short").validate().is_err());
        assert!(request("   ", "jane@example.com", "password123").validate().is_err());
        assert!(request("Ja\nne", "jane@example.com", "password123").validate().is_err());
    }
}
