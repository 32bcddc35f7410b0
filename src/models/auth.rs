use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request de registro
#[derive(Clone, PartialEq, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(length(min = 6, max = 100))]
    pub password: String,

    #[validate(length(min = 3, max = 20))]
    pub vehicle_id_number: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year_of_circulation: i32,

    #[validate(range(min = 1, max = 58))]
    pub wilaya_number: i32,

    #[validate(length(min = 3, max = 100))]
    pub owner_name: String,

    #[validate(length(min = 3, max = 200))]
    pub owner_address: String,

    #[validate(length(min = 3, max = 50))]
    pub chip_serial: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("wilaya_number", &self.wilaya_number)
            .finish_non_exhaustive()
    }
}

/// Request de login
#[derive(Clone, PartialEq, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Claims del JWT
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// Par de tokens emitido en registro y login
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn valid_registration() -> RegisterRequest {
        RegisterRequest {
            username: "karim16".to_string(),
            password: "s3cret-pass".to_string(),
            vehicle_id_number: "VF3CCHMZ6".to_string(),
            year_of_circulation: 2021,
            wilaya_number: 16,
            owner_name: "Karim Benali".to_string(),
            owner_address: "12 rue Didouche Mourad, Alger".to_string(),
            chip_serial: "CHIP-0042".to_string(),
        }
    }

    #[test]
    fn test_valid_registration_passes() {
        assert!(valid_registration().validate().is_ok());
    }

    #[test]
    fn test_registration_bounds() {
        let request = RegisterRequest {
            username: "ab".to_string(),
            password: "12345".to_string(),
            wilaya_number: 59,
            ..valid_registration()
        };
        let errors = request.validate().unwrap_err();
        let mut fields: Vec<_> = errors.field_errors().keys().copied().collect();
        fields.sort_unstable();
        assert_eq!(fields, vec!["password", "username", "wilaya_number"]);
    }

    #[test]
    fn test_login_requires_both_fields() {
        let request = LoginRequest {
            username: String::new(),
            password: String::new(),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);
    }

    #[test]
    fn test_debug_hides_password() {
        let rendered = format!("{:?}", valid_registration());
        assert!(!rendered.contains("s3cret-pass"));
    }
}
