use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::dto::{ChangePasswordRequest, LoginRequest, RegisterRequest};
use crate::error::ApiError;

/// Validated registration command.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Validated login command.
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Validated password-change command.
#[derive(Debug, Clone)]
pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

fn require(value: &str, field: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn parse_register_input(body: RegisterRequest) -> Result<RegisterInput, ApiError> {
    let first_name = require(&body.first_name, "first_name")?;
    let last_name = require(&body.last_name, "last_name")?;
    let email = require(&body.email, "email")?.to_lowercase();
    let username = require(&body.username, "username")?.to_lowercase();
    let password = require(&body.password, "password")?;

    if !is_valid_email(&email) {
        return Err(ApiError::Validation(
            "email must be a valid email address".into(),
        ));
    }

    if password.len() < 8 {
        return Err(ApiError::Validation(
            "password must be at least 8 characters".into(),
        ));
    }

    Ok(RegisterInput {
        first_name,
        last_name,
        email,
        username,
        password,
    })
}

pub fn parse_login_input(body: LoginRequest) -> Result<LoginInput, ApiError> {
    Ok(LoginInput {
        username: require(&body.username, "username")?.to_lowercase(),
        password: require(&body.password, "password")?,
    })
}

pub fn parse_change_password_input(
    body: ChangePasswordRequest,
) -> Result<ChangePasswordInput, ApiError> {
    let current_password = require(&body.current_password, "current_password")?;
    let new_password = require(&body.new_password, "new_password")?;

    if new_password.len() < 8 {
        return Err(ApiError::Validation(
            "new_password must be at least 8 characters".into(),
        ));
    }

    Ok(ChangePasswordInput {
        current_password,
        new_password,
    })
}
