use serde::{Deserialize, Serialize};

/// Request body for user registration.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after register or login.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub message: String,
    pub name: String,
    pub email: String,
}

impl AuthResponse {
    pub fn bearer(token: String, message: impl Into<String>, name: String, email: String) -> Self {
        Self {
            token,
            token_type: "Bearer".into(),
            message: message.into(),
            name,
            email,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardResponse {
    pub message: String,
    pub name: String,
    pub email: String,
}
