use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, warn};

use crate::{
    auth::{
        dto::{AuthResponse, DashboardResponse, LoginRequest, RegisterRequest},
        jwt::JwtKeys,
        password::{hash_password, verify_against_dummy, verify_password},
        repo::{StoreError, UserStore},
        repo_types::NewUser,
    },
    error::AppError,
};

const EMAIL_TAKEN: &str = "Email is already registered";
const REGISTRATION_FAILED: &str = "Registration failed";
const BAD_CREDENTIALS: &str = "Invalid email or password";
const ACCESS_DENIED: &str = "Access denied";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn register(
    store: &dyn UserStore,
    keys: &JwtKeys,
    req: RegisterRequest,
) -> Result<AuthResponse, AppError> {
    let name = req.name.trim().to_string();
    let email = normalize_email(&req.email);

    if name.is_empty() {
        warn!("registration without name");
        return Err(AppError::Validation("Name is required".into()));
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }
    if req.password.is_empty() {
        warn!(email = %email, "registration without password");
        return Err(AppError::Validation("Password is required".into()));
    }

    let taken = store.exists(&email).await.map_err(|e| {
        error!(error = %e, "exists check failed");
        AppError::Internal(REGISTRATION_FAILED.into())
    })?;
    if taken {
        warn!(email = %email, "email already registered");
        return Err(AppError::Conflict(EMAIL_TAKEN.into()));
    }

    let password_hash = hash_password(req.password).await.map_err(|e| {
        error!(error = %e, "hash_password failed");
        AppError::Internal(REGISTRATION_FAILED.into())
    })?;

    let user = store
        .save(NewUser {
            name,
            email,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            StoreError::Conflict => {
                warn!("email registered concurrently");
                AppError::Conflict(EMAIL_TAKEN.into())
            }
            StoreError::Database(e) => {
                error!(error = %e, "create user failed");
                AppError::Internal(REGISTRATION_FAILED.into())
            }
        })?;

    let token = keys.issue(&user.email).map_err(|e| {
        error!(error = %e, "jwt sign failed");
        AppError::Internal(REGISTRATION_FAILED.into())
    })?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(AuthResponse::bearer(
        token,
        "User registered successfully",
        user.name,
        user.email,
    ))
}

pub async fn login(
    store: &dyn UserStore,
    keys: &JwtKeys,
    req: LoginRequest,
) -> Result<AuthResponse, AppError> {
    let email = normalize_email(&req.email);
    if email.is_empty() || req.password.is_empty() {
        warn!("login with missing fields");
        return Err(AppError::Validation("Email and password are required".into()));
    }

    let user = match store.find_by_email(&email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            verify_against_dummy(req.password).await;
            warn!(email = %email, "login unknown email");
            return Err(AppError::Unauthorized(BAD_CREDENTIALS.into()));
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(AppError::Internal("Login failed".into()));
        }
    };

    let ok = verify_password(req.password, user.password_hash.clone())
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user.id, "verify_password failed");
            AppError::Internal("Login failed".into())
        })?;
    if !ok {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.into()));
    }

    let token = keys.issue(&user.email).map_err(|e| {
        error!(error = %e, "jwt sign failed");
        AppError::Internal("Login failed".into())
    })?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(AuthResponse::bearer(token, "Login successful", user.name, user.email))
}

/// Resolves the token subject to a user; `email` comes from a validated token.
pub async fn dashboard(store: &dyn UserStore, email: &str) -> Result<DashboardResponse, AppError> {
    let user = store
        .find_by_email(email)
        .await
        .map_err(|e| {
            error!(error = %e, "find_by_email failed");
            AppError::Internal("Internal server error".into())
        })?
        .ok_or_else(|| {
            warn!(email = %email, "token subject has no account");
            AppError::Forbidden(ACCESS_DENIED.into())
        })?;

    Ok(DashboardResponse {
        message: format!("Welcome to your dashboard, {}", user.name),
        name: user.name,
        email: user.email,
    })
}
