//! Registration and login endpoints

use axum::{extract::State, response::Json};

use crate::AppState;
use crate::data::{Account, Credentials};
use crate::error::AppError;
use crate::service::{AccountService, validate_registration};

fn build_account_service(state: &AppState) -> AccountService {
    AccountService::new(state.db.clone())
}

/// POST /register
///
/// 400 on a blank username or a password shorter than 4 characters,
/// 409 when the username is taken.
pub async fn register(
    State(state): State<AppState>,
    Json(candidate): Json<Credentials>,
) -> Result<Json<Account>, AppError> {
    validate_registration(&candidate.username, &candidate.password)?;

    let account = build_account_service(&state).register(&candidate).await?;
    Ok(Json(account))
}

/// POST /login
///
/// 401 unless both username and password match a registered account.
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Account>, AppError> {
    let account = build_account_service(&state).login(&credentials).await?;
    Ok(Json(account))
}
