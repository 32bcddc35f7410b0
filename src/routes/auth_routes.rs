use axum::{extract::State, routing::post, Json, Router};

use crate::dto::auth_dto::{
    LoginMessage, RefreshTokenMessage, RefreshTokenResponse, RegisterMessage, TokenPairMessage,
    ValidateTokenMessage, ValidateTokenResponse,
};
use crate::state::AppState;
use crate::utils::{AppResult, WireJson};

/// Rutas de `auth.AuthService`
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/Register", post(register))
        .route("/Login", post(login))
        .route("/ValidateToken", post(validate_token))
        .route("/RefreshToken", post(refresh_token))
}

async fn register(
    State(state): State<AppState>,
    WireJson(message): WireJson<RegisterMessage>,
) -> AppResult<Json<TokenPairMessage>> {
    let pair = state.auth.register(message.into()).await?;
    Ok(Json(pair.into()))
}

async fn login(
    State(state): State<AppState>,
    WireJson(message): WireJson<LoginMessage>,
) -> AppResult<Json<TokenPairMessage>> {
    let pair = state.auth.login(message.into()).await?;
    Ok(Json(pair.into()))
}

/// Un token inválido no es un error: responde `valid: false`
async fn validate_token(
    State(state): State<AppState>,
    WireJson(message): WireJson<ValidateTokenMessage>,
) -> Json<ValidateTokenResponse> {
    Json(ValidateTokenResponse {
        valid: state.auth.validate_token(&message.token),
    })
}

async fn refresh_token(
    State(state): State<AppState>,
    WireJson(message): WireJson<RefreshTokenMessage>,
) -> AppResult<Json<RefreshTokenResponse>> {
    let access_token = state.auth.refresh_access_token(&message.refresh_token)?;
    Ok(Json(RefreshTokenResponse { access_token }))
}
