//! Card handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use mesto_auth_core::{CardUpdate, NewCard};
use mesto_types::{Card, CardId};

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;
use crate::validation::{parse_id, validate_text, validate_url, Validate, ValidatedJson};

// ============================================================================
// Request Types
// ============================================================================

/// Body for both creating and editing a card
#[derive(Debug, Deserialize)]
pub struct CardRequest {
    pub name: String,
    pub link: String,
}

impl Validate for CardRequest {
    fn validate(&self) -> ApiResult<()> {
        validate_text("name", &self.name)?;
        validate_url("link", &self.link)
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /cards
pub async fn list_cards(State(state): State<AppState>) -> ApiResult<Json<Vec<Card>>> {
    Ok(Json(state.cards.list_cards().await?))
}

/// POST /cards
pub async fn create_card(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(req): ValidatedJson<CardRequest>,
) -> ApiResult<(StatusCode, Json<Card>)> {
    let card = state
        .cards
        .create_card(
            &auth_user,
            NewCard {
                name: req.name.trim().to_string(),
                link: req.link,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(card)))
}

/// GET /cards/{id}
pub async fn get_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Card>> {
    let card_id: CardId = parse_id(&id)?;
    Ok(Json(state.cards.get_card(&card_id).await?))
}

/// PATCH /cards/{id}
///
/// Owner only
pub async fn update_card(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<CardRequest>,
) -> ApiResult<Json<Card>> {
    let card_id: CardId = parse_id(&id)?;
    let card = state
        .cards
        .update_card(
            &auth_user,
            &card_id,
            CardUpdate {
                name: req.name.trim().to_string(),
                link: req.link,
            },
        )
        .await?;

    Ok(Json(card))
}

/// DELETE /cards/{id}
///
/// Owner only; returns the deleted card
pub async fn delete_card(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Card>> {
    let card_id: CardId = parse_id(&id)?;
    Ok(Json(state.cards.delete_card(&auth_user, &card_id).await?))
}

/// PUT /cards/{id}/likes
pub async fn like_card(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Card>> {
    let card_id: CardId = parse_id(&id)?;
    Ok(Json(state.likes.toggle_like(&card_id, &auth_user.user_id, true).await?))
}

/// DELETE /cards/{id}/likes
pub async fn unlike_card(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Card>> {
    let card_id: CardId = parse_id(&id)?;
    Ok(Json(state.likes.toggle_like(&card_id, &auth_user.user_id, false).await?))
}
