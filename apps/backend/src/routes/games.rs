//! Game action routes.
//!
//! Every response carries a per-viewer redacted snapshot; the
//! authoritative game is never sent over the wire. The viewer is the
//! `playerId` supplied with the request — absent or unknown ids get
//! the spectator projection or a 404 respectively.

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::domain::player_view::{redact_for, RedactedGame};
use crate::domain::transitions::SeatSpec;
use crate::domain::{CardId, Game, MaxRounds, Suit};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Room codes are case-insensitive on the wire.
fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[derive(Debug, Serialize)]
struct GameResponse {
    success: bool,
    game: RedactedGame,
}

fn respond(game: &Game, viewer: Option<&str>) -> Result<HttpResponse, AppError> {
    let seat = match viewer {
        // Unknown viewer ids fail closed rather than leaking a
        // spectator view.
        Some(id) => Some(game.seat_of(id)?),
        None => None,
    };
    Ok(HttpResponse::Ok().json(GameResponse {
        success: true,
        game: redact_for(game, seat),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeatBody {
    id: String,
    name: String,
    #[serde(default)]
    is_bot: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateGameBody {
    room_code: String,
    players: Vec<SeatBody>,
    #[serde(default)]
    max_rounds: Option<MaxRounds>,
    /// Seat whose view the response is redacted for.
    player_id: Option<String>,
}

/// POST /api/games
async fn create_game(
    state: web::Data<AppState>,
    body: web::Json<CreateGameBody>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let seats = body
        .players
        .into_iter()
        .map(|p| SeatSpec {
            id: p.id,
            name: p.name,
            is_bot: p.is_bot,
        })
        .collect();
    let game = state
        .game_flow
        .create_game(
            normalize_code(&body.room_code),
            seats,
            body.max_rounds.unwrap_or_default(),
        )
        .await?;
    respond(&game, body.player_id.as_deref())
}

#[derive(Debug, Deserialize)]
struct StateQuery {
    player_id: Option<String>,
}

/// GET /api/games/{code}/state
async fn get_state(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<StateQuery>,
) -> Result<HttpResponse, AppError> {
    let game = state.game_flow.state(&normalize_code(&path)).await?;
    respond(&game, query.player_id.as_deref())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectCardsBody {
    player_id: String,
    card_ids: Vec<CardId>,
}

/// POST /api/games/{code}/pass/select
async fn select_cards(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<SelectCardsBody>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let game = state
        .game_flow
        .select_cards(&normalize_code(&path), &body.player_id, body.card_ids)
        .await?;
    respond(&game, Some(&body.player_id))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerBody {
    player_id: String,
}

/// POST /api/games/{code}/pass/confirm
async fn confirm_pass(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PlayerBody>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let game = state
        .game_flow
        .confirm_pass(&normalize_code(&path), &body.player_id)
        .await?;
    respond(&game, Some(&body.player_id))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RollDieBody {
    #[serde(default)]
    papayoo_suit: Option<Suit>,
    player_id: Option<String>,
}

/// POST /api/games/{code}/roll-die
async fn roll_die(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<RollDieBody>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let game = state
        .game_flow
        .roll_die(&normalize_code(&path), body.papayoo_suit)
        .await?;
    respond(&game, body.player_id.as_deref())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayCardBody {
    player_id: String,
    card_id: CardId,
}

/// POST /api/games/{code}/play
async fn play_card(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PlayCardBody>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let game = state
        .game_flow
        .play_card(&normalize_code(&path), &body.player_id, body.card_id)
        .await?;
    respond(&game, Some(&body.player_id))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViewerBody {
    player_id: Option<String>,
}

/// POST /api/games/{code}/collect
async fn collect_trick(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ViewerBody>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let game = state.game_flow.collect_trick(&normalize_code(&path)).await?;
    respond(&game, body.player_id.as_deref())
}

/// POST /api/games/{code}/next-round
async fn next_round(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ViewerBody>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let game = state.game_flow.new_round(&normalize_code(&path)).await?;
    respond(&game, body.player_id.as_deref())
}

/// DELETE /api/games/{code}
async fn abandon_game(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.game_flow.abandon_game(&normalize_code(&path)).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_game))
        .route("/{code}/state", web::get().to(get_state))
        .route("/{code}/pass/select", web::post().to(select_cards))
        .route("/{code}/pass/confirm", web::post().to(confirm_pass))
        .route("/{code}/roll-die", web::post().to(roll_die))
        .route("/{code}/play", web::post().to(play_card))
        .route("/{code}/collect", web::post().to(collect_trick))
        .route("/{code}/next-round", web::post().to(next_round))
        .route("/{code}", web::delete().to(abandon_game));
}
