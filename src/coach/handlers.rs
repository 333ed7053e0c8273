use axum::{extract::State, routing::post, Json, Router};
use serde_json::Value;
use tracing::{info, instrument};

use crate::{error::ApiError, state::AppState};

use super::{dto::ChatRequest, extract::ExtractedReply};

pub fn coach_routes() -> Router<AppState> {
    Router::new()
        .route("/coach", post(ask_coach))
        .route("/chat/food", post(food_chat))
}

/// POST /coach: daily advice for an arbitrary JSON context.
#[instrument(skip(state, context))]
pub async fn ask_coach(State(state): State<AppState>, Json(context): Json<Value>) -> Json<Value> {
    Json(state.advisor.daily_advice(&context).await)
}

/// POST /chat/food: one turn of the meal-logging conversation.
#[instrument(skip(state, body))]
pub async fn food_chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ExtractedReply>, ApiError> {
    let history = body.into_history();
    let reply = state.advisor.food_chat(&history).await?;
    info!(
        turns = history.len(),
        logged = reply.logging_data.is_some(),
        "food chat reply"
    );
    Ok(Json(reply))
}
