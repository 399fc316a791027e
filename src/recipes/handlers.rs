use axum::{
    extract::{FromRef, Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;

use crate::auth::jwt::AuthUser;
use crate::error::ApiError;
use crate::recipes::dto::{OkResponse, RecipePayload, RecipeResponse, RecipesResponse};
use crate::recipes::services::{DeleteOutcome, RecipeService, UpdateOutcome};
use crate::recipes::validation::{parse_create_recipe_input, parse_recipe_id};
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes))
        .route("/recipes/:id", get(get_recipe))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", post(create_recipe))
        .route("/recipes/:id", put(update_recipe).delete(delete_recipe))
}

#[instrument(skip(state))]
async fn list_recipes(State(state): State<AppState>) -> Result<Json<RecipesResponse>, ApiError> {
    let recipes = RecipeService::from_ref(&state).list().await?;
    Ok(Json(RecipesResponse { recipes }))
}

#[instrument(skip(state))]
async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let id = parse_recipe_id(&id).ok_or_else(|| ApiError::Validation("Invalid recipe id".into()))?;
    let recipe = RecipeService::from_ref(&state)
        .get(id)
        .await?
        .ok_or(ApiError::NotFound("Recipe not found"))?;
    Ok(Json(RecipeResponse { recipe }))
}

#[instrument(skip(state, user, payload))]
async fn create_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<RecipePayload>,
) -> Result<(StatusCode, HeaderMap, Json<RecipeResponse>), ApiError> {
    let input = parse_create_recipe_input(payload)?;
    let recipe = RecipeService::from_ref(&state)
        .create(user.user_id, input)
        .await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = format!("/api/v1/recipes/{}", recipe.id).parse() {
        headers.insert(header::LOCATION, location);
    }

    Ok((StatusCode::CREATED, headers, Json(RecipeResponse { recipe })))
}

#[instrument(skip(state, user, payload))]
async fn update_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<RecipePayload>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let id = parse_recipe_id(&id).ok_or_else(|| ApiError::Validation("Invalid recipe id".into()))?;
    let input = parse_create_recipe_input(payload)?;

    match RecipeService::from_ref(&state)
        .update(user.user_id, id, input)
        .await?
    {
        UpdateOutcome::Updated(recipe) => Ok(Json(RecipeResponse { recipe })),
        UpdateOutcome::NotFound => Err(ApiError::NotFound("Recipe not found")),
        UpdateOutcome::Forbidden => {
            Err(ApiError::Forbidden("only the owner can modify this recipe"))
        }
    }
}

#[instrument(skip(state, user))]
async fn delete_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiError> {
    let id = parse_recipe_id(&id).ok_or_else(|| ApiError::Validation("Invalid recipe id".into()))?;

    match RecipeService::from_ref(&state).delete(user.user_id, id).await? {
        DeleteOutcome::Deleted => Ok(Json(OkResponse { ok: true })),
        DeleteOutcome::NotFound => Err(ApiError::NotFound("Recipe not found")),
        DeleteOutcome::Forbidden => {
            Err(ApiError::Forbidden("only the owner can modify this recipe"))
        }
    }
}
