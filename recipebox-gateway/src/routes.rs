//! Axum route table and handlers for the recipe resource.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use recipebox_core::{
    CreateRecipeInput, NewRecipe, PopulatedRecipe, PublicUser, Recipe, RecipeFilter, RecipeId, RecipeList,
    RecipePatch, RecipeQuery, SortDirection, SortField, SortSpec,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::{
    auth::{require_actor, Actor},
    error::ApiError,
    extract::Validated,
    state::AppState,
};

// ── Request types ─────────────────────────────────────────────────────────────

/// Path segments of the paginated listing route.
///
/// The first segment is named `id` because it shares a position with the
/// single-recipe routes and the router requires one name per position.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(rename = "id")]
    pub offset: String,
    pub limit: String,
    pub order: String,
    pub sort: String,
    #[serde(default)]
    pub keyword: Option<String>,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router, mounting the recipe routes under `prefix`.
///
/// `prefix` is expected in normalized form (see [`crate::config::normalize_prefix`]):
/// leading slash, no trailing slash, or empty for the root.
pub fn create_router(state: AppState, prefix: &str) -> Router {
    let collection = if prefix.is_empty() { "/" } else { prefix };
    let item = format!("{prefix}/{{id}}");
    let page = format!("{prefix}/{{id}}/{{limit}}/{{order}}/{{sort}}");

    let recipes = Router::new()
        .route(collection, get(list_recipes).post(create_recipe))
        .route(&item, get(get_recipe).patch(update_recipe).delete(delete_recipe))
        .route(&page, get(list_recipes_paginated))
        .route(&format!("{page}/"), get(list_recipes_paginated))
        .route(&format!("{page}/{{keyword}}"), get(list_recipes_paginated))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_actor));

    Router::new()
        .route("/health", get(health))
        .merge(recipes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /health`: liveness probe, no actor required.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

/// `GET /`: every recipe in natural order, with the total count.
///
/// # Errors
/// Returns [`ApiError::StoreFailure`] if the store fails.
pub async fn list_recipes(State(state): State<AppState>) -> Result<Json<RecipeList>, ApiError> {
    let count = state.store.count(&RecipeFilter::All).await?;
    let items = state.store.find(&RecipeQuery::new(RecipeFilter::All)).await?;
    debug!(count, "listed all recipes");
    Ok(Json(RecipeList { count, items }))
}

/// `GET /{offset}/{limit}/{order}/{sort}/{keyword?}`: filtered, sorted page.
///
/// `count` is the size of the filtered set, not of the returned page.
///
/// # Errors
/// Returns [`ApiError::InvalidParameter`] if `offset` or `limit` is not an
/// integer, or [`ApiError::StoreFailure`] if the store rejects the query.
pub async fn list_recipes_paginated(
    State(state): State<AppState>,
    Path(params): Path<PageParams>,
) -> Result<Json<RecipeList>, ApiError> {
    let offset = parse_int("offset", &params.offset)?;
    let limit = parse_int("limit", &params.limit)?;
    let direction = SortDirection::from_indicator(&params.sort);
    let sort = SortSpec::new(SortField::from_name(&params.order), direction);
    let filter = RecipeFilter::from_keyword(params.keyword.as_deref());

    let count = state.store.count(&filter).await?;
    let query = RecipeQuery::new(filter).sorted(sort).paged(offset, limit);
    let items = state.store.find(&query).await?;

    debug!(
        offset,
        limit,
        order = %params.order,
        direction = %direction,
        count,
        returned = items.len(),
        "listed recipe page"
    );
    Ok(Json(RecipeList { count, items }))
}

/// `GET /{id}`: one recipe with its author populated.
///
/// # Errors
/// Returns [`ApiError::InvalidIdentifier`] for a malformed id,
/// [`ApiError::NotFound`] if no recipe has it, or [`ApiError::StoreFailure`].
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<PopulatedRecipe>, ApiError> {
    let id = parse_id(&raw_id)?;
    let recipe = state
        .store
        .find_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound(raw_id))?;
    Ok(Json(populate(&state, recipe).await?))
}

/// `POST /`: create a recipe authored by the calling actor.
///
/// Any `author` in the body is ignored by the validation gate.
///
/// # Errors
/// Returns [`ApiError::ValidationFailed`] (before this handler runs) for a bad
/// payload, or [`ApiError::StoreFailure`].
pub async fn create_recipe(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Validated(input): Validated<CreateRecipeInput>,
) -> Result<Json<PopulatedRecipe>, ApiError> {
    let created = state.store.insert(NewRecipe::new(actor.user_id, input)).await?;
    info!(id = %created.id, author = %actor.user_id, "recipe created");
    Ok(Json(populate(&state, created).await?))
}

/// `PATCH /{id}`: apply the supplied fields and return the updated recipe.
///
/// # Errors
/// Returns [`ApiError::ValidationFailed`] for a bad payload,
/// [`ApiError::InvalidIdentifier`] for a malformed id,
/// [`ApiError::NotFound`] if no recipe has it, or [`ApiError::StoreFailure`].
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Validated(patch): Validated<RecipePatch>,
) -> Result<Json<Recipe>, ApiError> {
    let id = parse_id(&raw_id)?;
    let updated = state
        .store
        .update_by_id(&id, &patch)
        .await?
        .ok_or(ApiError::NotFound(raw_id))?;
    info!(id = %id, "recipe updated");
    Ok(Json(updated))
}

/// `DELETE /{id}`: remove a recipe. Responds 200 with an empty body.
///
/// # Errors
/// Returns [`ApiError::InvalidIdentifier`] for a malformed id,
/// [`ApiError::NotFound`] if no recipe has it, or [`ApiError::StoreFailure`].
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    state
        .store
        .delete_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound(raw_id))?;
    info!(id = %id, "recipe deleted");
    Ok(StatusCode::OK)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Checked before any store access.
fn parse_id(raw: &str) -> Result<RecipeId, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidIdentifier(raw.to_owned()))
}

fn parse_int(name: &'static str, raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse().map_err(|_| ApiError::InvalidParameter {
        name,
        value: raw.to_owned(),
    })
}

/// Resolve `author`, stripping the user's credential.
async fn populate(state: &AppState, recipe: Recipe) -> Result<PopulatedRecipe, ApiError> {
    let author = state.store.find_user(&recipe.author).await?;
    Ok(recipe.populate(author.map(PublicUser::from)))
}
