use axum::{
    extract::{Path, State},
    response::Json,
    Extension,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::Claims;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::store::{Drink, RecipePart};

/// GET /bar/drinks - public menu, recipes without ingredient names
pub async fn list_drinks(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let drinks: Vec<Value> = state.drinks.scan().await.iter().map(Drink::short).collect();
    Ok(Json(json!({ "success": true, "drinks": drinks })))
}

/// GET /bar/drinks-detail - full recipes, requires get:drinks-detail
pub async fn drink_detail(
    State(state): State<AppState>,
    Extension(_claims): Extension<Claims>,
) -> ApiResult<Json<Value>> {
    let drinks: Vec<Value> = state.drinks.scan().await.iter().map(Drink::long).collect();
    Ok(Json(json!({ "success": true, "drinks": drinks })))
}

#[derive(Debug, Deserialize)]
struct NewDrink {
    title: String,
    recipe: Value,
}

/// POST /bar/drinks - requires post:drinks
pub async fn add_drink(
    State(state): State<AppState>,
    Extension(_claims): Extension<Claims>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let input: NewDrink = serde_json::from_value(body).map_err(|_| ApiError::Unprocessable)?;
    if input.title.is_empty() {
        return Err(ApiError::Unprocessable);
    }
    let recipe = parse_recipe(input.recipe)?;

    let created = state.drinks.insert(Drink { id: 0, title: input.title, recipe }).await?;
    tracing::info!("created drink {}", created.id);

    Ok(Json(json!({ "success": true, "drinks": [created.long()] })))
}

#[derive(Debug, Deserialize)]
struct DrinkPatch {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    recipe: Option<Value>,
}

/// PATCH /bar/drinks/:id - requires patch:drinks.
///
/// Title and recipe update independently; either may be omitted.
pub async fn edit_drink(
    State(state): State<AppState>,
    Extension(_claims): Extension<Claims>,
    Path(drink_id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let mut drink = state.drinks.require(drink_id).await?;

    let patch: DrinkPatch = serde_json::from_value(body).map_err(|_| ApiError::Unprocessable)?;
    if let Some(title) = patch.title {
        if title.is_empty() {
            return Err(ApiError::Unprocessable);
        }
        drink.title = title;
    }
    if let Some(recipe) = patch.recipe {
        drink.recipe = parse_recipe(recipe)?;
    }

    let updated = state.drinks.update(drink_id, drink).await?;
    Ok(Json(json!({ "success": true, "drinks": [updated.long()] })))
}

/// DELETE /bar/drinks/:id - requires delete:drinks
pub async fn delete_drink(
    State(state): State<AppState>,
    Extension(_claims): Extension<Claims>,
    Path(drink_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    state.drinks.remove(drink_id).await?;
    tracing::info!("deleted drink {}", drink_id);

    Ok(Json(json!({ "success": true, "delete": drink_id })))
}

/// The frontend sends a recipe as either one part object or an array of them
fn parse_recipe(raw: Value) -> Result<Vec<RecipePart>, ApiError> {
    let parts: Vec<RecipePart> = if raw.is_array() {
        serde_json::from_value(raw).map_err(|_| ApiError::Unprocessable)?
    } else {
        vec![serde_json::from_value(raw).map_err(|_| ApiError::Unprocessable)?]
    };
    if parts.is_empty() {
        return Err(ApiError::Unprocessable);
    }
    Ok(parts)
}
