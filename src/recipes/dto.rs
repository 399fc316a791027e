use serde::{Deserialize, Serialize};

use crate::recipes::repo_types::{Recipe, RecipeListItem};

/// Incoming recipe payload for create and update. String fields default to
/// empty so that a missing field gets a field-named validation error; qty and
/// position stay optional to tell "missing" apart from "out of range".
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePayload {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub steps_markdown: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientPayload {
    #[serde(default)]
    pub name: String,
    pub qty: Option<f64>,
    #[serde(default)]
    pub unit: String,
    pub notes: Option<String>,
    pub position: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RecipesResponse {
    pub recipes: Vec<RecipeListItem>,
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub recipe: Recipe,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}
