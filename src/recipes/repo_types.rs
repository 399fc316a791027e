use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::recipes::quantity;

/// Recipe summary for the public index listing.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecipeListItem {
    pub id: i64,
    pub title: String,
    pub created_by_user_id: i64,
    pub created_at: OffsetDateTime,
}

/// Full recipe with its ingredients ordered by position.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub steps_markdown: String,
    pub created_by_user_id: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub ingredients: Vec<Ingredient>,
}

/// Ingredient as exposed to clients: the stored fraction decoded back to a
/// 3-decimal quantity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub qty: f64,
    pub unit: String,
    pub notes: Option<String>,
    pub position: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Recipe row without its ingredients.
#[derive(Debug, FromRow)]
pub struct RecipeRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub steps_markdown: String,
    pub created_by_user_id: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl RecipeRow {
    pub fn into_recipe(self, ingredients: Vec<Ingredient>) -> Recipe {
        Recipe {
            id: self.id,
            title: self.title,
            description: self.description,
            steps_markdown: self.steps_markdown,
            created_by_user_id: self.created_by_user_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            ingredients,
        }
    }
}

/// Ingredient row as stored: quantity kept as an exact fraction.
#[derive(Debug, FromRow)]
pub struct IngredientRow {
    pub id: i64,
    pub name: String,
    pub qty_num: i64,
    pub qty_den: i64,
    pub unit: String,
    pub notes: Option<String>,
    pub position: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<IngredientRow> for Ingredient {
    fn from(row: IngredientRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            qty: quantity::decode(row.qty_num, row.qty_den),
            unit: row.unit,
            notes: row.notes,
            position: row.position,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Validated recipe payload, ready for persistence.
#[derive(Debug, Clone)]
pub struct CreateRecipeInput {
    pub title: String,
    pub description: Option<String>,
    pub steps_markdown: String,
    pub ingredients: Vec<CreateIngredientInput>,
}

#[derive(Debug, Clone)]
pub struct CreateIngredientInput {
    pub name: String,
    pub qty: f64,
    pub unit: String,
    pub notes: Option<String>,
    pub position: i64,
}
