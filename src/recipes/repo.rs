use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::ApiError;
use crate::recipes::quantity;
use crate::recipes::repo_types::{
    CreateIngredientInput, CreateRecipeInput, Ingredient, IngredientRow, Recipe, RecipeListItem,
    RecipeRow,
};

/// Persistence contract for recipes and their ordered ingredients.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<RecipeListItem>, ApiError>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Recipe>, ApiError>;
    async fn get_owner_by_id(&self, id: i64) -> Result<Option<i64>, ApiError>;
    async fn create(&self, owner_id: i64, input: CreateRecipeInput) -> Result<Recipe, ApiError>;
    async fn update(&self, id: i64, input: CreateRecipeInput) -> Result<Option<Recipe>, ApiError>;
    async fn delete(&self, id: i64) -> Result<bool, ApiError>;
}

pub struct PgRecipeRepository {
    db: PgPool,
}

impl PgRecipeRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

async fn insert_ingredients(
    tx: &mut Transaction<'_, Postgres>,
    recipe_id: i64,
    ingredients: &[CreateIngredientInput],
) -> Result<(), sqlx::Error> {
    for item in ingredients {
        let (qty_num, qty_den) = quantity::encode(item.qty);
        sqlx::query(
            r#"
            INSERT INTO ingredients (recipe_id, name, qty_num, qty_den, unit, notes, "position")
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(recipe_id)
        .bind(&item.name)
        .bind(qty_num)
        .bind(qty_den)
        .bind(&item.unit)
        .bind(&item.notes)
        .bind(item.position)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

async fn fetch_ingredients(
    tx: &mut Transaction<'_, Postgres>,
    recipe_id: i64,
) -> Result<Vec<Ingredient>, sqlx::Error> {
    let rows = sqlx::query_as::<_, IngredientRow>(
        r#"
        SELECT id, name, qty_num, qty_den, unit, notes, "position", created_at, updated_at
        FROM ingredients
        WHERE recipe_id = $1
        ORDER BY "position" ASC
        "#,
    )
    .bind(recipe_id)
    .fetch_all(&mut **tx)
    .await?;
    Ok(rows.into_iter().map(Ingredient::from).collect())
}

#[async_trait]
impl RecipeRepository for PgRecipeRepository {
    async fn list(&self) -> Result<Vec<RecipeListItem>, ApiError> {
        let items = sqlx::query_as::<_, RecipeListItem>(
            r#"
            SELECT id, title, created_by_user_id, created_at
            FROM recipes
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(items)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Recipe>, ApiError> {
        let row = sqlx::query_as::<_, RecipeRow>(
            r#"
            SELECT id, title, description, steps_markdown, created_by_user_id,
                   created_at, updated_at
            FROM recipes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let ingredients = sqlx::query_as::<_, IngredientRow>(
            r#"
            SELECT id, name, qty_num, qty_den, unit, notes, "position", created_at, updated_at
            FROM ingredients
            WHERE recipe_id = $1
            ORDER BY "position" ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.db)
        .await?;

        Ok(Some(
            row.into_recipe(ingredients.into_iter().map(Ingredient::from).collect()),
        ))
    }

    async fn get_owner_by_id(&self, id: i64) -> Result<Option<i64>, ApiError> {
        let owner = sqlx::query_scalar::<_, i64>(
            "SELECT created_by_user_id FROM recipes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(owner)
    }

    async fn create(&self, owner_id: i64, input: CreateRecipeInput) -> Result<Recipe, ApiError> {
        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, RecipeRow>(
            r#"
            INSERT INTO recipes (title, description, steps_markdown, created_by_user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, steps_markdown, created_by_user_id,
                      created_at, updated_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.steps_markdown)
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await?;

        insert_ingredients(&mut tx, row.id, &input.ingredients).await?;
        let ingredients = fetch_ingredients(&mut tx, row.id).await?;

        tx.commit().await?;
        Ok(row.into_recipe(ingredients))
    }

    async fn update(&self, id: i64, input: CreateRecipeInput) -> Result<Option<Recipe>, ApiError> {
        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, RecipeRow>(
            r#"
            UPDATE recipes
            SET title = $2, description = $3, steps_markdown = $4, updated_at = now()
            WHERE id = $1
            RETURNING id, title, description, steps_markdown, created_by_user_id,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.steps_markdown)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        // Full replace: the new ingredient set supersedes whatever was there.
        sqlx::query("DELETE FROM ingredients WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_ingredients(&mut tx, id, &input.ingredients).await?;
        let ingredients = fetch_ingredients(&mut tx, id).await?;

        tx.commit().await?;
        Ok(Some(row.into_recipe(ingredients)))
    }

    async fn delete(&self, id: i64) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
