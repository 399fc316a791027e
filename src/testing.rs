//! In-memory repository doubles for use-case tests.

use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::auth::repo::UserRepository;
use crate::auth::repo_types::{CreateUserInput, User};
use crate::error::ApiError;
use crate::recipes::quantity;
use crate::recipes::repo::RecipeRepository;
use crate::recipes::repo_types::{
    CreateRecipeInput, Ingredient, Recipe, RecipeListItem,
};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: CreateUserInput) -> Result<User, ApiError> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.email == input.email || u.username == input.username)
        {
            return Err(ApiError::Conflict("email or username already in use".into()));
        }
        let user = User {
            id: users.len() as i64 + 1,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            username: input.username,
            password_hash: input.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>, ApiError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.password_hash = password_hash.to_string();
        }
        Ok(())
    }
}

#[derive(Default)]
struct RecipeStore {
    recipes: Vec<Recipe>,
    next_recipe_id: i64,
    next_ingredient_id: i64,
}

#[derive(Default)]
pub struct InMemoryRecipeRepository {
    inner: Mutex<RecipeStore>,
}

impl RecipeStore {
    /// Mirrors the storage roundtrip: quantities pass through the fraction
    /// codec, ingredients come back ordered by position.
    fn build_ingredients(
        &mut self,
        input: &CreateRecipeInput,
        now: OffsetDateTime,
    ) -> Vec<Ingredient> {
        let mut ingredients: Vec<Ingredient> = input
            .ingredients
            .iter()
            .map(|item| {
                self.next_ingredient_id += 1;
                let (qty_num, qty_den) = quantity::encode(item.qty);
                Ingredient {
                    id: self.next_ingredient_id,
                    name: item.name.clone(),
                    qty: quantity::decode(qty_num, qty_den),
                    unit: item.unit.clone(),
                    notes: item.notes.clone(),
                    position: item.position,
                    created_at: now,
                    updated_at: now,
                }
            })
            .collect();
        ingredients.sort_by_key(|i| i.position);
        ingredients
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn list(&self) -> Result<Vec<RecipeListItem>, ApiError> {
        let store = self.inner.lock().unwrap();
        let mut items: Vec<RecipeListItem> = store
            .recipes
            .iter()
            .map(|r| RecipeListItem {
                id: r.id,
                title: r.title.clone(),
                created_by_user_id: r.created_by_user_id,
                created_at: r.created_at,
            })
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Recipe>, ApiError> {
        let store = self.inner.lock().unwrap();
        Ok(store.recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn get_owner_by_id(&self, id: i64) -> Result<Option<i64>, ApiError> {
        let store = self.inner.lock().unwrap();
        Ok(store
            .recipes
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.created_by_user_id))
    }

    async fn create(&self, owner_id: i64, input: CreateRecipeInput) -> Result<Recipe, ApiError> {
        let mut store = self.inner.lock().unwrap();
        let now = OffsetDateTime::now_utc();
        store.next_recipe_id += 1;
        let id = store.next_recipe_id;
        let ingredients = store.build_ingredients(&input, now);
        let recipe = Recipe {
            id,
            title: input.title,
            description: input.description,
            steps_markdown: input.steps_markdown,
            created_by_user_id: owner_id,
            created_at: now,
            updated_at: now,
            ingredients,
        };
        store.recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn update(&self, id: i64, input: CreateRecipeInput) -> Result<Option<Recipe>, ApiError> {
        let mut store = self.inner.lock().unwrap();
        let now = OffsetDateTime::now_utc();
        let ingredients = store.build_ingredients(&input, now);
        let Some(recipe) = store.recipes.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        recipe.title = input.title;
        recipe.description = input.description;
        recipe.steps_markdown = input.steps_markdown;
        recipe.updated_at = now;
        recipe.ingredients = ingredients;
        Ok(Some(recipe.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, ApiError> {
        let mut store = self.inner.lock().unwrap();
        let before = store.recipes.len();
        store.recipes.retain(|r| r.id != id);
        Ok(store.recipes.len() < before)
    }
}
