use std::sync::Arc;

use axum::extract::FromRef;
use tracing::info;

use crate::error::ApiError;
use crate::recipes::repo::RecipeRepository;
use crate::recipes::repo_types::{CreateRecipeInput, Recipe, RecipeListItem};
use crate::state::AppState;

/// Outcome of an owner-gated update. Absent, not-yours and done are three
/// distinct cases; the transport maps each to its own status code.
#[derive(Debug)]
pub enum UpdateOutcome {
    Updated(Recipe),
    NotFound,
    Forbidden,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    Forbidden,
}

/// Application-level recipe operations. Reads are public; every mutation
/// resolves ownership here rather than in the repository or the handlers.
#[derive(Clone)]
pub struct RecipeService {
    recipes: Arc<dyn RecipeRepository>,
}

impl FromRef<AppState> for RecipeService {
    fn from_ref(state: &AppState) -> Self {
        Self {
            recipes: state.recipes.clone(),
        }
    }
}

impl RecipeService {
    pub fn new(recipes: Arc<dyn RecipeRepository>) -> Self {
        Self { recipes }
    }

    pub async fn list(&self) -> Result<Vec<RecipeListItem>, ApiError> {
        self.recipes.list().await
    }

    pub async fn get(&self, id: i64) -> Result<Option<Recipe>, ApiError> {
        self.recipes.get_by_id(id).await
    }

    pub async fn create(
        &self,
        user_id: i64,
        input: CreateRecipeInput,
    ) -> Result<Recipe, ApiError> {
        let recipe = self.recipes.create(user_id, input).await?;
        info!(user_id, recipe_id = recipe.id, "recipe created");
        Ok(recipe)
    }

    pub async fn update(
        &self,
        user_id: i64,
        id: i64,
        input: CreateRecipeInput,
    ) -> Result<UpdateOutcome, ApiError> {
        match self.recipes.get_owner_by_id(id).await? {
            None => return Ok(UpdateOutcome::NotFound),
            Some(owner_id) if owner_id != user_id => return Ok(UpdateOutcome::Forbidden),
            Some(_) => {}
        }

        match self.recipes.update(id, input).await? {
            Some(recipe) => {
                info!(user_id, recipe_id = id, "recipe updated");
                Ok(UpdateOutcome::Updated(recipe))
            }
            // Deleted between the owner check and the write; report absent.
            None => Ok(UpdateOutcome::NotFound),
        }
    }

    pub async fn delete(&self, user_id: i64, id: i64) -> Result<DeleteOutcome, ApiError> {
        match self.recipes.get_owner_by_id(id).await? {
            None => return Ok(DeleteOutcome::NotFound),
            Some(owner_id) if owner_id != user_id => return Ok(DeleteOutcome::Forbidden),
            Some(_) => {}
        }

        if self.recipes.delete(id).await? {
            info!(user_id, recipe_id = id, "recipe deleted");
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::NotFound)
        }
    }
}


#[cfg(test)]
mod end_to_end {
    use super::*;
    use crate::auth::jwt::JwtKeys;
    use crate::auth::services::AuthService;
    use crate::auth::validation::RegisterInput;
    use crate::config::JwtConfig;
    use crate::recipes::repo_types::CreateIngredientInput;
    use crate::testing::{InMemoryRecipeRepository, InMemoryUserRepository};

    #[tokio::test]
    async fn register_create_list_get_then_foreign_update_is_forbidden() {
        let keys = JwtKeys::new(&JwtConfig {
            secret: "test-secret".into(),
            ttl_days: 7,
        });
        let auth = AuthService::new(Arc::new(InMemoryUserRepository::default()), keys);
        let recipes = RecipeService::new(Arc::new(InMemoryRecipeRepository::default()));

        let alice = auth
            .register(RegisterInput {
                first_name: "Alice".into(),
                last_name: "Baker".into(),
                email: "alice@example.com".into(),
                username: "alice".into(),
                password: "Password123!".into(),
            })
            .await
            .expect("register alice");
        let bob = auth
            .register(RegisterInput {
                first_name: "Bob".into(),
                last_name: "Cook".into(),
                email: "bob@example.com".into(),
                username: "bob".into(),
                password: "Password123!".into(),
            })
            .await
            .expect("register bob");

        let recipe = recipes
            .create(
                alice.id,
                CreateRecipeInput {
                    title: "Pancakes".into(),
                    description: None,
                    steps_markdown: "1. Mix\n2. Fry".into(),
                    ingredients: vec![
                        CreateIngredientInput {
                            name: "Flour".into(),
                            qty: 1.5,
                            unit: "cup".into(),
                            notes: None,
                            position: 1,
                        },
                        CreateIngredientInput {
                            name: "Milk".into(),
                            qty: 0.75,
                            unit: "cup".into(),
                            notes: Some("room temperature".into()),
                            position: 2,
                        },
                    ],
                },
            )
            .await
            .expect("create recipe");

        let listed = recipes.list().await.expect("list recipes");
        assert!(listed.iter().any(|item| item.id == recipe.id));

        let fetched = recipes
            .get(recipe.id)
            .await
            .expect("get recipe")
            .expect("recipe exists");
        assert_eq!(fetched.ingredients.len(), 2);
        assert_eq!(fetched.ingredients[0].name, "Flour");
        assert_eq!(fetched.ingredients[1].name, "Milk");
        assert_eq!(fetched.ingredients[1].qty, 0.75);

        let outcome = recipes
            .update(
                bob.id,
                recipe.id,
                CreateRecipeInput {
                    title: "Bob's pancakes".into(),
                    description: None,
                    steps_markdown: "1. Steal".into(),
                    ingredients: vec![CreateIngredientInput {
                        name: "Audacity".into(),
                        qty: 1.0,
                        unit: "pinch".into(),
                        notes: None,
                        position: 1,
                    }],
                },
            )
            .await
            .expect("update call");
        assert!(matches!(outcome, UpdateOutcome::Forbidden));

        let unchanged = recipes
            .get(recipe.id)
            .await
            .expect("get recipe")
            .expect("recipe exists");
        assert_eq!(unchanged.title, "Pancakes");
        assert_eq!(unchanged.ingredients.len(), 2);
    }
}
