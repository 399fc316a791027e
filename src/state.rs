use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::auth::repo::{PgUserRepository, UserRepository};
use crate::config::AppConfig;
use crate::recipes::repo::{PgRecipeRepository, RecipeRepository};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepository>,
    pub recipes: Arc<dyn RecipeRepository>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        let users = Arc::new(PgUserRepository::new(db.clone())) as Arc<dyn UserRepository>;
        let recipes = Arc::new(PgRecipeRepository::new(db.clone())) as Arc<dyn RecipeRepository>;

        Ok(Self {
            db,
            config,
            users,
            recipes,
        })
    }

    pub fn from_parts(
        db: PgPool,
        config: Arc<AppConfig>,
        users: Arc<dyn UserRepository>,
        recipes: Arc<dyn RecipeRepository>,
    ) -> Self {
        Self {
            db,
            config,
            users,
            recipes,
        }
    }
}
