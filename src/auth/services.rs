use std::sync::Arc;

use axum::extract::FromRef;
use tracing::info;

use crate::auth::jwt::JwtKeys;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::UserRepository;
use crate::auth::repo_types::{CreateUserInput, PublicUser};
use crate::auth::validation::{ChangePasswordInput, LoginInput, RegisterInput};
use crate::error::ApiError;
use crate::state::AppState;

/// Application-level auth operations over the user repository. Credential
/// checks live here, not in handlers or in the repository.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    keys: JwtKeys,
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        Self {
            users: state.users.clone(),
            keys: JwtKeys::from_ref(state),
        }
    }
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, keys: JwtKeys) -> Self {
        Self { users, keys }
    }

    pub async fn register(&self, input: RegisterInput) -> Result<PublicUser, ApiError> {
        if self.users.get_by_email(&input.email).await?.is_some() {
            return Err(ApiError::Conflict("email already in use".into()));
        }
        if self.users.get_by_username(&input.username).await?.is_some() {
            return Err(ApiError::Conflict("username already in use".into()));
        }

        let password_hash = hash_password(&input.password)?;
        let user = self
            .users
            .create(CreateUserInput {
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
                username: input.username,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "user registered");
        Ok(PublicUser::from(user))
    }

    /// Issues an access token. Unknown username and wrong password fail the
    /// same way so callers cannot probe which usernames exist.
    pub async fn login(&self, input: LoginInput) -> Result<String, ApiError> {
        let user = match self.users.get_by_username(&input.username).await? {
            Some(user) => user,
            None => return Err(ApiError::InvalidCredentials("invalid credentials")),
        };

        if !verify_password(&input.password, &user.password_hash)? {
            return Err(ApiError::InvalidCredentials("invalid credentials"));
        }

        let token = self.keys.sign(user.id, &user.username)?;
        info!(user_id = user.id, "user logged in");
        Ok(token)
    }

    pub async fn change_password(
        &self,
        user_id: i64,
        input: ChangePasswordInput,
    ) -> Result<(), ApiError> {
        let user = match self.users.get_by_id(user_id).await? {
            Some(user) => user,
            None => return Err(ApiError::InvalidCredentials("invalid credentials")),
        };

        if !verify_password(&input.current_password, &user.password_hash)? {
            return Err(ApiError::InvalidCredentials("current password is incorrect"));
        }

        let password_hash = hash_password(&input.new_password)?;
        self.users.update_password(user.id, &password_hash).await?;

        info!(user_id = user.id, "password changed");
        Ok(())
    }
}
