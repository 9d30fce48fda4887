//! User account operations. Accounts are created once at registration and
//! never mutated afterwards.

use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, SqlErr};
use tracing::info;

use migration::entities::user;

use super::converters::model_to_user;
use super::models::{NewUser, User};
use super::SeaOrmStorage;
use crate::errors::{PortfolioError, Result};

impl SeaOrmStorage {
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db())
            .await?;

        Ok(model.map(model_to_user))
    }

    /// Insert a new user. `new_user.password` must already be an argon2
    /// hash. The unique email index backstops the caller's existence
    /// check; a lost race comes back as `Duplicate`, not a server error.
    pub async fn insert_user(&self, new_user: NewUser) -> Result<User> {
        let active = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(new_user.name),
            email: Set(new_user.email),
            password: Set(new_user.password),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active.insert(self.db()).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                PortfolioError::duplicate("email already registered")
            }
            _ => e.into(),
        })?;
        info!("User registered: {}", model.email);
        Ok(model_to_user(model))
    }
}
