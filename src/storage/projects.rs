//! Project read and write operations.

use sea_orm::{ActiveModelTrait, EntityTrait, Order, QueryOrder};
use tracing::{debug, info};

use migration::entities::project;

use super::converters::{model_to_project, project_to_active_model};
use super::models::{Project, ProjectData, ProjectSort, SortOrder};
use super::SeaOrmStorage;
use crate::errors::Result;

impl SeaOrmStorage {
    pub async fn list_projects(&self, sort: ProjectSort, order: SortOrder) -> Result<Vec<Project>> {
        let column = match sort {
            ProjectSort::CreatedAt => project::Column::CreatedAt,
            ProjectSort::Name => project::Column::Name,
        };
        let order = match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let models = project::Entity::find()
            .order_by(column, order)
            .all(self.db())
            .await?;

        debug!("Loaded {} projects", models.len());
        Ok(models.into_iter().map(model_to_project).collect())
    }

    pub async fn get_project(&self, id: &str) -> Result<Option<Project>> {
        let model = project::Entity::find_by_id(id).one(self.db()).await?;
        Ok(model.map(model_to_project))
    }

    pub async fn insert_project(&self, data: ProjectData) -> Result<Project> {
        let id = uuid::Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now();

        let model = project_to_active_model(&id, &data, created_at)
            .insert(self.db())
            .await?;

        info!("Project created: {} ({})", model.id, model.name);
        Ok(model_to_project(model))
    }

    /// Full replace; `id` and `created_at` are preserved. Returns `None`
    /// when the id is unknown.
    pub async fn replace_project(&self, id: &str, data: ProjectData) -> Result<Option<Project>> {
        let Some(existing) = project::Entity::find_by_id(id).one(self.db()).await? else {
            return Ok(None);
        };

        let model = project_to_active_model(id, &data, existing.created_at)
            .update(self.db())
            .await?;

        info!("Project replaced: {}", id);
        Ok(Some(model_to_project(model)))
    }

    /// Returns `false` when the id is unknown.
    pub async fn delete_project(&self, id: &str) -> Result<bool> {
        let result = project::Entity::delete_by_id(id).exec(self.db()).await?;

        if result.rows_affected > 0 {
            info!("Project deleted: {}", id);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
