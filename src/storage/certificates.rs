//! Certificate read and write operations.

use sea_orm::{ActiveModelTrait, EntityTrait, Order, QueryOrder};
use tracing::{debug, info};

use migration::entities::certificate;

use super::converters::{certificate_to_active_model, model_to_certificate};
use super::models::{Certificate, CertificateData, CertificateSort, SortOrder};
use super::SeaOrmStorage;
use crate::errors::Result;

impl SeaOrmStorage {
    pub async fn list_certificates(
        &self,
        sort: CertificateSort,
        order: SortOrder,
    ) -> Result<Vec<Certificate>> {
        let column = match sort {
            CertificateSort::YearGet => certificate::Column::YearGet,
            CertificateSort::YearEnd => certificate::Column::YearEnd,
            CertificateSort::Publisher => certificate::Column::Publisher,
            CertificateSort::Title => certificate::Column::Title,
        };
        let order = match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let models = certificate::Entity::find()
            .order_by(column, order)
            .all(self.db())
            .await?;

        debug!("Loaded {} certificates", models.len());
        Ok(models.into_iter().map(model_to_certificate).collect())
    }

    pub async fn get_certificate(&self, id: &str) -> Result<Option<Certificate>> {
        let model = certificate::Entity::find_by_id(id).one(self.db()).await?;
        Ok(model.map(model_to_certificate))
    }

    pub async fn insert_certificate(&self, data: CertificateData) -> Result<Certificate> {
        let id = uuid::Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now();

        let model = certificate_to_active_model(&id, &data, created_at)
            .insert(self.db())
            .await?;

        info!("Certificate created: {} ({})", model.id, model.publisher);
        Ok(model_to_certificate(model))
    }

    /// Full replace. Every mutable field is overwritten; `id` and
    /// `created_at` are preserved. Returns `None` when the id is unknown.
    pub async fn replace_certificate(
        &self,
        id: &str,
        data: CertificateData,
    ) -> Result<Option<Certificate>> {
        let Some(existing) = certificate::Entity::find_by_id(id).one(self.db()).await? else {
            return Ok(None);
        };

        let model = certificate_to_active_model(id, &data, existing.created_at)
            .update(self.db())
            .await?;

        info!("Certificate replaced: {}", id);
        Ok(Some(model_to_certificate(model)))
    }

    /// Returns `false` when the id is unknown.
    pub async fn delete_certificate(&self, id: &str) -> Result<bool> {
        let result = certificate::Entity::delete_by_id(id).exec(self.db()).await?;

        if result.rows_affected > 0 {
            info!("Certificate deleted: {}", id);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
