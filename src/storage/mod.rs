//! Data access layer.
//!
//! `SeaOrmStorage` owns the database connection and exposes per-entity
//! operations; the schema and entity definitions live in the `migration`
//! workspace member.

mod certificates;
mod connection;
mod converters;
pub mod models;
mod projects;
mod users;

pub use models::{
    Certificate, CertificateData, CertificateSort, NewUser, Project, ProjectData, ProjectSort,
    SortOrder, User,
};

use sea_orm::DatabaseConnection;
use tracing::info;

use crate::errors::Result;

pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend: &'static str,
}

impl SeaOrmStorage {
    /// Connect, run migrations, and return a ready storage handle. The
    /// backend is chosen from the URL scheme.
    pub async fn new(database_url: &str) -> Result<Self> {
        let backend = backend_from_url(database_url);

        let db = match backend {
            "sqlite" => connection::connect_sqlite(database_url).await?,
            other => connection::connect_generic(database_url, other).await?,
        };

        connection::run_migrations(&db).await?;
        info!("Storage ready (backend: {})", backend);

        Ok(Self { db, backend })
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend
    }

    pub(crate) fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn backend_from_url(database_url: &str) -> &'static str {
    if database_url.starts_with("sqlite:") {
        "sqlite"
    } else if database_url.starts_with("postgres:") || database_url.starts_with("postgresql:") {
        "postgres"
    } else if database_url.starts_with("mysql:") || database_url.starts_with("mariadb:") {
        "mysql"
    } else {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_url() {
        assert_eq!(backend_from_url("sqlite://data.db?mode=rwc"), "sqlite");
        assert_eq!(backend_from_url("postgres://localhost/folio"), "postgres");
        assert_eq!(backend_from_url("mysql://localhost/folio"), "mysql");
    }
}
