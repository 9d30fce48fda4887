use sea_orm::ActiveValue::Set;

use migration::entities::{certificate, project, user};

use super::models::{Certificate, CertificateData, Project, ProjectData, User};

pub fn model_to_certificate(model: certificate::Model) -> Certificate {
    Certificate {
        id: model.id,
        publisher: model.publisher,
        title: model.title,
        description: model.description,
        year_get: model.year_get,
        year_end: model.year_end,
        link: model.link,
        image: model.image,
        created_at: model.created_at,
    }
}

pub fn certificate_to_active_model(
    id: &str,
    data: &CertificateData,
    created_at: chrono::DateTime<chrono::Utc>,
) -> certificate::ActiveModel {
    certificate::ActiveModel {
        id: Set(id.to_string()),
        publisher: Set(data.publisher.clone()),
        title: Set(data.title.clone()),
        description: Set(data.description.clone()),
        year_get: Set(data.year_get),
        year_end: Set(data.year_end),
        link: Set(data.link.clone()),
        image: Set(data.image.clone()),
        created_at: Set(created_at),
    }
}

pub fn model_to_project(model: project::Model) -> Project {
    // A malformed tech column degrades to an empty tag list rather than
    // failing the whole read.
    let tech = serde_json::from_value(model.tech).unwrap_or_default();

    Project {
        id: model.id,
        name: model.name,
        description: model.description,
        image: model.image,
        link: model.link,
        tech,
        created_at: model.created_at,
    }
}

pub fn project_to_active_model(
    id: &str,
    data: &ProjectData,
    created_at: chrono::DateTime<chrono::Utc>,
) -> project::ActiveModel {
    project::ActiveModel {
        id: Set(id.to_string()),
        name: Set(data.name.clone()),
        description: Set(data.description.clone()),
        image: Set(data.image.clone()),
        link: Set(data.link.clone()),
        tech: Set(serde_json::json!(data.tech)),
        created_at: Set(created_at),
    }
}

pub fn model_to_user(model: user::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        password: model.password,
        created_at: model.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_model_to_certificate_roundtrip_fields() {
        let model = certificate::Model {
            id: "cert-1".to_string(),
            publisher: "Google".to_string(),
            title: Some("Cloud Architect".to_string()),
            description: None,
            year_get: 2023,
            year_end: Some(2024),
            link: "https://x".to_string(),
            image: "https://y".to_string(),
            created_at: Utc::now(),
        };

        let cert = model_to_certificate(model);
        assert_eq!(cert.id, "cert-1");
        assert_eq!(cert.year_get, 2023);
        assert_eq!(cert.year_end, Some(2024));
    }

    #[test]
    fn test_project_tech_json_mapping() {
        let data = ProjectData {
            name: "portfolio".to_string(),
            description: "this site".to_string(),
            image: "https://img".to_string(),
            link: "https://repo".to_string(),
            tech: vec!["rust".to_string(), "actix".to_string()],
        };

        let active = project_to_active_model("p1", &data, Utc::now());
        let sea_orm::ActiveValue::Set(json) = active.tech else {
            panic!("tech not set");
        };
        assert_eq!(json, serde_json::json!(["rust", "actix"]));
    }

    #[test]
    fn test_malformed_tech_degrades_to_empty() {
        let model = project::Model {
            id: "p1".to_string(),
            name: "x".to_string(),
            description: "y".to_string(),
            image: "i".to_string(),
            link: "l".to_string(),
            tech: serde_json::json!({"not": "an array"}),
            created_at: Utc::now(),
        };

        assert!(model_to_project(model).tech.is_empty());
    }
}
