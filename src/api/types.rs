//! Wire types for the dashboard API. Field names are camelCase to match
//! the frontend's fetch payloads.

use serde::{Deserialize, Serialize};

use crate::errors::{PortfolioError, Result};
use crate::storage::models::{CertificateData, ProjectData};

/// A year field as submitted by the dashboard form. The form posts strings
/// ("2023"), programmatic clients post integers; both coerce to `i32`.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(untagged)]
pub enum YearField {
    Int(i64),
    Text(String),
}

impl YearField {
    pub fn coerce(&self) -> Result<i32> {
        match self {
            YearField::Int(n) => i32::try_from(*n)
                .map_err(|_| PortfolioError::validation(format!("year out of range: {n}"))),
            YearField::Text(s) => s.trim().parse::<i32>().map_err(|_| {
                PortfolioError::validation(format!("year must be an integer, got '{s}'"))
            }),
        }
    }
}

/// Create/replace payload for a certificate.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CertificatePayload {
    pub publisher: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub year_get: YearField,
    #[serde(default)]
    pub year_end: Option<YearField>,
    pub link: String,
    pub image: String,
}

impl CertificatePayload {
    pub fn into_data(self) -> Result<CertificateData> {
        Ok(CertificateData {
            publisher: self.publisher,
            title: self.title,
            description: self.description,
            year_get: self.year_get.coerce()?,
            year_end: self.year_end.as_ref().map(YearField::coerce).transpose()?,
            link: self.link,
            image: self.image,
        })
    }
}

/// Create/replace payload for a project.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    pub name: String,
    pub description: String,
    pub image: String,
    pub link: String,
    #[serde(default)]
    pub tech: Vec<String>,
}

impl From<ProjectPayload> for ProjectData {
    fn from(payload: ProjectPayload) -> Self {
        ProjectData {
            name: payload.name,
            description: payload.description,
            image: payload.image,
            link: payload.link,
            tech: payload.tech,
        }
    }
}

/// Single-field sort selection on list endpoints.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ListQuery {
    pub sort: Option<String>,
    pub order: Option<String>,
}

/// Registration payload. Fields are optional so that missing ones map to a
/// 400 instead of a deserialization error.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User as echoed by the API. The password hash stays server-side.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<crate::storage::models::User> for UserResponse {
    fn from(user: crate::storage::models::User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_coercion_from_string_and_int() {
        let payload: CertificatePayload = serde_json::from_value(serde_json::json!({
            "publisher": "Google",
            "yearGet": "2023",
            "yearEnd": 2024,
            "link": "https://x",
            "image": "https://y"
        }))
        .unwrap();

        let data = payload.into_data().unwrap();
        assert_eq!(data.year_get, 2023);
        assert_eq!(data.year_end, Some(2024));
    }

    #[test]
    fn test_year_coercion_rejects_non_numeric() {
        let payload: CertificatePayload = serde_json::from_value(serde_json::json!({
            "publisher": "Google",
            "yearGet": "twenty-three",
            "link": "https://x",
            "image": "https://y"
        }))
        .unwrap();

        assert!(payload.into_data().is_err());
    }

    #[test]
    fn test_missing_year_end_means_ongoing() {
        let payload: CertificatePayload = serde_json::from_value(serde_json::json!({
            "publisher": "Google",
            "yearGet": 2023,
            "link": "https://x",
            "image": "https://y"
        }))
        .unwrap();

        assert_eq!(payload.into_data().unwrap().year_end, None);
    }
}
