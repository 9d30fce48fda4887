use serde::{Deserialize, Serialize};

/// A certification entry shown on the portfolio timeline.
///
/// `year_end` of `None` means the credential is ongoing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: String,
    pub publisher: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub year_get: i32,
    pub year_end: Option<i32>,
    pub link: String,
    pub image: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Mutable fields of a certificate, used for create and full replace.
#[derive(Debug, Clone, Default)]
pub struct CertificateData {
    pub publisher: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub year_get: i32,
    pub year_end: Option<i32>,
    pub link: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub link: String,
    pub tech: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Mutable fields of a project, used for create and full replace.
#[derive(Debug, Clone, Default)]
pub struct ProjectData {
    pub name: String,
    pub description: String,
    pub image: String,
    pub link: String,
    pub tech: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Argon2id hash.
    pub password: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Registration input. `password` must already be hashed by the caller.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Single-field sort selection for certificate listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CertificateSort {
    #[default]
    YearGet,
    YearEnd,
    Publisher,
    Title,
}

impl std::str::FromStr for CertificateSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yearGet" => Ok(Self::YearGet),
            "yearEnd" => Ok(Self::YearEnd),
            "publisher" => Ok(Self::Publisher),
            "title" => Ok(Self::Title),
            _ => Err(format!(
                "Unknown sort field: '{}'. Valid: yearGet, yearEnd, publisher, title",
                s
            )),
        }
    }
}

/// Single-field sort selection for project listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectSort {
    /// Insertion order, oldest first.
    #[default]
    CreatedAt,
    Name,
}

impl std::str::FromStr for ProjectSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(Self::CreatedAt),
            "name" => Ok(Self::Name),
            _ => Err(format!(
                "Unknown sort field: '{}'. Valid: createdAt, name",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(format!("Unknown sort order: '{}'. Valid: asc, desc", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certificate_serializes_camel_case() {
        let cert = Certificate {
            id: "c1".into(),
            publisher: "Google".into(),
            title: Some("Cloud Architect".into()),
            description: None,
            year_get: 2023,
            year_end: Some(2024),
            link: "https://x".into(),
            image: "https://y".into(),
            created_at: chrono::Utc::now(),
        };

        let json = serde_json::to_value(&cert).unwrap();
        assert_eq!(json["yearGet"], 2023);
        assert_eq!(json["yearEnd"], 2024);
        assert!(json.get("year_get").is_none());
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!(
            "yearGet".parse::<CertificateSort>().unwrap(),
            CertificateSort::YearGet
        );
        assert!("clicks".parse::<CertificateSort>().is_err());
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
    }
}
