use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum PortfolioError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    NotFound(String),
    Duplicate(String),
    Unauthorized(String),
    PasswordHash(String),
    Serialization(String),
}

impl PortfolioError {
    pub fn code(&self) -> &'static str {
        match self {
            PortfolioError::DatabaseConfig(_) => "E001",
            PortfolioError::DatabaseConnection(_) => "E002",
            PortfolioError::DatabaseOperation(_) => "E003",
            PortfolioError::Validation(_) => "E004",
            PortfolioError::NotFound(_) => "E005",
            PortfolioError::Duplicate(_) => "E006",
            PortfolioError::Unauthorized(_) => "E007",
            PortfolioError::PasswordHash(_) => "E008",
            PortfolioError::Serialization(_) => "E009",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            PortfolioError::DatabaseConfig(_) => "Database Configuration Error",
            PortfolioError::DatabaseConnection(_) => "Database Connection Error",
            PortfolioError::DatabaseOperation(_) => "Database Operation Error",
            PortfolioError::Validation(_) => "Validation Error",
            PortfolioError::NotFound(_) => "Resource Not Found",
            PortfolioError::Duplicate(_) => "Duplicate Resource",
            PortfolioError::Unauthorized(_) => "Unauthorized",
            PortfolioError::PasswordHash(_) => "Password Hash Error",
            PortfolioError::Serialization(_) => "Serialization Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            PortfolioError::DatabaseConfig(msg)
            | PortfolioError::DatabaseConnection(msg)
            | PortfolioError::DatabaseOperation(msg)
            | PortfolioError::Validation(msg)
            | PortfolioError::NotFound(msg)
            | PortfolioError::Duplicate(msg)
            | PortfolioError::Unauthorized(msg)
            | PortfolioError::PasswordHash(msg)
            | PortfolioError::Serialization(msg) => msg,
        }
    }

    /// HTTP status the API layer maps this error to.
    pub fn http_status(&self) -> StatusCode {
        match self {
            PortfolioError::Validation(_) | PortfolioError::Duplicate(_) => {
                StatusCode::BAD_REQUEST
            }
            PortfolioError::NotFound(_) => StatusCode::NOT_FOUND,
            PortfolioError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for PortfolioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for PortfolioError {}

impl PortfolioError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        PortfolioError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        PortfolioError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        PortfolioError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        PortfolioError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        PortfolioError::NotFound(msg.into())
    }

    pub fn duplicate<T: Into<String>>(msg: T) -> Self {
        PortfolioError::Duplicate(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        PortfolioError::Unauthorized(msg.into())
    }

    pub fn password_hash<T: Into<String>>(msg: T) -> Self {
        PortfolioError::PasswordHash(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        PortfolioError::Serialization(msg.into())
    }
}

impl From<sea_orm::DbErr> for PortfolioError {
    fn from(err: sea_orm::DbErr) -> Self {
        PortfolioError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for PortfolioError {
    fn from(err: std::io::Error) -> Self {
        PortfolioError::DatabaseConfig(err.to_string())
    }
}

impl From<serde_json::Error> for PortfolioError {
    fn from(err: serde_json::Error) -> Self {
        PortfolioError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
