pub mod auth;
pub mod certificates;
pub mod health;
pub mod projects;
