//! Portfolio backend service.
//!
//! Provides the data layer and HTTP API behind the portfolio site's admin
//! dashboard, plus the self-contained dungeon-crawler simulation that backs
//! the site's playable demo.
//!
//! # Architecture
//! - `api`: HTTP services (certificate/project CRUD, auth, health)
//! - `storage`: sea-orm backed data access
//! - `game`: headless dungeon simulation (level generation + tick loop)
//! - `config`: environment-backed configuration
//! - `errors`: crate-wide error type

pub mod api;
pub mod config;
pub mod errors;
pub mod game;
pub mod storage;
pub mod utils;
