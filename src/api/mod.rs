//! HTTP API: wire types, response helpers, JWT sessions, and route/handler
//! modules for the dashboard surface.

pub mod helpers;
pub mod jwt;
pub mod routes;
pub mod services;
pub mod types;
