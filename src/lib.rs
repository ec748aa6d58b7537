//! Movie recommendations from content similarity, collaborative filtering and
//! a weighted blend of both, served over a small JSON API.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
