//! Book discovery service.
//!
//! Turns free-text reading preferences into either model-generated book
//! suggestions or ranked search results from a public book catalog.

pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
