//! Iara storefront services: remote APIs, configuration and application wiring.

pub mod address;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod context;
pub mod http;
pub mod observability;
pub mod settlement;
