// Library exports for the admin console
// Integration tests drive the router and controllers through these

pub mod api;
pub mod config;
pub mod console;
pub mod error;
pub mod extractors;
pub mod models;
pub mod policy;
pub mod routes;
pub mod state;
pub mod view;
