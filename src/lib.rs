// Release Console - library root for testing

pub mod auth;
pub mod config;
pub mod error;
pub mod http_client;
pub mod models;
pub mod render;
pub mod shell;
pub mod state;
pub mod views;
