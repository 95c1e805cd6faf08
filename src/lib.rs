pub mod app;
pub mod cli;
pub mod commands;
pub mod configuration;
pub mod context;
pub mod products;
pub mod rest;
pub mod store;
pub mod tracing;
