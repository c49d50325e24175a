pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod models;
pub mod output;
pub mod rules;
pub mod store;
pub mod views;
