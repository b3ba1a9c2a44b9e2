pub mod aggregation;
pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod services;
