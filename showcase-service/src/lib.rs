pub mod config;
pub mod dtos;
pub mod handlers;
pub mod migrations;
pub mod models;
pub mod services;
pub mod startup;
