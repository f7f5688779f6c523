pub mod api;
pub mod attributes;
pub mod catalog;
pub mod client;
pub mod config;
pub mod data_models;
pub mod db;
pub mod extractor;
pub mod modal;
pub mod page;
