pub mod apply;
pub mod cache;
pub mod catalog;
pub mod defaults;
pub mod detect;
pub mod error;
pub mod ini;
pub mod models;
pub mod runner;
pub mod settings;
pub mod status;
pub mod storage;
