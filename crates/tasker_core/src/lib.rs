pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod note_api;
pub mod query;
pub mod storage;
pub mod task_api;
