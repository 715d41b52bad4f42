//! Shared building blocks: the task entity and its validation rules,
//! configuration, sorting, terminal output and prompts.

pub mod config;
pub mod data_storage;
pub mod error;
pub mod logging;
pub mod messages;
pub mod prompt;
pub mod sort;
pub mod task;
pub mod view;
