pub mod command;
pub mod config;
pub mod event;
pub mod metadata;
