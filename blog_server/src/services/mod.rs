//! Blog services — store-facing business logic.

pub mod article_service;
