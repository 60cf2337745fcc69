pub mod answer_service;
pub mod app;
pub mod chart;
pub mod config;
pub mod conversation;
pub mod message;
pub mod text_wrapping;
