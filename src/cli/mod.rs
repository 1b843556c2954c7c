pub mod app;
pub mod commands;
pub mod form;
pub mod ui;
