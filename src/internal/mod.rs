pub mod favorites;
pub mod models;
pub mod notification;
pub mod prefs;
pub mod tips;
pub mod ui;
