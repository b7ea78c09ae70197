//! HTTP handlers

pub mod health;
pub mod home;
pub mod models;
pub mod predict;
