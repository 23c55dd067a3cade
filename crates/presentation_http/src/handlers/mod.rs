//! HTTP request handlers

pub mod filters;
pub mod health;
pub mod map;
pub mod search;
pub mod sessions;
