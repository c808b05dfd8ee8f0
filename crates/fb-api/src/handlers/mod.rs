//! Request handlers, grouped by surface.

pub mod admin;
pub mod auth;
pub mod pages;
pub mod posts;
