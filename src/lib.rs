//! A small CRUD service for todo items.
//!
//! [`store::TodoStore`] is the persistence boundary, implemented by the
//! SQLite-backed [`db::Database`]. [`api::create_router`] exposes it over HTTP.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod store;
