//! Core domain: the block model, page store, credential/session auth,
//! and the access gateway in front of them.

pub mod auth;
pub mod blocks;
pub mod config;
pub mod ctx;
pub mod error;
pub mod pages;
pub mod router;
pub mod uploads;

pub use config::AppState;
