//! roost: a terminal browser for vacation-rental listings.
//!
//! The binary in `main.rs` wires configuration, the listing store and the
//! identity provider into [`app::App`] and hands it to [`ui::run`].

pub mod app;
pub mod auth;
pub mod config;
pub mod feed;
pub mod keybindings;
pub mod listings;
pub mod navigation;
pub mod theme;
pub mod ui;
pub mod util;
