//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `render` - Route-based render dispatch
//! - `header` - Explorer header and category chips
//! - `listings` - Listing feed cards
//! - `detail` - Listing detail screen
//! - `parallax` - Scroll-driven detail header and image effects
//! - `login` / `booking` - Modal screens
//! - `help` - Keybinding overlay
//! - `status` - Status bar widget

mod booking;
mod detail;
mod events;
mod header;
mod help;
mod helpers;
mod input;
mod listings;
mod login;
mod loop_runner;
pub mod parallax;
mod render;
mod status;

pub use loop_runner::{run, Action};
