//! Small shared helpers: terminal-width text handling and URL checks for
//! anything handed to the system browser.

mod text;
mod url_validator;

pub use text::{display_width, strip_control_chars, truncate_to_width, wrap_text};
pub use url_validator::{validate_url_for_open, UrlValidationError};
