//! Shared helpers for the UI layer.

use futures::FutureExt;
use ratatui::layout::Rect;
use std::panic::AssertUnwindSafe;

/// Run `future`, turning a panic into an error message.
///
/// Background tasks report panics through `AppEvent::TaskPanicked` instead
/// of disappearing silently with their JoinHandle.
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future).catch_unwind().await.map_err(|panic| {
        if let Some(s) = panic.downcast_ref::<&'static str>() {
            s.to_string()
        } else if let Some(s) = panic.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        }
    })
}

/// Centered rectangle covering `percent_x` × `percent_y` of `area`.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x.min(100)) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(percent_y.min(100)) / 100) as u16;
    centered_fixed(width, height, area)
}

/// Centered rectangle of at most `width` × `height`, shrunk to fit `area`.
pub(super) fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
