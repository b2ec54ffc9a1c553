//! Scroll-driven header and image effects for the listing detail screen.
//!
//! Offsets are in "image pixels": the hero image is `IMG_HEIGHT` tall and
//! maps onto `IMAGE_ROWS` terminal rows, so one row of scroll is
//! `PX_PER_ROW` pixels.

/// Hero image height the effect curves are defined against.
pub const IMG_HEIGHT: f32 = 300.0;

/// Terminal rows occupied by the unscrolled hero image band.
pub const IMAGE_ROWS: u16 = 10;

pub const PX_PER_ROW: f32 = IMG_HEIGHT / IMAGE_ROWS as f32;

/// Piecewise-linear interpolation with linear extrapolation past both ends.
///
/// `input` must be ascending and the same length as `output`. Fewer than
/// two points, or mismatched lengths, degrade to the first output value
/// (or `value` when `output` is empty).
pub fn interpolate(value: f32, input: &[f32], output: &[f32]) -> f32 {
    if input.len() < 2 || input.len() != output.len() {
        return output.first().copied().unwrap_or(value);
    }

    // Segment whose upper bound is the first input point above `value`;
    // values outside the range extend the first or last segment.
    let upper = input[1..input.len() - 1]
        .iter()
        .position(|&x| value < x)
        .map_or(input.len() - 1, |i| i + 1);
    let lower = upper - 1;

    let (in0, in1) = (input[lower], input[upper]);
    let (out0, out1) = (output[lower], output[upper]);
    if in1 == in0 {
        return out0;
    }
    out0 + (value - in0) * (out1 - out0) / (in1 - in0)
}

/// Effect values for one scroll position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxFrame {
    /// Solid header opacity; 0 is fully transparent. Not clamped.
    pub header_opacity: f32,
    /// Downward image translation in pixels.
    pub image_translate: f32,
    /// Image scale factor.
    pub image_scale: f32,
}

impl ParallaxFrame {
    pub fn at(offset: f32) -> Self {
        let h = IMG_HEIGHT;
        Self {
            header_opacity: interpolate(offset, &[0.0, h / 2.0], &[0.0, 1.0]),
            image_translate: interpolate(offset, &[-h, 0.0, h], &[-h / 2.0, 0.0, h * 0.75]),
            image_scale: interpolate(offset, &[-h, 0.0, h], &[2.0, 1.0, 1.0]),
        }
    }

    /// Frame for a detail screen scrolled by `rows`.
    pub fn at_rows(rows: u16) -> Self {
        Self::at(f32::from(rows) * PX_PER_ROW)
    }

    /// Whether the solid title header replaces the transparent one.
    pub fn header_visible(&self) -> bool {
        self.header_opacity >= 0.5
    }
}

/// Rows of hero band still on screen after scrolling `rows`.
pub fn visible_image_rows(rows: u16) -> u16 {
    IMAGE_ROWS.saturating_sub(rows)
}

/// How many rows the image content has moved up inside its band.
///
/// The image counter-translates, so it rises slower than the page.
pub fn image_rise_rows(rows: u16) -> u16 {
    let offset = f32::from(rows) * PX_PER_ROW;
    let frame = ParallaxFrame::at(offset);
    let rise = ((offset - frame.image_translate) / PX_PER_ROW).round();
    rise.clamp(0.0, f32::from(IMAGE_ROWS)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn interpolate_hits_control_points() {
        let input = [-300.0, 0.0, 300.0];
        let output = [-150.0, 0.0, 225.0];
        for (i, o) in input.iter().zip(output) {
            assert!(approx(interpolate(*i, &input, &output), o));
        }
    }

    #[test]
    fn interpolate_is_linear_between_points() {
        assert!(approx(interpolate(75.0, &[0.0, 150.0], &[0.0, 1.0]), 0.5));
        assert!(approx(
            interpolate(-150.0, &[-300.0, 0.0, 300.0], &[2.0, 1.0, 1.0]),
            1.5
        ));
    }

    #[test]
    fn interpolate_extrapolates_past_both_ends() {
        assert!(approx(interpolate(300.0, &[0.0, 150.0], &[0.0, 1.0]), 2.0));
        assert!(approx(interpolate(-150.0, &[0.0, 150.0], &[0.0, 1.0]), -1.0));
        assert!(approx(
            interpolate(600.0, &[-300.0, 0.0, 300.0], &[-150.0, 0.0, 225.0]),
            450.0
        ));
        assert!(approx(
            interpolate(-600.0, &[-300.0, 0.0, 300.0], &[2.0, 1.0, 1.0]),
            3.0
        ));
    }

    #[test]
    fn interpolate_degenerate_inputs() {
        assert_eq!(interpolate(5.0, &[1.0], &[7.0]), 7.0);
        assert_eq!(interpolate(5.0, &[], &[]), 5.0);
        assert_eq!(interpolate(5.0, &[0.0, 1.0], &[3.0]), 3.0);
        assert_eq!(interpolate(5.0, &[2.0, 2.0], &[4.0, 9.0]), 4.0);
    }

    #[test]
    fn frame_at_rest() {
        let frame = ParallaxFrame::at(0.0);
        assert_eq!(
            frame,
            ParallaxFrame {
                header_opacity: 0.0,
                image_translate: 0.0,
                image_scale: 1.0,
            }
        );
        assert!(!frame.header_visible());
    }

    #[test]
    fn overscroll_zooms_and_lifts_image() {
        let frame = ParallaxFrame::at(-IMG_HEIGHT);
        assert!(approx(frame.image_scale, 2.0));
        assert!(approx(frame.image_translate, -IMG_HEIGHT / 2.0));
    }

    #[test]
    fn header_turns_solid_halfway_to_half_image() {
        assert!(!ParallaxFrame::at(74.0).header_visible());
        assert!(ParallaxFrame::at(75.0).header_visible());
        assert!(ParallaxFrame::at(IMG_HEIGHT).header_visible());
    }

    #[test]
    fn band_shrinks_with_scroll() {
        assert_eq!(visible_image_rows(0), IMAGE_ROWS);
        assert_eq!(visible_image_rows(4), IMAGE_ROWS - 4);
        assert_eq!(visible_image_rows(IMAGE_ROWS + 5), 0);
    }

    #[test]
    fn image_rises_at_quarter_speed() {
        assert_eq!(image_rise_rows(0), 0);
        assert_eq!(image_rise_rows(4), 1);
        assert_eq!(image_rise_rows(8), 2);
    }
}
