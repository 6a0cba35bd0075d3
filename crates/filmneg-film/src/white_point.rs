//! Measuring the film base color.
//!
//! The white point of a negative is the color of its unexposed base (the
//! orange mask). It can be picked from a known base area, or estimated from
//! the brightest 0.6% of each channel.

use filmneg_core::{Channel, Color, PixelBuffer, Result};
use filmneg_ops::Histogram;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Share of brightest samples the auto white point aims for.
pub const AUTO_WHITE_POINT_SHARE: f64 = 0.006;

/// Averages the 2x2 block whose top-left pixel is `(x, y)`.
///
/// Neighbors past the right or bottom edge repeat the edge pixel.
///
/// # Errors
///
/// Fails if `(x, y)` itself is outside the buffer.
pub fn pick_white_point(buffer: &PixelBuffer, x: u32, y: u32) -> Result<Color> {
    trace!(x, y, "white_point::pick");
    let block = [
        buffer.pixel(x, y)?,
        buffer.pixel_clamped(x, y.saturating_add(1)),
        buffer.pixel_clamped(x.saturating_add(1), y),
        buffer.pixel_clamped(x.saturating_add(1), y.saturating_add(1)),
    ];
    let mut wp = block[0];
    for c in &block[1..] {
        wp.blend_add(c);
    }
    wp.multiply(0.25);
    Ok(wp)
}

/// Estimates the white point from the histogram of `buffer`.
///
/// Walking down from the maximum, each color channel stops at the level
/// where the share of brighter samples is closest to
/// [`AUTO_WHITE_POINT_SHARE`]. Alpha of the result is 0.
pub fn auto_white_point(buffer: &PixelBuffer) -> Color {
    let hist = Histogram::new(buffer);
    let wp = auto_white_point_from_histogram(&hist);
    debug!(white_point = ?wp.to_array(), "Auto white point");
    wp
}

/// Same as [`auto_white_point`] for a precomputed histogram.
pub fn auto_white_point_from_histogram(hist: &Histogram) -> Color {
    let max = hist.depth().max_value() as usize;
    let level = |channel: Channel| -> i32 {
        let bins = hist.bins(channel);
        let count = hist.range_count(channel, 0, max) as f64;
        let mut new_count = 0.0;
        for i in (1..=max).rev() {
            new_count += bins[i] as f64;
            let share = new_count / count;
            let next_share = (new_count + bins[i - 1] as f64) / count;
            if (share - AUTO_WHITE_POINT_SHARE).abs() < (next_share - AUTO_WHITE_POINT_SHARE).abs() {
                return (i - 1) as i32;
            }
        }
        max as i32
    };
    Color::new(
        level(Channel::Red),
        level(Channel::Green),
        level(Channel::Blue),
        0,
        hist.depth().is_sixteen_bit(),
    )
}
