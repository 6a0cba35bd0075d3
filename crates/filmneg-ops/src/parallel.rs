//! Banded, data-parallel per-sample processing.
//!
//! Every filter in this crate maps each sample independently, so a buffer
//! can be processed in any order. The driver here splits the image into
//! horizontal bands of roughly 2% of the rows. Each band is processed with
//! rayon, one row per task; between bands the driver checks for
//! cancellation and reports progress.
//!
//! ```text
//! rows  0..k    band 0  -> par_chunks_mut(row) -> post 2%
//! rows  k..2k   band 1  -> par_chunks_mut(row) -> post 4%
//! ...
//! ```

use filmneg_core::{PixelBuffer, PixelData, CHANNELS};
use rayon::prelude::*;

use crate::progress::{FilterContext, FilterOutcome};
use crate::OpsResult;

/// Approximate share of rows per band, in percent.
pub const BAND_PERCENT: usize = 2;

/// Number of rows per band for an image of `height` rows.
#[inline]
pub fn band_rows(height: usize) -> usize {
    (height * BAND_PERCENT).div_ceil(100).max(1)
}

/// Maps every sample of `src` through `f` into a new buffer.
///
/// `f` receives the sample offset inside the pixel (0 = R .. 3 = A) and the
/// sample value, and returns the new value. Results above the buffer's
/// maximum are clamped.
///
/// Returns [`FilterOutcome::Cancelled`] as soon as cancellation is seen
/// between bands; the partial buffer is dropped.
pub fn map_samples<F>(src: &PixelBuffer, ctx: &FilterContext, f: F) -> OpsResult<FilterOutcome>
where
    F: Fn(usize, u32) -> u32 + Sync,
{
    let (width, height) = src.dimensions();
    let row_len = src.row_len();

    let data = match src.data() {
        PixelData::U8(s) => {
            let mut dst = vec![0u8; s.len()];
            let done = run_bands(s, &mut dst, row_len, ctx, |si, di| {
                for (i, (d, v)) in di.iter_mut().zip(si).enumerate() {
                    *d = f(i % CHANNELS, *v as u32).min(255) as u8;
                }
            });
            if !done {
                return Ok(FilterOutcome::Cancelled);
            }
            PixelData::U8(dst)
        }
        PixelData::U16(s) => {
            let mut dst = vec![0u16; s.len()];
            let done = run_bands(s, &mut dst, row_len, ctx, |si, di| {
                for (i, (d, v)) in di.iter_mut().zip(si).enumerate() {
                    *d = f(i % CHANNELS, *v as u32).min(65535) as u16;
                }
            });
            if !done {
                return Ok(FilterOutcome::Cancelled);
            }
            PixelData::U16(dst)
        }
    };

    Ok(FilterOutcome::Completed(PixelBuffer::from_data(width, height, data)?))
}

/// Processes `src` into `dst` band by band. Returns `false` if cancelled.
fn run_bands<T, F>(src: &[T], dst: &mut [T], row_len: usize, ctx: &FilterContext, row_fn: F) -> bool
where
    T: Send + Sync,
    F: Fn(&[T], &mut [T]) + Sync,
{
    let height = src.len() / row_len;
    let band = band_rows(height) * row_len;

    ctx.post_progress(0);
    let mut rows_done = 0;
    for (src_band, dst_band) in src.chunks(band).zip(dst.chunks_mut(band)) {
        if ctx.is_cancelled() {
            return false;
        }
        dst_band
            .par_chunks_mut(row_len)
            .zip(src_band.par_chunks(row_len))
            .for_each(|(d, s)| row_fn(s, d));
        rows_done += src_band.len() / row_len;
        ctx.post_fraction(rows_done, height);
    }
    !ctx.is_cancelled()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::CancelToken;
    use filmneg_core::{BitDepth, Color};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_band_rows() {
        assert_eq!(band_rows(1), 1);
        assert_eq!(band_rows(50), 1);
        assert_eq!(band_rows(100), 2);
        assert_eq!(band_rows(1000), 20);
    }

    #[test]
    fn test_map_samples_per_offset() {
        let src = PixelBuffer::filled(3, 7, Color::new(10, 20, 30, 40, false)).unwrap();
        let out = map_samples(&src, &FilterContext::detached(), |c, v| v + c as u32)
            .unwrap()
            .into_buffer()
            .unwrap();
        assert_eq!(out.pixel(2, 6).unwrap().to_array(), [10, 21, 32, 43]);
    }

    #[test]
    fn test_map_samples_clamps() {
        let src = PixelBuffer::filled(2, 2, Color::white(true)).unwrap();
        let out = map_samples(&src, &FilterContext::detached(), |_, v| v * 2)
            .unwrap()
            .into_buffer()
            .unwrap();
        assert_eq!(out.as_u16().unwrap()[0], 65535);
    }

    #[test]
    fn test_progress_reaches_end() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        let ctx = FilterContext::new(CancelToken::new(), move |p: u8| s.lock().unwrap().push(p));
        let src = PixelBuffer::new(4, 120, BitDepth::U8).unwrap();
        map_samples(&src, &ctx, |_, v| v).unwrap();
        let seen = seen.lock().unwrap();
        assert_eq!(seen.first(), Some(&0));
        assert_eq!(seen.last(), Some(&100));
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_cancelled_before_start() {
        let token = CancelToken::new();
        token.cancel();
        let ctx = FilterContext::new(token, |_: u8| {});
        let src = PixelBuffer::new(4, 4, BitDepth::U8).unwrap();
        assert!(map_samples(&src, &ctx, |_, v| v).unwrap().is_cancelled());
    }
}
