//! Integration tests for filmneg crates.
//!
//! End-to-end checks across core, ops and film: whole-image conversion,
//! threaded execution, progress reporting and settings persistence.

use filmneg_core::{BitDepth, Color, PixelBuffer, Result};

/// Synthetic negative: red ramps along x, green along y, blue constant.
///
/// Values stay inside the usual orange-mask range of a scanned negative.
pub fn synthetic_negative(width: u32, height: u32, depth: BitDepth) -> Result<PixelBuffer> {
    let max = depth.max_value() as i32;
    let sixteen = depth.is_sixteen_bit();
    let mut buf = PixelBuffer::new(width, height, depth)?;
    for y in 0..height {
        for x in 0..width {
            let r = max / 4 + (x as i32 * (max / 2)) / width.max(1) as i32;
            let g = max / 8 + (y as i32 * (max / 2)) / height.max(1) as i32;
            let b = max / 5;
            buf.set_pixel(x, y, Color::new(r, g, b, max, sixteen))?;
        }
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use filmneg_core::Channel;
    use filmneg_film::{
        auto_white_point, filter_from_action, FilmContainer, FilmFilter, FilmProfileKind, FilmSettings,
    };
    use filmneg_ops::executor::run_threaded_with;
    use filmneg_ops::prelude::*;
    use filmneg_ops::NullProgress;
    use tempfile::tempdir;

    fn convert(film: FilmContainer, src: &PixelBuffer) -> PixelBuffer {
        run_filter(&FilmFilter::new(film), src, &FilterContext::detached())
            .unwrap()
            .into_buffer()
            .unwrap()
    }

    /// Full pipeline: estimate base, convert, check tonal order is reversed.
    #[test]
    fn test_negative_to_positive_reverses_tones() {
        for depth in [BitDepth::U8, BitDepth::U16] {
            let src = synthetic_negative(64, 8, depth).unwrap();
            let mut film = FilmContainer::new(FilmProfileKind::KodakGold200, 1.8, depth.is_sixteen_bit());
            film.set_white_point(auto_white_point(&src));
            let out = convert(film, &src);

            assert_eq!(out.dimensions(), src.dimensions());
            assert_eq!(out.bit_depth(), depth);

            let reds: Vec<i32> = (0..64).map(|x| out.pixel(x, 3).unwrap().red()).collect();
            assert!(reds.windows(2).all(|w| w[0] >= w[1]), "{depth}: {reds:?}");
            assert!(reds[0] > reds[63]);

            for x in [0, 31, 63] {
                assert_eq!(out.pixel(x, 0).unwrap().alpha(), depth.max_value() as i32);
            }
        }
    }

    #[test]
    fn test_invert_twice_restores_image() {
        for depth in [BitDepth::U8, BitDepth::U16] {
            let src = synthetic_negative(17, 13, depth).unwrap();
            let ctx = FilterContext::detached();
            let once = run_filter(&InvertFilter, &src, &ctx).unwrap().into_buffer().unwrap();
            assert_ne!(once, src);
            let twice = run_filter(&InvertFilter, &once, &ctx).unwrap().into_buffer().unwrap();
            assert_eq!(twice, src);
        }
    }

    #[test]
    fn test_film_progress_is_monotonic() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            move |p: u8| seen.lock().unwrap().push(p)
        };
        let ctx = FilterContext::new(CancelToken::new(), sink);
        let src = synthetic_negative(32, 120, BitDepth::U8).unwrap();
        let film = FilmContainer::new(FilmProfileKind::Neutral, 1.8, false);
        run_filter(&FilmFilter::new(film), &src, &ctx).unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.first(), Some(&0));
        assert_eq!(seen.last(), Some(&100));
        assert!(seen.windows(2).all(|w| w[0] < w[1]), "{seen:?}");
        assert!(seen.iter().any(|&p| p > 40 && p < 80));
    }

    #[test]
    fn test_threaded_matches_synchronous() {
        let src = synthetic_negative(40, 30, BitDepth::U16).unwrap();
        let film = FilmContainer::new(FilmProfileKind::FujicolorSuperia1600, 2.2, true);
        let expected = convert(film, &src);

        let handle = run_threaded(FilmFilter::new(film), src, NullProgress);
        let got = handle.join().unwrap().into_buffer().unwrap();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_threaded_cancel_before_start() {
        let token = CancelToken::new();
        token.cancel();
        let src = synthetic_negative(16, 16, BitDepth::U8).unwrap();
        let film = FilmContainer::new(FilmProfileKind::Neutral, 1.8, false);
        let handle = run_threaded_with(FilmFilter::new(film), src, token, Arc::new(NullProgress));
        assert!(handle.token().is_cancelled());
        assert!(handle.join().unwrap().is_cancelled());
    }

    #[test]
    fn test_settings_file_reproduces_conversion() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("film.yaml");

        let src = synthetic_negative(24, 24, BitDepth::U8).unwrap();
        let mut film = FilmContainer::new(FilmProfileKind::KodakProfessionalNewPortra400, 2.0, false);
        film.set_exposure(1.25);
        film.set_white_point(Color::new(230, 180, 140, 255, false));
        FilmSettings::from_container(&film).save(&path).unwrap();

        let restored = FilmSettings::load(&path).unwrap().to_container(BitDepth::U8);
        assert_eq!(restored, film);
        assert_eq!(convert(restored, &src), convert(film, &src));
    }

    #[test]
    fn test_replayed_action_reproduces_conversion() {
        let src = synthetic_negative(20, 10, BitDepth::U16).unwrap();
        let mut film = FilmContainer::new(FilmProfileKind::KodakEktar100, 1.6, true);
        film.set_white_point(auto_white_point(&src));
        let filter = FilmFilter::new(film);

        let replayed = filter_from_action(&filter.filter_action()).unwrap();
        let ctx = FilterContext::detached();
        let a = run_filter(&filter, &src, &ctx).unwrap().into_buffer().unwrap();
        let b = run_filter(&replayed, &src, &ctx).unwrap().into_buffer().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_auto_white_point_finds_film_base() {
        // Mostly image content, with a thin unexposed border at the base color.
        let mut src = synthetic_negative(50, 50, BitDepth::U8).unwrap();
        let base = Color::new(240, 200, 170, 255, false);
        for i in 0..50 {
            src.set_pixel(i, 0, base).unwrap();
            src.set_pixel(i, 49, base).unwrap();
        }
        let wp = auto_white_point(&src);
        for channel in Channel::COLORS {
            let found = wp.component(channel).unwrap();
            let expected = base.component(channel).unwrap();
            assert!((found - expected).abs() <= 1, "{channel}: {found} vs {expected}");
        }
    }
}
