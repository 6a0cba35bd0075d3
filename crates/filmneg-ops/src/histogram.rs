//! Per-channel sample histograms.
//!
//! The luminosity bin of a pixel is `max(r, g, b)`.

use filmneg_core::{BitDepth, Channel, PixelBuffer, PixelData, CHANNELS};
use rayon::prelude::*;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Sample counts for the five logical channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    depth: BitDepth,
    pixels: u64,
    counts: [Vec<u64>; Channel::COUNT],
}

impl Histogram {
    /// Counts every sample of `buffer`.
    pub fn new(buffer: &PixelBuffer) -> Self {
        trace!(width = buffer.width(), height = buffer.height(), "histogram::new");
        let depth = buffer.bit_depth();
        let segments = depth.segments();
        let row_len = buffer.row_len();

        let empty = || -> [Vec<u64>; Channel::COUNT] { std::array::from_fn(|_| vec![0u64; segments]) };
        let merge = |mut a: [Vec<u64>; Channel::COUNT], b: [Vec<u64>; Channel::COUNT]| {
            for (da, db) in a.iter_mut().zip(b.iter()) {
                for (x, y) in da.iter_mut().zip(db) {
                    *x += y;
                }
            }
            a
        };

        let counts = match buffer.data() {
            PixelData::U8(d) => d
                .par_chunks(row_len)
                .fold(empty, |mut acc, row| {
                    count_row(&mut acc, row.chunks_exact(CHANNELS).map(widen_u8));
                    acc
                })
                .reduce(empty, merge),
            PixelData::U16(d) => d
                .par_chunks(row_len)
                .fold(empty, |mut acc, row| {
                    count_row(&mut acc, row.chunks_exact(CHANNELS).map(widen_u16));
                    acc
                })
                .reduce(empty, merge),
        };

        Self {
            depth,
            pixels: buffer.pixel_count() as u64,
            counts,
        }
    }

    /// Depth of the counted buffer.
    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    /// Number of counted pixels.
    pub fn pixel_count(&self) -> u64 {
        self.pixels
    }

    /// Pixels whose `channel` sample equals `level`.
    pub fn count(&self, channel: Channel, level: usize) -> u64 {
        self.counts[channel.index()].get(level).copied().unwrap_or(0)
    }

    /// All bins of one channel.
    pub fn bins(&self, channel: Channel) -> &[u64] {
        &self.counts[channel.index()]
    }

    /// Pixels whose sample lies in `start..=end`.
    pub fn range_count(&self, channel: Channel, start: usize, end: usize) -> u64 {
        let bins = self.bins(channel);
        let end = end.min(bins.len().saturating_sub(1));
        if start > end {
            return 0;
        }
        bins[start..=end].iter().sum()
    }
}

#[inline]
fn widen_u8(px: &[u8]) -> [usize; CHANNELS] {
    [px[0] as usize, px[1] as usize, px[2] as usize, px[3] as usize]
}

#[inline]
fn widen_u16(px: &[u16]) -> [usize; CHANNELS] {
    [px[0] as usize, px[1] as usize, px[2] as usize, px[3] as usize]
}

fn count_row(acc: &mut [Vec<u64>; Channel::COUNT], pixels: impl Iterator<Item = [usize; CHANNELS]>) {
    for [r, g, b, a] in pixels {
        acc[Channel::Luminosity.index()][r.max(g).max(b)] += 1;
        acc[Channel::Red.index()][r] += 1;
        acc[Channel::Green.index()][g] += 1;
        acc[Channel::Blue.index()][b] += 1;
        acc[Channel::Alpha.index()][a] += 1;
    }
}
