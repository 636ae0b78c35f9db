//! Gradient color ramps baked into texture rows.

use crate::paint::ColorStop;
use crate::paint::gradient::sample_stops;

/// Texels per ramp row.
pub(super) const RAMP_WIDTH: u32 = 256;

/// Rows the ramp texture can hold in one frame.
pub(super) const MAX_RAMP_ROWS: u32 = 256;

/// One frame's gradient ramps, one RGBA8 row per distinct stop list.
///
/// Row `i` holds the stops sampled at `t = x / (RAMP_WIDTH - 1)`; the
/// fragment shader applies the spread mode and samples the row.
#[derive(Debug, Default)]
pub(super) struct GradientRamps {
    texels: Vec<[u8; 4]>,
    keys: Vec<Vec<ColorStop>>,
    warned_full: bool,
}

impl GradientRamps {
    pub fn clear(&mut self) {
        self.texels.clear();
        self.keys.clear();
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.keys.len() as u32
    }

    #[inline]
    pub fn texels(&self) -> &[[u8; 4]] {
        &self.texels
    }

    /// Returns the row holding `stops`, baking a new one if needed.
    ///
    /// `None` once [`MAX_RAMP_ROWS`] distinct ramps exist this frame.
    pub fn row_for(&mut self, stops: &[ColorStop]) -> Option<u32> {
        if let Some(i) = self.keys.iter().position(|k| k.as_slice() == stops) {
            return Some(i as u32);
        }
        if self.rows() >= MAX_RAMP_ROWS {
            if !self.warned_full {
                log::warn!(
                    "gradient ramp atlas full ({MAX_RAMP_ROWS} rows); extra gradients paint solid"
                );
                self.warned_full = true;
            }
            return None;
        }

        let last = (RAMP_WIDTH - 1) as f32;
        self.texels.extend((0..RAMP_WIDTH).map(|x| {
            let c = sample_stops(stops, x as f32 / last).clamped();
            [unorm8(c.r), unorm8(c.g), unorm8(c.b), unorm8(c.a)]
        }));
        self.keys.push(stops.to_vec());
        Some(self.rows() - 1)
    }
}

fn unorm8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
