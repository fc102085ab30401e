//! Image scaling operations
//!
//! Provides various scaling algorithms including:
//! - Linear interpolation (for upscaling)
//! - Sampling (nearest neighbor)
//! - Area mapping (for downscaling with anti-aliasing)
//!
//! All methods map pixel centers, so a horizontally or vertically
//! symmetric source stays symmetric after resampling.

use crate::{TransformError, TransformResult};
use glyphnorm_core::Raster;
use std::fmt;
use std::str::FromStr;

/// Scaling method to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMethod {
    /// Nearest-neighbor sampling (fastest, pixelated results)
    Sampling,
    /// Bilinear interpolation (good for upscaling)
    Linear,
    /// Area mapping (best for downscaling, anti-aliased)
    AreaMap,
    /// Area mapping when either axis shrinks, linear otherwise
    #[default]
    Auto,
}

impl ScaleMethod {
    /// Resolve [`ScaleMethod::Auto`] for the given scale factors.
    pub fn resolve(self, scale_x: f32, scale_y: f32) -> ScaleMethod {
        match self {
            ScaleMethod::Auto if scale_x < 1.0 || scale_y < 1.0 => ScaleMethod::AreaMap,
            ScaleMethod::Auto => ScaleMethod::Linear,
            other => other,
        }
    }
}

impl fmt::Display for ScaleMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScaleMethod::Sampling => "sampling",
            ScaleMethod::Linear => "linear",
            ScaleMethod::AreaMap => "area-map",
            ScaleMethod::Auto => "auto",
        };
        f.write_str(name)
    }
}

impl FromStr for ScaleMethod {
    type Err = TransformError;

    fn from_str(s: &str) -> TransformResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sampling" | "nearest" => Ok(ScaleMethod::Sampling),
            "linear" | "bilinear" => Ok(ScaleMethod::Linear),
            "area-map" | "areamap" | "area" => Ok(ScaleMethod::AreaMap),
            "auto" => Ok(ScaleMethod::Auto),
            other => Err(TransformError::InvalidParameters(format!(
                "unknown scale method '{other}'"
            ))),
        }
    }
}

/// Scale an image by the given factors
///
/// Output dimensions are `round(width * scale_x)` by
/// `round(height * scale_y)`, at least 1 pixel each.
///
/// # Arguments
/// * `raster` - Input image
/// * `scale_x` - Horizontal scale factor (e.g., 2.0 = double width)
/// * `scale_y` - Vertical scale factor
/// * `method` - Scaling algorithm to use
pub fn scale(
    raster: &Raster,
    scale_x: f32,
    scale_y: f32,
    method: ScaleMethod,
) -> TransformResult<Raster> {
    check_factor(scale_x)?;
    check_factor(scale_y)?;
    let width = scaled_len(raster.width(), scale_x);
    let height = scaled_len(raster.height(), scale_y);
    resample(raster, width, height, method.resolve(scale_x, scale_y))
}

/// Scale an image to a specific size
///
/// # Arguments
/// * `raster` - Input image
/// * `width` - Target width (0 to maintain aspect ratio)
/// * `height` - Target height (0 to maintain aspect ratio)
/// * `method` - Scaling algorithm to use
pub fn scale_to_size(
    raster: &Raster,
    width: u32,
    height: u32,
    method: ScaleMethod,
) -> TransformResult<Raster> {
    let (w, h) = raster.dimensions();
    let (tw, th) = match (width, height) {
        (0, 0) => {
            return Err(TransformError::InvalidParameters(
                "target width and height are both 0".to_string(),
            ));
        }
        (0, th) => (scaled_len(w, th as f32 / h as f32), th),
        (tw, 0) => (tw, scaled_len(h, tw as f32 / w as f32)),
        (tw, th) => (tw, th),
    };
    let scale_x = tw as f32 / w as f32;
    let scale_y = th as f32 / h as f32;
    resample(raster, tw, th, method.resolve(scale_x, scale_y))
}

/// Scale an image using nearest-neighbor sampling
///
/// # Arguments
/// * `raster` - Input image
/// * `scale_x` - Horizontal scale factor
/// * `scale_y` - Vertical scale factor
pub fn scale_by_sampling(raster: &Raster, scale_x: f32, scale_y: f32) -> TransformResult<Raster> {
    scale(raster, scale_x, scale_y, ScaleMethod::Sampling)
}

fn check_factor(factor: f32) -> TransformResult<()> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(TransformError::InvalidScaleFactor(format!(
            "{factor} (must be finite and > 0)"
        )));
    }
    Ok(())
}

fn scaled_len(len: u32, factor: f32) -> u32 {
    ((len as f64 * factor as f64).round() as u32).max(1)
}

fn resample(raster: &Raster, width: u32, height: u32, method: ScaleMethod) -> TransformResult<Raster> {
    if (width, height) == raster.dimensions() {
        return Ok(raster.deep_clone());
    }
    let data = match method {
        ScaleMethod::Sampling => sample_nearest(raster, width, height),
        ScaleMethod::Linear => sample_linear(raster, width, height),
        ScaleMethod::AreaMap | ScaleMethod::Auto => sample_area(raster, width, height),
    };
    Ok(Raster::from_samples(width, height, raster.format(), data)?)
}

/// Source index whose pixel center is nearest to destination pixel `d`.
fn nearest_index(d: u32, src_len: u32, dst_len: u32) -> usize {
    let pos = (d as f64 + 0.5) * src_len as f64 / dst_len as f64;
    (pos as usize).min(src_len as usize - 1)
}

fn sample_nearest(src: &Raster, width: u32, height: u32) -> Vec<u8> {
    let spp = src.samples() as usize;
    let xmap: Vec<usize> = (0..width)
        .map(|dx| nearest_index(dx, src.width(), width))
        .collect();

    let mut out = Vec::with_capacity(width as usize * height as usize * spp);
    for dy in 0..height {
        let row = src.row_data(nearest_index(dy, src.height(), height) as u32);
        for &sx in &xmap {
            out.extend_from_slice(&row[sx * spp..(sx + 1) * spp]);
        }
    }
    out
}

/// Two neighboring source indices and the weight of the second.
#[derive(Debug, Clone, Copy)]
struct LinearTap {
    i0: usize,
    i1: usize,
    t: f32,
}

fn linear_taps(src_len: u32, dst_len: u32) -> Vec<LinearTap> {
    let ratio = src_len as f64 / dst_len as f64;
    let last = (src_len - 1) as f64;
    (0..dst_len)
        .map(|d| {
            let pos = ((d as f64 + 0.5) * ratio - 0.5).clamp(0.0, last);
            let i0 = pos.floor() as usize;
            LinearTap {
                i0,
                i1: (i0 + 1).min(src_len as usize - 1),
                t: (pos - i0 as f64) as f32,
            }
        })
        .collect()
}

fn sample_linear(src: &Raster, width: u32, height: u32) -> Vec<u8> {
    let spp = src.samples() as usize;
    let xtaps = linear_taps(src.width(), width);
    let ytaps = linear_taps(src.height(), height);

    let mut out = Vec::with_capacity(width as usize * height as usize * spp);
    for ty in &ytaps {
        let r0 = src.row_data(ty.i0 as u32);
        let r1 = src.row_data(ty.i1 as u32);
        for tx in &xtaps {
            for c in 0..spp {
                let p00 = r0[tx.i0 * spp + c] as f32;
                let p01 = r0[tx.i1 * spp + c] as f32;
                let p10 = r1[tx.i0 * spp + c] as f32;
                let p11 = r1[tx.i1 * spp + c] as f32;
                let top = p00 + (p01 - p00) * tx.t;
                let bot = p10 + (p11 - p10) * tx.t;
                let v = top + (bot - top) * ty.t;
                out.push((v + 0.5).clamp(0.0, 255.0) as u8);
            }
        }
    }
    out
}

/// Source indices overlapped by each destination pixel, with overlap lengths.
fn area_weights(src_len: u32, dst_len: u32) -> Vec<Vec<(usize, f64)>> {
    let ratio = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|d| {
            let lo = d as f64 * ratio;
            let hi = ((d + 1) as f64 * ratio).min(src_len as f64);
            let first = (lo.floor() as usize).min(src_len as usize - 1);
            let end = (hi.ceil() as usize).clamp(first + 1, src_len as usize);
            let taps: Vec<(usize, f64)> = (first..end)
                .filter_map(|i| {
                    let w = hi.min((i + 1) as f64) - lo.max(i as f64);
                    (w > 1e-9).then_some((i, w))
                })
                .collect();
            if taps.is_empty() {
                vec![(first, 1.0)]
            } else {
                taps
            }
        })
        .collect()
}

fn sample_area(src: &Raster, width: u32, height: u32) -> Vec<u8> {
    let spp = src.samples() as usize;
    let xw = area_weights(src.width(), width);
    let yw = area_weights(src.height(), height);

    let mut out = Vec::with_capacity(width as usize * height as usize * spp);
    let mut acc = vec![0f64; spp];
    for ytaps in &yw {
        for xtaps in &xw {
            acc.iter_mut().for_each(|a| *a = 0.0);
            let mut total = 0f64;
            for &(sy, wy) in ytaps {
                let row = src.row_data(sy as u32);
                for &(sx, wx) in xtaps {
                    let w = wy * wx;
                    total += w;
                    for (c, a) in acc.iter_mut().enumerate() {
                        *a += row[sx * spp + c] as f64 * w;
                    }
                }
            }
            for a in &acc {
                out.push((a / total + 0.5).clamp(0.0, 255.0) as u8);
            }
        }
    }
    out
}
