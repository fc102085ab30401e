//! Glyph normalization
//!
//! Turns an arbitrary drawing into the canonical classifier layout: the
//! ink bounding box is cropped with a small margin, scaled so its longer
//! side equals the inner size, and centered on a square canvas filled
//! with the background color.
//!
//! Each stage is a free function taking a raster and returning a new one,
//! so stages can be run and tested in isolation. [`normalize`] chains them:
//!
//! ```text
//! source -> [prescale] -> detect_bounds -> expand -> crop_to_bounds
//!        -> scale_to_inner -> pad_to_canvas -> check
//! ```

use crate::bounds::{GlyphBounds, detect_bounds};
use crate::{RecogError, RecogResult};
use glyphnorm_core::{Color, Interval, PixelFormat, Raster};
use glyphnorm_transform::{ScaleMethod, scale_to_size};
use tracing::{debug, error};

/// Options for glyph normalization
///
/// The defaults reproduce the 28x28 MNIST layout: a 20 pixel glyph on
/// a white canvas with 4 pixels of padding.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOptions {
    /// Longer side of the scaled glyph (default: 20)
    pub inner_size: u32,

    /// Side of the square output canvas (default: 28)
    pub canvas_size: u32,

    /// Pixels added around the detected bounds before cropping (default: 1)
    pub margin: u32,

    /// Background color of the drawing surface (default: white)
    pub background: Color,

    /// Interpolation used to scale the crop (default: Auto)
    pub method: ScaleMethod,

    /// Resize the whole source to `n x n` before detection (default: None)
    pub prescale: Option<u32>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            inner_size: 20,
            canvas_size: 28,
            margin: 1,
            background: Color::WHITE,
            method: ScaleMethod::Auto,
            prescale: None,
        }
    }
}

impl NormalizeOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inner glyph size
    pub fn with_inner_size(mut self, size: u32) -> Self {
        self.inner_size = size;
        self
    }

    /// Set the canvas size
    pub fn with_canvas_size(mut self, size: u32) -> Self {
        self.canvas_size = size;
        self
    }

    /// Set the crop margin
    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the background color
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Set the scaling method
    pub fn with_method(mut self, method: ScaleMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the pre-detection resize
    pub fn with_prescale(mut self, size: Option<u32>) -> Self {
        self.prescale = size;
        self
    }

    /// Validate the options
    pub fn validate(&self) -> RecogResult<()> {
        if self.inner_size == 0 {
            return Err(RecogError::InvalidParameter(
                "inner_size must be positive".to_string(),
            ));
        }
        if self.inner_size > self.canvas_size {
            return Err(RecogError::InvalidParameter(format!(
                "inner_size {} exceeds canvas_size {}",
                self.inner_size, self.canvas_size
            )));
        }
        if self.prescale == Some(0) {
            return Err(RecogError::InvalidParameter(
                "prescale size must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate the options against the pixel format of a drawing.
    ///
    /// A grayscale drawing can only be compared with a gray background.
    pub fn validate_for(&self, format: PixelFormat) -> RecogResult<()> {
        self.validate()?;
        if format == PixelFormat::Gray8 && !self.background.is_gray() {
            return Err(RecogError::InvalidParameter(format!(
                "background {} is not gray but the drawing is grayscale",
                self.background
            )));
        }
        Ok(())
    }
}

/// Border added on each side of the scaled glyph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Padding {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

/// Result of normalizing one drawing
#[derive(Debug, Clone)]
pub struct NormalizedGlyph {
    /// The `canvas_size x canvas_size` output raster
    pub glyph: Raster,
    /// The crop after scaling, before padding
    pub scaled: Raster,
    /// Ink bounds as detected
    pub bounds: GlyphBounds,
    /// Bounds actually cropped (detected bounds plus margin)
    pub crop: GlyphBounds,
    /// Factor applied to the crop
    pub scale_factor: f32,
    /// Padding applied to the scaled crop
    pub padding: Padding,
}

/// Split the padding needed to grow `axis` pixels to `total` pixels.
///
/// Returns `(leading, trailing)`. An odd remainder goes to the leading
/// side (top or left).
///
/// # Errors
///
/// Returns [`RecogError::InvariantViolation`] if `axis > total`.
pub fn split_padding(total: u32, axis: u32) -> RecogResult<(u32, u32)> {
    let needed = total
        .checked_sub(axis)
        .ok_or_else(|| RecogError::InvariantViolation {
            context: format!("dimension {} exceeds canvas {}", axis, total),
        })?;
    let trailing = needed / 2;
    Ok((needed - trailing, trailing))
}

/// Crop a raster to `bounds`.
///
/// Bounds reaching past the raster are clipped to it.
///
/// # Errors
///
/// Returns [`RecogError::DegenerateCrop`] if nothing of `bounds` lies
/// inside the raster.
pub fn crop_to_bounds(raster: &Raster, bounds: &GlyphBounds) -> RecogResult<Raster> {
    let visible = |interval: Interval, dimension: u32| {
        let end = interval.end().min(dimension.saturating_sub(1));
        Interval::within(interval.start(), end, dimension).ok()
    };
    let rows = visible(bounds.rows, raster.height());
    let cols = visible(bounds.cols, raster.width());
    match (rows, cols) {
        (Some(rows), Some(cols)) => Ok(raster.clip_intervals(rows, cols)?),
        _ => Err(RecogError::DegenerateCrop {
            width: cols.map_or(0, |c| c.len()),
            height: rows.map_or(0, |r| r.len()),
        }),
    }
}

/// Scale a raster uniformly so its longer side is exactly `inner_size`.
///
/// The shorter side is rounded to the nearest pixel and is at least 1.
/// Returns the scaled raster and the scale factor.
pub fn scale_to_inner(
    raster: &Raster,
    inner_size: u32,
    method: ScaleMethod,
) -> RecogResult<(Raster, f32)> {
    if inner_size == 0 {
        return Err(RecogError::InvalidParameter(
            "inner_size must be positive".to_string(),
        ));
    }
    let (w, h) = raster.dimensions();
    let factor = inner_size as f32 / w.max(h) as f32;
    let short = |len: u32| ((len as f32 * factor).round() as u32).clamp(1, inner_size);
    let (tw, th) = if w >= h {
        (inner_size, short(h))
    } else {
        (short(w), inner_size)
    };
    let scaled = scale_to_size(raster, tw, th, method)?;
    Ok((scaled, factor))
}

/// Center a raster on a `canvas x canvas` square filled with `background`.
pub fn pad_to_canvas(
    raster: &Raster,
    canvas: u32,
    background: Color,
) -> RecogResult<(Raster, Padding)> {
    let (left, right) = split_padding(canvas, raster.width())?;
    let (top, bottom) = split_padding(canvas, raster.height())?;
    let padding = Padding {
        top,
        bottom,
        left,
        right,
    };
    let padded = raster.add_border_general(left, right, top, bottom, background)?;
    Ok((padded, padding))
}

/// Normalize a drawing.
///
/// # Errors
///
/// - [`RecogError::InvalidParameter`] for invalid options, or a non-gray
///   background with a grayscale drawing
/// - [`RecogError::EmptyDrawing`] if the drawing has no ink
/// - [`RecogError::DegenerateCrop`] if the crop collapses
/// - [`RecogError::InvariantViolation`] if the result is not
///   `canvas_size x canvas_size`
pub fn normalize(raster: &Raster, options: &NormalizeOptions) -> RecogResult<NormalizedGlyph> {
    options.validate_for(raster.format())?;
    let source = match options.prescale {
        Some(n) => scale_to_size(raster, n, n, options.method)?,
        None => raster.clone(),
    };
    let bounds = detect_bounds(&source, options.background)?;
    normalize_with_bounds(&source, bounds, options)
}

/// Normalize a drawing whose ink bounds are already known.
pub fn normalize_with_bounds(
    raster: &Raster,
    bounds: GlyphBounds,
    options: &NormalizeOptions,
) -> RecogResult<NormalizedGlyph> {
    options.validate_for(raster.format())?;
    let crop = bounds.expand(options.margin, raster.width(), raster.height());
    let cropped = crop_to_bounds(raster, &crop)?;
    let (scaled, scale_factor) = scale_to_inner(&cropped, options.inner_size, options.method)?;
    debug!(
        %bounds,
        %crop,
        scale_factor,
        scaled_width = scaled.width(),
        scaled_height = scaled.height(),
        "scaled glyph"
    );

    let (glyph, padding) = match pad_to_canvas(&scaled, options.canvas_size, options.background) {
        Ok(padded) => padded,
        Err(e @ RecogError::InvariantViolation { .. }) => {
            error!(
                %bounds,
                %crop,
                scale_factor,
                scaled_width = scaled.width(),
                scaled_height = scaled.height(),
                canvas = options.canvas_size,
                "glyph does not fit canvas: {}",
                e
            );
            return Err(e);
        }
        Err(e) => return Err(e),
    };

    let size = options.canvas_size;
    if glyph.dimensions() != (size, size) {
        let context = format!(
            "glyph is {}x{}, expected {}x{}",
            glyph.width(),
            glyph.height(),
            size,
            size
        );
        error!(
            %bounds,
            %crop,
            scale_factor,
            ?padding,
            "{}",
            context
        );
        return Err(RecogError::InvariantViolation { context });
    }
    debug!(?padding, "padded glyph");

    Ok(NormalizedGlyph {
        glyph,
        scaled,
        bounds,
        crop,
        scale_factor,
        padding,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawing(w: u32, h: u32, rect: (u32, u32, u32, u32)) -> Raster {
        let mut out = Raster::new_filled(w, h, PixelFormat::Rgb24, Color::WHITE)
            .unwrap()
            .to_mut();
        let (x0, y0, rw, rh) = rect;
        for y in y0..y0 + rh {
            for x in x0..x0 + rw {
                out.set_rgb(x, y, Color::BLACK).unwrap();
            }
        }
        out.into()
    }

    #[test]
    fn test_split_padding() {
        assert_eq!(split_padding(28, 20).unwrap(), (4, 4));
        assert_eq!(split_padding(28, 11).unwrap(), (9, 8));
        assert_eq!(split_padding(28, 28).unwrap(), (0, 0));
        assert_eq!(split_padding(28, 1).unwrap(), (14, 13));
        assert!(matches!(
            split_padding(28, 29),
            Err(RecogError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_options_validate() {
        assert!(NormalizeOptions::default().validate().is_ok());
        assert!(NormalizeOptions::new().with_inner_size(0).validate().is_err());
        assert!(
            NormalizeOptions::new()
                .with_inner_size(30)
                .validate()
                .is_err()
        );
        assert!(NormalizeOptions::new().with_prescale(Some(0)).validate().is_err());
        assert!(
            NormalizeOptions::new()
                .with_canvas_size(20)
                .with_inner_size(20)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_gray_drawing_needs_gray_background() {
        let options = NormalizeOptions::new().with_background(Color::new(240, 240, 230));
        assert!(options.validate_for(PixelFormat::Rgb24).is_ok());
        assert!(matches!(
            options.validate_for(PixelFormat::Gray8),
            Err(RecogError::InvalidParameter(_))
        ));

        let mut gray = Raster::new_filled(10, 10, PixelFormat::Gray8, Color::WHITE)
            .unwrap()
            .to_mut();
        gray.set_gray(4, 4, 0).unwrap();
        let gray: Raster = gray.into();
        assert!(matches!(
            normalize(&gray, &options),
            Err(RecogError::InvalidParameter(_))
        ));
        let glyph = normalize(&gray, &NormalizeOptions::default()).unwrap();
        assert_eq!(glyph.glyph.dimensions(), (28, 28));
    }

    #[test]
    fn test_crop_to_bounds_degenerate() {
        let raster = drawing(10, 10, (2, 2, 2, 2));
        let outside = GlyphBounds {
            rows: Interval::new(10, 12).unwrap(),
            cols: Interval::new(0, 3).unwrap(),
        };
        let err = crop_to_bounds(&raster, &outside).unwrap_err();
        assert!(matches!(
            err,
            RecogError::DegenerateCrop { width: 4, height: 0 }
        ));
        assert!(err.is_empty_drawing());

        // still outside after the 1 pixel margin
        let far = GlyphBounds {
            rows: Interval::new(11, 14).unwrap(),
            cols: Interval::new(0, 3).unwrap(),
        };
        let err = normalize_with_bounds(&raster, far, &NormalizeOptions::default()).unwrap_err();
        assert!(err.is_empty_drawing());
    }

    #[test]
    fn test_crop_to_bounds_clips() {
        let raster = drawing(10, 10, (2, 2, 2, 2));
        let bounds = GlyphBounds {
            rows: Interval::new(8, 15).unwrap(),
            cols: Interval::new(1, 2).unwrap(),
        };
        let cropped = crop_to_bounds(&raster, &bounds).unwrap();
        assert_eq!(cropped.dimensions(), (2, 2));
    }

    #[test]
    fn test_scale_to_inner_keeps_aspect() {
        let raster = Raster::new(40, 10, PixelFormat::Gray8).unwrap();
        let (scaled, factor) = scale_to_inner(&raster, 20, ScaleMethod::Auto).unwrap();
        assert_eq!(scaled.dimensions(), (20, 5));
        assert!((factor - 0.5).abs() < 1e-6);

        let raster = Raster::new(1, 3, PixelFormat::Gray8).unwrap();
        let (scaled, _) = scale_to_inner(&raster, 20, ScaleMethod::Auto).unwrap();
        assert_eq!(scaled.dimensions(), (7, 20));

        let raster = Raster::new(100, 1, PixelFormat::Gray8).unwrap();
        let (scaled, _) = scale_to_inner(&raster, 20, ScaleMethod::Auto).unwrap();
        assert_eq!(scaled.dimensions(), (20, 1));
    }

    #[test]
    fn test_pad_to_canvas_odd() {
        let raster = Raster::new(20, 7, PixelFormat::Gray8).unwrap();
        let (padded, padding) = pad_to_canvas(&raster, 28, Color::WHITE).unwrap();
        assert_eq!(padded.dimensions(), (28, 28));
        assert_eq!(
            padding,
            Padding {
                top: 11,
                bottom: 10,
                left: 4,
                right: 4
            }
        );
        assert_eq!(padded.get_rgb(0, 0), Some(Color::WHITE));
        assert_eq!(padded.get_rgb(4, 11), Some(Color::BLACK));
        assert_eq!(padded.get_rgb(4, 10), Some(Color::WHITE));
    }

    #[test]
    fn test_normalize_square() {
        let raster = drawing(100, 100, (30, 30, 40, 40));
        let result = normalize(&raster, &NormalizeOptions::default()).unwrap();
        assert_eq!(result.bounds.rows, Interval::new(30, 69).unwrap());
        assert_eq!(result.crop.cols, Interval::new(29, 70).unwrap());
        assert_eq!(result.scaled.dimensions(), (20, 20));
        assert_eq!(result.glyph.dimensions(), (28, 28));
        assert_eq!(
            result.padding,
            Padding {
                top: 4,
                bottom: 4,
                left: 4,
                right: 4
            }
        );
        assert_eq!(result.glyph.get_rgb(14, 14), Some(Color::BLACK));
        assert_eq!(result.glyph.get_rgb(3, 14), Some(Color::WHITE));
    }

    #[test]
    fn test_normalize_empty() {
        let raster = Raster::new_filled(50, 50, PixelFormat::Rgb24, Color::WHITE).unwrap();
        let err = normalize(&raster, &NormalizeOptions::default()).unwrap_err();
        assert!(err.is_empty_drawing());
    }

    #[test]
    fn test_normalize_invalid_options() {
        let raster = drawing(10, 10, (2, 2, 2, 2));
        let options = NormalizeOptions::new().with_inner_size(0);
        assert!(matches!(
            normalize(&raster, &options),
            Err(RecogError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_normalize_prescale() {
        let raster = drawing(280, 280, (100, 40, 80, 200));
        let options = NormalizeOptions::new().with_prescale(Some(28));
        let result = normalize(&raster, &options).unwrap();
        // ink occupies x 10..18, y 4..24 after the 10x reduction
        assert_eq!(result.bounds.rows, Interval::new(4, 23).unwrap());
        assert_eq!(result.bounds.cols, Interval::new(10, 17).unwrap());
        assert_eq!(result.glyph.dimensions(), (28, 28));
    }

    #[test]
    fn test_source_unchanged() {
        let raster = drawing(30, 30, (5, 5, 3, 9));
        let before = raster.data().to_vec();
        let _ = normalize(&raster, &NormalizeOptions::default()).unwrap();
        assert_eq!(raster.data(), before.as_slice());
    }
}
