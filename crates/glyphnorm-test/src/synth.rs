//! Synthetic drawings
//!
//! Builders that produce RGB rasters resembling a drawing surface: a
//! uniform background with filled rectangles and thick strokes on top.
//! Each builder takes a raster and returns a new one.

use glyphnorm_core::{Color, PixelFormat, Raster};

/// A blank RGB drawing surface of the given color.
///
/// # Panics
///
/// Panics if either dimension is zero.
pub fn canvas(width: u32, height: u32, color: Color) -> Raster {
    Raster::new_filled(width, height, PixelFormat::Rgb24, color)
        .unwrap_or_else(|e| panic!("cannot build {}x{} canvas: {}", width, height, e))
}

/// Fill the rectangle with origin `(x, y)` and size `w x h`.
///
/// Parts of the rectangle outside the raster are ignored.
pub fn fill_rect(raster: &Raster, x: u32, y: u32, w: u32, h: u32, color: Color) -> Raster {
    let mut out = raster.to_mut();
    let x_end = x.saturating_add(w).min(out.width());
    let y_end = y.saturating_add(h).min(out.height());
    for yy in y..y_end {
        for xx in x..x_end {
            out.set_rgb_unchecked(xx, yy, color);
        }
    }
    out.into()
}

/// Draw a straight stroke from `from` to `to` with a square pen of side
/// `thickness`, centered on each point of the line.
pub fn stroke(
    raster: &Raster,
    from: (u32, u32),
    to: (u32, u32),
    thickness: u32,
    color: Color,
) -> Raster {
    let mut out = raster.to_mut();
    let (w, h) = (out.width() as i64, out.height() as i64);
    let (x0, y0) = (from.0 as i64, from.1 as i64);
    let (x1, y1) = (to.0 as i64, to.1 as i64);
    let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1);
    let half = thickness.max(1) as i64 / 2;
    let side = thickness.max(1) as i64;

    for i in 0..=steps {
        let cx = x0 + ((x1 - x0) * i + steps / 2 * (x1 - x0).signum()) / steps;
        let cy = y0 + ((y1 - y0) * i + steps / 2 * (y1 - y0).signum()) / steps;
        for py in cy - half..cy - half + side {
            for px in cx - half..cx - half + side {
                if (0..w).contains(&px) && (0..h).contains(&py) {
                    out.set_rgb_unchecked(px as u32, py as u32, color);
                }
            }
        }
    }
    out.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rect_clips() {
        let raster = fill_rect(&canvas(4, 4, Color::WHITE), 2, 3, 10, 10, Color::BLACK);
        assert_eq!(raster.get_rgb(1, 3), Some(Color::WHITE));
        assert_eq!(raster.get_rgb(2, 3), Some(Color::BLACK));
        assert_eq!(raster.get_rgb(3, 3), Some(Color::BLACK));
        assert_eq!(raster.get_rgb(3, 2), Some(Color::WHITE));
    }

    #[test]
    fn test_builders_leave_input_untouched() {
        let base = canvas(5, 5, Color::WHITE);
        let _ = fill_rect(&base, 0, 0, 5, 5, Color::BLACK);
        assert!(base.data().iter().all(|&s| s == 255));
    }

    #[test]
    fn test_stroke_endpoints_and_thickness() {
        let raster = stroke(&canvas(10, 10, Color::WHITE), (2, 2), (7, 2), 3, Color::BLACK);
        assert_eq!(raster.get_rgb(2, 2), Some(Color::BLACK));
        assert_eq!(raster.get_rgb(7, 2), Some(Color::BLACK));
        assert_eq!(raster.get_rgb(1, 1), Some(Color::BLACK));
        assert_eq!(raster.get_rgb(8, 3), Some(Color::BLACK));
        assert_eq!(raster.get_rgb(9, 2), Some(Color::WHITE));
        assert_eq!(raster.get_rgb(4, 4), Some(Color::WHITE));
    }

    #[test]
    fn test_stroke_diagonal() {
        let raster = stroke(&canvas(6, 6, Color::WHITE), (0, 0), (5, 5), 1, Color::BLACK);
        for i in 0..6 {
            assert_eq!(raster.get_rgb(i, i), Some(Color::BLACK));
        }
        assert_eq!(raster.get_rgb(5, 0), Some(Color::WHITE));
    }
}
