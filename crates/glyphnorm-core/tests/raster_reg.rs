//! Raster regression test
//!
//! ラスタの生成・切り出し・枠追加・行列和をテスト。

use glyphnorm_core::{Color, Interval, PixelFormat, Raster};
use glyphnorm_test::{RegParams, synth};

#[test]
fn raster_reg() {
    let mut rp = RegParams::new("raster");

    let base = synth::fill_rect(&synth::canvas(40, 30, Color::WHITE), 10, 5, 8, 12, Color::BLACK);

    // --- Test 1: row and column sums of pure background lines ---
    let bg_row = base.row_channel_sums(0).expect("row 0");
    rp.compare_values((40 * 255) as f64, bg_row[0] as f64, 0.0);
    let bg_col = base.column_channel_sums(0).expect("col 0");
    rp.compare_values((30 * 255) as f64, bg_col[2] as f64, 0.0);

    // --- Test 2: sums of an inked row and column ---
    let ink_row = base.row_channel_sums(5).expect("row 5");
    rp.compare_values((32 * 255) as f64, ink_row[1] as f64, 0.0);
    let ink_col = base.column_channel_sums(10).expect("col 10");
    rp.compare_values((18 * 255) as f64, ink_col[0] as f64, 0.0);

    // --- Test 3: clip by intervals matches clip by rectangle ---
    let rows = Interval::new(5, 16).expect("rows");
    let cols = Interval::new(10, 17).expect("cols");
    let by_interval = base.clip_intervals(rows, cols).expect("clip_intervals");
    let by_rect = base.clip_rectangle(10, 5, 8, 12).expect("clip_rectangle");
    rp.compare_raster(&by_interval, &by_rect);
    let all_ink = by_rect.data().iter().all(|&s| s == 0);
    rp.compare_values(1.0, all_ink as u8 as f64, 0.0);

    // --- Test 4: borders then clip restores the source ---
    let bordered = by_rect
        .add_border_general(3, 4, 5, 6, Color::WHITE)
        .expect("add_border_general");
    rp.compare_values(15.0, bordered.width() as f64, 0.0);
    rp.compare_values(23.0, bordered.height() as f64, 0.0);
    let restored = bordered.clip_rectangle(3, 5, 8, 12).expect("clip back");
    rp.compare_raster(&by_rect, &restored);

    // --- Test 5: copy on write ---
    let shared = base.clone();
    rp.compare_values(2.0, base.ref_count() as f64, 0.0);
    let mut owned = shared.to_mut();
    owned.set_rgb(0, 0, Color::BLACK).expect("set");
    rp.compare_values(1.0, (base.get_rgb(0, 0) == Some(Color::WHITE)) as u8 as f64, 0.0);

    // --- Test 6: gray conversion keeps dimensions ---
    let gray = base.to_gray();
    rp.compare_values(1.0, (gray.format() == PixelFormat::Gray8) as u8 as f64, 0.0);
    rp.compare_values(1.0, (gray.dimensions() == base.dimensions()) as u8 as f64, 0.0);
    rp.compare_values(0.0, gray.sizes_equal(&base) as u8 as f64, 0.0);
    let single = Raster::new(1, 1, PixelFormat::Gray8).expect("1x1");
    rp.compare_values(0.0, single.data()[0] as f64, 0.0);

    assert!(rp.cleanup());
}
