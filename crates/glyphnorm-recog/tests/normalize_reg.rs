//! Glyph normalization regression test
//!
//! 手書き画像の正規化パイプライン(検出・切り出し・縮小・パディング)をテスト。
//!
//! テストの構成:
//!   Test 1: 100x100 の中央正方形 -- 出力の上下左右対称性
//!   Test 2: 単一画素 -- 検出範囲とマージン
//!   Test 3: 横長・縦長ストローク -- 28x28 と縦横比
//!   Test 4: 背景のみ -- EmptyDrawing
//!   Test 5: 同一入力の再実行 -- ビット一致
//!   Test 6: 背景色の指定

use glyphnorm_core::{Color, Interval};
use glyphnorm_io::ImageFormat;
use glyphnorm_recog::{InputVector, NormalizeOptions, RecogError, detect_bounds, normalize};
use glyphnorm_test::{RegParams, synth};

/// Test 1: centered 40x40 square on a 100x100 canvas
///
/// The ink entries of the vector must mirror around the canvas center
/// both horizontally and vertically.
#[test]
fn test_1_centered_square_symmetry() {
    let mut rp = RegParams::new("normalize_1_square");

    let drawing = synth::fill_rect(
        &synth::canvas(100, 100, Color::WHITE),
        30,
        30,
        40,
        40,
        Color::BLACK,
    );
    let result = normalize(&drawing, &NormalizeOptions::default()).expect("normalize");
    rp.compare_values(28.0, result.glyph.width() as f64, 0.0);
    rp.compare_values(28.0, result.glyph.height() as f64, 0.0);
    rp.compare_values(20.0, result.scaled.width() as f64, 0.0);
    rp.compare_values(20.0, result.scaled.height() as f64, 0.0);
    rp.compare_values(42.0, result.crop.width() as f64, 0.0);

    let vector = InputVector::from_glyph(&result);
    let mirrored_x: Vec<f32> = (0..28)
        .flat_map(|y| (0..28).rev().map(move |x| (x, y)))
        .map(|(x, y)| vector.get(x, y).unwrap_or(0.0))
        .collect();
    let mirrored_y: Vec<f32> = (0..28)
        .rev()
        .flat_map(|y| (0..28).map(move |x| (x, y)))
        .map(|(x, y)| vector.get(x, y).unwrap_or(0.0))
        .collect();
    rp.compare_vectors(vector.as_slice(), &mirrored_x, 1.5 / 255.0);
    rp.compare_vectors(vector.as_slice(), &mirrored_y, 1.5 / 255.0);

    // padding rows and columns carry no ink
    let border_ink: f32 = (0..28)
        .flat_map(|i| [(i, 0), (i, 27), (0, i), (27, i)])
        .map(|(x, y)| vector.get(x, y).unwrap_or(1.0))
        .sum();
    rp.compare_values(0.0, border_ink as f64, 0.0);
    rp.compare_values(1.0, vector.get(14, 14).unwrap_or(0.0) as f64, 0.0);

    rp.write_raster_and_check(&result.glyph, ImageFormat::Png)
        .expect("write glyph");
    assert!(rp.cleanup());
}

/// Test 2: a single ink pixel
#[test]
fn test_2_single_pixel() {
    let mut rp = RegParams::new("normalize_2_single_pixel");

    for &(x, y) in &[(17u32, 9u32), (0, 0), (49, 49)] {
        let drawing = synth::fill_rect(&synth::canvas(50, 50, Color::WHITE), x, y, 1, 1, Color::BLACK);
        let bounds = detect_bounds(&drawing, Color::WHITE).expect("bounds");
        rp.compare_values(y as f64, bounds.rows.start() as f64, 0.0);
        rp.compare_values(y as f64, bounds.rows.end() as f64, 0.0);
        rp.compare_values(x as f64, bounds.cols.start() as f64, 0.0);
        rp.compare_values(x as f64, bounds.cols.end() as f64, 0.0);

        let result = normalize(&drawing, &NormalizeOptions::default()).expect("normalize");
        let expected_cols = Interval::new(x.saturating_sub(1), (x + 1).min(49)).expect("interval");
        let expected_rows = Interval::new(y.saturating_sub(1), (y + 1).min(49)).expect("interval");
        rp.compare_values(1.0, (result.crop.cols == expected_cols) as u8 as f64, 0.0);
        rp.compare_values(1.0, (result.crop.rows == expected_rows) as u8 as f64, 0.0);
        rp.compare_values(28.0, result.glyph.width() as f64, 0.0);
        rp.compare_values(28.0, result.glyph.height() as f64, 0.0);
    }
    assert!(rp.cleanup());
}

/// Test 3: wide and tall strokes keep their aspect ratio
#[test]
fn test_3_wide_and_tall_strokes() {
    let mut rp = RegParams::new("normalize_3_strokes");

    // the 5 pixel pen spans x 18..=82, y 38..=42; the margin adds 2 each way
    let wide = synth::stroke(&synth::canvas(120, 80, Color::WHITE), (20, 40), (80, 40), 5, Color::BLACK);
    let result = normalize(&wide, &NormalizeOptions::default()).expect("normalize wide");
    rp.compare_values(67.0, result.crop.width() as f64, 0.0);
    rp.compare_values(7.0, result.crop.height() as f64, 0.0);
    rp.compare_values(20.0, result.scaled.width() as f64, 0.0);
    rp.compare_values(2.0, result.scaled.height() as f64, 0.0);
    rp.compare_values(13.0, result.padding.top as f64, 0.0);
    rp.compare_values(13.0, result.padding.bottom as f64, 0.0);
    rp.compare_values(28.0, result.glyph.height() as f64, 0.0);
    rp.write_raster_and_check(&result.glyph, ImageFormat::Png)
        .expect("write wide glyph");

    let tall = synth::stroke(&synth::canvas(80, 120, Color::WHITE), (40, 10), (40, 100), 3, Color::BLACK);
    let result = normalize(&tall, &NormalizeOptions::default()).expect("normalize tall");
    rp.compare_values(95.0, result.crop.height() as f64, 0.0);
    rp.compare_values(5.0, result.crop.width() as f64, 0.0);
    rp.compare_values(20.0, result.scaled.height() as f64, 0.0);
    rp.compare_values(1.0, result.scaled.width() as f64, 0.0);
    // 27 columns of padding: the odd one goes left
    rp.compare_values(14.0, result.padding.left as f64, 0.0);
    rp.compare_values(13.0, result.padding.right as f64, 0.0);
    rp.compare_values(28.0, result.glyph.width() as f64, 0.0);
    rp.write_raster_and_check(&result.glyph, ImageFormat::Png)
        .expect("write tall glyph");

    assert!(rp.cleanup());
}

/// Test 4: a blank canvas is an empty drawing, never a spurious interval
#[test]
fn test_4_empty_drawing() {
    let mut rp = RegParams::new("normalize_4_empty");

    let blank = synth::canvas(64, 48, Color::WHITE);
    let empty = matches!(detect_bounds(&blank, Color::WHITE), Err(RecogError::EmptyDrawing));
    rp.compare_values(1.0, empty as u8 as f64, 0.0);
    let err = normalize(&blank, &NormalizeOptions::default()).expect_err("blank canvas");
    rp.compare_values(1.0, err.is_empty_drawing() as u8 as f64, 0.0);
    assert!(rp.cleanup());
}

/// Test 5: running twice yields bit-identical vectors
#[test]
fn test_5_idempotence() {
    let mut rp = RegParams::new("normalize_5_idempotence");

    let base = synth::canvas(200, 200, Color::WHITE);
    let seven = synth::stroke(&base, (50, 40), (150, 40), 12, Color::BLACK);
    let seven = synth::stroke(&seven, (150, 40), (90, 170), 12, Color::BLACK);

    let options = NormalizeOptions::default();
    let first = InputVector::from_glyph(&normalize(&seven, &options).expect("first run"));
    let second = InputVector::from_glyph(&normalize(&seven, &options).expect("second run"));
    rp.compare_values(784.0, first.len() as f64, 0.0);
    rp.compare_vectors(first.as_slice(), second.as_slice(), 0.0);

    if rp.display() {
        eprintln!("{}", first.to_ascii());
    }
    assert!(rp.cleanup());
}

/// Test 6: a non-white surface with a configured background
#[test]
fn test_6_custom_background() {
    let mut rp = RegParams::new("normalize_6_background");

    let bg = Color::new(230, 230, 200);
    let drawing = synth::fill_rect(&synth::canvas(60, 60, bg), 10, 20, 30, 15, Color::BLACK);

    // against white every line differs, so the whole surface is "ink"
    let white_bounds = detect_bounds(&drawing, Color::WHITE).expect("bounds vs white");
    rp.compare_values(60.0, white_bounds.width() as f64, 0.0);

    let options = NormalizeOptions::new().with_background(bg);
    let result = normalize(&drawing, &options).expect("normalize");
    rp.compare_values(30.0, result.bounds.width() as f64, 0.0);
    rp.compare_values(15.0, result.bounds.height() as f64, 0.0);
    // padding takes the surface color
    rp.compare_values(
        1.0,
        (result.glyph.get_rgb(0, 0) == Some(bg)) as u8 as f64,
        0.0,
    );
    assert!(rp.cleanup());
}
