//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use glyphnorm_core::Raster;
use glyphnorm_io::ImageFormat;
use std::fs;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - write intermediate rasters, no comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the state of a regression test: its name, the running check
/// index, the mode, and every failure recorded so far. Checks never panic;
/// call [`RegParams::cleanup`] at the end and assert on its result.
pub struct RegParams {
    /// Name of the test (e.g., "normalize")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode comes from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ))
        } else {
            true
        }
    }

    /// Compare two float vectors element by element
    ///
    /// Lengths must match exactly; elements may differ by at most `delta`.
    pub fn compare_vectors(&mut self, expected: &[f32], actual: &[f32], delta: f32) -> bool {
        self.index += 1;

        if expected.len() != actual.len() {
            return self.fail(format!(
                "Failure in {}_reg: vector comparison for index {} - length {} vs {}",
                self.test_name,
                self.index,
                expected.len(),
                actual.len()
            ));
        }

        let mismatch = expected
            .iter()
            .zip(actual)
            .position(|(e, a)| (e - a).abs() > delta);
        match mismatch {
            Some(i) => self.fail(format!(
                "Failure in {}_reg: vector comparison for index {} - element {}: \
                 expected {}, actual {}, allowed delta {}",
                self.test_name, self.index, i, expected[i], actual[i], delta
            )),
            None => true,
        }
    }

    /// Compare two rasters for exact equality
    ///
    /// Dimensions, pixel format and every sample must match.
    pub fn compare_raster(&mut self, raster1: &Raster, raster2: &Raster) -> bool {
        self.index += 1;

        if !raster1.sizes_equal(raster2) || raster1.format() != raster2.format() {
            return self.fail(format!(
                "Failure in {}_reg: raster comparison for index {} - \
                 {}x{} {:?} vs {}x{} {:?}",
                self.test_name,
                self.index,
                raster1.width(),
                raster1.height(),
                raster1.format(),
                raster2.width(),
                raster2.height(),
                raster2.format()
            ));
        }

        for y in 0..raster1.height() {
            if raster1.row_data(y) != raster2.row_data(y) {
                let x = raster1
                    .row_data(y)
                    .iter()
                    .zip(raster2.row_data(y))
                    .position(|(a, b)| a != b)
                    .unwrap_or(0) as u32
                    / raster1.samples();
                return self.fail(format!(
                    "Failure in {}_reg: raster comparison for index {} - pixel mismatch at ({}, {})",
                    self.test_name, self.index, x, y
                ));
            }
        }

        true
    }

    /// Compare two byte strings
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            self.fail(format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            ))
        } else {
            true
        }
    }

    /// Write a raster and check it against its golden counterpart
    ///
    /// - Generate: writes the golden file.
    /// - Compare: compares with the golden file when one exists; a missing
    ///   golden file is reported but does not fail the test.
    /// - Display: writes the raster under `tests/regout/`.
    pub fn write_raster_and_check(&mut self, raster: &Raster, format: ImageFormat) -> TestResult<()> {
        self.index += 1;
        let ext = format.extension();

        match self.mode {
            RegTestMode::Generate => {
                let golden_path = self.golden_path(ext);
                write_raster(raster, &golden_dir(), &golden_path, format)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                let golden_path = self.golden_path(ext);
                if !Path::new(&golden_path).exists() {
                    eprintln!("No golden file for {}_reg index {}, skipped", self.test_name, self.index);
                    return Ok(());
                }
                let golden = glyphnorm_io::read_image(&golden_path).map_err(|e| {
                    TestError::RasterLoad {
                        path: golden_path.clone(),
                        message: e.to_string(),
                    }
                })?;
                let same = golden.sizes_equal(raster)
                    && golden.format() == raster.format()
                    && golden.data() == raster.data();
                if !same {
                    let msg = format!(
                        "Failure in {}_reg, index {}: raster differs from {}",
                        self.test_name, self.index, golden_path
                    );
                    self.fail(msg);
                }
            }
            RegTestMode::Display => {
                let local_path = format!(
                    "{}/{}.{:02}.{}",
                    regout_dir(),
                    self.test_name,
                    self.index,
                    ext
                );
                write_raster(raster, &regout_dir(), &local_path, format)?;
                eprintln!("Wrote: {}", local_path);
            }
        }

        Ok(())
    }

    fn golden_path(&self, ext: &str) -> String {
        format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        )
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

fn write_raster(raster: &Raster, dir: &str, path: &str, format: ImageFormat) -> TestResult<()> {
    fs::create_dir_all(dir)?;
    glyphnorm_io::write_image(raster, path, format).map_err(|e| TestError::RasterWrite {
        path: path.to_string(),
        message: e.to_string(),
    })
}
