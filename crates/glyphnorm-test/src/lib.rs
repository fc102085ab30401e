//! glyphnorm-test - Regression test framework for glyphnorm
//!
//! This crate provides a small regression test harness supporting three
//! modes:
//!
//! - **Generate**: Write golden rasters for later comparison
//! - **Compare**: Compare results with golden rasters when present
//! - **Display**: Write intermediate rasters for visual inspection
//!
//! It also carries [`synth`], a set of builders for synthetic drawings,
//! so regression tests do not depend on checked-in image files.
//!
//! # Usage
//!
//! ```ignore
//! use glyphnorm_test::RegParams;
//!
//! let mut rp = RegParams::new("normalize");
//! rp.compare_values(28.0, glyph.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // glyphnorm-test is at crates/glyphnorm-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
