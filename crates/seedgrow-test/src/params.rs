//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use seedgrow_core::Pix;
use seedgrow_io::ImageFormat;
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
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    /// Parse mode from a string; anything unrecognized means compare
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the state of one regression test: its name, the index of the
/// current check, the mode, and every failure seen so far.
pub struct RegParams {
    /// Name of the test (e.g., "region_grow")
    pub test_name: String,
    /// Current test index (incremented before each test)
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

        if let Err(e) = ensure_dirs() {
            eprintln!("Warning: {}", e);
        }

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

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `actual` is within `delta` of `expected`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Compare two Pix images for exact equality
    ///
    /// Returns `true` if the images have the same size, depth and pixels.
    pub fn compare_pix(&mut self, pix1: &Pix, pix2: &Pix) -> bool {
        self.index += 1;

        if !pix1.sizes_equal(pix2) {
            self.fail(format!(
                "Failure in {}_reg: pix comparison for index {} - dimension mismatch \
                 ({}x{}x{} vs {}x{}x{})",
                self.test_name,
                self.index,
                pix1.width(),
                pix1.height(),
                pix1.depth().bits(),
                pix2.width(),
                pix2.height(),
                pix2.depth().bits()
            ));
            return false;
        }

        match pix1.count_pixel_diffs(pix2) {
            Ok(diff) if diff.n_diff == 0 => true,
            Ok(diff) => {
                self.fail(format!(
                    "Failure in {}_reg: pix comparison for index {} - {} pixels differ \
                     (max diff {})",
                    self.test_name, self.index, diff.n_diff, diff.max_diff
                ));
                false
            }
            Err(e) => {
                self.fail(format!(
                    "Failure in {}_reg: pix comparison for index {} - {}",
                    self.test_name, self.index, e
                ));
                false
            }
        }
    }

    /// Write a Pix to file and check against golden file
    ///
    /// The file is written to the regout directory as
    /// `<test_name>.<index>.<ext>`.
    pub fn write_pix_and_check(&mut self, pix: &Pix, format: ImageFormat) -> TestResult<()> {
        self.index += 1;

        let ext = format.extension();
        let local_path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            ext
        );

        seedgrow_io::write_image(pix, &local_path, format).map_err(|e| {
            TestError::ImageWrite {
                path: local_path.clone(),
                message: e.to_string(),
            }
        })?;

        self.check_file(&local_path)
    }

    /// Check a file against its golden counterpart
    ///
    /// In generate mode, copies the file to golden.
    /// In compare mode, compares with the golden file; a missing golden
    /// is a failure.
    /// In display mode, does nothing.
    fn check_file(&mut self, local_path: &str) -> TestResult<()> {
        let ext = Path::new(local_path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    self.fail(format!(
                        "Failure in {}_reg, index {}: golden file {} not found",
                        self.test_name, self.index, golden_path
                    ));
                    return Ok(());
                }

                let local_data = fs::read(local_path)?;
                let golden_data = fs::read(&golden_path)?;

                if local_data != golden_data && !same_image_files(local_path, &golden_path) {
                    self.fail(format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    ));
                }
            }
            RegTestMode::Display => {}
        }

        Ok(())
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

fn ensure_dirs() -> TestResult<()> {
    for dir in [golden_dir(), regout_dir()] {
        fs::create_dir_all(&dir).map_err(|e| TestError::DirectoryCreate {
            path: dir.clone(),
            message: e.to_string(),
        })?;
    }
    Ok(())
}

fn load_pix(path: &str) -> TestResult<Pix> {
    seedgrow_io::read_image(path).map_err(|e| TestError::ImageLoad {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// Compare two image files pixel-by-pixel
///
/// Encoders may produce different bytes for the same pixels, so files
/// that differ byte-wise can still hold the same image.
fn same_image_files(path1: &str, path2: &str) -> bool {
    match (load_pix(path1), load_pix(path2)) {
        (Ok(pix1), Ok(pix2)) => pix1.equals(&pix2),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedgrow_core::PixelDepth;

    #[test]
    fn test_mode_parse() {
        assert_eq!(RegTestMode::parse("generate"), RegTestMode::Generate);
        assert_eq!(RegTestMode::parse("DISPLAY"), RegTestMode::Display);
        assert_eq!(RegTestMode::parse(""), RegTestMode::Compare);
        assert_eq!(RegTestMode::parse("bogus"), RegTestMode::Compare);
    }

    #[test]
    fn test_compare_values_success() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_pix() {
        let a = Pix::from_gray_samples(2, 1, &[1, 2]).unwrap();
        let b = Pix::from_gray_samples(2, 1, &[1, 3]).unwrap();
        let mut rp = RegParams::new("test");
        assert!(rp.compare_pix(&a, &a.to_mut().into()));
        assert!(rp.is_success());
        assert!(!rp.compare_pix(&a, &b));
        assert!(!rp.compare_pix(&a, &Pix::new(2, 1, PixelDepth::Bit1).unwrap()));
        assert_eq!(rp.failures().len(), 2);
    }

    #[test]
    fn test_missing_golden_fails() {
        let mut rp = RegParams::new("missing_golden");
        rp.mode = RegTestMode::Compare;
        let golden = format!("{}/missing_golden_golden.01.png", golden_dir());
        let _ = fs::remove_file(&golden);

        let blank = Pix::new(8, 8, PixelDepth::Bit1).unwrap();
        rp.write_pix_and_check(&blank, ImageFormat::Png).unwrap();
        assert!(!rp.is_success());
        assert!(rp.failures()[0].contains("not found"));
        assert!(!Path::new(&golden).exists());
    }

    #[test]
    fn test_golden_mismatch_fails() {
        let mut generate = RegParams::new("golden_mismatch");
        generate.mode = RegTestMode::Generate;
        let blank = Pix::new(8, 8, PixelDepth::Bit1).unwrap();
        generate.write_pix_and_check(&blank, ImageFormat::Png).unwrap();
        assert!(generate.is_success());

        let mut rp = RegParams::new("golden_mismatch");
        rp.mode = RegTestMode::Compare;
        let mut pm = blank.to_mut();
        pm.set_pixel_unchecked(3, 3, 1);
        rp.write_pix_and_check(&pm.into(), ImageFormat::Png).unwrap();
        assert!(!rp.is_success());

        let mut same = RegParams::new("golden_mismatch");
        same.mode = RegTestMode::Compare;
        same.write_pix_and_check(&blank, ImageFormat::Png).unwrap();
        assert!(same.is_success());

        let _ = fs::remove_file(format!("{}/golden_mismatch_golden.01.png", golden_dir()));
    }
}
