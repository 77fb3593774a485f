//! Report setting in TOML. Every field is optional in the file.

use errors::*;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use toml;

/// Common locations of a sans-serif TTF on Linux and macOS.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

/// The report setting.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Setting {
    /// Directory receiving every chart and table.
    pub output_dir: PathBuf,

    /// Path to the detection counts (CSV). Missing is fine.
    pub metrics_path: PathBuf,

    /// Dots per inch; figure sizes are given in inches.
    pub dpi: u32,

    /// TTF used for all chart text. Probed from system locations if unset.
    pub font_path: Option<PathBuf>,
}

impl Default for Setting {
    fn default() -> Self {
        Setting {
            output_dir: PathBuf::from("./graphs"),
            metrics_path: PathBuf::from("performance_metrics.csv"),
            dpi: 300,
            font_path: None,
        }
    }
}

impl Setting {
    /// Initialize from a file.
    pub fn init<P: AsRef<Path>>(path: P) -> Result<Setting> {
        let mut file = File::open(path.as_ref())
            .chain_err(|| format!("no setting file {:?}", path.as_ref()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Setting::parse(&contents)
    }

    /// Parses a setting from TOML text.
    pub fn parse(contents: &str) -> Result<Setting> {
        let setting: Setting = toml::from_str(contents)?;
        debug!("loaded setting {:?}", setting);
        Ok(setting)
    }

    /// Returns the font to use: the configured one, or the first system
    /// candidate that exists.
    pub fn locate_font(&self) -> Option<PathBuf> {
        if let Some(ref path) = self.font_path {
            return Some(path.clone());
        }
        FONT_CANDIDATES
            .iter()
            .map(PathBuf::from)
            .find(|p| p.is_file())
    }
}
