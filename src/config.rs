//! Page-level configuration.
//!
//! Every size here is relative, in percent of the yardstick of the
//! region it applies to, so the same configuration scales across output
//! dimensions.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::error::{PlotError, PlotResult};

/// Figure-wide layout and typography defaults.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PlotConfig {
    /// Fraction of each dimension trimmed from the page edge.
    pub page_margin: f64,
    /// Distance between the title and the frame.
    pub title_offset: f64,
    /// Title font size.
    pub title_size: f64,
    /// Hard floor on font sizes, relative to the whole page.
    pub fontsize_min: f64,
    /// Layout iteration cap.
    pub max_layout_iterations: usize,
    /// Layout residual tolerance, as a fraction of the exterior
    /// diagonal.
    pub layout_tolerance: f64,
    /// Width of the line sample drawn beside each legend entry.
    pub key_width: f64,
    /// Vertical room given to each legend entry.
    pub key_height: f64,
    /// Gap between a legend sample and its label.
    pub key_hsep: f64,
    /// Gap between successive legend entries.
    pub key_vsep: f64,
    /// Legend label font size.
    pub key_size: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            page_margin: 0.1,
            title_offset: 1.0,
            title_size: 3.0,
            fontsize_min: 1.25,
            max_layout_iterations: 10,
            layout_tolerance: 0.005,
            key_width: 4.0,
            key_height: 2.0,
            key_hsep: 2.0,
            key_vsep: 2.0,
            key_size: 2.5,
        }
    }
}

impl PlotConfig {
    /// Load configuration from a JSON file, with missing fields taking
    /// their defaults.
    pub fn load(path: impl AsRef<Path>) -> PlotResult<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: PlotConfig = serde_json::from_reader(reader)
            .map_err(|e| PlotError::InvalidConfig(e.to_string()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlotConfig::default();
        assert_eq!(config.max_layout_iterations, 10);
        assert_eq!(config.layout_tolerance, 0.005);
        assert_eq!(config.page_margin, 0.1);
        assert_eq!(config.key_width, 4.0);
        assert_eq!(config.key_size, 2.5);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: PlotConfig = serde_json::from_str(r#"{"page_margin": 0.05}"#).unwrap();
        assert_eq!(config.page_margin, 0.05);
        assert_eq!(config.fontsize_min, 1.25);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            PlotConfig::load("/nonexistent/plot.json"),
            Err(PlotError::Io(_))
        ));
    }
}
