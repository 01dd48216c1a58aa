// Color-range config: which camera pixels count as "the marker".
// File layout: {"limits": {"B": {"min": 100, "max": 255}, "G": {...}, "R": {...}}}
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use crate::types::Rgb;

/// Inclusive [min, max] bounds for one channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct ChannelLimits {
    pub min: u8,
    pub max: u8,
}

impl ChannelLimits {
    #[inline]
    pub fn contains(self, v: u8) -> bool {
        self.min <= v && v <= self.max
    }
}

/// The B/G/R box a pixel must fall into to be part of the mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct ColorRange {
    #[serde(rename = "B")]
    pub b: ChannelLimits,
    #[serde(rename = "G")]
    pub g: ChannelLimits,
    #[serde(rename = "R")]
    pub r: ChannelLimits,
}

#[derive(Deserialize)]
struct LimitsFile {
    limits: ColorRange,
}

impl ColorRange {
    /// Read and validate the JSON limits file. Any problem here is fatal at startup.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let config_err = |reason: String| Error::Config { path: path.to_path_buf(), reason };
        let text = std::fs::read_to_string(path).map_err(|e| config_err(e.to_string()))?;
        let file: LimitsFile = serde_json::from_str(&text).map_err(|e| config_err(e.to_string()))?;
        file.limits.validate().map_err(config_err)?;
        Ok(file.limits)
    }

    fn validate(&self) -> Result<(), String> {
        for (name, ch) in [("B", self.b), ("G", self.g), ("R", self.r)] {
            if ch.min > ch.max {
                return Err(format!("channel {name}: min {} is above max {}", ch.min, ch.max));
            }
        }
        Ok(())
    }

    /// Inclusive box membership test for one pixel.
    #[inline]
    pub fn contains(&self, px: Rgb) -> bool {
        self.b.contains(px.b) && self.g.contains(px.g) && self.r.contains(px.r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(body.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn loads_limits_in_bgr_order() {
        let file = write_config(
            r#"{"limits": {"B": {"min": 100, "max": 255},
                           "G": {"min": 0, "max": 80},
                           "R": {"min": 0, "max": 80}}}"#,
        );
        let range = ColorRange::load(file.path()).expect("valid config");
        assert_eq!(range.b, ChannelLimits { min: 100, max: 255 });
        assert!(range.contains(Rgb::BLUE));
        assert!(!range.contains(Rgb::RED));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let file = write_config(
            r#"{"limits": {"B": {"min": 0, "max": 255},
                           "G": {"min": 90, "max": 10},
                           "R": {"min": 0, "max": 255}}}"#,
        );
        let err = ColorRange::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("channel G"), "{err}");
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let file = write_config(
            r#"{"limits": {"B": {"min": 0, "max": 300},
                           "G": {"min": 0, "max": 255},
                           "R": {"min": 0, "max": 255}}}"#,
        );
        assert!(matches!(ColorRange::load(file.path()), Err(Error::Config { .. })));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("limits.json");
        assert!(matches!(ColorRange::load(&missing), Err(Error::Config { .. })));
    }

    #[test]
    fn bounds_are_inclusive() {
        let limits = ChannelLimits { min: 10, max: 20 };
        assert!(limits.contains(10));
        assert!(limits.contains(20));
        assert!(!limits.contains(9));
        assert!(!limits.contains(21));
    }
}
