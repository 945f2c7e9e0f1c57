//! Map rendering configuration loading and types.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use daylen_core::{AnnotationStyle, DaylenConfig, Rgb, SurveyConfig};
use renderer::DEFAULT_PIXELS_PER_DEGREE;

/// Everything needed to render maps, loaded from YAML.
///
/// Missing keys keep their defaults. Command-line flags are applied on top
/// by the binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Base map: north-polar azimuthal equidistant, pole at the center.
    pub input_image: PathBuf,

    pub output_image: PathBuf,

    /// TrueType font for labels. Without one, labels are skipped.
    pub font_path: Option<PathBuf>,

    pub pixels_per_degree: f64,

    pub date_color: Rgb,

    /// Side of a gradient swatch cell in pixels.
    pub swatch_cell_size: u32,

    pub style: AnnotationStyle,

    pub survey: SurveyConfig,

    pub core: DaylenConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            input_image: PathBuf::from("azmap.png"),
            output_image: PathBuf::from("out.png"),
            font_path: None,
            pixels_per_degree: DEFAULT_PIXELS_PER_DEGREE,
            date_color: Rgb::new(0, 0, 0),
            swatch_cell_size: renderer::swatch::DEFAULT_CELL_SIZE,
            style: AnnotationStyle::default(),
            survey: SurveyConfig::default(),
            core: DaylenConfig::default(),
        }
    }
}

impl MapConfig {
    /// Load from a YAML file, or from `DAYLEN_*` environment variables when
    /// no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self {
                core: DaylenConfig::from_env(),
                ..Self::default()
            });
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config: {:?}", path))?;

        tracing::info!(path = %path.display(), "Loaded map configuration");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.pixels_per_degree.is_finite() && self.pixels_per_degree > 0.0) {
            bail!("pixels_per_degree must be positive, got {}", self.pixels_per_degree);
        }
        if self.style.ring_thickness == 0 {
            bail!("style.ring_thickness must be > 0");
        }
        self.core.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daylen_core::Twilight;

    #[test]
    fn test_defaults() {
        let config = MapConfig::default();
        assert_eq!(config.pixels_per_degree, 12.84);
        assert_eq!(config.input_image, PathBuf::from("azmap.png"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r##"
input_image: maps/north.png
font_path: /usr/share/fonts/TTF/DejaVuSans.ttf
style:
  ring_font_size: 32
core:
  twilight: sunrise_sunset
  scan:
    start_color: "#0000a0"
"##;
        let config = MapConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.input_image, PathBuf::from("maps/north.png"));
        assert_eq!(config.output_image, PathBuf::from("out.png"));
        assert_eq!(config.style.ring_font_size, 32.0);
        assert_eq!(config.style.ring_thickness, 3);
        assert_eq!(config.core.twilight, Twilight::SunriseSunset);
        assert_eq!(config.core.scan.start_color, Rgb::new(0, 0, 160));
        assert_eq!(config.core.scan.end_color, Rgb::new(0, 160, 0));
        assert_eq!(config.core.search.min_lat, -24.0);
    }

    #[test]
    fn test_bad_color_is_rejected() {
        let yaml = "date_color: \"not-a-color\"\n";
        assert!(MapConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_scale() {
        let config = MapConfig {
            pixels_per_degree: 0.0,
            ..MapConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.yaml");
        std::fs::write(&path, "pixels_per_degree: 6.42\n").unwrap();

        let config = MapConfig::load(Some(&path)).unwrap();
        assert_eq!(config.pixels_per_degree, 6.42);

        assert!(MapConfig::load(Some(&dir.path().join("missing.yaml"))).is_err());
    }
}
