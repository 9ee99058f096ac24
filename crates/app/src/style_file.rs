//! Optional JSON override for the scene look.

use std::fmt;
use std::path::{Path, PathBuf};

use bevy::prelude::*;

use rendering::SceneStyle;

/// Environment variable naming a JSON file with [`SceneStyle`] overrides.
pub const STYLE_ENV_VAR: &str = "TRAFFIC_VIEW_STYLE";

#[derive(Debug)]
pub enum StyleFileError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, serde_json::Error),
}

impl fmt::Display for StyleFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(path, err) => write!(f, "cannot read {}: {err}", path.display()),
            Self::Parse(path, err) => write!(f, "invalid style in {}: {err}", path.display()),
        }
    }
}

impl std::error::Error for StyleFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(_, err) => Some(err),
            Self::Parse(_, err) => Some(err),
        }
    }
}

/// Parse a style file. Fields missing from the JSON keep their defaults.
pub fn load_style(path: &Path) -> Result<SceneStyle, StyleFileError> {
    let text =
        std::fs::read_to_string(path).map_err(|e| StyleFileError::Io(path.to_path_buf(), e))?;
    serde_json::from_str(&text).map_err(|e| StyleFileError::Parse(path.to_path_buf(), e))
}

/// The style named by [`STYLE_ENV_VAR`], or the default look if it is unset
/// or unusable.
pub fn style_from_env() -> SceneStyle {
    let Some(path) = std::env::var_os(STYLE_ENV_VAR) else {
        return SceneStyle::default();
    };
    let path = PathBuf::from(path);
    match load_style(&path) {
        Ok(style) => {
            info!("Loaded scene style from {}", path.display());
            style
        }
        Err(err) => {
            warn!("{err}; using the default scene style");
            SceneStyle::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("traffic_view_{}_{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let path = scratch_file("partial.json", r#"{ "road_color": [0.2, 0.2, 0.25] }"#);
        let style = load_style(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(style.road_color, [0.2, 0.2, 0.25]);
        assert_eq!(style.junction_color, SceneStyle::default().junction_color);
        assert_eq!(style.markings, SceneStyle::default().markings);
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let path = scratch_file("broken.json", "{ road_color: ");
        let err = load_style(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(err, StyleFileError::Parse(..)));
        assert!(err.to_string().starts_with("invalid style in"));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("traffic_view_does_not_exist.json");
        assert!(matches!(load_style(&path), Err(StyleFileError::Io(..))));
    }
}
