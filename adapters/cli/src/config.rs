//! Map configuration loading.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use cellmaze_system_map_controller::MapConfig;

/// Reads the map configuration at `path`, or the defaults when no path is given.
pub(crate) fn load(path: Option<&Path>) -> Result<MapConfig> {
    let Some(path) = path else {
        return Ok(MapConfig::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read map config at {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid map config at {}", path.display()))
}

fn parse(contents: &str) -> Result<MapConfig> {
    let config: MapConfig =
        toml::from_str(contents).context("failed to parse map config toml contents")?;
    let _ = config
        .dimensions()
        .context("map config does not describe a usable grid")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_yields_defaults() {
        assert_eq!(load(None).expect("defaults"), MapConfig::default());
    }

    #[test]
    fn overrides_are_applied_on_top_of_defaults() {
        let config = parse(
            r#"
                viewport_half_width = 10.0
                viewport_half_height = 10.0
                min_grid_size = 400
            "#,
        )
        .expect("valid config");

        assert_eq!(config.min_grid_size, 400);
        assert_eq!(config.border_size, 2);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn unusable_grids_are_rejected() {
        let error = parse("min_grid_size = 12").expect_err("grid too small");
        assert!(format!("{error:#}").contains("usable grid"));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        assert!(parse("border_size = \"wide\"").is_err());
    }

    #[test]
    fn missing_files_are_reported_with_their_path() {
        let error = load(Some(Path::new("/nonexistent/cellmaze.toml"))).expect_err("no such file");
        assert!(error.to_string().contains("/nonexistent/cellmaze.toml"));
    }
}
