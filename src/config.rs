//! User configuration (`config.toml`).
//!
//! ```toml
//! [output]
//! precision = 5
//! style = "table"
//! ```

use directories::ProjectDirs;
use rpnsheet_core::{OutputOptions, OutputStyle};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB
const MAX_PRECISION: usize = 17;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    output: Option<OutputSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputSection {
    precision: Option<usize>,
    style: Option<OutputStyle>,
}

/// Load output options from `config_file`, or from the user config dir when
/// none is given. Problems are returned as warnings and defaults are used.
pub fn load_config(config_file: Option<&Path>) -> (OutputOptions, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let mut options = OutputOptions::default();
    let config_path = config_file.map(Path::to_path_buf).or_else(user_config_path);

    let Some(path) = config_path else {
        return (options, warnings);
    };
    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (options, warnings);
    }

    let file = match std::fs::metadata(&path) {
        Ok(meta) if meta.len() > MAX_CONFIG_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ));
            None
        }
        Ok(_) => match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<ConfigFile>(&content) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                    None
                }
            },
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                None
            }
        },
        Err(err) => {
            warnings.push(format!("Failed to read {}: {}", path.display(), err));
            None
        }
    };

    if let Some(output) = file.and_then(|f| f.output) {
        if let Some(style) = output.style {
            options.style = style;
        }
        if let Some(precision) = output.precision {
            match check_precision(precision) {
                Ok(p) => options.precision = p,
                Err(msg) => warnings.push(format!("{} in {}", msg, path.display())),
            }
        }
    }

    log::debug!("config {}: {:?}", path.display(), options);
    (options, warnings)
}

/// Validate an output precision.
pub fn check_precision(precision: usize) -> Result<usize, String> {
    if precision > MAX_PRECISION {
        Err(format!(
            "Precision {} exceeds the maximum of {}",
            precision, MAX_PRECISION
        ))
    } else {
        Ok(precision)
    }
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "rpnsheet")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}
