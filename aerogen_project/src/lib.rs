use std::{
    fmt::{Display, Formatter},
    fs,
    path::{Path, PathBuf},
};
use toml::Value;

pub const CONFIG_FILE: &str = "aerogen.toml";

const DEFAULT_OUTPUT_ROOT: &str = "generated_data";
const DEFAULT_SCENES: u32 = 5;
const DEFAULT_RESOLUTION: [u32; 2] = [640, 480];

/// Dataset generation settings, loaded from `aerogen.toml`. The output root
/// is an explicit value threaded into every component call; nothing reads a
/// process-wide default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    pub output_root: PathBuf,
    pub scenes: u32,
    pub seed: Option<u64>,
    pub resolution: [u32; 2],
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            scenes: DEFAULT_SCENES,
            seed: None,
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    ParseToml(toml::de::Error),
    MissingField(&'static str),
    InvalidField(&'static str, String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::ParseToml(err) => write!(f, "{err}"),
            Self::MissingField(field) => write!(f, "missing required field `{field}`"),
            Self::InvalidField(field, reason) => write!(f, "invalid field `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::ParseToml(value)
    }
}

/// Load `aerogen.toml` from `dir`, falling back to defaults when the file
/// does not exist.
pub fn load_config(dir: &Path) -> Result<DatasetConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.is_file() {
        return Ok(DatasetConfig::default());
    }
    parse_config_toml(&fs::read_to_string(config_path)?)
}

/// Write the default config file if none exists yet.
pub fn ensure_config_toml(dir: &Path) -> std::io::Result<()> {
    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() {
        return Ok(());
    }
    fs::write(config_path, default_config_toml())
}

pub fn default_config_toml() -> String {
    format!(
        r#"[dataset]
output_root = "{DEFAULT_OUTPUT_ROOT}"
scenes = {DEFAULT_SCENES}
# seed = 42

[camera]
resolution = "640x480"
"#
    )
}

pub fn parse_config_toml(contents: &str) -> Result<DatasetConfig, ConfigError> {
    let value: Value = contents.parse::<Value>()?;
    let dataset_table = value
        .get("dataset")
        .and_then(Value::as_table)
        .ok_or(ConfigError::MissingField("dataset"))?;

    let output_root = dataset_table
        .get("output_root")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_OUTPUT_ROOT)
        .into();

    let scenes = match dataset_table.get("scenes") {
        Some(raw) => {
            let n = raw.as_integer().ok_or(ConfigError::InvalidField(
                "dataset.scenes",
                "must be an integer".to_string(),
            ))?;
            u32::try_from(n).map_err(|_| {
                ConfigError::InvalidField("dataset.scenes", "must be a positive integer".to_string())
            })?
        }
        None => DEFAULT_SCENES,
    };

    let seed = match dataset_table.get("seed") {
        Some(raw) => {
            let n = raw.as_integer().ok_or(ConfigError::InvalidField(
                "dataset.seed",
                "must be an integer".to_string(),
            ))?;
            Some(u64::try_from(n).map_err(|_| {
                ConfigError::InvalidField("dataset.seed", "must be non-negative".to_string())
            })?)
        }
        None => None,
    };

    let resolution = match value
        .get("camera")
        .and_then(Value::as_table)
        .and_then(|camera| camera.get("resolution"))
        .and_then(Value::as_str)
    {
        Some(raw) => parse_resolution(raw)?,
        None => DEFAULT_RESOLUTION,
    };

    if resolution[0] == 0 || resolution[1] == 0 {
        return Err(ConfigError::InvalidField(
            "camera.resolution",
            "resolution values must be greater than 0".to_string(),
        ));
    }

    Ok(DatasetConfig {
        output_root,
        scenes,
        seed,
        resolution,
    })
}

fn parse_resolution(raw: &str) -> Result<[u32; 2], ConfigError> {
    let raw = raw.trim().to_ascii_lowercase();
    let (w, h) = raw.split_once('x').ok_or(ConfigError::InvalidField(
        "camera.resolution",
        "expected format `WIDTHxHEIGHT`, for example `640x480`".to_string(),
    ))?;

    let width = w.parse::<u32>().map_err(|_| {
        ConfigError::InvalidField("camera.resolution", "invalid width component".to_string())
    })?;
    let height = h.parse::<u32>().map_err(|_| {
        ConfigError::InvalidField("camera.resolution", "invalid height component".to_string())
    })?;

    Ok([width, height])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config_toml_reads_all_fields() {
        let toml = r#"
[dataset]
output_root = "out/uav"
scenes = 12
seed = 7

[camera]
resolution = "1280x720"
"#;

        let parsed = parse_config_toml(toml).expect("failed to parse aerogen.toml");
        assert_eq!(parsed.output_root, PathBuf::from("out/uav"));
        assert_eq!(parsed.scenes, 12);
        assert_eq!(parsed.seed, Some(7));
        assert_eq!(parsed.resolution, [1280, 720]);
    }

    #[test]
    fn parse_config_toml_applies_defaults() {
        let parsed = parse_config_toml("[dataset]\n").expect("failed to parse minimal config");
        assert_eq!(parsed, DatasetConfig::default());
    }

    #[test]
    fn default_config_toml_round_trips() {
        let parsed = parse_config_toml(&default_config_toml()).expect("default config must parse");
        assert_eq!(parsed, DatasetConfig::default());
    }

    #[test]
    fn parse_config_toml_requires_dataset_table() {
        let err = parse_config_toml("[camera]\n").expect_err("expected parse failure");
        assert!(matches!(err, ConfigError::MissingField("dataset")));
    }

    #[test]
    fn parse_config_toml_rejects_bad_resolution() {
        let toml = r#"
[dataset]

[camera]
resolution = "wide"
"#;
        let err = parse_config_toml(toml).expect_err("expected parse failure");
        assert!(matches!(err, ConfigError::InvalidField("camera.resolution", _)));
    }

    #[test]
    fn parse_config_toml_rejects_negative_scenes() {
        let toml = r#"
[dataset]
scenes = -3
"#;
        let err = parse_config_toml(toml).expect_err("expected parse failure");
        assert!(matches!(err, ConfigError::InvalidField("dataset.scenes", _)));
    }
}
