use std::io::Read;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Session settings. Every key is optional in the TOML file.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Seed for the tile RNG. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Clear the terminal before drawing each frame.
    pub clear_screen: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { seed: None, clear_screen: true }
    }
}

impl GameConfig {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let cfg: Self = toml::from_str(&contents)?;
        Ok(cfg)
    }

    /// Command-line values win over the file.
    pub fn with_overrides(mut self, seed: Option<u64>, no_clear: bool) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        if no_clear {
            self.clear_screen = false;
        }
        self
    }
}
