//! Adapter settings, deserializable from TOML.

use std::io::Read;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Config {
    /// Minimum displacement along the dominant axis for a touch gesture to
    /// count as a swipe; smaller gestures (taps, hand tremor) are ignored.
    #[serde(default = "defaults::swipe_threshold")]
    pub swipe_threshold: f32,

    /// Delay before announcing game over, so any visual transition can
    /// settle first. Fire-and-forget; correctness never depends on it.
    #[serde(default = "defaults::notify_delay_ms")]
    pub notify_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            swipe_threshold: defaults::swipe_threshold(),
            notify_delay_ms: defaults::notify_delay_ms(),
        }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let cfg: Self = toml::from_str(&contents)?;
        Ok(cfg)
    }

    pub fn notify_delay(&self) -> Duration {
        Duration::from_millis(self.notify_delay_ms)
    }
}

mod defaults {
    pub fn swipe_threshold() -> f32 {
        30.0
    }
    pub fn notify_delay_ms() -> u64 {
        100
    }
}
