use automata_common::{ConfigError, WorldConfig};
use automata_kernel::TileKernel;
use serde::{Deserialize, Serialize};

/// Simulation configuration: the world layout plus the rule and clock that drive it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world: WorldConfig,
    /// Transition rule applied to every tile each tick.
    pub kernel: TileKernel,
    /// Seconds of playback time between ticks.
    pub tick_interval: f32,
    /// Evaluate tiles on the rayon pool. Results are identical to the serial path.
    pub parallel: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            kernel: TileKernel::default(),
            tick_interval: 0.1,
            parallel: false,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        if !self.tick_interval.is_finite() || self.tick_interval <= 0.0 {
            return Err(ConfigError::InvalidTickInterval(self.tick_interval));
        }
        if let Some(max) = self.kernel.max_emitted_color() {
            if max as usize >= self.world.palette_size {
                return Err(ConfigError::MixPaletteTooSmall {
                    size: self.world.palette_size,
                    required_max: max as usize,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn mix_needs_secondary_colours() {
        let mut config = SimConfig {
            kernel: TileKernel::Mix,
            ..SimConfig::default()
        };
        assert!(config.validate().is_ok());

        config.world.palette_size = 4;
        assert_eq!(
            config.validate(),
            Err(ConfigError::MixPaletteTooSmall {
                size: 4,
                required_max: 6
            })
        );

        config.kernel = TileKernel::Grow;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn tick_interval_must_be_positive() {
        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = SimConfig {
                tick_interval: bad,
                ..SimConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidTickInterval(_))
            ));
        }
    }

    #[test]
    fn loads_from_yaml() {
        let yaml = r#"
kernel: dissolve
tick_interval: 0.5
world:
  chunk_dimension: 8
  palette_size: 3
  neighbor_tile_offsets: [[-1, 0], [1, 0], [0, -1], [0, 1]]
"#;
        let config: SimConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.kernel, TileKernel::Dissolve);
        assert_eq!(config.world.chunk_dimension, 8);
        assert_eq!(config.world.neighbor_tile_offsets.len(), 4);
        assert_eq!(config.world.neighbor_chunk_offsets.len(), 8);
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }
}
