//! Command-line configuration.

use clap::Parser;

use crate::components::Component;
use crate::error::{AppError, Result};
use crate::state::animate::{DEFAULT_SPEED_MS, MAX_SPEED_MS, MIN_SPEED_MS};
use crate::theme::{Theme, get_preset, preset_names};

/// algovista - animated data structures in the terminal
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "algovista")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Length of one animation beat in milliseconds (50-5000)
    #[arg(short, long, default_value_t = DEFAULT_SPEED_MS)]
    pub speed: u64,

    /// Colour theme: terminal, classic, dracula or nord
    #[arg(short, long, default_value = "terminal")]
    pub theme: String,

    /// Seed for random values, for reproducible sessions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Component to open first (e.g. heap, graph, hash-table)
    #[arg(long)]
    pub start: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED_MS,
            theme: "terminal".to_string(),
            seed: None,
            start: None,
        }
    }
}

/// A checked configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub speed_ms: u64,
    pub theme: Theme,
    pub seed: Option<u64>,
    /// Index of the first component to show.
    pub start: usize,
}

impl Config {
    /// Check every option against the available themes and components.
    pub fn validate(&self, components: &[Box<dyn Component>]) -> Result<Settings> {
        if !(MIN_SPEED_MS..=MAX_SPEED_MS).contains(&self.speed) {
            return Err(AppError::InvalidSpeed {
                ms: self.speed,
                min: MIN_SPEED_MS,
                max: MAX_SPEED_MS,
            });
        }

        let theme = get_preset(&self.theme).ok_or_else(|| AppError::UnknownTheme {
            name: self.theme.clone(),
            available: preset_names().join(", "),
        })?;

        let start = match &self.start {
            None => 0,
            Some(name) => components
                .iter()
                .position(|c| c.id().eq_ignore_ascii_case(name))
                .ok_or_else(|| AppError::UnknownComponent {
                    name: name.clone(),
                    available: components.iter().map(|c| c.id()).collect::<Vec<_>>().join(", "),
                })?,
        };

        Ok(Settings {
            speed_ms: self.speed,
            theme,
            seed: self.seed,
            start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::catalog;

    #[test]
    fn test_defaults_parse() {
        let config = Config::parse_from(["algovista"]);
        assert_eq!(config, Config::default());

        let settings = config.validate(&catalog()).unwrap();
        assert_eq!(settings.speed_ms, 500);
        assert_eq!(settings.theme.name, "terminal");
        assert_eq!(settings.start, 0);
    }

    #[test]
    fn test_flags() {
        let config = Config::parse_from([
            "algovista", "--speed", "250", "--theme", "Nord", "--seed", "7", "--start", "heap",
        ]);
        let settings = config.validate(&catalog()).unwrap();
        assert_eq!(settings.speed_ms, 250);
        assert_eq!(settings.theme.name, "nord");
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.start, 6);
    }

    #[test]
    fn test_rejects_bad_values() {
        let components = catalog();

        let slow = Config { speed: 10_000, ..Config::default() };
        assert!(matches!(slow.validate(&components), Err(AppError::InvalidSpeed { .. })));

        let theme = Config { theme: "neon".into(), ..Config::default() };
        let err = theme.validate(&components).unwrap_err();
        assert!(err.to_string().contains("terminal, classic, dracula, nord"));

        let start = Config { start: Some("splay-tree".into()), ..Config::default() };
        assert!(matches!(start.validate(&components), Err(AppError::UnknownComponent { .. })));
    }
}
