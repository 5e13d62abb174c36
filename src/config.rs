use clap::{Parser, ValueEnum};

use crate::error::ConfigError;

pub const DEFAULT_RENDER_FPS: u64 = 60;
pub const FPS_ENV: &str = "MAZE_FPS";
// The drawn lattice has to fit in u16 terminal coordinates.
pub const MAX_SIDE: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    rows: usize,
    cols: usize,
}

impl Dimensions {
    pub fn new(rows: usize, cols: usize) -> Result<Self, ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::ZeroDimension { rows, cols });
        }
        if rows > MAX_SIDE || cols > MAX_SIDE {
            return Err(ConfigError::OversizeDimension {
                rows,
                cols,
                max: MAX_SIDE,
            });
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn size(self) -> usize {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 20,
            Difficulty::Hard => 30,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Carve a perfect maze and race to its exit")]
pub struct Cli {
    #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
    pub difficulty: Difficulty,
    /// Overrides the preset row count.
    #[arg(long)]
    pub rows: Option<usize>,
    /// Overrides the preset column count.
    #[arg(long)]
    pub cols: Option<usize>,
    /// Seed for reproducible mazes.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Carve the whole maze before the first frame instead of animating it.
    #[arg(long)]
    pub instant: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub dims: Dimensions,
    pub seed: Option<u64>,
    pub instant: bool,
    pub render_fps: u64,
}

impl Settings {
    pub fn from_cli(cli: &Cli, fps_raw: Option<&str>) -> Result<Self, ConfigError> {
        let preset = cli.difficulty.size();
        let dims = Dimensions::new(cli.rows.unwrap_or(preset), cli.cols.unwrap_or(preset))?;
        Ok(Self {
            dims,
            seed: cli.seed,
            instant: cli.instant,
            render_fps: parse_fps(fps_raw)?,
        })
    }

    pub fn load() -> Result<Self, ConfigError> {
        let cli = Cli::parse();
        let fps = std::env::var(FPS_ENV).ok();
        Self::from_cli(&cli, fps.as_deref())
    }
}

fn parse_fps(raw: Option<&str>) -> Result<u64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_RENDER_FPS);
    };
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| ConfigError::InvalidSetting {
            name: FPS_ENV,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("maze").chain(args.iter().copied()))
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            Dimensions::new(0, 5),
            Err(ConfigError::ZeroDimension { rows: 0, cols: 5 })
        );
        assert!(Dimensions::new(3, 0).is_err());
        assert!(Dimensions::new(1, 1).is_ok());
    }

    #[test]
    fn oversize_dimensions_are_rejected() {
        assert!(Dimensions::new(MAX_SIDE, MAX_SIDE).is_ok());
        assert_eq!(
            Dimensions::new(2, 32_768),
            Err(ConfigError::OversizeDimension {
                rows: 2,
                cols: 32_768,
                max: MAX_SIDE,
            })
        );
        assert!(Dimensions::new(MAX_SIDE + 1, 1).is_err());
        assert!(matches!(
            Settings::from_cli(&cli(&["--rows", "2", "--cols", "32768"]), None),
            Err(ConfigError::OversizeDimension { .. })
        ));
    }

    #[test]
    fn defaults_to_medium_preset() {
        let settings = Settings::from_cli(&cli(&[]), None).unwrap();
        assert_eq!(settings.dims, Dimensions::new(20, 20).unwrap());
        assert_eq!(settings.render_fps, DEFAULT_RENDER_FPS);
        assert!(!settings.instant);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn explicit_size_overrides_preset() {
        let settings = Settings::from_cli(
            &cli(&["--difficulty", "hard", "--cols", "12", "--seed", "7", "--instant"]),
            Some("30"),
        )
        .unwrap();
        assert_eq!(settings.dims, Dimensions::new(30, 12).unwrap());
        assert_eq!(settings.seed, Some(7));
        assert!(settings.instant);
        assert_eq!(settings.render_fps, 30);
    }

    #[test]
    fn bad_fps_is_reported() {
        for raw in ["0", "fast", ""] {
            assert_eq!(
                Settings::from_cli(&cli(&[]), Some(raw)),
                Err(ConfigError::InvalidSetting {
                    name: FPS_ENV,
                    value: raw.to_string(),
                })
            );
        }
    }

    #[test]
    fn zero_rows_flag_is_rejected() {
        assert!(matches!(
            Settings::from_cli(&cli(&["--rows", "0"]), None),
            Err(ConfigError::ZeroDimension { rows: 0, cols: 20 })
        ));
    }
}
