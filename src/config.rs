// Command-line and environment configuration

use std::path::PathBuf;

use thiserror::Error;

/// Environment variable consulted for a texture when `--textured` is absent.
pub const TEXTURE_ENV: &str = "FSHAPE_TEXTURE";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    #[error("missing value for {0}")]
    MissingValue(&'static str),

    #[error("invalid number for {flag}: {value}")]
    InvalidNumber { flag: &'static str, value: String },

    #[error("invalid size {0:?}, expected <width>x<height>")]
    InvalidSize(String),

    #[error("invalid color {0:?}, expected r,g,b with components in [0, 1]")]
    InvalidColor(String),
}

/// Which variant of the F is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderMode {
    /// Solid-colour F through the 4×4 chain.
    Solid,
    /// Flat F through the 3×3 chain, filled with an image.
    Textured { image: PathBuf },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    /// Depth of the pixel box mapped into clip space.
    pub depth: f32,
    pub mode: RenderMode,
    /// Fixed fill colour; a random one is picked when absent.
    pub color: Option<[f32; 3]>,
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            depth: 400.0,
            mode: RenderMode::Solid,
            color: None,
            log_filter: None,
        }
    }
}

impl Config {
    /// Reads the process arguments, falling back to the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let texture = std::env::var_os(TEXTURE_ENV).map(PathBuf::from);
        Self::parse(std::env::args().skip(1), texture)
    }

    /// Parses flags from `args`. `env_texture` is used when no `--textured`
    /// flag is given.
    pub fn parse<I, S>(args: I, env_texture: Option<PathBuf>) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Config::default();
        let mut texture = None;
        let mut args = args.into_iter().map(Into::<String>::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--textured" => {
                    texture = Some(PathBuf::from(next_value(&mut args, "--textured")?));
                }
                "--size" => {
                    let value = next_value(&mut args, "--size")?;
                    let (width, height) = parse_size(&value)?;
                    config.width = width;
                    config.height = height;
                }
                "--depth" => {
                    let value = next_value(&mut args, "--depth")?;
                    config.depth = value.parse::<f32>().map_err(|_| ConfigError::InvalidNumber {
                        flag: "--depth",
                        value,
                    })?;
                }
                "--color" => {
                    let value = next_value(&mut args, "--color")?;
                    config.color = Some(parse_color(&value)?);
                }
                "--log" => {
                    config.log_filter = Some(next_value(&mut args, "--log")?);
                }
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }

        if let Some(image) = texture.or(env_texture) {
            config.mode = RenderMode::Textured { image };
        }

        Ok(config)
    }
}

fn next_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ConfigError> {
    args.next().ok_or(ConfigError::MissingValue(flag))
}

fn parse_size(value: &str) -> Result<(u32, u32), ConfigError> {
    let invalid = || ConfigError::InvalidSize(value.to_string());
    let (width, height) = value.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width = width.trim().parse::<u32>().map_err(|_| invalid())?;
    let height = height.trim().parse::<u32>().map_err(|_| invalid())?;
    Ok((width, height))
}

fn parse_color(value: &str) -> Result<[f32; 3], ConfigError> {
    let invalid = || ConfigError::InvalidColor(value.to_string());
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<f32>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [r, g, b] if parts.iter().all(|c| (0.0..=1.0).contains(c)) => Ok([*r, *g, *b]),
        _ => Err(invalid()),
    }
}
