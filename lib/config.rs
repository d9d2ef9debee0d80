//! Provides loading, verifying, and writing of run parameters in common config
//! file formats.
//!
//! Parameters are plain [`serde`] structs. The format is chosen from the file
//! extension:
//! - [TOML][toml] (`.toml`)
//! - [JSON][serde_json] (`.json`)
//! - [YAML][serde_yaml] (`.yaml`, `.yml`)
//!
//! After deserialization, values are checked against [`Verifier`] constraints
//! so that a bad file is reported with the offending key rather than failing
//! later inside a computation.

use std::{
    fmt,
    fs,
    io::Write,
    path::Path,
};
use toml;
use serde_json as json;
use serde_yaml as yaml;
use serde::{ de::DeserializeOwned, Serialize };
use thiserror::Error;
use tracing::debug;
use crate::langevin::LangevinParams;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config: invalid value for key '{0}': expected value to satisfy '{1}' but got {2}")]
    InvalidValue(String, String, String),

    #[error("config: couldn't read file '{0}': {1}")]
    FileRead(String, String),

    #[error("config: unrecognized file extension for '{0}'; expected .toml, .json, .yaml, or .yml")]
    UnknownFormat(String),

    #[error("config: couldn't open file '{0}': {1}")]
    FileOpen(String, String),

    #[error("config: couldn't write to file '{0}': {1}")]
    FileWrite(String, String),

    #[error("config: TOML parse error: {0}")]
    TomlDeError(#[from] toml::de::Error),

    #[error("config: TOML error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error("config: JSON error: {0}")]
    JsonError(#[from] json::Error),

    #[error("config: YAML error: {0}")]
    YamlError(#[from] yaml::Error),
}
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Supported file formats.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
    Yaml,
}

impl Format {
    /// Determine the format from a file extension.
    pub fn from_path<P>(path: P) -> ConfigResult<Self>
    where P: AsRef<Path>
    {
        let path = path.as_ref();
        return match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(ConfigError::UnknownFormat(path.display().to_string())),
        };
    }
}

/// Represents a constraint on the value of an item in a config.
pub trait ValueVerifier<V> {
    /// Return `true` if `value` satisfies the constraint, `false` otherwise.
    fn verify(&self, value: &V) -> bool;

    /// Return `value` if it satisfies the constraint, `err` otherwise.
    fn verify_ok_or<E>(&self, value: V, err: E) -> Result<V, E> {
        self.verify(&value).then_some(value).ok_or(err)
    }
}

/// Numerical value constraint.
#[derive(Clone, Debug)]
pub enum Verifier {
    /// A range of integer values
    IntRange {
        min: i64,
        max: i64,
        incl_min: bool,
        incl_max: bool,
    },

    /// Any finite floating-point value
    Finite,

    /// A range of floating-point values; always excludes NaN
    FloatRange {
        min: f64,
        max: f64,
        incl_min: bool,
        incl_max: bool,
    },
}

impl Verifier {
    /// Floating-point values strictly greater than zero.
    pub fn positive() -> Self {
        return Self::FloatRange {
            min: 0.0, max: f64::INFINITY, incl_min: false, incl_max: false,
        };
    }

    /// Floating-point values greater than or equal to zero.
    pub fn non_negative() -> Self {
        return Self::FloatRange {
            min: 0.0, max: f64::INFINITY, incl_min: true, incl_max: false,
        };
    }

    /// Integers no smaller than `min`.
    pub fn at_least(min: i64) -> Self {
        return Self::IntRange { min, max: i64::MAX, incl_min: true, incl_max: true };
    }

    /// Verify a single named value, producing an [`ConfigError::InvalidValue`]
    /// naming `key` on failure.
    pub fn check<V>(&self, key: &str, value: V) -> ConfigResult<V>
    where
        Self: ValueVerifier<V>,
        V: fmt::Display,
    {
        let repr = value.to_string();
        return ValueVerifier::<V>::verify_ok_or(
            self,
            value,
            ConfigError::InvalidValue(key.to_string(), self.to_string(), repr),
        );
    }
}

impl fmt::Display for Verifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntRange { min, max, incl_min, incl_max } => {
                write!(f, "IntRange{}", if *incl_min { "[" } else { "(" })?;
                write!(f, "{}, {}", min, max)?;
                write!(f, "{}", if *incl_max { "]" } else { ")" })?;
                Ok(())
            },
            Self::Finite => write!(f, "Finite"),
            Self::FloatRange { min, max, incl_min, incl_max } => {
                write!(f, "FloatRange{}", if *incl_min { "[" } else { "(" })?;
                write!(f, "{}, {}", min, max)?;
                write!(f, "{}", if *incl_max { "]" } else { ")" })?;
                Ok(())
            },
        }
    }
}

impl ValueVerifier<f64> for Verifier {
    fn verify(&self, value: &f64) -> bool {
        match self {
            Self::Finite => value.is_finite(),
            Self::FloatRange { min, max, incl_min, incl_max } => {
                let in_min: bool
                    = if *incl_min { *value >= *min } else { *value > *min };
                let in_max: bool
                    = if *incl_max { *value <= *max } else { *value < *max };
                in_min && in_max
            },
            Self::IntRange { .. } => false,
        }
    }
}

impl ValueVerifier<usize> for Verifier {
    fn verify(&self, value: &usize) -> bool {
        match self {
            Self::IntRange { min, max, incl_min, incl_max } => {
                let Ok(i) = i64::try_from(*value) else { return false; };
                let in_min: bool
                    = if *incl_min { i >= *min } else { i > *min };
                let in_max: bool
                    = if *incl_max { i <= *max } else { i < *max };
                in_min && in_max
            },
            _ => false,
        }
    }
}

/// Implemented by parameter sets that can check their own values.
pub trait Verify {
    fn verify(&self) -> ConfigResult<()>;
}

impl Verify for LangevinParams {
    fn verify(&self) -> ConfigResult<()> {
        Verifier::at_least(2).check("steps", self.steps)?;
        Verifier::positive().check("beta", self.beta)?;
        Verifier::positive().check("dt", self.dt)?;
        Verifier::non_negative().check("gamma", self.gamma)?;
        Verifier::Finite.check("x0", self.x0)?;
        Verifier::Finite.check("v0", self.v0)?;
        return Ok(());
    }
}

/// Deserialize a value from a string in the given format.
pub fn from_str<T>(s: &str, format: Format) -> ConfigResult<T>
where T: DeserializeOwned
{
    return match format {
        Format::Toml => Ok(toml::from_str(s)?),
        Format::Json => Ok(json::from_str(s)?),
        Format::Yaml => Ok(yaml::from_str(s)?),
    };
}

/// Serialize a value to a "pretty" string in the given format.
pub fn to_string_pretty<T>(value: &T, format: Format) -> ConfigResult<String>
where T: Serialize
{
    return match format {
        Format::Toml => Ok(toml::to_string_pretty(value)?),
        Format::Json => Ok(json::to_string_pretty(value)?),
        Format::Yaml => Ok(yaml::to_string(value)?),
    };
}

/// Load a value from a file, choosing the format by extension.
pub fn load<T, P>(infile: P) -> ConfigResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let infile = infile.as_ref();
    let format = Format::from_path(infile)?;
    let infile_str: String = infile.display().to_string();
    let s: String
        = fs::read_to_string(infile)
        .map_err(|e| ConfigError::FileRead(infile_str.clone(), e.to_string()))?;
    debug!(file = %infile_str, ?format, "loading config");
    return from_str(&s, format);
}

/// Load a value from a file and verify it.
pub fn load_verified<T, P>(infile: P) -> ConfigResult<T>
where
    T: DeserializeOwned + Verify,
    P: AsRef<Path>,
{
    let value: T = load(infile)?;
    value.verify()?;
    return Ok(value);
}

/// Write a value to a file, choosing the format by extension.
pub fn write<T, P>(outfile: P, value: &T) -> ConfigResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let format = Format::from_path(outfile.as_ref())?;
    return write_str_to_file(outfile, &to_string_pretty(value, format)?);
}

fn write_str_to_file<P>(outfile: P, s: &str) -> ConfigResult<()>
where P: AsRef<Path>
{
    let outfile_string = outfile.as_ref().display().to_string();
    let mut out
        = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(outfile)
        .map_err(|e| {
            ConfigError::FileOpen(outfile_string.clone(), e.to_string())
        })?;
    write!(&mut out, "{}", s)
        .map_err(|e| {
            ConfigError::FileWrite(outfile_string.clone(), e.to_string())
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path("a/b.toml").unwrap(), Format::Toml);
        assert_eq!(Format::from_path("b.json").unwrap(), Format::Json);
        assert_eq!(Format::from_path("b.yml").unwrap(), Format::Yaml);
        assert!(matches!(
            Format::from_path("b.ini"),
            Err(ConfigError::UnknownFormat(_)),
        ));
        assert!(Format::from_path("noext").is_err());
    }

    #[test]
    fn partial_toml_takes_defaults() {
        let p: LangevinParams
            = from_str("steps = 1000\nbeta = 5.0\n", Format::Toml).unwrap();
        assert_eq!(p.steps, 1000);
        assert_eq!(p.beta, 5.0);
        assert_eq!(p.dt, LangevinParams::default().dt);
        assert!(p.verify().is_ok());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res: ConfigResult<LangevinParams>
            = from_str(r#"{ "steps": 10, "temperature": 1.0 }"#, Format::Json);
        assert!(matches!(res, Err(ConfigError::JsonError(_))));
    }

    #[test]
    fn verification_names_the_key() {
        let p = LangevinParams { gamma: -1.0, ..Default::default() };
        let err = p.verify().unwrap_err();
        match err {
            ConfigError::InvalidValue(key, constraint, got) => {
                assert_eq!(key, "gamma");
                assert_eq!(constraint, "FloatRange[0, inf)");
                assert_eq!(got, "-1");
            },
            other => panic!("unexpected error {:?}", other),
        }
        let p = LangevinParams { steps: 1, ..Default::default() };
        assert!(p.verify().is_err());
    }

    #[test]
    fn verifier_ranges() {
        assert!(Verifier::positive().verify(&1e-9_f64));
        assert!(!Verifier::positive().verify(&0.0_f64));
        assert!(!Verifier::positive().verify(&f64::NAN));
        assert!(Verifier::non_negative().verify(&0.0_f64));
        assert!(!ValueVerifier::<f64>::verify(&Verifier::at_least(2), &3.0));
        assert!(Verifier::at_least(2).verify(&2_usize));
        assert!(!Verifier::at_least(2).verify(&1_usize));
        assert!(!Verifier::Finite.verify(&f64::INFINITY));
    }
}
