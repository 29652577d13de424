//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;

/// Get an environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnv(name))
}

/// Get an environment variable, or `default` when unset.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Get and parse an environment variable.
pub fn get_env_parse<T: FromStr>(name: &'static str) -> Result<T, Error> {
    let val = get_env(name)?;
    val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name))
}

/// Parse an environment variable, or return `default` when unset.
///
/// A variable that is set but malformed is still an error.
pub fn get_env_parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, Error> {
    match get_env_parse(name) {
        Err(Error::MissingEnv(_)) => Ok(default),
        other => other,
    }
}

// region:    --- Error
#[derive(Debug)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::MissingEnv(name) => write!(fmt, "{} must be set in environment", name),
            Error::WrongFormat(name) => write!(fmt, "{} has an invalid value", name),
        }
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_variable_falls_back() {
        let value: u64 = get_env_parse_or("LIB_UTILS_TEST_SURELY_UNSET", 15).unwrap();
        assert_eq!(value, 15);
        assert_eq!(get_env_or("LIB_UTILS_TEST_SURELY_UNSET", "info"), "info");
        assert_eq!(
            get_env("LIB_UTILS_TEST_SURELY_UNSET").unwrap_err().to_string(),
            "LIB_UTILS_TEST_SURELY_UNSET must be set in environment"
        );
    }
}
