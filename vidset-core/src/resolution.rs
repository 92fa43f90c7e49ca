use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A display mode offered by the host, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Parse a `WIDTHxHEIGHT` string such as `1920x1080`.
    pub fn parse(s: &str) -> Result<Self, ParseResolutionError> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| ParseResolutionError::MissingSeparator(s.to_string()))?;

        let width = w
            .trim()
            .parse::<u32>()
            .map_err(|_| ParseResolutionError::InvalidDimension(w.to_string()))?;
        let height = h
            .trim()
            .parse::<u32>()
            .map_err(|_| ParseResolutionError::InvalidDimension(h.to_string()))?;

        if width == 0 || height == 0 {
            return Err(ParseResolutionError::ZeroDimension(s.to_string()));
        }

        Ok(Self { width, height })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = ParseResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseResolutionError {
    #[error("expected WIDTHxHEIGHT, got '{0}'")]
    MissingSeparator(String),
    #[error("'{0}' is not a valid pixel count")]
    InvalidDimension(String),
    #[error("resolution '{0}' has a zero dimension")]
    ZeroDimension(String),
}
