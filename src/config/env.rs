//! Build environment signals
//!
//! The mode, polyfill toggle and dev server port are read once and passed
//! through the pipeline as a value.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Port reported for the entry list when none is configured
pub const DEFAULT_PORT: u16 = 8000;

/// Build mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
}

/// Environment the plugin runs in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildEnv {
    /// Development or production build
    pub mode: Mode,

    /// Prepend the bundled polyfill to every entry
    pub polyfill: bool,

    /// Dev server port, only used in messages
    pub port: u16,
}

impl Default for BuildEnv {
    fn default() -> Self {
        Self {
            mode: Mode::Production,
            polyfill: true,
            port: DEFAULT_PORT,
        }
    }
}

impl BuildEnv {
    /// Read `NODE_ENV`, `BABEL_POLYFILL` and `PORT` from the process environment
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
        let mode = match get("NODE_ENV").as_deref() {
            Some("development") => Mode::Development,
            _ => Mode::Production,
        };

        let polyfill = get("BABEL_POLYFILL").as_deref() != Some("none");

        let port = match get("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                debug!("Ignoring unparsable PORT value: {}", raw);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            mode,
            polyfill,
            port,
        }
    }

    pub fn development() -> Self {
        Self {
            mode: Mode::Development,
            ..Self::default()
        }
    }

    pub fn is_development(&self) -> bool {
        self.mode == Mode::Development
    }
}
