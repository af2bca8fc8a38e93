use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    /// Class flag set on the document root for this mode.
    pub fn class_name(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class_name())
    }
}

impl FromStr for ThemeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            _ => anyhow::bail!("Invalid theme: {}. Must be 'dark' or 'light'", s),
        }
    }
}

/// Which modes a deployment offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeSupport {
    /// Terminal-style deployments: always dark, toggling does nothing.
    DarkOnly,
    #[default]
    DarkAndLight,
}

impl ThemeSupport {
    pub fn allows(self, mode: ThemeMode) -> bool {
        match self {
            ThemeSupport::DarkOnly => mode == ThemeMode::Dark,
            ThemeSupport::DarkAndLight => true,
        }
    }
}

impl FromStr for ThemeSupport {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark-only" | "dark_only" => Ok(ThemeSupport::DarkOnly),
            "dark-and-light" | "dark_and_light" | "both" => Ok(ThemeSupport::DarkAndLight),
            _ => anyhow::bail!(
                "Invalid theme support: {}. Must be 'dark-only' or 'dark-and-light'",
                s
            ),
        }
    }
}
