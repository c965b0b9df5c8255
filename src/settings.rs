//! Unit system and backend selection carried by a model.

use std::env;

use serde::{Deserialize, Serialize};

use crate::backend::Backend;
use crate::errors::SettingsError;
use crate::units::UnitSystem;

/// Environment variable selecting the unit system.
pub const UNITS_VAR: &str = "FRAMEX_UNITS";
/// Environment variable selecting the backend.
pub const BACKEND_VAR: &str = "FRAMEX_BACKEND";

/// Unit system and analysis backend a model is defined for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Units used for coordinates and for every exported number.
    pub units: UnitSystem,
    /// Solver the model is prepared for.
    pub backend: Backend,
}

impl Settings {
    /// Create settings from explicit choices.
    #[must_use]
    pub const fn new(units: UnitSystem, backend: Backend) -> Self {
        Self { units, backend }
    }

    /// Read settings from [`UNITS_VAR`] and [`BACKEND_VAR`], falling back to the
    /// defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when a variable is set to an unknown tag.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve settings through `lookup`, which maps a variable name to its value.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let defaults = Self::default();
        let units = match lookup(UNITS_VAR) {
            Some(value) => value.parse().map_err(|source| SettingsError {
                variable: UNITS_VAR,
                source,
            })?,
            None => defaults.units,
        };
        let backend = match lookup(BACKEND_VAR) {
            Some(value) => value.parse().map_err(|source| SettingsError {
                variable: BACKEND_VAR,
                source,
            })?,
            None => defaults.backend,
        };
        Ok(Self { units, backend })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ParseSettingError;

    #[test]
    fn defaults_match_millimetre_abaqus_setup() {
        let settings = Settings::from_lookup(|_| None).expect("defaults are valid");
        assert_eq!(settings, Settings::new(UnitSystem::SiMm, Backend::Abaqus));
    }

    #[test]
    fn reads_both_variables() {
        let settings = Settings::from_lookup(|name| match name {
            UNITS_VAR => Some("SI".to_string()),
            BACKEND_VAR => Some("opensees".to_string()),
            _ => None,
        })
        .expect("valid tags");
        assert_eq!(settings, Settings::new(UnitSystem::Si, Backend::OpenSees));
    }

    #[test]
    fn reports_offending_variable() {
        let error = Settings::from_lookup(|name| {
            (name == BACKEND_VAR).then(|| "nastran".to_string())
        })
        .expect_err("unknown backend rejected");
        assert_eq!(
            error,
            SettingsError {
                variable: BACKEND_VAR,
                source: ParseSettingError::UnknownBackend("nastran".to_string()),
            }
        );
    }
}
