//! Analysis backend selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ParseSettingError;

/// Third-party solver a model is prepared for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Backend {
    /// Abaqus/Standard, driven through `.inp` input decks.
    #[default]
    Abaqus,
    /// SOFiSTiK.
    Sofistik,
    /// OpenSees.
    OpenSees,
}

impl Backend {
    /// Tag used to select this backend.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Abaqus => "abaqus",
            Self::Sofistik => "sofistik",
            Self::OpenSees => "opensees",
        }
    }

    /// File extension of the backend's native input file.
    #[must_use]
    pub const fn input_extension(self) -> &'static str {
        match self {
            Self::Abaqus => "inp",
            Self::Sofistik => "dat",
            Self::OpenSees => "tcl",
        }
    }

    /// Whether this crate can write an input deck for the backend.
    #[must_use]
    pub const fn supports_input_deck(self) -> bool {
        matches!(self, Self::Abaqus)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Backend {
    type Err = ParseSettingError;

    /// Parse a backend tag. Plugin-style names such as `compas_fea2_abaqus`
    /// are accepted as well.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let tag = lowered.rsplit('_').next().unwrap_or_default();
        match tag {
            "abaqus" => Ok(Self::Abaqus),
            "sofistik" => Ok(Self::Sofistik),
            "opensees" => Ok(Self::OpenSees),
            _ => Err(ParseSettingError::UnknownBackend(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_prefixed_tags() {
        assert_eq!("abaqus".parse::<Backend>(), Ok(Backend::Abaqus));
        assert_eq!("OpenSees".parse::<Backend>(), Ok(Backend::OpenSees));
        assert_eq!(
            "compas_fea2_sofistik".parse::<Backend>(),
            Ok(Backend::Sofistik)
        );
        assert_eq!(
            "ansys".parse::<Backend>(),
            Err(ParseSettingError::UnknownBackend("ansys".to_string()))
        );
    }

    #[test]
    fn only_abaqus_writes_decks() {
        assert!(Backend::Abaqus.supports_input_deck());
        assert!(!Backend::Sofistik.supports_input_deck());
        assert!(!Backend::OpenSees.supports_input_deck());
        assert_eq!(Backend::Abaqus.input_extension(), "inp");
    }
}
