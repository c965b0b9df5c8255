//! Field output requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::OutputError;

/// Nodal result quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeOutput {
    /// Translations.
    U,
    /// Rotations.
    Ur,
    /// Reaction forces.
    Rf,
    /// Reaction moments.
    Rm,
    /// Concentrated (applied) forces.
    Cf,
}

/// Element result quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementOutput {
    /// Section forces.
    Sf,
    /// Section moments.
    Sm,
    /// Stresses.
    S,
    /// Strains.
    E,
    /// Section strains and curvatures.
    Se,
}

impl NodeOutput {
    /// Tag of the quantity as used by solvers.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::U => "U",
            Self::Ur => "UR",
            Self::Rf => "RF",
            Self::Rm => "RM",
            Self::Cf => "CF",
        }
    }
}

impl ElementOutput {
    /// Tag of the quantity as used by solvers.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Sf => "SF",
            Self::Sm => "SM",
            Self::S => "S",
            Self::E => "E",
            Self::Se => "SE",
        }
    }
}

impl fmt::Display for NodeOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl fmt::Display for ElementOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for NodeOutput {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "U" => Ok(Self::U),
            "UR" => Ok(Self::Ur),
            "RF" => Ok(Self::Rf),
            "RM" => Ok(Self::Rm),
            "CF" => Ok(Self::Cf),
            _ => Err(OutputError::UnknownNodeOutput(s.to_string())),
        }
    }
}

impl FromStr for ElementOutput {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SF" => Ok(Self::Sf),
            "SM" => Ok(Self::Sm),
            "S" => Ok(Self::S),
            "E" => Ok(Self::E),
            "SE" => Ok(Self::Se),
            _ => Err(OutputError::UnknownElementOutput(s.to_string())),
        }
    }
}

/// Set of result quantities to record during a step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldOutput {
    /// Name of the request.
    pub name: String,
    /// Nodal quantities.
    pub node_outputs: Vec<NodeOutput>,
    /// Element quantities.
    pub element_outputs: Vec<ElementOutput>,
}

impl FieldOutput {
    /// Create a request from typed quantities.
    #[must_use]
    pub fn new(
        name: &str,
        node_outputs: Vec<NodeOutput>,
        element_outputs: Vec<ElementOutput>,
    ) -> Self {
        Self {
            name: name.to_string(),
            node_outputs,
            element_outputs,
        }
    }

    /// Create a request from quantity tags.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] naming the first tag that is not recognised.
    ///
    /// # Examples
    /// ```
    /// use framex::{ElementOutput, FieldOutput, NodeOutput};
    ///
    /// let fout = FieldOutput::parse("fout", &["U", "RF"], &["SF"]).expect("known tags");
    /// assert_eq!(fout.node_outputs, vec![NodeOutput::U, NodeOutput::Rf]);
    /// assert_eq!(fout.element_outputs, vec![ElementOutput::Sf]);
    /// ```
    pub fn parse(
        name: &str,
        node_outputs: &[&str],
        element_outputs: &[&str],
    ) -> Result<Self, OutputError> {
        Ok(Self::new(
            name,
            node_outputs
                .iter()
                .map(|tag| tag.parse())
                .collect::<Result<_, _>>()?,
            element_outputs
                .iter()
                .map(|tag| tag.parse())
                .collect::<Result<_, _>>()?,
        ))
    }

    /// Whether the request asks for nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node_outputs.is_empty() && self.element_outputs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reports_first_unknown_tag() {
        let error = FieldOutput::parse("fout", &["U", "XYZ"], &["SF"]).expect_err("bad tag");
        assert_eq!(error, OutputError::UnknownNodeOutput("XYZ".to_string()));

        let error = FieldOutput::parse("fout", &["U"], &["SF", "Q"]).expect_err("bad tag");
        assert_eq!(error, OutputError::UnknownElementOutput("Q".to_string()));
    }

    #[test]
    fn tags_are_case_insensitive() {
        assert_eq!("rf".parse::<NodeOutput>(), Ok(NodeOutput::Rf));
        assert_eq!(ElementOutput::Sf.to_string(), "SF");
        assert!(FieldOutput::new("empty", Vec::new(), Vec::new()).is_empty());
    }
}
