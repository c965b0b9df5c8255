//! Error types produced while defining, checking or exporting frame models.

use petgraph::graph::NodeIndex;
use thiserror::Error;

use crate::backend::Backend;
use crate::model::{NodeRef, PartId};
use crate::part::{MaterialId, SectionId};

/// Error returned when editing a [`Part`](crate::Part) with invalid references.
///
/// # Examples
///
/// ```
/// use framex::{point, Part, PartError};
/// use petgraph::graph::NodeIndex;
///
/// let mut part = Part::new("frame_part");
/// let a = part.add_node(point(0.0, 0.0, 0.0));
/// let missing = NodeIndex::new(7);
/// # let section = framex::SectionId::new(0);
/// let error = part
///     .add_element(a, missing, section)
///     .expect_err("unknown node is rejected");
/// assert_eq!(error, PartError::UnknownNode(missing));
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PartError {
    /// Returned when a node cannot be found in the part.
    #[error("node {0:?} does not exist in this part")]
    UnknownNode(NodeIndex),
    /// Returned when a material cannot be found in the part.
    #[error("material {0:?} does not exist in this part")]
    UnknownMaterial(MaterialId),
    /// Returned when a section cannot be found in the part.
    #[error("section {0:?} does not exist in this part")]
    UnknownSection(SectionId),
    /// Returned when an element would connect a node to itself.
    #[error("element cannot connect node {0:?} to itself")]
    SelfConnectedElement(NodeIndex),
    /// Returned when both element nodes sit at the same position.
    #[error("element between {start:?} and {end:?} has zero length")]
    ZeroLengthElement {
        /// Start node of the rejected element.
        start: NodeIndex,
        /// End node of the rejected element.
        end: NodeIndex,
    },
    /// Returned when a stored material fails validation.
    #[error(transparent)]
    Material(#[from] MaterialError),
    /// Returned when a stored section fails validation.
    #[error(transparent)]
    Section(#[from] SectionError),
}

/// Error returned when material properties are not physically meaningful.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MaterialError {
    /// Returned when the elastic modulus is zero or negative.
    #[error("material '{name}': elastic modulus must be positive (received {value} Pa)")]
    NonPositiveElasticModulus {
        /// Name of the rejected material.
        name: String,
        /// Rejected modulus in pascals.
        value: f64,
    },
    /// Returned when Poisson's ratio lies outside `(-1, 0.5)`.
    #[error("material '{name}': Poisson ratio must lie in (-1, 0.5) (received {value})")]
    PoissonRatioOutOfRange {
        /// Name of the rejected material.
        name: String,
        /// Rejected ratio.
        value: f64,
    },
    /// Returned when the density is negative.
    #[error("material '{name}': density must not be negative (received {value} kg/m^3)")]
    NegativeDensity {
        /// Name of the rejected material.
        name: String,
        /// Rejected density in kilograms per cubic metre.
        value: f64,
    },
}

/// Error returned when section dimensions are not usable.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SectionError {
    /// Returned when a dimension is zero or negative.
    #[error("section '{name}': {dimension} must be positive (received {value} m)")]
    NonPositiveDimension {
        /// Name of the rejected section.
        name: String,
        /// Which dimension was rejected.
        dimension: &'static str,
        /// Rejected value in metres.
        value: f64,
    },
    /// Returned when a pipe wall is at least as thick as its radius.
    #[error("section '{name}': wall thickness must be smaller than the radius")]
    WallTooThick {
        /// Name of the rejected section.
        name: String,
    },
}

/// Error returned when assembling a [`Model`](crate::Model).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ModelError {
    /// Returned when a part name is already taken.
    #[error("a part named '{0}' already exists in this model")]
    DuplicatePart(String),
    /// Returned when a part id does not belong to this model.
    #[error("part {0:?} does not exist in this model")]
    UnknownPart(PartId),
    /// Returned when a node reference cannot be resolved.
    #[error("node {0:?} does not exist in this model")]
    UnknownNode(NodeRef),
    /// Returned when a boundary condition would be applied to no nodes at all.
    #[error("'{0}' boundary condition selects no nodes")]
    EmptySelection(String),
    /// Returned when a problem name is already taken.
    #[error("a problem named '{0}' already exists in this model")]
    DuplicateProblem(String),
    /// Returned when a problem cannot be found by name.
    #[error("problem '{0}' does not exist in this model")]
    UnknownProblem(String),
    /// Returned by [`Model::check`](crate::Model::check) for a model without parts.
    #[error("model has no parts")]
    NoParts,
    /// Returned by [`Model::check`](crate::Model::check) for a model without elements.
    #[error("model has no elements")]
    NoElements,
    /// Returned by [`Model::check`](crate::Model::check) for an unrestrained model.
    #[error("model has no boundary conditions")]
    NoBoundaryConditions,
}

/// Error returned when defining an analysis [`Problem`](crate::Problem).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ProblemError {
    /// Returned when a step name is already used in the problem.
    #[error("a step named '{0}' already exists in this problem")]
    DuplicateStep(String),
    /// Returned when a node load pattern targets no nodes.
    #[error("load pattern for case '{0}' selects no nodes")]
    EmptySelection(String),
    /// Returned when a gravity direction has no length.
    #[error("gravity direction must not be the zero vector")]
    ZeroGravityDirection,
    /// Returned when a stored gravity direction is not a unit vector.
    #[error("gravity direction {0:?} is not a unit vector")]
    NonUnitGravityDirection([f64; 3]),
}

/// Error returned when parsing output request tags.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum OutputError {
    /// Returned for an unrecognised node output tag.
    #[error("unknown node output '{0}'")]
    UnknownNodeOutput(String),
    /// Returned for an unrecognised element output tag.
    #[error("unknown element output '{0}'")]
    UnknownElementOutput(String),
}

/// Error returned when parsing a unit system or backend tag.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseSettingError {
    /// Returned for an unrecognised unit system tag.
    #[error("unknown unit system '{0}' (expected SI, SI_mm or imperial)")]
    UnknownUnitSystem(String),
    /// Returned for an unrecognised backend tag.
    #[error("unknown backend '{0}' (expected abaqus, sofistik or opensees)")]
    UnknownBackend(String),
}

/// Error returned when reading [`Settings`](crate::Settings) from the environment.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("invalid value in {variable}: {source}")]
pub struct SettingsError {
    /// Environment variable holding the rejected value.
    pub variable: &'static str,
    /// Parse failure for the value.
    #[source]
    pub source: ParseSettingError,
}

/// Error returned when saving or loading a model file.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Returned when the file cannot be read or written.
    #[error("model file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// Returned when the model cannot be encoded or decoded.
    #[error("model serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    /// Returned when a decoded part breaks an editing invariant.
    #[error("invalid part '{part}' in model file: {source}")]
    Part {
        /// Name of the offending part.
        part: String,
        /// Violated invariant.
        #[source]
        source: PartError,
    },
    /// Returned when decoded boundary conditions or problems are inconsistent.
    #[error("invalid model file: {0}")]
    Model(#[from] ModelError),
    /// Returned when a decoded problem breaks a step invariant.
    #[error("invalid problem '{problem}' in model file: {source}")]
    Problem {
        /// Name of the offending problem.
        problem: String,
        /// Violated invariant.
        #[source]
        source: ProblemError,
    },
}

/// Error returned when writing an analysis input deck.
#[derive(Debug, Error)]
pub enum DeckError {
    /// Returned when the selected backend has no input deck writer.
    #[error("backend '{0}' has no input deck writer")]
    UnsupportedBackend(Backend),
    /// Returned when the model is not ready for analysis.
    #[error("model is not ready for analysis: {0}")]
    Model(#[from] ModelError),
    /// Returned when the deck file cannot be written.
    #[error("input deck I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
