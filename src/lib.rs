#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod backend;
mod boundary;
mod deck;
mod element;
mod errors;
mod geometry;
mod material;
mod model;
mod output;
mod part;
mod problem;
mod section;
mod settings;
mod summary;
mod units;

pub use backend::Backend;
pub use boundary::BoundaryCondition;
pub use deck::render_input;
pub use element::BeamElement;
pub use errors::{
    DeckError, MaterialError, ModelError, OutputError, ParseSettingError, PartError,
    PersistError, ProblemError, SectionError, SettingsError,
};
pub use geometry::{point, Point};
pub use material::ElasticIsotropic;
pub use model::{BoundaryAssignment, Model, NodeRef, PartId};
pub use output::{ElementOutput, FieldOutput, NodeOutput};
pub use part::{MaterialId, Part, SectionId};
pub use problem::{LoadCombination, LoadPattern, NodeLoad, Problem, StaticStep};
pub use section::{Section, SectionProperties, SectionShape};
pub use settings::{Settings, BACKEND_VAR, UNITS_VAR};
pub use summary::{model_summary, problem_summary};
pub use units::UnitSystem;
