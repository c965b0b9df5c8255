use framex::{
    FieldOutput, LoadCombination, Model, NodeLoad, NodeRef, OutputError, PartId, Problem,
    ProblemError, StaticStep,
};
use thiserror::Error;
use uom::si::{f64::Force, force::kilonewton};

use crate::conditions::lookup_distance;
use crate::frame::model_point;

/// Name of the problem built by [`define_problem`].
pub const PROBLEM_NAME: &str = "00_simple_problem";

/// Failure while defining the analysis problem.
#[derive(Debug, Error)]
pub enum LoadingError {
    /// The loaded part is not in the model.
    #[error("part {0:?} is not part of the model")]
    MissingPart(PartId),
    /// Step or pattern definition failed.
    #[error(transparent)]
    Problem(#[from] ProblemError),
    /// An output tag was not recognised.
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// One ULS static step with a 10 kN downward live load on the node at
/// (200, 110, 0) mm, recording displacements, reactions and section forces.
pub fn define_problem(model: &Model, frame: PartId) -> Result<Problem, LoadingError> {
    let units = model.settings().units;
    let part = model.part(frame).ok_or(LoadingError::MissingPart(frame))?;
    let loaded: Vec<NodeRef> = part
        .find_nodes_around_point(model_point(units, [200.0, 110.0, 0.0]), lookup_distance(units))
        .into_iter()
        .map(|node| NodeRef::new(frame, node))
        .collect();

    let mut step = StaticStep::new("step_1").with_combination(LoadCombination::uls());
    step.add_node_pattern(
        &loaded,
        NodeLoad::default().with_y(Force::new::<kilonewton>(-10.0)),
        "LL",
    )?;
    step.add_output(FieldOutput::parse("fout", &["U", "RF"], &["SF"])?);

    let mut problem = Problem::new(PROBLEM_NAME);
    problem.add_step(step)?;
    Ok(problem)
}
