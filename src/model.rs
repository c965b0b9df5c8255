//! The top-level model: parts, boundary conditions and analysis problems.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::boundary::BoundaryCondition;
use crate::deck;
use crate::errors::{DeckError, ModelError, PersistError};
use crate::geometry::Point;
use crate::part::Part;
use crate::problem::Problem;
use crate::settings::Settings;
use crate::summary;

/// Distance under which two nodes of a part are reported as duplicates.
const DUPLICATE_TOLERANCE: f64 = 1.0e-9;

/// Index of a part inside a [`Model`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PartId(usize);

impl PartId {
    /// Wrap a raw part index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A node of a specific part.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeRef {
    /// Part owning the node.
    pub part: PartId,
    /// Node inside the part.
    pub node: NodeIndex,
}

impl NodeRef {
    /// Refer to `node` of `part`.
    #[must_use]
    pub const fn new(part: PartId, node: NodeIndex) -> Self {
        Self { part, node }
    }
}

/// A boundary condition applied to a set of nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundaryAssignment {
    /// Restraints applied.
    pub condition: BoundaryCondition,
    /// Restrained nodes.
    pub nodes: Vec<NodeRef>,
}

/// Container for a complete structural model.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Model {
    /// Name of the model.
    name: String,
    /// Optional free-text description.
    description: Option<String>,
    /// Optional author.
    author: Option<String>,
    /// Unit system and backend.
    settings: Settings,
    /// Parts in insertion order.
    parts: Vec<Part>,
    /// Boundary conditions in insertion order.
    boundary: Vec<BoundaryAssignment>,
    /// Analysis problems in insertion order.
    problems: Vec<Problem>,
}

impl Model {
    /// Create an empty model.
    ///
    /// # Examples
    /// ```
    /// use framex::{Model, Settings};
    ///
    /// let model = Model::new("simple_frame", Settings::default());
    /// assert_eq!(model.name(), "simple_frame");
    /// assert_eq!(model.parts().count(), 0);
    /// ```
    #[must_use]
    pub fn new(name: &str, settings: Settings) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            author: None,
            settings,
            parts: Vec::new(),
            boundary: Vec::new(),
            problems: Vec::new(),
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Attach an author.
    #[must_use]
    pub fn with_author(mut self, author: &str) -> Self {
        self.author = Some(author.to_string());
        self
    }

    /// Name of the model.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description of the model.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Author of the model.
    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Unit system and backend of the model.
    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Add a part.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicatePart`] when a part of the same name exists.
    pub fn add_part(&mut self, part: Part) -> Result<PartId, ModelError> {
        if self.parts.iter().any(|existing| existing.name() == part.name()) {
            return Err(ModelError::DuplicatePart(part.name().to_string()));
        }
        debug!(
            "model '{}': added part '{}' ({} nodes, {} elements)",
            self.name,
            part.name(),
            part.node_count(),
            part.element_count()
        );
        self.parts.push(part);
        Ok(PartId(self.parts.len() - 1))
    }

    /// Look up a part.
    #[must_use]
    pub fn part(&self, part: PartId) -> Option<&Part> {
        self.parts.get(part.0)
    }

    /// Look up a part by name.
    #[must_use]
    pub fn part_by_name(&self, name: &str) -> Option<PartId> {
        self.parts
            .iter()
            .position(|part| part.name() == name)
            .map(PartId)
    }

    /// Iterate over parts.
    pub fn parts(&self) -> impl Iterator<Item = (PartId, &Part)> + '_ {
        self.parts
            .iter()
            .enumerate()
            .map(|(index, part)| (PartId(index), part))
    }

    /// Whether a node reference resolves in this model.
    #[must_use]
    pub fn contains_node(&self, node: NodeRef) -> bool {
        self.part(node.part)
            .map_or(false, |part| part.contains_node(node.node))
    }

    /// Position of a referenced node.
    #[must_use]
    pub fn node_position(&self, node: NodeRef) -> Option<Point> {
        self.part(node.part)?.node_position(node.node)
    }

    /// Find nodes of every part within `distance` of `target`.
    #[must_use]
    pub fn find_nodes_around_point(&self, target: Point, distance: f64) -> Vec<NodeRef> {
        self.parts()
            .flat_map(|(id, part)| {
                part.find_nodes_around_point(target, distance)
                    .into_iter()
                    .map(move |node| NodeRef::new(id, node))
            })
            .collect()
    }

    /// Restrain `nodes` of `part` with `condition`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptySelection`] when `nodes` is empty,
    /// [`ModelError::UnknownPart`] or [`ModelError::UnknownNode`] for dangling
    /// references.
    pub fn add_bc(
        &mut self,
        condition: BoundaryCondition,
        part: PartId,
        nodes: &[NodeIndex],
    ) -> Result<(), ModelError> {
        if nodes.is_empty() {
            return Err(ModelError::EmptySelection(condition.kind().to_string()));
        }
        let owner = self.part(part).ok_or(ModelError::UnknownPart(part))?;
        if let Some(missing) = nodes.iter().find(|node| !owner.contains_node(**node)) {
            return Err(ModelError::UnknownNode(NodeRef::new(part, *missing)));
        }
        debug!(
            "model '{}': '{}' boundary condition on {} node(s) of part '{}'",
            self.name,
            condition,
            nodes.len(),
            owner.name()
        );
        self.boundary.push(BoundaryAssignment {
            condition,
            nodes: nodes.iter().map(|node| NodeRef::new(part, *node)).collect(),
        });
        Ok(())
    }

    /// Fix every degree of freedom of `nodes`.
    ///
    /// # Errors
    ///
    /// Same as [`Model::add_bc`].
    pub fn add_fix_bc(&mut self, part: PartId, nodes: &[NodeIndex]) -> Result<(), ModelError> {
        self.add_bc(BoundaryCondition::fixed(), part, nodes)
    }

    /// Fix the translations of `nodes`.
    ///
    /// # Errors
    ///
    /// Same as [`Model::add_bc`].
    pub fn add_pin_bc(&mut self, part: PartId, nodes: &[NodeIndex]) -> Result<(), ModelError> {
        self.add_bc(BoundaryCondition::pinned(), part, nodes)
    }

    /// Pin `nodes` but let them slide along X.
    ///
    /// # Errors
    ///
    /// Same as [`Model::add_bc`].
    pub fn add_roller_x_bc(
        &mut self,
        part: PartId,
        nodes: &[NodeIndex],
    ) -> Result<(), ModelError> {
        self.add_bc(BoundaryCondition::roller_x(), part, nodes)
    }

    /// Pin `nodes` but let them slide along Y.
    ///
    /// # Errors
    ///
    /// Same as [`Model::add_bc`].
    pub fn add_roller_y_bc(
        &mut self,
        part: PartId,
        nodes: &[NodeIndex],
    ) -> Result<(), ModelError> {
        self.add_bc(BoundaryCondition::roller_y(), part, nodes)
    }

    /// Pin `nodes` but let them slide along Z.
    ///
    /// # Errors
    ///
    /// Same as [`Model::add_bc`].
    pub fn add_roller_z_bc(
        &mut self,
        part: PartId,
        nodes: &[NodeIndex],
    ) -> Result<(), ModelError> {
        self.add_bc(BoundaryCondition::roller_z(), part, nodes)
    }

    /// Boundary conditions in insertion order.
    #[must_use]
    pub fn boundary_conditions(&self) -> &[BoundaryAssignment] {
        &self.boundary
    }

    /// Combined restraint of a node, if any condition touches it.
    #[must_use]
    pub fn restraint_at(&self, node: NodeRef) -> Option<BoundaryCondition> {
        self.boundary
            .iter()
            .filter(|assignment| assignment.nodes.contains(&node))
            .map(|assignment| assignment.condition)
            .reduce(BoundaryCondition::union)
    }

    /// Register an analysis problem.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateProblem`] when the name is taken and
    /// [`ModelError::UnknownNode`] when a load pattern refers to a node that is
    /// not part of this model.
    pub fn add_problem(&mut self, problem: Problem) -> Result<(), ModelError> {
        if self.problem(problem.name()).is_some() {
            return Err(ModelError::DuplicateProblem(problem.name().to_string()));
        }
        if let Some(missing) = problem.node_refs().find(|node| !self.contains_node(*node)) {
            return Err(ModelError::UnknownNode(missing));
        }
        for step in problem.steps() {
            for case in step.unmatched_load_cases() {
                warn!(
                    "problem '{}', step '{}': load case '{}' is not part of combination '{}' and is ignored",
                    problem.name(),
                    step.name,
                    case,
                    step.combination.name
                );
            }
        }
        debug!(
            "model '{}': added problem '{}' with {} step(s)",
            self.name,
            problem.name(),
            problem.steps().len()
        );
        self.problems.push(problem);
        Ok(())
    }

    /// Look up a problem by name.
    #[must_use]
    pub fn problem(&self, name: &str) -> Option<&Problem> {
        self.problems.iter().find(|problem| problem.name() == name)
    }

    /// Problems in insertion order.
    #[must_use]
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    /// Total number of nodes over all parts.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.parts.iter().map(Part::node_count).sum()
    }

    /// Total number of elements over all parts.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.parts.iter().map(Part::element_count).sum()
    }

    /// Check that the model can be handed to a solver.
    ///
    /// Duplicate and unconnected nodes are legal and only logged as warnings.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NoParts`], [`ModelError::NoElements`] or
    /// [`ModelError::NoBoundaryConditions`].
    pub fn check(&self) -> Result<(), ModelError> {
        if self.parts.is_empty() {
            return Err(ModelError::NoParts);
        }
        if self.element_count() == 0 {
            return Err(ModelError::NoElements);
        }
        if self.boundary.is_empty() {
            return Err(ModelError::NoBoundaryConditions);
        }
        for part in &self.parts {
            for (a, b) in part.duplicate_nodes(DUPLICATE_TOLERANCE) {
                warn!(
                    "part '{}': nodes {} and {} share a position",
                    part.name(),
                    a.index(),
                    b.index()
                );
            }
            let loose = part.unconnected_nodes();
            if !loose.is_empty() {
                warn!(
                    "part '{}': {} node(s) are not connected to any element",
                    part.name(),
                    loose.len()
                );
            }
        }
        Ok(())
    }

    /// Human-readable overview of the model.
    #[must_use]
    pub fn summary(&self) -> String {
        summary::model_summary(self)
    }

    /// Serialize the model as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Json`] when serialization fails.
    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rebuild a model from JSON produced by [`Model::to_json`].
    ///
    /// The decoded model is held to the same rules as one built through the
    /// editing methods.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Json`] for malformed input,
    /// [`PersistError::Part`], [`PersistError::Model`] or
    /// [`PersistError::Problem`] when the content breaks a model invariant.
    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Re-apply the checks of the editing methods to a decoded model.
    fn validate(&self) -> Result<(), PersistError> {
        let mut part_names = BTreeSet::new();
        for part in &self.parts {
            part.validate().map_err(|source| PersistError::Part {
                part: part.name().to_string(),
                source,
            })?;
            if !part_names.insert(part.name()) {
                return Err(ModelError::DuplicatePart(part.name().to_string()).into());
            }
        }
        for assignment in &self.boundary {
            if assignment.nodes.is_empty() {
                return Err(
                    ModelError::EmptySelection(assignment.condition.kind().to_string()).into(),
                );
            }
            for node in &assignment.nodes {
                if self.part(node.part).is_none() {
                    return Err(ModelError::UnknownPart(node.part).into());
                }
                if !self.contains_node(*node) {
                    return Err(ModelError::UnknownNode(*node).into());
                }
            }
        }
        let mut problem_names = BTreeSet::new();
        for problem in &self.problems {
            if !problem_names.insert(problem.name()) {
                return Err(ModelError::DuplicateProblem(problem.name().to_string()).into());
            }
            problem.validate().map_err(|source| PersistError::Problem {
                problem: problem.name().to_string(),
                source,
            })?;
            if let Some(missing) = problem.node_refs().find(|node| !self.contains_node(*node)) {
                return Err(ModelError::UnknownNode(missing).into());
            }
        }
        Ok(())
    }

    /// Write the model to `path` as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] when encoding or writing fails.
    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        fs::write(path, self.to_json()?)?;
        info!("model '{}' saved to {}", self.name, path.display());
        Ok(())
    }

    /// Read a model written by [`Model::save`].
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] when reading or decoding fails.
    pub fn load(path: &Path) -> Result<Self, PersistError> {
        let model = Self::from_json(&fs::read_to_string(path)?)?;
        info!("model '{}' loaded from {}", model.name, path.display());
        Ok(model)
    }

    /// Write the input deck of problem `name` into `directory`.
    ///
    /// The file is named after the problem with the backend's extension.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::UnsupportedBackend`] when the model's backend has no
    /// deck writer, [`DeckError::Model`] when the problem is unknown or the
    /// model fails [`Model::check`], and [`DeckError::Io`] on write failure.
    pub fn write_input(&self, name: &str, directory: &Path) -> Result<PathBuf, DeckError> {
        let backend = self.settings.backend;
        if !backend.supports_input_deck() {
            return Err(DeckError::UnsupportedBackend(backend));
        }
        let problem = self
            .problem(name)
            .ok_or_else(|| ModelError::UnknownProblem(name.to_string()))?;
        self.check()?;
        let text = deck::render_input(self, problem);
        fs::create_dir_all(directory)?;
        let path = directory.join(format!("{}.{}", problem.name(), backend.input_extension()));
        fs::write(&path, text)?;
        info!(
            "input deck for problem '{}' written to {}",
            problem.name(),
            path.display()
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use uom::si::{
        f64::{Force, Length},
        force::kilonewton,
        length::millimeter,
    };

    use super::*;
    use crate::backend::Backend;
    use crate::errors::{MaterialError, PartError, ProblemError, SectionError};
    use crate::geometry::point;
    use crate::material::ElasticIsotropic;
    use crate::part::SectionId;
    use crate::problem::{NodeLoad, StaticStep};
    use crate::section::Section;
    use crate::units::UnitSystem;

    fn cantilever() -> (Model, PartId, Vec<NodeIndex>) {
        let mut part = Part::new("beam");
        let material = part.add_material(ElasticIsotropic::steel("steel"));
        let section = part
            .add_section(
                Section::rectangular(
                    "rect",
                    Length::new::<millimeter>(100.0),
                    Length::new::<millimeter>(200.0),
                    material,
                )
                .expect("valid section"),
            )
            .expect("material registered");
        let nodes = part.add_nodes([point(0.0, 0.0, 0.0), point(1_000.0, 0.0, 0.0)]);
        part.add_element(nodes[0], nodes[1], section)
            .expect("valid element");

        let mut model = Model::new("cantilever", Settings::default());
        let id = model.add_part(part).expect("first part");
        (model, id, nodes)
    }

    #[test]
    fn part_names_are_unique() {
        let (mut model, id, _) = cantilever();
        assert_eq!(model.part_by_name("beam"), Some(id));
        assert_eq!(
            model.add_part(Part::new("beam")),
            Err(ModelError::DuplicatePart("beam".to_string()))
        );
    }

    #[test]
    fn boundary_conditions_validate_selection() {
        let (mut model, id, nodes) = cantilever();

        assert_eq!(
            model.add_pin_bc(id, &[]),
            Err(ModelError::EmptySelection("pin".to_string()))
        );
        assert_eq!(
            model.add_fix_bc(PartId::new(4), &nodes),
            Err(ModelError::UnknownPart(PartId::new(4)))
        );
        let ghost = NodeIndex::new(99);
        assert_eq!(
            model.add_fix_bc(id, &[ghost]),
            Err(ModelError::UnknownNode(NodeRef::new(id, ghost)))
        );
        assert!(model.boundary_conditions().is_empty());
    }

    #[test]
    fn restraints_accumulate_per_node() {
        let (mut model, id, nodes) = cantilever();
        let found = model
            .part(id)
            .expect("part exists")
            .find_nodes_around_point(point(0.0, 0.0, 0.0), 0.1);
        model.add_roller_x_bc(id, &found).expect("node found");
        model.add_roller_y_bc(id, &found).expect("node found");

        assert_eq!(
            model.restraint_at(NodeRef::new(id, nodes[0])),
            Some(BoundaryCondition::pinned())
        );
        assert_eq!(model.restraint_at(NodeRef::new(id, nodes[1])), None);
    }

    #[test]
    fn check_requires_elements_and_supports() {
        let empty = Model::new("empty", Settings::default());
        assert_eq!(empty.check(), Err(ModelError::NoParts));

        let mut bare = Model::new("bare", Settings::default());
        bare.add_part(Part::new("nothing")).expect("first part");
        assert_eq!(bare.check(), Err(ModelError::NoElements));

        let (mut model, id, nodes) = cantilever();
        assert_eq!(model.check(), Err(ModelError::NoBoundaryConditions));
        model.add_fix_bc(id, &nodes[..1]).expect("node exists");
        assert_eq!(model.check(), Ok(()));
    }

    #[test]
    fn problems_must_reference_model_nodes() {
        let (mut model, id, nodes) = cantilever();
        let ghost = NodeRef::new(id, NodeIndex::new(42));
        let load = NodeLoad::default().with_y(Force::new::<kilonewton>(-1.0));

        let mut step = StaticStep::new("step_1");
        step.add_node_pattern(&[ghost], load, "LL")
            .expect("selection is not empty");
        let mut stray = Problem::new("stray");
        stray.add_step(step).expect("first step");
        assert_eq!(model.add_problem(stray), Err(ModelError::UnknownNode(ghost)));

        let mut step = StaticStep::new("step_1");
        step.add_node_pattern(&[NodeRef::new(id, nodes[1])], load, "LL")
            .expect("selection is not empty");
        let mut problem = Problem::new("tip_load");
        problem.add_step(step).expect("first step");
        model.add_problem(problem.clone()).expect("valid problem");
        assert_eq!(
            model.add_problem(problem),
            Err(ModelError::DuplicateProblem("tip_load".to_string()))
        );
        assert!(model.problem("tip_load").is_some());
    }

    #[test]
    fn json_preserves_the_model() {
        let (mut model, id, nodes) = cantilever();
        model.add_fix_bc(id, &nodes[..1]).expect("node exists");

        let restored = Model::from_json(&model.to_json().expect("serializes"))
            .expect("deserializes");
        assert_eq!(restored.name(), "cantilever");
        assert_eq!(restored.node_count(), 2);
        assert_eq!(restored.element_count(), 1);
        assert_eq!(restored.boundary_conditions(), model.boundary_conditions());
        assert_eq!(
            restored.node_position(NodeRef::new(id, nodes[1])),
            Some(point(1_000.0, 0.0, 0.0))
        );
    }

    /// JSON of the supported cantilever with one tip load problem.
    fn cantilever_json() -> (serde_json::Value, PartId) {
        let (mut model, id, nodes) = cantilever();
        model.add_fix_bc(id, &nodes[..1]).expect("node exists");
        let mut step = StaticStep::new("step_1");
        step.add_node_pattern(
            &[NodeRef::new(id, nodes[1])],
            NodeLoad::default().with_y(Force::new::<kilonewton>(-1.0)),
            "LL",
        )
        .expect("selection is not empty");
        let mut problem = Problem::new("tip_load");
        problem.add_step(step).expect("first step");
        model.add_problem(problem).expect("valid problem");
        let value = serde_json::from_str(&model.to_json().expect("serializes"))
            .expect("valid JSON");
        (value, id)
    }

    fn reload(value: &serde_json::Value) -> Result<Model, PersistError> {
        Model::from_json(&value.to_string())
    }

    #[test]
    fn loading_rejects_invalid_materials_and_sections() {
        let (value, _) = cantilever_json();
        assert!(reload(&value).is_ok());

        let mut bad_ratio = value.clone();
        bad_ratio["parts"][0]["materials"][0]["v"] = serde_json::json!(0.9);
        let error = reload(&bad_ratio).expect_err("Poisson ratio above 0.5");
        assert!(matches!(
            error,
            PersistError::Part {
                source: PartError::Material(MaterialError::PoissonRatioOutOfRange { .. }),
                ..
            }
        ));

        let mut bad_width = value.clone();
        bad_width["parts"][0]["sections"][0]["shape"]["Rectangular"]["w"] =
            serde_json::json!(-0.1);
        let error = reload(&bad_width).expect_err("negative width");
        assert!(matches!(
            error,
            PersistError::Part {
                source: PartError::Section(SectionError::NonPositiveDimension { .. }),
                ..
            }
        ));

        let mut bad_material = value;
        bad_material["parts"][0]["sections"][0]["material"] = serde_json::json!(3);
        let error = reload(&bad_material).expect_err("section material missing");
        assert!(matches!(
            error,
            PersistError::Part {
                source: PartError::UnknownMaterial(_),
                ..
            }
        ));
    }

    #[test]
    fn loading_rejects_invalid_elements() {
        let (value, _) = cantilever_json();

        let mut unknown_section = value.clone();
        unknown_section["parts"][0]["graph"]["edges"][0][2]["section"] = serde_json::json!(3);
        let error = reload(&unknown_section).expect_err("element section missing");
        assert!(matches!(
            error,
            PersistError::Part {
                source: PartError::UnknownSection(section),
                ..
            } if section == SectionId::new(3)
        ));

        let mut looped = value.clone();
        looped["parts"][0]["graph"]["edges"][0][1] = serde_json::json!(0);
        let error = reload(&looped).expect_err("element ends coincide");
        assert!(matches!(
            error,
            PersistError::Part {
                source: PartError::SelfConnectedElement(_),
                ..
            }
        ));

        let mut collapsed = value;
        collapsed["parts"][0]["graph"]["nodes"][1] =
            collapsed["parts"][0]["graph"]["nodes"][0].clone();
        let error = reload(&collapsed).expect_err("element has no length");
        assert!(matches!(
            error,
            PersistError::Part {
                source: PartError::ZeroLengthElement { .. },
                ..
            }
        ));
    }

    #[test]
    fn loading_rejects_dangling_references_and_duplicates() {
        let (value, id) = cantilever_json();

        let mut dangling_bc = value.clone();
        dangling_bc["boundary"][0]["nodes"][0]["node"] = serde_json::json!(7);
        let error = reload(&dangling_bc).expect_err("restrained node missing");
        assert!(matches!(
            error,
            PersistError::Model(ModelError::UnknownNode(node))
                if node == NodeRef::new(id, NodeIndex::new(7))
        ));

        let mut foreign_bc = value.clone();
        foreign_bc["boundary"][0]["nodes"][0]["part"] = serde_json::json!(2);
        let error = reload(&foreign_bc).expect_err("restrained part missing");
        assert!(matches!(
            error,
            PersistError::Model(ModelError::UnknownPart(part)) if part == PartId::new(2)
        ));

        let mut empty_bc = value.clone();
        empty_bc["boundary"][0]["nodes"] = serde_json::json!([]);
        let error = reload(&empty_bc).expect_err("restraint selects nothing");
        assert!(matches!(
            error,
            PersistError::Model(ModelError::EmptySelection(_))
        ));

        let mut twin_parts = value.clone();
        let part = twin_parts["parts"][0].clone();
        twin_parts["parts"]
            .as_array_mut()
            .expect("parts array")
            .push(part);
        let error = reload(&twin_parts).expect_err("part name repeated");
        assert!(matches!(
            error,
            PersistError::Model(ModelError::DuplicatePart(name)) if name == "beam"
        ));

        let mut twin_problems = value.clone();
        let problem = twin_problems["problems"][0].clone();
        twin_problems["problems"]
            .as_array_mut()
            .expect("problems array")
            .push(problem);
        let error = reload(&twin_problems).expect_err("problem name repeated");
        assert!(matches!(
            error,
            PersistError::Model(ModelError::DuplicateProblem(name)) if name == "tip_load"
        ));

        let mut stray_load = value;
        stray_load["problems"][0]["steps"][0]["patterns"][0]["Node"]["nodes"][0]["node"] =
            serde_json::json!(9);
        let error = reload(&stray_load).expect_err("loaded node missing");
        assert!(matches!(
            error,
            PersistError::Model(ModelError::UnknownNode(node))
                if node == NodeRef::new(id, NodeIndex::new(9))
        ));
    }

    #[test]
    fn loading_rejects_invalid_steps() {
        let (value, _) = cantilever_json();
        let mut twin_steps = value;
        let step = twin_steps["problems"][0]["steps"][0].clone();
        twin_steps["problems"][0]["steps"]
            .as_array_mut()
            .expect("steps array")
            .push(step);
        let error = reload(&twin_steps).expect_err("step name repeated");
        assert!(matches!(
            error,
            PersistError::Problem {
                source: ProblemError::DuplicateStep(_),
                ..
            }
        ));
    }

    #[test]
    fn roller_z_restrains_x_and_y() {
        let (mut model, id, nodes) = cantilever();
        model.add_roller_z_bc(id, &nodes[1..]).expect("node exists");
        assert_eq!(
            model.restraint_at(NodeRef::new(id, nodes[1])),
            Some(BoundaryCondition::roller_z())
        );
        assert_eq!(model.boundary_conditions()[0].condition.kind(), "rollerZ");
    }

    #[test]
    fn deck_requires_supported_backend() {
        let (model, _, _) = cantilever();
        let mut other = Model::new("other", Settings::new(UnitSystem::SiMm, Backend::OpenSees));
        other.parts = model.parts.clone();
        let directory = tempfile::tempdir().expect("temporary directory");

        let error = other
            .write_input("missing", directory.path())
            .expect_err("no deck writer");
        assert!(matches!(error, DeckError::UnsupportedBackend(Backend::OpenSees)));

        let error = model
            .write_input("missing", directory.path())
            .expect_err("unknown problem");
        assert!(matches!(
            error,
            DeckError::Model(ModelError::UnknownProblem(_))
        ));
    }
}
