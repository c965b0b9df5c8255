//! Analysis problems: static steps, load combinations, load patterns and
//! output requests.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Add;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use uom::si::f64::{Acceleration, Force, Torque};

use crate::errors::ProblemError;
use crate::model::NodeRef;
use crate::output::FieldOutput;
use crate::summary;
use crate::units::UnitSystem;

/// Factors applied to load cases within a step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoadCombination {
    /// Name of the combination.
    pub name: String,
    /// Factor per load case name.
    pub factors: BTreeMap<String, f64>,
}

impl LoadCombination {
    /// Create a combination without any load case.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            factors: BTreeMap::new(),
        }
    }

    /// Add or replace the factor of a load case.
    #[must_use]
    pub fn with_case(mut self, case: &str, factor: f64) -> Self {
        self.factors.insert(case.to_string(), factor);
        self
    }

    /// Ultimate limit state: dead loads (`DL`, `SDL`) at 1.35, live load (`LL`) at 1.5.
    #[must_use]
    pub fn uls() -> Self {
        Self::new("ULS")
            .with_case("DL", 1.35)
            .with_case("SDL", 1.35)
            .with_case("LL", 1.5)
    }

    /// Serviceability limit state: `DL`, `SDL` and `LL` unfactored.
    #[must_use]
    pub fn sls() -> Self {
        Self::new("SLS")
            .with_case("DL", 1.0)
            .with_case("SDL", 1.0)
            .with_case("LL", 1.0)
    }

    /// Fundamental combination: `DL`, `SDL` and `LL` unfactored.
    #[must_use]
    pub fn fundamental() -> Self {
        Self::new("Fundamental")
            .with_case("DL", 1.0)
            .with_case("SDL", 1.0)
            .with_case("LL", 1.0)
    }

    /// Factor of a load case, if the combination includes it.
    #[must_use]
    pub fn factor(&self, case: &str) -> Option<f64> {
        self.factors.get(case).copied()
    }
}

impl Default for LoadCombination {
    fn default() -> Self {
        Self::fundamental()
    }
}

/// Forces and moments applied to a node. Missing components are unloaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeLoad {
    /// Force along X.
    pub x: Option<Force>,
    /// Force along Y.
    pub y: Option<Force>,
    /// Force along Z.
    pub z: Option<Force>,
    /// Moment about X.
    pub xx: Option<Torque>,
    /// Moment about Y.
    pub yy: Option<Torque>,
    /// Moment about Z.
    pub zz: Option<Torque>,
}

/// Sum two optional components, keeping `None` only when both are missing.
fn add_component<T: Add<Output = T>>(a: Option<T>, b: Option<T>) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + b),
        (a, None) => a,
        (None, b) => b,
    }
}

impl NodeLoad {
    /// A pure force.
    #[must_use]
    pub fn force(x: Force, y: Force, z: Force) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
            ..Self::default()
        }
    }

    /// Set the force along X.
    #[must_use]
    pub fn with_x(mut self, value: Force) -> Self {
        self.x = Some(value);
        self
    }

    /// Set the force along Y.
    #[must_use]
    pub fn with_y(mut self, value: Force) -> Self {
        self.y = Some(value);
        self
    }

    /// Set the force along Z.
    #[must_use]
    pub fn with_z(mut self, value: Force) -> Self {
        self.z = Some(value);
        self
    }

    /// Set the moment about X.
    #[must_use]
    pub fn with_xx(mut self, value: Torque) -> Self {
        self.xx = Some(value);
        self
    }

    /// Set the moment about Y.
    #[must_use]
    pub fn with_yy(mut self, value: Torque) -> Self {
        self.yy = Some(value);
        self
    }

    /// Set the moment about Z.
    #[must_use]
    pub fn with_zz(mut self, value: Torque) -> Self {
        self.zz = Some(value);
        self
    }

    /// Multiply every component by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            x: self.x.map(|v| v * factor),
            y: self.y.map(|v| v * factor),
            z: self.z.map(|v| v * factor),
            xx: self.xx.map(|v| v * factor),
            yy: self.yy.map(|v| v * factor),
            zz: self.zz.map(|v| v * factor),
        }
    }

    /// Components `[x, y, z, xx, yy, zz]` in `units`; missing components are `None`.
    #[must_use]
    pub fn components(&self, units: UnitSystem) -> [Option<f64>; 6] {
        [
            self.x.map(|v| units.force(v)),
            self.y.map(|v| units.force(v)),
            self.z.map(|v| units.force(v)),
            self.xx.map(|v| units.moment(v)),
            self.yy.map(|v| units.moment(v)),
            self.zz.map(|v| units.moment(v)),
        ]
    }
}

impl Add for NodeLoad {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: add_component(self.x, other.x),
            y: add_component(self.y, other.y),
            z: add_component(self.z, other.z),
            xx: add_component(self.xx, other.xx),
            yy: add_component(self.yy, other.yy),
            zz: add_component(self.zz, other.zz),
        }
    }
}

/// A group of loads belonging to one load case.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LoadPattern {
    /// The same load applied to each of a set of nodes.
    Node {
        /// Loaded nodes.
        nodes: Vec<NodeRef>,
        /// Load applied to every node.
        load: NodeLoad,
        /// Load case name.
        load_case: String,
    },
    /// Self-weight of the whole model.
    Gravity {
        /// Gravitational acceleration.
        g: Acceleration,
        /// Unit direction of gravity.
        direction: [f64; 3],
        /// Load case name.
        load_case: String,
    },
}

impl LoadPattern {
    /// Load case of the pattern.
    #[must_use]
    pub fn load_case(&self) -> &str {
        match self {
            Self::Node { load_case, .. } | Self::Gravity { load_case, .. } => load_case,
        }
    }
}

/// A linear or nonlinear static analysis step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaticStep {
    /// Name of the step, unique within a problem.
    pub name: String,
    /// Maximum number of increments.
    pub max_increments: usize,
    /// Size of the first increment.
    pub initial_inc_size: f64,
    /// Smallest increment size allowed.
    pub min_inc_size: f64,
    /// Total step time.
    pub time: f64,
    /// Whether geometric nonlinearity is included.
    pub nlgeom: bool,
    /// Factors applied to the load cases of the patterns.
    pub combination: LoadCombination,
    /// Load patterns applied in the step.
    patterns: Vec<LoadPattern>,
    /// Output requests of the step.
    outputs: Vec<FieldOutput>,
}

impl StaticStep {
    /// Create a step with default increment controls and the fundamental combination.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            max_increments: 100,
            initial_inc_size: 1.0,
            min_inc_size: 1.0e-5,
            time: 1.0,
            nlgeom: false,
            combination: LoadCombination::default(),
            patterns: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Replace the load combination.
    #[must_use]
    pub fn with_combination(mut self, combination: LoadCombination) -> Self {
        self.combination = combination;
        self
    }

    /// Apply `load` to each of `nodes` under `load_case`.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::EmptySelection`] when `nodes` is empty, which is
    /// what a proximity lookup that missed its target produces.
    pub fn add_node_pattern(
        &mut self,
        nodes: &[NodeRef],
        load: NodeLoad,
        load_case: &str,
    ) -> Result<(), ProblemError> {
        if nodes.is_empty() {
            return Err(ProblemError::EmptySelection(load_case.to_string()));
        }
        self.patterns.push(LoadPattern::Node {
            nodes: nodes.to_vec(),
            load,
            load_case: load_case.to_string(),
        });
        Ok(())
    }

    /// Apply self-weight with acceleration `g` along `direction`.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::ZeroGravityDirection`] when `direction` has no length.
    pub fn add_gravity_pattern(
        &mut self,
        g: Acceleration,
        direction: [f64; 3],
        load_case: &str,
    ) -> Result<(), ProblemError> {
        let [x, y, z] = direction;
        let unit = Vector3::new(x, y, z)
            .try_normalize(f64::EPSILON)
            .ok_or(ProblemError::ZeroGravityDirection)?;
        self.patterns.push(LoadPattern::Gravity {
            g,
            direction: [unit.x, unit.y, unit.z],
            load_case: load_case.to_string(),
        });
        Ok(())
    }

    /// Request output fields.
    pub fn add_output(&mut self, output: FieldOutput) {
        self.outputs.push(output);
    }

    /// Load patterns of the step.
    #[must_use]
    pub fn patterns(&self) -> &[LoadPattern] {
        &self.patterns
    }

    /// Output requests of the step.
    #[must_use]
    pub fn outputs(&self) -> &[FieldOutput] {
        &self.outputs
    }

    /// Distinct load cases used by the patterns.
    #[must_use]
    pub fn load_cases(&self) -> BTreeSet<&str> {
        self.patterns.iter().map(LoadPattern::load_case).collect()
    }

    /// Load cases used by the patterns but missing from the combination.
    #[must_use]
    pub fn unmatched_load_cases(&self) -> Vec<&str> {
        self.load_cases()
            .into_iter()
            .filter(|case| self.combination.factor(case).is_none())
            .collect()
    }

    /// Combination factor of a pattern's load case, if the combination has it.
    fn pattern_factor(&self, pattern: &LoadPattern) -> Option<f64> {
        self.combination.factor(pattern.load_case())
    }

    /// Node loads factored by the combination and summed per node.
    ///
    /// Patterns whose load case is not part of the combination are skipped.
    ///
    /// # Examples
    /// ```
    /// use framex::{LoadCombination, NodeLoad, NodeRef, PartId, StaticStep};
    /// use petgraph::graph::NodeIndex;
    /// use uom::si::{f64::Force, force::kilonewton};
    ///
    /// let node = NodeRef::new(PartId::new(0), NodeIndex::new(10));
    /// let mut step = StaticStep::new("step_1").with_combination(LoadCombination::uls());
    /// let load = NodeLoad::default().with_y(Force::new::<kilonewton>(-10.0));
    /// step.add_node_pattern(&[node], load, "LL").expect("node selected");
    ///
    /// let combined = step.combined_node_loads();
    /// let y = combined[&node].y.expect("y component");
    /// assert!((y.get::<kilonewton>() + 15.0).abs() < 1.0e-9);
    /// ```
    #[must_use]
    pub fn combined_node_loads(&self) -> BTreeMap<NodeRef, NodeLoad> {
        let mut combined: BTreeMap<NodeRef, NodeLoad> = BTreeMap::new();
        for pattern in &self.patterns {
            if let LoadPattern::Node { nodes, load, .. } = pattern {
                let Some(factor) = self.pattern_factor(pattern) else {
                    continue;
                };
                let factored = load.scaled(factor);
                for node in nodes {
                    let entry = combined.entry(*node).or_default();
                    *entry = *entry + factored;
                }
            }
        }
        combined
    }

    /// Gravity patterns as factored acceleration and unit direction.
    #[must_use]
    pub fn combined_gravity(&self) -> Vec<(Acceleration, [f64; 3])> {
        self.patterns
            .iter()
            .filter_map(|pattern| match pattern {
                LoadPattern::Gravity { g, direction, .. } => self
                    .pattern_factor(pattern)
                    .map(|factor| (*g * factor, *direction)),
                LoadPattern::Node { .. } => None,
            })
            .collect()
    }
}

/// A named analysis problem made of ordered steps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// Name of the problem, unique within a model.
    name: String,
    /// Optional free-text description.
    description: Option<String>,
    /// Steps in execution order.
    steps: Vec<StaticStep>,
}

impl Problem {
    /// Create a problem without steps.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            steps: Vec::new(),
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Name of the problem.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description of the problem.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Append a step.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::DuplicateStep`] when a step of the same name exists.
    pub fn add_step(&mut self, step: StaticStep) -> Result<(), ProblemError> {
        if self.step(&step.name).is_some() {
            return Err(ProblemError::DuplicateStep(step.name));
        }
        self.steps.push(step);
        Ok(())
    }

    /// Steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[StaticStep] {
        &self.steps
    }

    /// Look up a step by name.
    #[must_use]
    pub fn step(&self, name: &str) -> Option<&StaticStep> {
        self.steps.iter().find(|step| step.name == name)
    }

    /// Human-readable description of the steps with values in `units`.
    #[must_use]
    pub fn summary(&self, units: UnitSystem) -> String {
        summary::problem_summary(self, units)
    }

    /// Re-check step names and load patterns against the rules the builder
    /// methods enforce.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::DuplicateStep`] for a repeated step name,
    /// [`ProblemError::EmptySelection`] for a node pattern without nodes and
    /// [`ProblemError::ZeroGravityDirection`] or
    /// [`ProblemError::NonUnitGravityDirection`] for a bad gravity direction.
    pub fn validate(&self) -> Result<(), ProblemError> {
        let mut names = BTreeSet::new();
        for step in &self.steps {
            if !names.insert(step.name.as_str()) {
                return Err(ProblemError::DuplicateStep(step.name.clone()));
            }
            for pattern in &step.patterns {
                match pattern {
                    LoadPattern::Node {
                        nodes, load_case, ..
                    } if nodes.is_empty() => {
                        return Err(ProblemError::EmptySelection(load_case.clone()));
                    }
                    LoadPattern::Gravity { direction, .. } => {
                        let [x, y, z] = *direction;
                        let norm = Vector3::new(x, y, z).norm();
                        if norm == 0.0 {
                            return Err(ProblemError::ZeroGravityDirection);
                        }
                        if (norm - 1.0).abs() > 1.0e-9 {
                            return Err(ProblemError::NonUnitGravityDirection(*direction));
                        }
                    }
                    LoadPattern::Node { .. } => {}
                }
            }
        }
        Ok(())
    }

    /// Every node referenced by a load pattern.
    pub fn node_refs(&self) -> impl Iterator<Item = NodeRef> + '_ {
        self.steps
            .iter()
            .flat_map(|step| step.patterns.iter())
            .filter_map(|pattern| match pattern {
                LoadPattern::Node { nodes, .. } => Some(nodes.iter().copied()),
                LoadPattern::Gravity { .. } => None,
            })
            .flatten()
    }
}
