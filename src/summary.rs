//! Human-readable summaries of models and problems.

use std::fmt::Write;

use crate::model::Model;
use crate::problem::{LoadPattern, Problem};
use crate::section::SectionShape;
use crate::units::{rounded, UnitSystem};

/// Render an overview of a model: settings, parts, materials, sections and
/// boundary conditions.
///
/// # Examples
/// ```
/// use framex::{model_summary, Model, Settings};
///
/// let model = Model::new("simple_frame", Settings::default());
/// let text = model_summary(&model);
/// assert!(text.contains("Model: simple_frame"));
/// assert!(text.contains("Units: SI_mm"));
/// ```
#[must_use]
pub fn model_summary(model: &Model) -> String {
    let units = model.settings().units;
    let length = units.length_label();
    let stress = units.stress_label();
    let mut output = String::new();

    writeln!(&mut output, "Model: {}", model.name()).expect("writing to string cannot fail");
    if let Some(description) = model.description() {
        writeln!(&mut output, "Description: {description}")
            .expect("writing to string cannot fail");
    }
    if let Some(author) = model.author() {
        writeln!(&mut output, "Author: {author}").expect("writing to string cannot fail");
    }
    writeln!(
        &mut output,
        "Units: {units} | Backend: {}",
        model.settings().backend
    )
    .expect("writing to string cannot fail");

    for (id, part) in model.parts() {
        writeln!(
            &mut output,
            "Part {} '{}': {} nodes, {} elements, mass = {:.4e} {}",
            id.index(),
            part.name(),
            part.node_count(),
            part.element_count(),
            part.mass(units),
            units.mass_label()
        )
        .expect("writing to string cannot fail");
        for (_, material) in part.materials() {
            writeln!(
                &mut output,
                "  Material '{}': E = {} {stress}, v = {}, density = {:.4e}",
                material.name(),
                rounded(units.stress(material.elastic_modulus())),
                material.poisson_ratio(),
                units.density(material.density())
            )
            .expect("writing to string cannot fail");
        }
        for (_, section) in part.sections() {
            let shape = match section.shape() {
                SectionShape::Rectangular { w, h } => format!(
                    "rectangular {} x {} {length}",
                    rounded(units.length(w)),
                    rounded(units.length(h))
                ),
                SectionShape::Circular { r } => {
                    format!("circular r = {} {length}", rounded(units.length(r)))
                }
                SectionShape::Pipe { r, t } => format!(
                    "pipe r = {}, t = {} {length}",
                    rounded(units.length(r)),
                    rounded(units.length(t))
                ),
            };
            let properties = section.properties(units);
            let material = part
                .material(section.material())
                .map_or("?", |material| material.name());
            writeln!(
                &mut output,
                "  Section '{}': {shape}, A = {:.4e}, material '{material}'",
                section.name(),
                properties.area
            )
            .expect("writing to string cannot fail");
        }
    }

    for assignment in model.boundary_conditions() {
        let nodes: Vec<String> = assignment
            .nodes
            .iter()
            .map(|node| format!("{}:{}", node.part.index(), node.node.index()))
            .collect();
        writeln!(
            &mut output,
            "Boundary '{}' (dofs {:?}) on nodes [{}]",
            assignment.condition,
            assignment.condition.restrained_dofs(),
            nodes.join(", ")
        )
        .expect("writing to string cannot fail");
    }

    if model.problems().is_empty() {
        output.push_str("Problems: none\n");
    } else {
        let names: Vec<&str> = model.problems().iter().map(Problem::name).collect();
        writeln!(&mut output, "Problems: {}", names.join(", "))
            .expect("writing to string cannot fail");
    }

    output
}

/// Render the steps, load patterns and output requests of a problem with
/// values expressed in `units`.
#[must_use]
pub fn problem_summary(problem: &Problem, units: UnitSystem) -> String {
    let mut output = String::new();

    writeln!(&mut output, "Problem: {}", problem.name()).expect("writing to string cannot fail");
    if let Some(description) = problem.description() {
        writeln!(&mut output, "Description: {description}")
            .expect("writing to string cannot fail");
    }

    for step in problem.steps() {
        writeln!(
            &mut output,
            "Step '{}': static, max increments = {}, initial = {}, min = {:e}, time = {}, nlgeom = {}",
            step.name,
            step.max_increments,
            step.initial_inc_size,
            step.min_inc_size,
            step.time,
            step.nlgeom
        )
        .expect("writing to string cannot fail");

        let factors: Vec<String> = step
            .combination
            .factors
            .iter()
            .map(|(case, factor)| format!("{case} x {factor}"))
            .collect();
        writeln!(
            &mut output,
            "  Combination '{}': {}",
            step.combination.name,
            factors.join(", ")
        )
        .expect("writing to string cannot fail");

        for pattern in step.patterns() {
            match pattern {
                LoadPattern::Node {
                    nodes,
                    load,
                    load_case,
                } => {
                    let components: Vec<String> = ["x", "y", "z", "xx", "yy", "zz"]
                        .iter()
                        .zip(load.components(units))
                        .filter_map(|(label, value)| {
                            value.map(|v| format!("{label} = {}", rounded(v)))
                        })
                        .collect();
                    writeln!(
                        &mut output,
                        "  Node load [{load_case}] on {} node(s): {} ({})",
                        nodes.len(),
                        components.join(", "),
                        units.force_label()
                    )
                    .expect("writing to string cannot fail");
                }
                LoadPattern::Gravity {
                    g,
                    direction,
                    load_case,
                } => {
                    writeln!(
                        &mut output,
                        "  Gravity [{load_case}]: g = {} along {direction:?}",
                        rounded(units.acceleration(*g))
                    )
                    .expect("writing to string cannot fail");
                }
            }
        }

        for request in step.outputs() {
            let nodal: Vec<&str> = request.node_outputs.iter().map(|o| o.tag()).collect();
            let element: Vec<&str> = request.element_outputs.iter().map(|o| o.tag()).collect();
            writeln!(
                &mut output,
                "  Output '{}': node [{}], element [{}]",
                request.name,
                nodal.join(", "),
                element.join(", ")
            )
            .expect("writing to string cannot fail");
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use petgraph::graph::NodeIndex;
    use uom::si::{f64::Force, force::kilonewton};

    use super::*;
    use crate::model::{NodeRef, PartId};
    use crate::output::FieldOutput;
    use crate::problem::{LoadCombination, NodeLoad, StaticStep};
    use crate::settings::Settings;

    #[test]
    fn model_summary_lists_settings_and_problems() {
        let model = Model::new("frame", Settings::default())
            .with_description("portal")
            .with_author("framex");
        let text = model_summary(&model);
        assert!(text.contains("Description: portal"));
        assert!(text.contains("Backend: abaqus"));
        assert!(text.contains("Problems: none"));
    }

    #[test]
    fn problem_summary_reports_loads_in_units() {
        let mut step = StaticStep::new("step_1").with_combination(LoadCombination::uls());
        step.add_node_pattern(
            &[NodeRef::new(PartId::new(0), NodeIndex::new(3))],
            NodeLoad::default().with_y(Force::new::<kilonewton>(-10.0)),
            "LL",
        )
        .expect("node selected");
        step.add_output(FieldOutput::parse("fout", &["U", "RF"], &["SF"]).expect("known tags"));
        let mut problem = Problem::new("00_simple_problem");
        problem.add_step(step).expect("first step");

        let text = problem_summary(&problem, UnitSystem::SiMm);
        assert!(text.contains("Problem: 00_simple_problem"));
        assert!(text.contains("LL x 1.5"));
        assert!(text.contains("Node load [LL] on 1 node(s): y = -10000 (N)"));
        assert!(text.contains("node [U, RF], element [SF]"));
    }
}
