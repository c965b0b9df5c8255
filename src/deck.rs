//! Abaqus input deck writer.
//!
//! Parts are written as `*Part` blocks with 1-based node and element labels,
//! instanced once in the assembly as `<part>-1`. Materials are global in an
//! Abaqus deck, so their names are qualified with the owning part.

use std::collections::BTreeMap;
use std::fmt::Write;

use nalgebra::Vector3;

use crate::model::{Model, PartId};
use crate::part::{Part, SectionId};
use crate::problem::{Problem, StaticStep};
use crate::section::SectionShape;
use crate::units::{rounded as number, UnitSystem};

/// Element set holding every element of a part.
const ALL_ELEMENTS: &str = "ALL_ELEMENTS";

/// Labels written per data line in set definitions.
const LABELS_PER_LINE: usize = 16;

/// Elements sharing a section and an orientation, written as one beam section.
struct BeamGroup {
    /// Shared section.
    section: SectionId,
    /// Shared local axis 1 direction.
    orientation: Vector3<f64>,
    /// Element labels.
    labels: Vec<usize>,
}

/// Instance name of a part inside the assembly.
fn instance_name(part: &Part) -> String {
    format!("{}-1", part.name())
}

/// Material name, unique across the deck.
fn material_name(part: &Part, material: &str) -> String {
    format!("{}_{}", part.name(), material)
}

/// Write labels as comma separated data lines.
fn write_labels(output: &mut String, labels: &[usize]) {
    for chunk in labels.chunks(LABELS_PER_LINE) {
        let line: Vec<String> = chunk.iter().map(usize::to_string).collect();
        writeln!(output, "{}", line.join(", ")).expect("writing to string cannot fail");
    }
}

/// Group the elements of a part by section and orientation, in element order.
fn beam_groups(part: &Part) -> Vec<BeamGroup> {
    let mut groups: Vec<BeamGroup> = Vec::new();
    for (index, start, end, beam) in part.elements() {
        let (Some(a), Some(b)) = (part.node_position(start), part.node_position(end)) else {
            continue;
        };
        let orientation = beam.orientation(b.to_vector() - a.to_vector());
        let label = index.index() + 1;
        match groups
            .iter_mut()
            .find(|group| group.section == beam.section() && group.orientation == orientation)
        {
            Some(group) => group.labels.push(label),
            None => groups.push(BeamGroup {
                section: beam.section(),
                orientation,
                labels: vec![label],
            }),
        }
    }
    groups
}

/// Write one `*Part` block.
fn write_part(output: &mut String, part: &Part, units: UnitSystem) {
    writeln!(output, "*Part, name={}", part.name()).expect("writing to string cannot fail");

    output.push_str("*Node\n");
    for (index, position) in part.nodes() {
        writeln!(
            output,
            "{}, {}, {}, {}",
            index.index() + 1,
            number(position.x),
            number(position.y),
            number(position.z)
        )
        .expect("writing to string cannot fail");
    }

    output.push_str("*Element, type=B31\n");
    for (index, start, end, _) in part.elements() {
        writeln!(
            output,
            "{}, {}, {}",
            index.index() + 1,
            start.index() + 1,
            end.index() + 1
        )
        .expect("writing to string cannot fail");
    }
    if part.element_count() > 0 {
        writeln!(output, "*Elset, elset={ALL_ELEMENTS}, generate")
            .expect("writing to string cannot fail");
        writeln!(output, "1, {}, 1", part.element_count())
            .expect("writing to string cannot fail");
    }

    for (ordinal, group) in beam_groups(part).iter().enumerate() {
        let Some(section) = part.section(group.section) else {
            continue;
        };
        let Some(material) = part.material(section.material()) else {
            continue;
        };
        let elset = format!("{}_{}", section.name(), ordinal + 1);
        writeln!(output, "*Elset, elset={elset}").expect("writing to string cannot fail");
        write_labels(output, &group.labels);

        let (kind, dimensions) = match section.shape() {
            SectionShape::Rectangular { w, h } => {
                ("RECT", vec![units.length(w), units.length(h)])
            }
            SectionShape::Circular { r } => ("CIRC", vec![units.length(r)]),
            SectionShape::Pipe { r, t } => ("PIPE", vec![units.length(r), units.length(t)]),
        };
        writeln!(output, "** Section: {}", section.name()).expect("writing to string cannot fail");
        writeln!(
            output,
            "*Beam Section, elset={elset}, material={}, section={kind}",
            material_name(part, material.name())
        )
        .expect("writing to string cannot fail");
        let dimensions: Vec<String> = dimensions
            .iter()
            .map(|value| number(*value).to_string())
            .collect();
        writeln!(output, "{}", dimensions.join(", ")).expect("writing to string cannot fail");
        writeln!(
            output,
            "{}, {}, {}",
            number(group.orientation.x),
            number(group.orientation.y),
            number(group.orientation.z)
        )
        .expect("writing to string cannot fail");
    }

    output.push_str("*End Part\n");
}

/// Node set name of a boundary assignment restricted to one part.
fn boundary_set(ordinal: usize, kind: &str, part: &Part) -> String {
    format!("BC_{ordinal}_{kind}_{}", part.name())
}

/// Boundary assignments as `(set name, part, labels, dofs)`.
fn boundary_sets(model: &Model) -> Vec<(String, PartId, Vec<usize>, Vec<usize>)> {
    let mut sets = Vec::new();
    for (ordinal, assignment) in model.boundary_conditions().iter().enumerate() {
        let mut per_part: BTreeMap<PartId, Vec<usize>> = BTreeMap::new();
        for node in &assignment.nodes {
            per_part
                .entry(node.part)
                .or_default()
                .push(node.node.index() + 1);
        }
        for (id, labels) in per_part {
            let Some(part) = model.part(id) else {
                continue;
            };
            sets.push((
                boundary_set(ordinal + 1, assignment.condition.kind(), part),
                id,
                labels,
                assignment.condition.restrained_dofs(),
            ));
        }
    }
    sets
}

/// Write one `*Step` block with combined loads and output requests.
fn write_step(output: &mut String, model: &Model, step: &StaticStep, units: UnitSystem) {
    writeln!(
        output,
        "** STEP: {} (combination {})",
        step.name, step.combination.name
    )
    .expect("writing to string cannot fail");
    writeln!(
        output,
        "*Step, name={}, nlgeom={}, inc={}",
        step.name,
        if step.nlgeom { "YES" } else { "NO" },
        step.max_increments
    )
    .expect("writing to string cannot fail");
    output.push_str("*Static\n");
    writeln!(
        output,
        "{}, {}, {:e}, {}",
        step.initial_inc_size, step.time, step.min_inc_size, step.time
    )
    .expect("writing to string cannot fail");

    let loads = step.combined_node_loads();
    if !loads.is_empty() {
        output.push_str("*Cload\n");
        for (node, load) in &loads {
            let Some(part) = model.part(node.part) else {
                continue;
            };
            for (dof, value) in load.components(units).iter().enumerate() {
                if let Some(value) = value {
                    writeln!(
                        output,
                        "{}.{}, {}, {}",
                        instance_name(part),
                        node.node.index() + 1,
                        dof + 1,
                        number(*value)
                    )
                    .expect("writing to string cannot fail");
                }
            }
        }
    }

    let gravity = step.combined_gravity();
    if !gravity.is_empty() {
        output.push_str("*Dload\n");
        for (g, [x, y, z]) in gravity {
            for (_, part) in model.parts().filter(|(_, part)| part.element_count() > 0) {
                writeln!(
                    output,
                    "{}.{ALL_ELEMENTS}, GRAV, {}, {x}, {y}, {z}",
                    instance_name(part),
                    number(units.acceleration(g))
                )
                .expect("writing to string cannot fail");
            }
        }
    }

    if step.outputs().is_empty() {
        output.push_str("*Output, field, variable=PRESELECT\n");
    }
    for request in step.outputs() {
        writeln!(output, "** Output request: {}", request.name)
            .expect("writing to string cannot fail");
        output.push_str("*Output, field\n");
        if !request.node_outputs.is_empty() {
            let tags: Vec<&str> = request.node_outputs.iter().map(|o| o.tag()).collect();
            writeln!(output, "*Node Output\n{}", tags.join(", "))
                .expect("writing to string cannot fail");
        }
        if !request.element_outputs.is_empty() {
            let tags: Vec<&str> = request.element_outputs.iter().map(|o| o.tag()).collect();
            writeln!(output, "*Element Output\n{}", tags.join(", "))
                .expect("writing to string cannot fail");
        }
    }

    output.push_str("*End Step\n");
}

/// Render the Abaqus input deck of `problem` applied to `model`.
///
/// Numbers are written in the model's unit system. The model is not checked
/// here; [`Model::write_input`] runs [`Model::check`] before calling this.
///
/// # Examples
/// ```
/// use framex::{render_input, Model, Problem, Settings};
///
/// let model = Model::new("empty", Settings::default());
/// let deck = render_input(&model, &Problem::new("p"));
/// assert!(deck.starts_with("*Heading"));
/// assert!(deck.contains("*End Assembly"));
/// ```
#[must_use]
pub fn render_input(model: &Model, problem: &Problem) -> String {
    let units = model.settings().units;
    let mut output = String::new();

    output.push_str("*Heading\n");
    writeln!(output, "** Model: {}", model.name()).expect("writing to string cannot fail");
    writeln!(output, "** Problem: {}", problem.name()).expect("writing to string cannot fail");
    writeln!(
        output,
        "** Units: {units} (length {}, force {}, stress {}, mass {})",
        units.length_label(),
        units.force_label(),
        units.stress_label(),
        units.mass_label()
    )
    .expect("writing to string cannot fail");

    output.push_str("**\n** PARTS\n**\n");
    for (_, part) in model.parts() {
        write_part(&mut output, part, units);
    }

    let sets = boundary_sets(model);
    output.push_str("**\n** ASSEMBLY\n**\n*Assembly, name=Assembly\n");
    for (_, part) in model.parts() {
        writeln!(
            output,
            "*Instance, name={}, part={}\n*End Instance",
            instance_name(part),
            part.name()
        )
        .expect("writing to string cannot fail");
    }
    for (name, id, labels, _) in &sets {
        let Some(part) = model.part(*id) else {
            continue;
        };
        writeln!(output, "*Nset, nset={name}, instance={}", instance_name(part))
            .expect("writing to string cannot fail");
        write_labels(&mut output, labels);
    }
    output.push_str("*End Assembly\n");

    output.push_str("**\n** MATERIALS\n**\n");
    for (_, part) in model.parts() {
        for (_, material) in part.materials() {
            writeln!(
                output,
                "*Material, name={}",
                material_name(part, material.name())
            )
            .expect("writing to string cannot fail");
            writeln!(
                output,
                "*Density\n{:e},\n*Elastic\n{}, {}",
                number(units.density(material.density())),
                number(units.stress(material.elastic_modulus())),
                number(material.poisson_ratio())
            )
            .expect("writing to string cannot fail");
        }
    }

    if !sets.is_empty() {
        output.push_str("**\n** BOUNDARY CONDITIONS\n**\n*Boundary\n");
        for (name, _, _, dofs) in &sets {
            for dof in dofs {
                writeln!(output, "{name}, {dof}, {dof}").expect("writing to string cannot fail");
            }
        }
    }

    for step in problem.steps() {
        output.push_str("**\n");
        write_step(&mut output, model, step, units);
    }

    output
}
