use framex::{Model, Problem};
use std::fmt::Write;

/// Render the model and problem summaries followed by the factored nodal
/// loads each step will apply.
#[must_use]
pub fn render_report(model: &Model, problem: &Problem) -> String {
    let units = model.settings().units;
    let mut output = model.summary();
    output.push('\n');
    output.push_str(&problem.summary(units));

    for step in problem.steps() {
        for (node, load) in step.combined_node_loads() {
            let position = model
                .node_position(node)
                .map_or_else(|| "?".to_string(), |p| format!("({}, {}, {})", p.x, p.y, p.z));
            let components: Vec<String> = load
                .components(units)
                .iter()
                .map(|value| value.map_or_else(|| "-".to_string(), |v| format!("{v:+.1}")))
                .collect();
            writeln!(
                &mut output,
                "  {} factored load at {position}: [{}] {}",
                step.name,
                components.join(", "),
                units.force_label()
            )
            .expect("writing to string cannot fail");
        }
    }

    output
}
