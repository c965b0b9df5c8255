use framex::{
    point, ElasticIsotropic, MaterialError, Part, PartError, Point, Section, SectionError,
    UnitSystem,
};
use petgraph::graph::NodeIndex;
use thiserror::Error;
use uom::si::{
    f64::{Length, MassDensity, Pressure},
    length::{centimeter, millimeter},
    mass_density::kilogram_per_cubic_meter,
    pressure::gigapascal,
};

/// Node coordinates of the simple frame in millimetres, in chaining order.
pub const FRAME_POINTS_MM: [[f64; 3]; 12] = [
    [0.0, 0.0, 0.0],
    [100.0, 0.0, 0.0],
    [200.0, 0.0, 0.0],
    [500.0, 0.0, 0.0],
    [0.0, 100.0, 0.0],
    [100.0, 100.0, 0.0],
    [200.0, 100.0, 0.0],
    [500.0, 100.0, 0.0],
    [0.0, 110.0, 0.0],
    [100.0, 110.0, 0.0],
    [200.0, 110.0, 0.0],
    [500.0, 110.0, 0.0],
];

/// Millimetre coordinates expressed in the length unit of `units`.
pub fn model_point(units: UnitSystem, [x, y, z]: [f64; 3]) -> Point {
    let convert = |value: f64| units.length(Length::new::<millimeter>(value));
    point(convert(x), convert(y), convert(z))
}

/// Failure while building the frame part.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Material parameters were rejected.
    #[error(transparent)]
    Material(#[from] MaterialError),
    /// Section dimensions were rejected.
    #[error(transparent)]
    Section(#[from] SectionError),
    /// Part editing failed.
    #[error(transparent)]
    Part(#[from] PartError),
}

/// Build the frame part: twelve nodes chained by eleven beams sharing one
/// rectangular section.
///
/// Consecutive nodes are connected in list order, so the chain jumps back
/// from (500, 0) to (0, 100) and from (500, 100) to (0, 110). Coordinates are
/// converted from millimetres to the length unit of `units`.
pub fn build_frame_part(units: UnitSystem) -> Result<(Part, Vec<NodeIndex>), FrameError> {
    let mut part = Part::new("frame_part");
    let nodes = part.add_nodes(FRAME_POINTS_MM.map(|coordinates| model_point(units, coordinates)));

    // 210 GPa steel-like material with a reduced Poisson ratio.
    let material = part.add_material(ElasticIsotropic::new(
        "mat",
        Pressure::new::<gigapascal>(210.0),
        0.2,
        MassDensity::new::<kilogram_per_cubic_meter>(7_800.0),
    )?);

    // 10 cm wide, 200 mm deep.
    let section = part.add_section(Section::rectangular(
        "sec",
        Length::new::<centimeter>(10.0),
        Length::new::<millimeter>(200.0),
        material,
    )?)?;

    for pair in nodes.windows(2) {
        part.add_element(pair[0], pair[1], section)?;
    }

    Ok((part, nodes))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use petgraph::graph::EdgeIndex;

    use super::*;

    #[test]
    fn frame_has_twelve_nodes_and_eleven_beams() {
        let (part, nodes) = build_frame_part(UnitSystem::SiMm).expect("frame builds");
        assert_eq!(part.node_count(), 12);
        assert_eq!(part.element_count(), 11);
        assert_eq!(part.node_position(nodes[10]), Some(point(200.0, 110.0, 0.0)));
        assert!(part.unconnected_nodes().is_empty());
    }

    #[test]
    fn frame_keeps_its_physical_size_in_every_unit_system() {
        let (metres, nodes) = build_frame_part(UnitSystem::Si).expect("frame builds");
        let position = metres.node_position(nodes[10]).expect("node exists");
        assert_relative_eq!(position.x, 0.2, max_relative = 1.0e-12);
        assert_relative_eq!(position.y, 0.11, max_relative = 1.0e-12);

        let (millimetres, _) = build_frame_part(UnitSystem::SiMm).expect("frame builds");
        // kilograms against tonnes
        assert_relative_eq!(
            metres.mass(UnitSystem::Si),
            millimetres.mass(UnitSystem::SiMm) * 1_000.0,
            max_relative = 1.0e-9
        );
        // 7800 kg/m^3 over a 0.1 m x 0.2 m section
        assert_relative_eq!(
            metres.mass(UnitSystem::Si),
            156.0 * total_length_m(),
            max_relative = 1.0e-9
        );

        let (inches, _) = build_frame_part(UnitSystem::Imperial).expect("frame builds");
        let first = inches.element_length(EdgeIndex::new(0)).expect("element exists");
        assert_relative_eq!(first, 100.0 / 25.4, max_relative = 1.0e-9);
    }

    /// Total beam length of the chain in metres.
    fn total_length_m() -> f64 {
        FRAME_POINTS_MM
            .windows(2)
            .map(|pair| {
                let [ax, ay, az] = pair[0];
                let [bx, by, bz] = pair[1];
                ((bx - ax).powi(2) + (by - ay).powi(2) + (bz - az).powi(2)).sqrt() / 1_000.0
            })
            .sum()
    }
}
