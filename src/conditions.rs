use framex::{Model, ModelError, PartId, UnitSystem};
use uom::si::{f64::Length, length::millimeter};

use crate::frame::model_point;

/// Radius of the proximity lookups used to pick nodes, in millimetres.
pub const LOOKUP_DISTANCE_MM: f64 = 0.1;

/// Lookup radius in the length unit of `units`.
pub fn lookup_distance(units: UnitSystem) -> f64 {
    units.length(Length::new::<millimeter>(LOOKUP_DISTANCE_MM))
}

/// Pin the bottom-left corner and put a roller sliding along X under the
/// bottom-right corner.
///
/// A lookup that misses its node surfaces as [`ModelError::EmptySelection`].
pub fn apply_frame_supports(model: &mut Model, frame: PartId) -> Result<(), ModelError> {
    let units = model.settings().units;
    let part = model.part(frame).ok_or(ModelError::UnknownPart(frame))?;
    let distance = lookup_distance(units);
    let left = part.find_nodes_around_point(model_point(units, [0.0, 0.0, 0.0]), distance);
    let right = part.find_nodes_around_point(model_point(units, [500.0, 0.0, 0.0]), distance);

    model.add_pin_bc(frame, &left)?;
    model.add_roller_x_bc(frame, &right)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use framex::{Backend, BoundaryCondition, NodeRef, Settings};

    use super::*;
    use crate::frame::build_frame_part;

    #[test]
    fn supports_land_on_bottom_corners() {
        for units in [UnitSystem::SiMm, UnitSystem::Si, UnitSystem::Imperial] {
            let (part, nodes) = build_frame_part(units).expect("frame builds");
            let mut model = Model::new("simple_frame", Settings::new(units, Backend::Abaqus));
            let frame = model.add_part(part).expect("first part");
            apply_frame_supports(&mut model, frame).expect("both corners found");

            assert_eq!(
                model.restraint_at(NodeRef::new(frame, nodes[0])),
                Some(BoundaryCondition::pinned())
            );
            assert_eq!(
                model.restraint_at(NodeRef::new(frame, nodes[3])),
                Some(BoundaryCondition::roller_x())
            );
            assert_eq!(model.restraint_at(NodeRef::new(frame, nodes[1])), None);
        }
    }

    #[test]
    fn lookup_radius_follows_the_length_unit() {
        assert!((lookup_distance(UnitSystem::SiMm) - 0.1).abs() < 1.0e-12);
        assert!((lookup_distance(UnitSystem::Si) - 1.0e-4).abs() < 1.0e-15);
    }
}
