//! Beam elements.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::part::SectionId;

/// Cosine above which a beam axis counts as parallel to global Z.
const VERTICAL_COSINE: f64 = 0.999;

/// Two-node beam element. Its nodes are the endpoints of the graph edge that
/// carries it inside a [`Part`](crate::Part).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeamElement {
    /// Section of the element.
    section: SectionId,
    /// Explicit local axis 1 direction, if any.
    orientation: Option<[f64; 3]>,
}

impl BeamElement {
    /// Create an element using `section` and the default orientation.
    #[must_use]
    pub fn new(section: SectionId) -> Self {
        Self {
            section,
            orientation: None,
        }
    }

    /// Set the local axis 1 direction explicitly.
    #[must_use]
    pub fn with_orientation(mut self, direction: [f64; 3]) -> Self {
        self.orientation = Some(direction);
        self
    }

    /// Section of the element.
    #[must_use]
    pub fn section(&self) -> SectionId {
        self.section
    }

    /// Local axis 1 direction for an element whose axis is `axis`.
    ///
    /// Without an explicit orientation this is `(0, 0, -1)`, or `(1, 0, 0)`
    /// for elements running along global Z.
    #[must_use]
    pub fn orientation(&self, axis: Vector3<f64>) -> Vector3<f64> {
        if let Some([x, y, z]) = self.orientation {
            return Vector3::new(x, y, z);
        }
        let vertical = axis
            .try_normalize(f64::EPSILON)
            .map_or(false, |unit| unit.z.abs() > VERTICAL_COSINE);
        if vertical {
            Vector3::new(1.0, 0.0, 0.0)
        } else {
            Vector3::new(0.0, 0.0, -1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_orientation_avoids_beam_axis() {
        let beam = BeamElement::new(SectionId::new(0));
        assert_eq!(
            beam.orientation(Vector3::new(100.0, 0.0, 0.0)),
            Vector3::new(0.0, 0.0, -1.0)
        );
        assert_eq!(
            beam.orientation(Vector3::new(0.0, 0.0, -3.0)),
            Vector3::new(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn explicit_orientation_wins() {
        let beam = BeamElement::new(SectionId::new(1)).with_orientation([0.0, 1.0, 0.0]);
        assert_eq!(
            beam.orientation(Vector3::new(0.0, 0.0, 1.0)),
            Vector3::new(0.0, 1.0, 0.0)
        );
        assert_eq!(beam.section(), SectionId::new(1));
    }
}
