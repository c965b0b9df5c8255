//! Beam cross-sections.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use uom::si::{f64::Length, length::meter};

use crate::errors::SectionError;
use crate::part::MaterialId;
use crate::units::UnitSystem;

/// Geometry of a beam cross-section.
///
/// Local axis 1 is the section orientation vector of the element, local axis 2
/// completes the right-handed frame with the beam axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum SectionShape {
    /// Solid rectangle, `w` along local axis 1 and `h` along local axis 2.
    Rectangular {
        /// Width.
        w: Length,
        /// Height.
        h: Length,
    },
    /// Solid circle.
    Circular {
        /// Radius.
        r: Length,
    },
    /// Thin or thick walled circular tube.
    Pipe {
        /// Outer radius.
        r: Length,
        /// Wall thickness.
        t: Length,
    },
}

/// Geometric properties of a section, expressed in a [`UnitSystem`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionProperties {
    /// Cross-sectional area.
    pub area: f64,
    /// Second moment of area about the local y axis (axis 1).
    pub iyy: f64,
    /// Second moment of area about the local z axis (axis 2).
    pub izz: f64,
    /// Torsional constant.
    pub j: f64,
}

/// A named cross-section referencing a material of the same part.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Name used in summaries and input decks.
    name: String,
    /// Cross-section geometry.
    shape: SectionShape,
    /// Material of the section.
    material: MaterialId,
}

/// Reject non-positive dimensions.
fn positive(name: &str, dimension: &'static str, value: Length) -> Result<(), SectionError> {
    let metres = value.get::<meter>();
    if metres > 0.0 && metres.is_finite() {
        Ok(())
    } else {
        Err(SectionError::NonPositiveDimension {
            name: name.to_string(),
            dimension,
            value: metres,
        })
    }
}

impl Section {
    /// Solid rectangular section.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::NonPositiveDimension`] for a zero or negative side.
    pub fn rectangular(
        name: &str,
        w: Length,
        h: Length,
        material: MaterialId,
    ) -> Result<Self, SectionError> {
        Self::checked(name, SectionShape::Rectangular { w, h }, material)
    }

    /// Solid circular section.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::NonPositiveDimension`] for a zero or negative radius.
    pub fn circular(name: &str, r: Length, material: MaterialId) -> Result<Self, SectionError> {
        Self::checked(name, SectionShape::Circular { r }, material)
    }

    /// Circular tube.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::NonPositiveDimension`] for a zero or negative
    /// dimension and [`SectionError::WallTooThick`] when `t >= r`.
    pub fn pipe(
        name: &str,
        r: Length,
        t: Length,
        material: MaterialId,
    ) -> Result<Self, SectionError> {
        Self::checked(name, SectionShape::Pipe { r, t }, material)
    }

    /// Build a section and run [`Section::validate`] on it.
    fn checked(name: &str, shape: SectionShape, material: MaterialId) -> Result<Self, SectionError> {
        let section = Self {
            name: name.to_string(),
            shape,
            material,
        };
        section.validate()?;
        Ok(section)
    }

    /// Check the dimensions against the rules enforced by the constructors.
    ///
    /// # Errors
    ///
    /// Returns the [`SectionError`] the matching constructor would return.
    pub fn validate(&self) -> Result<(), SectionError> {
        match self.shape {
            SectionShape::Rectangular { w, h } => {
                positive(&self.name, "width", w)?;
                positive(&self.name, "height", h)
            }
            SectionShape::Circular { r } => positive(&self.name, "radius", r),
            SectionShape::Pipe { r, t } => {
                positive(&self.name, "radius", r)?;
                positive(&self.name, "wall thickness", t)?;
                if t >= r {
                    return Err(SectionError::WallTooThick {
                        name: self.name.clone(),
                    });
                }
                Ok(())
            }
        }
    }

    /// Name of the section.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Geometry of the section.
    #[must_use]
    pub fn shape(&self) -> SectionShape {
        self.shape
    }

    /// Material the section is made of.
    #[must_use]
    pub fn material(&self) -> MaterialId {
        self.material
    }

    /// Compute area, second moments and torsional constant in `units`.
    #[must_use]
    pub fn properties(&self, units: UnitSystem) -> SectionProperties {
        match self.shape {
            SectionShape::Rectangular { w, h } => {
                let (w, h) = (units.length(w), units.length(h));
                let (long, short) = if w > h { (w, h) } else { (h, w) };
                SectionProperties {
                    area: w * h,
                    iyy: w * h.powi(3) / 12.0,
                    izz: h * w.powi(3) / 12.0,
                    // thin-rectangle approximation
                    j: long * short.powi(3) / 3.0 * (1.0 - 0.63 * short / long),
                }
            }
            SectionShape::Circular { r } => {
                let r = units.length(r);
                let i = PI * r.powi(4) / 4.0;
                SectionProperties {
                    area: PI * r.powi(2),
                    iyy: i,
                    izz: i,
                    j: 2.0 * i,
                }
            }
            SectionShape::Pipe { r, t } => {
                let outer = units.length(r);
                let inner = outer - units.length(t);
                let i = PI * (outer.powi(4) - inner.powi(4)) / 4.0;
                SectionProperties {
                    area: PI * (outer.powi(2) - inner.powi(2)),
                    iyy: i,
                    izz: i,
                    j: 2.0 * i,
                }
            }
        }
    }
}
