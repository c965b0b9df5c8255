//! Boundary conditions (nodal restraints).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Restraint state of the six degrees of freedom of a node.
///
/// `true` means the degree of freedom is fixed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryCondition {
    /// Translation along X.
    pub x: bool,
    /// Translation along Y.
    pub y: bool,
    /// Translation along Z.
    pub z: bool,
    /// Rotation about X.
    pub xx: bool,
    /// Rotation about Y.
    pub yy: bool,
    /// Rotation about Z.
    pub zz: bool,
}

impl BoundaryCondition {
    /// All six degrees of freedom fixed.
    #[must_use]
    pub const fn fixed() -> Self {
        Self::from_array([true; 6])
    }

    /// Translations fixed, rotations free.
    #[must_use]
    pub const fn pinned() -> Self {
        Self::from_array([true, true, true, false, false, false])
    }

    /// Pinned, but free to slide along X.
    #[must_use]
    pub const fn roller_x() -> Self {
        Self::from_array([false, true, true, false, false, false])
    }

    /// Pinned, but free to slide along Y.
    #[must_use]
    pub const fn roller_y() -> Self {
        Self::from_array([true, false, true, false, false, false])
    }

    /// Pinned, but free to slide along Z.
    #[must_use]
    pub const fn roller_z() -> Self {
        Self::from_array([true, true, false, false, false, false])
    }

    /// Fixed, but free to rotate about X.
    #[must_use]
    pub const fn clamp_xx() -> Self {
        Self::from_array([true, true, true, false, true, true])
    }

    /// Fixed, but free to rotate about Y.
    #[must_use]
    pub const fn clamp_yy() -> Self {
        Self::from_array([true, true, true, true, false, true])
    }

    /// Fixed, but free to rotate about Z.
    #[must_use]
    pub const fn clamp_zz() -> Self {
        Self::from_array([true, true, true, true, true, false])
    }

    /// Build from flags ordered `[x, y, z, xx, yy, zz]`.
    #[must_use]
    pub const fn from_array([x, y, z, xx, yy, zz]: [bool; 6]) -> Self {
        Self {
            x,
            y,
            z,
            xx,
            yy,
            zz,
        }
    }

    /// Flags ordered `[x, y, z, xx, yy, zz]`.
    #[must_use]
    pub const fn as_array(&self) -> [bool; 6] {
        [self.x, self.y, self.z, self.xx, self.yy, self.zz]
    }

    /// Restrained degrees of freedom, numbered 1 to 6.
    #[must_use]
    pub fn restrained_dofs(&self) -> Vec<usize> {
        self.as_array()
            .iter()
            .enumerate()
            .filter(|(_, fixed)| **fixed)
            .map(|(index, _)| index + 1)
            .collect()
    }

    /// Whether any degree of freedom is restrained.
    #[must_use]
    pub fn is_restrained(&self) -> bool {
        self.as_array().iter().any(|fixed| *fixed)
    }

    /// Combine two restraint sets; a degree of freedom fixed in either stays fixed.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        let (a, b) = (self.as_array(), other.as_array());
        Self::from_array(std::array::from_fn(|i| a[i] || b[i]))
    }

    /// Short label of the preset this condition matches.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self.as_array() {
            [true, true, true, true, true, true] => "fix",
            [true, true, true, false, false, false] => "pin",
            [false, true, true, false, false, false] => "rollerX",
            [true, false, true, false, false, false] => "rollerY",
            [true, true, false, false, false, false] => "rollerZ",
            [true, true, true, false, true, true] => "clampXX",
            [true, true, true, true, false, true] => "clampYY",
            [true, true, true, true, true, false] => "clampZZ",
            [false, false, false, false, false, false] => "free",
            _ => "general",
        }
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_support() {
        let bc = BoundaryCondition::fixed();
        assert_eq!(bc.restrained_dofs(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(bc.kind(), "fix");
    }

    #[test]
    fn roller_x_frees_only_x_translation() {
        let bc = BoundaryCondition::roller_x();
        assert_eq!(bc.restrained_dofs(), vec![2, 3]);
        assert_eq!(bc.to_string(), "rollerX");
    }

    #[test]
    fn clamps_free_one_rotation_each() {
        let cases = [
            (BoundaryCondition::clamp_xx(), vec![1, 2, 3, 5, 6], "clampXX"),
            (BoundaryCondition::clamp_yy(), vec![1, 2, 3, 4, 6], "clampYY"),
            (BoundaryCondition::clamp_zz(), vec![1, 2, 3, 4, 5], "clampZZ"),
        ];
        for (bc, dofs, kind) in cases {
            assert_eq!(bc.restrained_dofs(), dofs);
            assert_eq!(bc.kind(), kind);
        }
    }

    #[test]
    fn roller_z_frees_only_z_translation() {
        let bc = BoundaryCondition::roller_z();
        assert_eq!(bc.restrained_dofs(), vec![1, 2]);
        assert_eq!(bc.kind(), "rollerZ");
    }

    #[test]
    fn union_keeps_every_restraint() {
        let merged = BoundaryCondition::roller_x().union(BoundaryCondition::roller_y());
        assert_eq!(merged, BoundaryCondition::pinned());
        assert!(!BoundaryCondition::default().is_restrained());
        assert_eq!(
            BoundaryCondition::from_array([false, false, true, true, false, false]).kind(),
            "general"
        );
    }
}
