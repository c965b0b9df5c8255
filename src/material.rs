//! Material definitions.

use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{MassDensity, Pressure},
    mass_density::kilogram_per_cubic_meter,
    pressure::{gigapascal, pascal},
};

use crate::errors::MaterialError;

/// Linear elastic isotropic material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElasticIsotropic {
    /// Name used in summaries and input decks.
    name: String,
    /// Young's modulus.
    e: Pressure,
    /// Poisson's ratio.
    v: f64,
    /// Mass density.
    density: MassDensity,
}

impl ElasticIsotropic {
    /// Create a material from its elastic constants and density.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError`] when `e` is not positive, `v` lies outside
    /// `(-1, 0.5)` or `density` is negative.
    ///
    /// # Examples
    /// ```
    /// use framex::ElasticIsotropic;
    /// use uom::si::f64::{MassDensity, Pressure};
    /// use uom::si::{mass_density::kilogram_per_cubic_meter, pressure::gigapascal};
    ///
    /// let steel = ElasticIsotropic::new(
    ///     "steel",
    ///     Pressure::new::<gigapascal>(210.0),
    ///     0.2,
    ///     MassDensity::new::<kilogram_per_cubic_meter>(7800.0),
    /// )
    /// .expect("valid constants");
    /// assert_eq!(steel.name(), "steel");
    /// ```
    pub fn new(
        name: &str,
        e: Pressure,
        v: f64,
        density: MassDensity,
    ) -> Result<Self, MaterialError> {
        let material = Self {
            name: name.to_string(),
            e,
            v,
            density,
        };
        material.validate()?;
        Ok(material)
    }

    /// Check the constants against the rules enforced by [`ElasticIsotropic::new`].
    ///
    /// # Errors
    ///
    /// Returns the [`MaterialError`] [`ElasticIsotropic::new`] would return.
    pub fn validate(&self) -> Result<(), MaterialError> {
        let modulus = self.e.get::<pascal>();
        if modulus <= 0.0 || !modulus.is_finite() {
            return Err(MaterialError::NonPositiveElasticModulus {
                name: self.name.clone(),
                value: modulus,
            });
        }
        if !(self.v > -1.0 && self.v < 0.5) {
            return Err(MaterialError::PoissonRatioOutOfRange {
                name: self.name.clone(),
                value: self.v,
            });
        }
        let rho = self.density.get::<kilogram_per_cubic_meter>();
        if rho < 0.0 || !rho.is_finite() {
            return Err(MaterialError::NegativeDensity {
                name: self.name.clone(),
                value: rho,
            });
        }
        Ok(())
    }

    /// Structural steel with E = 210 GPa, v = 0.3 and 7850 kg/m³.
    #[must_use]
    pub fn steel(name: &str) -> Self {
        Self {
            name: name.to_string(),
            e: Pressure::new::<gigapascal>(210.0),
            v: 0.3,
            density: MassDensity::new::<kilogram_per_cubic_meter>(7_850.0),
        }
    }

    /// Name of the material.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Young's modulus.
    #[must_use]
    pub fn elastic_modulus(&self) -> Pressure {
        self.e
    }

    /// Poisson's ratio.
    #[must_use]
    pub fn poisson_ratio(&self) -> f64 {
        self.v
    }

    /// Mass density.
    #[must_use]
    pub fn density(&self) -> MassDensity {
        self.density
    }

    /// Shear modulus, `E / (2 (1 + v))`.
    #[must_use]
    pub fn shear_modulus(&self) -> Pressure {
        self.e / (2.0 * (1.0 + self.v))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn density(value: f64) -> MassDensity {
        MassDensity::new::<kilogram_per_cubic_meter>(value)
    }

    #[test]
    fn shear_modulus_follows_isotropy() {
        let material =
            ElasticIsotropic::new("mat", Pressure::new::<gigapascal>(210.0), 0.2, density(7800.0))
                .expect("valid material");
        assert_relative_eq!(
            material.shear_modulus().get::<gigapascal>(),
            210.0 / 2.4,
            max_relative = 1.0e-12
        );
    }

    #[test]
    fn rejects_unphysical_constants() {
        let zero_modulus =
            ElasticIsotropic::new("a", Pressure::new::<pascal>(0.0), 0.3, density(1.0));
        assert!(matches!(
            zero_modulus,
            Err(MaterialError::NonPositiveElasticModulus { .. })
        ));

        let incompressible =
            ElasticIsotropic::new("b", Pressure::new::<gigapascal>(1.0), 0.5, density(1.0));
        assert_eq!(
            incompressible,
            Err(MaterialError::PoissonRatioOutOfRange {
                name: "b".to_string(),
                value: 0.5,
            })
        );

        let negative_density =
            ElasticIsotropic::new("c", Pressure::new::<gigapascal>(1.0), 0.3, density(-1.0));
        assert!(matches!(
            negative_density,
            Err(MaterialError::NegativeDensity { .. })
        ));
    }

    #[test]
    fn steel_preset() {
        let steel = ElasticIsotropic::steel("S355");
        assert_eq!(steel.name(), "S355");
        assert_relative_eq!(steel.poisson_ratio(), 0.3);
    }
}
