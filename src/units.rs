//! Consistent unit systems and conversion of dimensioned quantities.
//!
//! Quantities such as the elastic modulus or a nodal force are carried as
//! [`uom`] values so callers can write them in whatever unit is convenient
//! (`210 GPa`, `10 kN`). A [`UnitSystem`] turns them into plain numbers in a
//! consistent set of units, which is what summaries and input decks need.
//!
//! Each system is defined by its length and force units; the mass unit is
//! derived as force·s²/length so Newton's second law holds without factors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uom::si::{
    acceleration::meter_per_second_squared,
    area::square_meter,
    f64::{Acceleration, Area, Force, Length, MassDensity, Pressure, Torque},
    force::{newton, pound_force},
    length::{inch, meter, millimeter},
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    torque::newton_meter,
};

use crate::errors::ParseSettingError;

/// Significant digits kept by [`rounded`].
const SIGNIFICANT_DIGITS: i32 = 9;

/// Round a converted number to nine significant digits, dropping conversion
/// noise such as `210000.00000000003` before it is printed.
pub(crate) fn rounded(value: f64) -> f64 {
    if !value.is_normal() {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(SIGNIFICANT_DIGITS - 1 - magnitude);
    if scale.is_finite() {
        (value * scale).round() / scale
    } else {
        value
    }
}

/// A consistent unit system used to express model values as plain numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitSystem {
    /// Metre, newton, pascal, kilogram.
    Si,
    /// Millimetre, newton, megapascal, tonne.
    #[default]
    SiMm,
    /// Inch, pound-force, psi, lbf·s²/in.
    Imperial,
}

impl UnitSystem {
    /// Size of one length unit in metres.
    fn length_scale(self) -> f64 {
        match self {
            Self::Si => Length::new::<meter>(1.0).get::<meter>(),
            Self::SiMm => Length::new::<millimeter>(1.0).get::<meter>(),
            Self::Imperial => Length::new::<inch>(1.0).get::<meter>(),
        }
    }

    /// Size of one force unit in newtons.
    fn force_scale(self) -> f64 {
        match self {
            Self::Si | Self::SiMm => Force::new::<newton>(1.0).get::<newton>(),
            Self::Imperial => Force::new::<pound_force>(1.0).get::<newton>(),
        }
    }

    /// Size of one (derived) mass unit in kilograms.
    fn mass_scale(self) -> f64 {
        self.force_scale() / self.length_scale()
    }

    /// Express a length in this system.
    ///
    /// # Examples
    /// ```
    /// use framex::UnitSystem;
    /// use uom::si::{f64::Length, length::centimeter};
    ///
    /// let width = UnitSystem::SiMm.length(Length::new::<centimeter>(10.0));
    /// assert!((width - 100.0).abs() < 1.0e-9);
    /// ```
    #[must_use]
    pub fn length(self, value: Length) -> f64 {
        value.get::<meter>() / self.length_scale()
    }

    /// Express an area in this system.
    #[must_use]
    pub fn area(self, value: Area) -> f64 {
        value.get::<square_meter>() / self.length_scale().powi(2)
    }

    /// Express a force in this system.
    #[must_use]
    pub fn force(self, value: Force) -> f64 {
        value.get::<newton>() / self.force_scale()
    }

    /// Express a moment in this system.
    #[must_use]
    pub fn moment(self, value: Torque) -> f64 {
        value.get::<newton_meter>() / (self.force_scale() * self.length_scale())
    }

    /// Express a stress or modulus in this system.
    #[must_use]
    pub fn stress(self, value: Pressure) -> f64 {
        value.get::<pascal>() / (self.force_scale() / self.length_scale().powi(2))
    }

    /// Express a mass density in this system.
    #[must_use]
    pub fn density(self, value: MassDensity) -> f64 {
        value.get::<kilogram_per_cubic_meter>() / (self.mass_scale() / self.length_scale().powi(3))
    }

    /// Express an acceleration in this system.
    #[must_use]
    pub fn acceleration(self, value: Acceleration) -> f64 {
        value.get::<meter_per_second_squared>() / self.length_scale()
    }

    /// Build a [`Length`] from a number expressed in this system.
    #[must_use]
    pub fn to_length(self, value: f64) -> Length {
        Length::new::<meter>(value * self.length_scale())
    }

    /// Label of the length unit.
    #[must_use]
    pub const fn length_label(self) -> &'static str {
        match self {
            Self::Si => "m",
            Self::SiMm => "mm",
            Self::Imperial => "in",
        }
    }

    /// Label of the force unit.
    #[must_use]
    pub const fn force_label(self) -> &'static str {
        match self {
            Self::Si | Self::SiMm => "N",
            Self::Imperial => "lbf",
        }
    }

    /// Label of the stress unit.
    #[must_use]
    pub const fn stress_label(self) -> &'static str {
        match self {
            Self::Si => "Pa",
            Self::SiMm => "MPa",
            Self::Imperial => "psi",
        }
    }

    /// Label of the mass unit.
    #[must_use]
    pub const fn mass_label(self) -> &'static str {
        match self {
            Self::Si => "kg",
            Self::SiMm => "t",
            Self::Imperial => "lbf*s^2/in",
        }
    }

    /// Tag used to select this system.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Si => "SI",
            Self::SiMm => "SI_mm",
            Self::Imperial => "imperial",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for UnitSystem {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "si" => Ok(Self::Si),
            "si_mm" | "si-mm" => Ok(Self::SiMm),
            "imperial" => Ok(Self::Imperial),
            _ => Err(ParseSettingError::UnknownUnitSystem(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::{force::kilonewton, length::centimeter, pressure::gigapascal};

    use super::*;

    #[test]
    fn rounding_drops_conversion_noise() {
        assert_eq!(rounded(210_000.000_000_000_03).to_string(), "210000");
        assert_eq!(rounded(-0.1 - 0.2).to_string(), "-0.3");
        assert_eq!(rounded(0.0), 0.0);
    }

    #[test]
    fn millimetre_system_converts_frame_quantities() {
        let units = UnitSystem::SiMm;
        assert_relative_eq!(
            units.stress(Pressure::new::<gigapascal>(210.0)),
            210_000.0,
            max_relative = 1.0e-12
        );
        assert_relative_eq!(
            units.density(MassDensity::new::<kilogram_per_cubic_meter>(7_800.0)),
            7.8e-9,
            max_relative = 1.0e-12
        );
        assert_relative_eq!(
            units.length(Length::new::<centimeter>(10.0)),
            100.0,
            max_relative = 1.0e-12
        );
        assert_relative_eq!(
            units.force(Force::new::<kilonewton>(-10.0)),
            -10_000.0,
            max_relative = 1.0e-12
        );
        assert_relative_eq!(
            units.moment(Torque::new::<newton_meter>(1_000.0)),
            1.0e6,
            max_relative = 1.0e-12
        );
        assert_relative_eq!(
            units.acceleration(Acceleration::new::<meter_per_second_squared>(9.81)),
            9_810.0,
            max_relative = 1.0e-12
        );
    }

    #[test]
    fn si_system_is_identity() {
        let units = UnitSystem::Si;
        assert_relative_eq!(units.stress(Pressure::new::<pascal>(5.0)), 5.0);
        assert_relative_eq!(
            units.density(MassDensity::new::<kilogram_per_cubic_meter>(7_850.0)),
            7_850.0
        );
        assert_relative_eq!(units.length(units.to_length(3.5)), 3.5, max_relative = 1.0e-12);
    }

    #[test]
    fn imperial_stress_is_psi() {
        let psi = UnitSystem::Imperial.stress(Pressure::new::<pascal>(6_894.757_293_168));
        assert_relative_eq!(psi, 1.0, max_relative = 1.0e-6);
    }

    #[test]
    fn parses_tags() {
        assert_eq!("SI_mm".parse::<UnitSystem>(), Ok(UnitSystem::SiMm));
        assert_eq!("si".parse::<UnitSystem>(), Ok(UnitSystem::Si));
        assert_eq!(" Imperial ".parse::<UnitSystem>(), Ok(UnitSystem::Imperial));
        assert_eq!(
            "furlong".parse::<UnitSystem>(),
            Err(ParseSettingError::UnknownUnitSystem("furlong".to_string()))
        );
        assert_eq!(UnitSystem::SiMm.to_string(), "SI_mm");
    }
}
