use uom::si::f64::Length;
use uom::si::length::meter;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A reference ellipsoid of revolution, defined by its semi-major axis and flattening.
///
/// The semi-minor axis is always derived as `a · (1 - f)`, so the two can never disagree.
///
/// The commonly used ellipsoids are available as associated constants. Custom ellipsoids are
/// constructed with [`Ellipsoid::new`] or [`Ellipsoid::sphere`], which reject non-physical
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "EllipsoidParameters", into = "EllipsoidParameters")
)]
pub struct Ellipsoid {
    /// in meters
    semi_major_axis: f64,
    /// in meters
    semi_minor_axis: f64,
    flattening: f64,
}

impl Ellipsoid {
    /// The World Geodetic System 1984 ellipsoid, as used by GPS.
    pub const WGS84: Self = Self {
        semi_major_axis: 6_378_137.0,
        semi_minor_axis: 6_378_137.0 * (1.0 - 1.0 / 298.257_223_563),
        flattening: 1.0 / 298.257_223_563,
    };

    /// The World Geodetic System 1972 ellipsoid.
    pub const WGS72: Self = Self {
        semi_major_axis: 6_378_135.0,
        semi_minor_axis: 6_378_135.0 * (1.0 - 1.0 / 298.26),
        flattening: 1.0 / 298.26,
    };

    /// The Geodetic Reference System 1980 ellipsoid.
    pub const GRS80: Self = Self {
        semi_major_axis: 6_378_137.0,
        semi_minor_axis: 6_378_137.0 * (1.0 - 1.0 / 298.257_222_101),
        flattening: 1.0 / 298.257_222_101,
    };

    /// A sphere with the semi-major axis of [`Ellipsoid::WGS84`].
    pub const WGS84_SPHERE: Self = Self {
        semi_major_axis: 6_378_137.0,
        semi_minor_axis: 6_378_137.0,
        flattening: 0.0,
    };

    fn from_parameters_unchecked(semi_major_axis: f64, flattening: f64) -> Self {
        Self {
            semi_major_axis,
            semi_minor_axis: semi_major_axis * (1.0 - flattening),
            flattening,
        }
    }

    /// Constructs an ellipsoid from its semi-major axis and flattening.
    ///
    /// Returns `None` unless the semi-major axis is finite and positive and the flattening is in
    /// `[0, 1)`.
    #[must_use]
    pub fn new(semi_major_axis: impl Into<Length>, flattening: f64) -> Option<Self> {
        let a = semi_major_axis.into().get::<meter>();
        if !(a.is_finite() && a > 0.) {
            return None;
        }
        // NOTE: also rejects NaN
        if !(0. ..1.).contains(&flattening) {
            return None;
        }
        Some(Self::from_parameters_unchecked(a, flattening))
    }

    /// Constructs a sphere with the given radius.
    ///
    /// Returns `None` unless the radius is finite and positive.
    #[must_use]
    pub fn sphere(radius: impl Into<Length>) -> Option<Self> {
        Self::new(radius, 0.)
    }

    /// Returns the equatorial radius, `a`.
    #[must_use]
    pub fn semi_major_axis(&self) -> Length {
        Length::new::<meter>(self.semi_major_axis)
    }

    /// Returns the polar radius, `b = a · (1 - f)`.
    #[must_use]
    pub fn semi_minor_axis(&self) -> Length {
        Length::new::<meter>(self.semi_minor_axis)
    }

    /// Returns the flattening, `f = (a - b) / a`.
    #[must_use]
    pub fn flattening(&self) -> f64 {
        self.flattening
    }

    /// Returns the square of the first eccentricity, `e² = 2f - f²`.
    #[must_use]
    pub fn eccentricity_squared(&self) -> f64 {
        2. * self.flattening - self.flattening.powi(2)
    }

    /// Returns whether this ellipsoid is a sphere (ie, has zero flattening).
    #[must_use]
    pub fn is_sphere(&self) -> bool {
        self.flattening == 0.
    }

    pub(crate) fn a(&self) -> f64 {
        self.semi_major_axis
    }

    pub(crate) fn b(&self) -> f64 {
        self.semi_minor_axis
    }

    pub(crate) fn f(&self) -> f64 {
        self.flattening
    }
}

impl Default for Ellipsoid {
    /// Returns [`Ellipsoid::WGS84`].
    fn default() -> Self {
        Self::WGS84
    }
}

/// The serialized form of an [`Ellipsoid`].
///
/// The semi-minor axis is left out since it is derived, and the parameters are validated on the
/// way back in.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct EllipsoidParameters {
    semi_major_axis: Length,
    flattening: f64,
}

#[cfg(feature = "serde")]
impl From<Ellipsoid> for EllipsoidParameters {
    fn from(e: Ellipsoid) -> Self {
        Self {
            semi_major_axis: e.semi_major_axis(),
            flattening: e.flattening,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<EllipsoidParameters> for Ellipsoid {
    type Error = &'static str;

    fn try_from(p: EllipsoidParameters) -> Result<Self, Self::Error> {
        Self::new(p.semi_major_axis, p.flattening).ok_or(
            "ellipsoid needs a finite positive semi-major axis and a flattening in [0, 1)",
        )
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Ellipsoid {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        // NOTE: epsilon applies to the axis in meters and to the unitless flattening alike
        self.semi_major_axis
            .abs_diff_eq(&other.semi_major_axis, epsilon)
            && self.flattening.abs_diff_eq(&other.flattening, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Ellipsoid {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.semi_major_axis
            .relative_eq(&other.semi_major_axis, epsilon, max_relative)
            && self
                .flattening
                .relative_eq(&other.flattening, epsilon, max_relative)
    }
}
