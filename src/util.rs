use uom::si::angle::radian;
use uom::si::f64::Angle;

#[cfg(any(test, feature = "approx"))]
use approx::AbsDiffEq;

/// An angle that is compared and displayed modulo a full turn.
///
/// Longitudes are the main user: the conversions in this crate accept any real longitude, so
/// `370°` and `10°` must compare equal and print the same way.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct WrappedAngle {
    angle: Angle,
}

impl WrappedAngle {
    pub(crate) fn new(angle: impl Into<Angle>) -> Self {
        Self {
            angle: angle.into(),
        }
    }

    /// Returns the angle in [0°, 360°) in radians.
    pub(crate) fn to_full_turn_range(self) -> f64 {
        let radians = self.angle.get::<radian>();
        let wrapped = radians.rem_euclid(Angle::FULL_TURN.get::<radian>());
        // rem_euclid can round up to exactly one full turn for tiny negative inputs
        if wrapped >= Angle::FULL_TURN.get::<radian>() {
            0.
        } else {
            wrapped
        }
    }

    /// Returns the angle in [-180°, 180°) in radians.
    pub(crate) fn to_signed_range(self) -> f64 {
        let angle = self.to_full_turn_range();
        if angle < Angle::HALF_TURN.get::<radian>() {
            angle
        } else {
            angle - Angle::FULL_TURN.get::<radian>()
        }
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for WrappedAngle {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        // radians
        1e-10
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        Self::new(self.angle - other.angle).to_signed_range().abs() <= epsilon
    }
}
