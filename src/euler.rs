//! Euler angles in the two axis orders used with n-vectors.
//!
//! Both types describe a rotation as three successive rotations about the axes of a body frame,
//! but in different orders. In both cases the field order follows the name of the convention, not
//! the order in which the rotations are applied.
//!
//! Converting a rotation matrix back into Euler angles is ambiguous at gimbal lock, when the
//! middle angle is ±90°: only the sum (or difference) of the outer two angles is then determined.
//! The conversions detect this and return `x = 0`.

use crate::matrix::Matrix3;
use std::f64::consts::FRAC_PI_2;
use uom::si::angle::radian;
use uom::si::f64::Angle;

#[cfg(any(test, feature = "approx"))]
use crate::util::WrappedAngle;
#[cfg(any(test, feature = "approx"))]
use approx::AbsDiffEq;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Below this value of `cos(y)`, the middle rotation is treated as exactly ±90°.
const GIMBAL_LOCK_THRESHOLD: f64 = 10. * f64::EPSILON;

/// Rotation about x, then the new y, then the new z (ie, `R = Rx(x) · Ry(y) · Rz(z)`).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EulerXYZ {
    pub x: Angle,
    pub y: Angle,
    pub z: Angle,
}

/// Rotation about z (yaw), then the new y (pitch), then the new x (roll), ie,
/// `R = Rz(z) · Ry(y) · Rx(x)`.
///
/// This is the usual yaw-pitch-roll convention for the attitude of a vehicle relative to its
/// local North-East-Down frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EulerZYX {
    pub z: Angle,
    pub y: Angle,
    pub x: Angle,
}

impl EulerXYZ {
    #[must_use]
    pub fn new(x: impl Into<Angle>, y: impl Into<Angle>, z: impl Into<Angle>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z: z.into(),
        }
    }

    /// Returns the rotation matrix `Rx(x) · Ry(y) · Rz(z)`.
    #[must_use]
    pub fn to_rotation_matrix(&self) -> Matrix3 {
        let (sx, cx) = self.x.get::<radian>().sin_cos();
        let (sy, cy) = self.y.get::<radian>().sin_cos();
        let (sz, cz) = self.z.get::<radian>().sin_cos();
        Matrix3::new(
            cy * cz,
            -cy * sz,
            sy,
            sy * sx * cz + cx * sz,
            -sy * sx * sz + cx * cz,
            -cy * sx,
            -sy * cx * cz + sx * sz,
            sy * cx * sz + sx * cz,
            cy * cx,
        )
    }

    /// Recovers the angles from a rotation matrix.
    ///
    /// `y` is in [-90°, 90°] and `x` and `z` are in [-180°, 180°].
    ///
    /// At gimbal lock (`y` = ±90°), `x` and `z` are not individually determined; this returns
    /// `x = 0` and puts the whole rotation about the locked axis into `z`.
    #[must_use]
    pub fn from_rotation_matrix(m: &Matrix3) -> Self {
        let cy = f64::sqrt(
            (m[(0, 0)].powi(2) + m[(0, 1)].powi(2) + m[(1, 2)].powi(2) + m[(2, 2)].powi(2)) / 2.,
        );
        let (x, y, z) = if cy > GIMBAL_LOCK_THRESHOLD {
            (
                f64::atan2(-m[(1, 2)], m[(2, 2)]),
                f64::atan2(m[(0, 2)], cy),
                f64::atan2(-m[(0, 1)], m[(0, 0)]),
            )
        } else {
            (
                0.,
                FRAC_PI_2.copysign(m[(0, 2)]),
                f64::atan2(m[(1, 0)], m[(1, 1)]),
            )
        };
        Self {
            x: Angle::new::<radian>(x),
            y: Angle::new::<radian>(y),
            z: Angle::new::<radian>(z),
        }
    }
}

impl EulerZYX {
    #[must_use]
    pub fn new(z: impl Into<Angle>, y: impl Into<Angle>, x: impl Into<Angle>) -> Self {
        Self {
            z: z.into(),
            y: y.into(),
            x: x.into(),
        }
    }

    /// Returns the rotation matrix `Rz(z) · Ry(y) · Rx(x)`.
    #[must_use]
    pub fn to_rotation_matrix(&self) -> Matrix3 {
        let (sx, cx) = self.x.get::<radian>().sin_cos();
        let (sy, cy) = self.y.get::<radian>().sin_cos();
        let (sz, cz) = self.z.get::<radian>().sin_cos();
        Matrix3::new(
            cz * cy,
            -sz * cx + cz * sy * sx,
            sz * sx + cz * sy * cx,
            sz * cy,
            cz * cx + sz * sy * sx,
            -cz * sx + sz * sy * cx,
            -sy,
            cy * sx,
            cy * cx,
        )
    }

    /// Recovers the angles from a rotation matrix.
    ///
    /// `y` is in [-90°, 90°] and `x` and `z` are in [-180°, 180°].
    ///
    /// At gimbal lock (`y` = ±90°), `z` and `x` are not individually determined; this returns
    /// `x = 0` and puts the whole rotation about the locked axis into `z`.
    #[must_use]
    pub fn from_rotation_matrix(m: &Matrix3) -> Self {
        let cy = f64::sqrt(
            (m[(0, 0)].powi(2) + m[(1, 0)].powi(2) + m[(2, 1)].powi(2) + m[(2, 2)].powi(2)) / 2.,
        );
        let (z, y, x) = if cy > GIMBAL_LOCK_THRESHOLD {
            (
                f64::atan2(m[(1, 0)], m[(0, 0)]),
                f64::atan2(-m[(2, 0)], cy),
                f64::atan2(m[(2, 1)], m[(2, 2)]),
            )
        } else {
            // NOTE: m[(2, 0)] is -sin(y), so the sign of y is the sign of -m[(2, 0)]. This is
            // deliberately the negated entry; taking the sign of m[(2, 0)] itself would mirror
            // the pitch and the angles would no longer reproduce `m`.
            (
                f64::atan2(-m[(0, 1)], m[(1, 1)]),
                FRAC_PI_2.copysign(-m[(2, 0)]),
                0.,
            )
        };
        Self {
            z: Angle::new::<radian>(z),
            y: Angle::new::<radian>(y),
            x: Angle::new::<radian>(x),
        }
    }
}

impl From<EulerXYZ> for Matrix3 {
    fn from(angles: EulerXYZ) -> Self {
        angles.to_rotation_matrix()
    }
}

impl From<EulerZYX> for Matrix3 {
    fn from(angles: EulerZYX) -> Self {
        angles.to_rotation_matrix()
    }
}

impl From<Matrix3> for EulerXYZ {
    fn from(m: Matrix3) -> Self {
        Self::from_rotation_matrix(&m)
    }
}

impl From<Matrix3> for EulerZYX {
    fn from(m: Matrix3) -> Self {
        Self::from_rotation_matrix(&m)
    }
}

/// Re-expresses the same rotation in the other axis order, going through its rotation matrix.
impl From<EulerXYZ> for EulerZYX {
    fn from(angles: EulerXYZ) -> Self {
        Self::from_rotation_matrix(&angles.to_rotation_matrix())
    }
}

impl From<EulerZYX> for EulerXYZ {
    fn from(angles: EulerZYX) -> Self {
        Self::from_rotation_matrix(&angles.to_rotation_matrix())
    }
}

#[cfg(any(test, feature = "approx"))]
fn angles_abs_diff_eq(lhs: [Angle; 3], rhs: [Angle; 3], epsilon: f64) -> bool {
    lhs.into_iter()
        .zip(rhs)
        .all(|(l, r)| WrappedAngle::new(l).abs_diff_eq(&WrappedAngle::new(r), epsilon))
}

/// Compares each angle modulo a full turn. This does _not_ consider two different triples that
/// describe the same rotation equal.
#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for EulerXYZ {
    /// in radians
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-10
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        angles_abs_diff_eq(
            [self.x, self.y, self.z],
            [other.x, other.y, other.z],
            epsilon,
        )
    }
}

/// Compares each angle modulo a full turn. This does _not_ consider two different triples that
/// describe the same rotation equal.
#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for EulerZYX {
    /// in radians
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-10
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        angles_abs_diff_eq(
            [self.z, self.y, self.x],
            [other.z, other.y, other.x],
            epsilon,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{EulerXYZ, EulerZYX};
    use crate::matrix::tests::{assert_orthonormal, in_range, RotationMatrix};
    use crate::matrix::Matrix3;
    use crate::vector::Vector3;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use quickcheck::{Arbitrary, Gen};
    use rstest::rstest;
    use std::f64::consts::{FRAC_PI_2, PI};
    use uom::si::angle::{degree, radian};
    use uom::si::f64::Angle;

    fn d(degrees: f64) -> Angle {
        Angle::new::<degree>(degrees)
    }
    fn r(radians: f64) -> Angle {
        Angle::new::<radian>(radians)
    }

    /// Angles with the middle one at least a milliradian away from gimbal lock.
    #[derive(Debug, Clone, Copy)]
    struct RegularAngles(f64, f64, f64);

    impl Arbitrary for RegularAngles {
        fn arbitrary(g: &mut Gen) -> Self {
            Self(
                in_range(g, -PI, PI),
                in_range(g, -FRAC_PI_2 + 1e-3, FRAC_PI_2 - 1e-3),
                in_range(g, -PI, PI),
            )
        }
    }

    #[test]
    fn gimbal_lock_xyz() {
        let m = Matrix3::new(
            0., 0., 1., //
            0., 1., 0., //
            1., 0., 0., //
        );
        let e = EulerXYZ::from_rotation_matrix(&m);
        assert_eq!(e.x.get::<radian>(), 0.);
        assert_eq!(e.y.get::<radian>(), FRAC_PI_2);
        assert_eq!(e.z.get::<radian>(), 0.);
    }

    #[rstest]
    #[case(d(90.))]
    #[case(d(-90.))]
    fn gimbal_lock_zyx_recovers_yaw(#[case] pitch: Angle) {
        let original = EulerZYX::new(d(30.), pitch, d(0.));
        let e = EulerZYX::from_rotation_matrix(&original.to_rotation_matrix());
        assert_eq!(e.x.get::<radian>(), 0.);
        assert_abs_diff_eq!(e, original, epsilon = 1e-12);
    }

    #[rstest]
    #[case(d(90.))]
    #[case(d(-90.))]
    fn gimbal_lock_xyz_recovers_rotation(#[case] y: Angle) {
        let original = EulerXYZ::new(d(0.), y, d(-40.));
        let e = EulerXYZ::from_rotation_matrix(&original.to_rotation_matrix());
        assert_eq!(e.x.get::<radian>(), 0.);
        assert_abs_diff_eq!(e, original, epsilon = 1e-12);
    }

    #[rstest]
    #[case(d(90.))]
    #[case(d(-90.))]
    fn gimbal_lock_zyx_keeps_pitch_sign(#[case] pitch: Angle) {
        let m = EulerZYX::new(d(0.), pitch, d(0.)).to_rotation_matrix();
        let e = EulerZYX::from_rotation_matrix(&m);
        assert_eq!(e.y.get::<radian>(), pitch.get::<radian>().signum() * FRAC_PI_2);
        assert_relative_eq!(e.to_rotation_matrix(), m, epsilon = 1e-12);
    }

    #[test]
    fn gimbal_lock_keeps_the_rotation() {
        // x and z both non-zero: the angles can't come back, but the rotation must
        let original = EulerZYX::new(d(10.), d(90.), d(25.));
        let m = original.to_rotation_matrix();
        let e = EulerZYX::from_rotation_matrix(&m);
        assert_eq!(e.x.get::<radian>(), 0.);
        assert_relative_eq!(e.to_rotation_matrix(), m, epsilon = 1e-12);
    }

    #[rstest]
    #[case(EulerXYZ::new(d(90.), d(0.), d(0.)), Matrix3::new(1., 0., 0., 0., 0., -1., 0., 1., 0.))]
    #[case(EulerXYZ::new(d(0.), d(90.), d(0.)), Matrix3::new(0., 0., 1., 0., 1., 0., -1., 0., 0.))]
    #[case(EulerXYZ::new(d(0.), d(0.), d(90.)), Matrix3::new(0., -1., 0., 1., 0., 0., 0., 0., 1.))]
    fn xyz_elementary_rotations(#[case] angles: EulerXYZ, #[case] expected: Matrix3) {
        assert_abs_diff_eq!(angles.to_rotation_matrix(), expected, epsilon = 1e-15);
    }

    #[test]
    fn zyx_yaw_rotates_north_to_east() {
        let m = Matrix3::from(EulerZYX::new(d(90.), d(0.), d(0.)));
        assert_abs_diff_eq!(
            m * Vector3::new(1., 0., 0.),
            Vector3::new(0., 1., 0.),
            epsilon = 1e-15
        );
    }

    #[test]
    fn orders_differ() {
        let (a, b, c) = (d(10.), d(20.), d(30.));
        let xyz = EulerXYZ::new(a, b, c).to_rotation_matrix();
        let zyx = EulerZYX::new(c, b, a).to_rotation_matrix();
        assert!((zyx[(0, 1)] - xyz[(0, 1)]).abs() > 1e-3);

        // Rz(c) Ry(b) Rx(a) is the inverse of Rx(-a) Ry(-b) Rz(-c)
        let inverse = EulerXYZ::new(-a, -b, -c).to_rotation_matrix();
        assert_abs_diff_eq!(zyx, inverse.transpose(), epsilon = 1e-15);
    }

    #[rstest]
    #[case(EulerXYZ::new(d(10.), d(20.), d(30.)))]
    #[case(EulerXYZ::new(d(-120.), d(45.), d(170.)))]
    #[case(EulerXYZ::new(d(0.), d(0.), d(40.)))]
    fn converting_between_orders_keeps_the_rotation(#[case] xyz: EulerXYZ) {
        let m = xyz.to_rotation_matrix();
        let zyx = EulerZYX::from(xyz);
        assert_abs_diff_eq!(zyx.to_rotation_matrix(), m, epsilon = 1e-12);
        assert_abs_diff_eq!(EulerXYZ::from(zyx), xyz, epsilon = 1e-12);
    }

    #[test]
    fn single_axis_rotation_is_the_same_in_both_orders() {
        let zyx = EulerZYX::from(EulerXYZ::new(d(0.), d(0.), d(40.)));
        assert_abs_diff_eq!(zyx, EulerZYX::new(d(40.), d(0.), d(0.)), epsilon = 1e-12);
    }

    quickcheck::quickcheck! {
        fn xyz_round_trip(angles: RegularAngles) -> () {
            let RegularAngles(x, y, z) = angles;
            let original = EulerXYZ::new(r(x), r(y), r(z));
            let m = original.to_rotation_matrix();
            assert_orthonormal(&m, 1e-10);
            assert_abs_diff_eq!(EulerXYZ::from_rotation_matrix(&m), original, epsilon = 1e-10);
        }

        fn zyx_round_trip(angles: RegularAngles) -> () {
            let RegularAngles(z, y, x) = angles;
            let original = EulerZYX::new(r(z), r(y), r(x));
            let m = original.to_rotation_matrix();
            assert_orthonormal(&m, 1e-10);
            assert_abs_diff_eq!(EulerZYX::from_rotation_matrix(&m), original, epsilon = 1e-10);
        }

        fn zyx_agrees_with_nalgebra(angles: RegularAngles) -> () {
            let RegularAngles(yaw, pitch, roll) = angles;
            let expected = nalgebra::Rotation3::from_euler_angles(roll, pitch, yaw);
            let m = EulerZYX::new(r(yaw), r(pitch), r(roll)).to_rotation_matrix();
            assert_abs_diff_eq!(m.inner, *expected.matrix(), epsilon = 1e-14);
        }

        fn matrices_survive_both_orders(rotation: RotationMatrix) -> () {
            let m = rotation.0;
            // within ~1e-9 of gimbal lock the recovered angles lose precision
            if m[(0, 2)].abs() < 1. - 1e-9 {
                assert_relative_eq!(EulerXYZ::from(m).to_rotation_matrix(), m, epsilon = 1e-10);
            }
            if m[(2, 0)].abs() < 1. - 1e-9 {
                assert_relative_eq!(EulerZYX::from(m).to_rotation_matrix(), m, epsilon = 1e-10);
            }
        }
    }
}
