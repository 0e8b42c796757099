use crate::matrix::Matrix3;
use crate::InnerVector;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A vector in three-dimensional Cartesian space.
///
/// The same type is used for two different things throughout this crate:
///
/// - free Cartesian vectors, such as ECEF positions or the delta between two positions, whose
///   components are in meters; and
/// - [n-vectors], the unit normal to the reference ellipsoid at a position, whose components are
///   unitless and whose [norm](Vector3::norm) is 1.
///
/// Functions that produce n-vectors always normalize their output explicitly. Functions that
/// consume n-vectors do _not_ check that their input has unit length; passing a vector that isn't
/// normalized yields results that are as wrong as the input.
///
/// The components are always expressed in whichever E-frame (ie, axis convention) the caller
/// chose. See [`frame`](crate::frame).
///
/// [n-vectors]: https://www.ffi.no/en/research/n-vector
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
// no need for the "inner": indirection
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Vector3 {
    pub(crate) inner: InnerVector,
}

impl Vector3 {
    pub(crate) fn from_nalgebra_vector(inner: InnerVector) -> Self {
        Self { inner }
    }

    /// Constructs a vector from its three Cartesian components.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::from_nalgebra_vector(InnerVector::new(x, y, z))
    }

    /// Returns the zero vector.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_nalgebra_vector(InnerVector::zeros())
    }

    /// Returns the X component.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.inner.x
    }

    /// Returns the Y component.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.inner.y
    }

    /// Returns the Z component.
    #[must_use]
    pub fn z(&self) -> f64 {
        self.inner.z
    }

    /// Returns the components as `[x, y, z]`.
    #[must_use]
    pub fn to_array(&self) -> [f64; 3] {
        [self.inner.x, self.inner.y, self.inner.z]
    }

    /// Returns this vector with every component multiplied by `s`.
    #[must_use]
    pub fn scale(&self, s: f64) -> Self {
        Self::from_nalgebra_vector(self.inner * s)
    }

    /// Returns the [dot product](https://en.wikipedia.org/wiki/Dot_product) of `self` and `rhs`.
    #[must_use]
    pub fn dot(&self, rhs: &Self) -> f64 {
        self.inner.dot(&rhs.inner)
    }

    /// Returns the [cross product](https://en.wikipedia.org/wiki/Cross_product) `self × rhs`.
    #[must_use]
    pub fn cross(&self, rhs: &Self) -> Self {
        Self::from_nalgebra_vector(self.inner.cross(&rhs.inner))
    }

    /// Returns the Euclidean norm (ie, length) of the vector.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.inner.norm()
    }

    /// Returns a vector with the same direction as `self` but with a norm of 1.
    ///
    /// The zero vector is not special-cased: normalizing it divides by zero and yields a vector of
    /// `NaN`s.
    #[must_use]
    pub fn normalize(&self) -> Self {
        self.scale(1. / self.norm())
    }

    /// Returns `m · self`, ie, this vector transformed by the matrix `m`.
    ///
    /// This is equivalent to `m * self`.
    #[must_use]
    pub fn transform(&self, m: &Matrix3) -> Self {
        *m * *self
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}

impl Display for Vector3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.inner.x, self.inner.y, self.inner.z)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from_nalgebra_vector(-self.inner)
    }
}

impl Add<Self> for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::from_nalgebra_vector(self.inner + rhs.inner)
    }
}

impl AddAssign<Self> for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        self.inner += rhs.inner;
    }
}

impl Sub<Self> for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_nalgebra_vector(self.inner - rhs.inner)
    }
}

impl SubAssign<Self> for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        self.inner -= rhs.inner;
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Self::Output {
        rhs.scale(self)
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Vector3 {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        // NOTE: unitless for n-vectors, meters for everything else. 1e-10 is well below anything
        // that matters for either.
        1e-10
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        // NOTE: this checks each component separately, not the norm of the difference.
        self.inner.abs_diff_eq(&other.inner, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Vector3 {
    fn default_max_relative() -> Self::Epsilon {
        InnerVector::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.inner.relative_eq(&other.inner, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::Vector3;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use quickcheck::quickcheck;
    use rstest::rstest;

    #[rstest]
    #[case(Vector3::new(1., 0., 0.), Vector3::new(0., 1., 0.), Vector3::new(0., 0., 1.))]
    #[case(Vector3::new(0., 1., 0.), Vector3::new(0., 0., 1.), Vector3::new(1., 0., 0.))]
    #[case(Vector3::new(0., 0., 1.), Vector3::new(1., 0., 0.), Vector3::new(0., 1., 0.))]
    #[case(Vector3::new(0., 1., 0.), Vector3::new(1., 0., 0.), Vector3::new(0., 0., -1.))]
    #[case(Vector3::new(1., 2., 3.), Vector3::new(4., 5., 6.), Vector3::new(-3., 6., -3.))]
    fn cross_product_is_right_handed(
        #[case] lhs: Vector3,
        #[case] rhs: Vector3,
        #[case] expected: Vector3,
    ) {
        assert_eq!(lhs.cross(&rhs), expected);
    }

    #[test]
    fn arithmetic_works() {
        let a = Vector3::new(1., -2., 3.);
        let b = Vector3::new(0.5, 4., -1.);

        assert_eq!(a + b, Vector3::new(1.5, 2., 2.));
        assert_eq!(a - b, Vector3::new(0.5, -6., 4.));
        assert_eq!(-a, Vector3::new(-1., 2., -3.));
        assert_eq!(a * 2., Vector3::new(2., -4., 6.));
        assert_eq!(2. * a, a.scale(2.));
        assert_eq!(a.dot(&b), 0.5 - 8. - 3.);

        let mut c = a;
        c += b;
        assert_eq!(c, a + b);
        c -= b;
        assert_eq!(c, a);
    }

    #[test]
    fn norm_and_normalize() {
        let v = Vector3::new(3., 0., -4.);
        assert_eq!(v.norm(), 5.);
        assert_relative_eq!(v.normalize(), Vector3::new(0.6, 0., -0.8));
        assert_relative_eq!(v.normalize().norm(), 1.);
    }

    #[test]
    fn normalizing_zero_vector_is_nan() {
        let n = Vector3::zero().normalize();
        assert!(n.x().is_nan());
        assert!(n.y().is_nan());
        assert!(n.z().is_nan());
    }

    #[test]
    fn array_conversions() {
        let v = Vector3::from([1., 2., 3.]);
        assert_eq!(v.x(), 1.);
        assert_eq!(v.y(), 2.);
        assert_eq!(v.z(), 3.);
        assert_eq!(<[f64; 3]>::from(v), [1., 2., 3.]);
        assert_eq!(v.to_string(), "[1, 2, 3]");
    }

    quickcheck! {
        fn cross_product_is_orthogonal(a: (i16, i16, i16), b: (i16, i16, i16)) -> () {
            let a = Vector3::new(f64::from(a.0), f64::from(a.1), f64::from(a.2));
            let b = Vector3::new(f64::from(b.0), f64::from(b.1), f64::from(b.2));
            let c = a.cross(&b);
            // integer-valued components keep these products exact
            assert_eq!(c.dot(&a), 0.);
            assert_eq!(c.dot(&b), 0.);
        }

        fn normalized_vectors_have_unit_norm(v: (i16, i16, i16)) -> () {
            let v = Vector3::new(f64::from(v.0), f64::from(v.1), f64::from(v.2));
            if v.norm() > 0. {
                assert_abs_diff_eq!(v.normalize().norm(), 1., epsilon = 1e-12);
            }
        }
    }
}
