use crate::vector::Vector3;
use crate::InnerMatrix;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::{Index, Mul};

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 3x3 matrix.
///
/// Matrices are constructed, indexed, and (with the `serde` feature) serialized in row-major
/// order, so `Matrix3::new(xx, xy, xz, yx, yy, yz, zx, zy, zz)` reads the way it is written.
///
/// In this crate, a `Matrix3` is used for three things:
///
/// - selecting the axis convention of the E-frame (see [`frame`](crate::frame));
/// - the orientation of a local North-East-Down frame relative to E (see
///   [`Vector3::to_rotation_matrix`]); and
/// - general attitude rotations (see [`EulerXYZ`](crate::EulerXYZ) and
///   [`EulerZYX`](crate::EulerZYX)).
///
/// In all three cases the matrix is expected to be orthonormal (ie, `Mᵗ M = I`). Nothing in this
/// crate checks that; the conversions simply produce meaningless output if the expectation is
/// violated.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
// nalgebra stores column-major, which would leak into the serialized form
#[cfg_attr(
    feature = "serde",
    serde(from = "[[f64; 3]; 3]", into = "[[f64; 3]; 3]")
)]
pub struct Matrix3 {
    pub(crate) inner: InnerMatrix,
}

impl Matrix3 {
    pub(crate) fn from_nalgebra_matrix(inner: InnerMatrix) -> Self {
        Self { inner }
    }

    /// Constructs a matrix from its components in row-major order.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        xx: f64,
        xy: f64,
        xz: f64,
        yx: f64,
        yy: f64,
        yz: f64,
        zx: f64,
        zy: f64,
        zz: f64,
    ) -> Self {
        Self::from_nalgebra_matrix(InnerMatrix::new(xx, xy, xz, yx, yy, yz, zx, zy, zz))
    }

    /// Constructs a matrix from its three rows.
    #[must_use]
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        let [[xx, xy, xz], [yx, yy, yz], [zx, zy, zz]] = rows;
        Self::new(xx, xy, xz, yx, yy, yz, zx, zy, zz)
    }

    /// Constructs a matrix whose columns are the three given vectors.
    ///
    /// For a rotation matrix `R_AB`, the columns are the x, y, and z axes of frame B decomposed in
    /// frame A.
    #[must_use]
    pub fn from_columns(x: Vector3, y: Vector3, z: Vector3) -> Self {
        Self::from_nalgebra_matrix(InnerMatrix::from_columns(&[x.inner, y.inner, z.inner]))
    }

    /// Returns the identity matrix.
    #[must_use]
    pub fn identity() -> Self {
        Self::from_nalgebra_matrix(InnerMatrix::identity())
    }

    /// Returns the rows of the matrix.
    #[must_use]
    pub fn to_rows(&self) -> [[f64; 3]; 3] {
        let m = &self.inner;
        [
            [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
            [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
            [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
        ]
    }

    /// Returns row `i` (zero-based) as a vector.
    ///
    /// # Panics
    ///
    /// If `i` is not in `0..3`.
    #[must_use]
    pub fn row(&self, i: usize) -> Vector3 {
        Vector3::new(self[(i, 0)], self[(i, 1)], self[(i, 2)])
    }

    /// Returns column `j` (zero-based) as a vector.
    ///
    /// # Panics
    ///
    /// If `j` is not in `0..3`.
    #[must_use]
    pub fn column(&self, j: usize) -> Vector3 {
        Vector3::new(self[(0, j)], self[(1, j)], self[(2, j)])
    }

    /// Returns the transpose of the matrix.
    ///
    /// For a rotation matrix, this is also its inverse.
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self::from_nalgebra_matrix(self.inner.transpose())
    }

    /// Returns the matrix product `self · rhs`.
    ///
    /// This is equivalent to `self * rhs`.
    #[must_use]
    pub fn multiply(&self, rhs: &Self) -> Self {
        *self * *rhs
    }

    /// Returns the matrix-vector product `self · v`.
    ///
    /// This is equivalent to `self * v`.
    #[must_use]
    pub fn transform(&self, v: Vector3) -> Vector3 {
        *self * v
    }
}

impl From<[[f64; 3]; 3]> for Matrix3 {
    fn from(rows: [[f64; 3]; 3]) -> Self {
        Self::from_rows(rows)
    }
}

impl From<Matrix3> for [[f64; 3]; 3] {
    fn from(m: Matrix3) -> Self {
        m.to_rows()
    }
}

/// Indexes by `(row, column)`, both zero-based.
impl Index<(usize, usize)> for Matrix3 {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.inner[index]
    }
}

impl Display for Matrix3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Mul<Matrix3> for Matrix3 {
    type Output = Matrix3;

    fn mul(self, rhs: Matrix3) -> Self::Output {
        Self::from_nalgebra_matrix(self.inner * rhs.inner)
    }
}

impl Mul<Vector3> for Matrix3 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Self::Output {
        Vector3::from_nalgebra_vector(self.inner * rhs.inner)
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Matrix3 {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-10
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.inner.abs_diff_eq(&other.inner, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Matrix3 {
    fn default_max_relative() -> Self::Epsilon {
        InnerMatrix::default_max_relative()
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
pub(crate) mod tests {
    use super::Matrix3;
    use crate::vector::Vector3;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use quickcheck::{Arbitrary, Gen};

    /// A uniformly-ish distributed proper rotation matrix.
    ///
    /// Built through nalgebra rather than through this crate's own Euler code so that tests using
    /// it don't assume what they are testing.
    #[derive(Debug, Clone, Copy)]
    pub(crate) struct RotationMatrix(pub(crate) Matrix3);

    /// An f64 in `[min, max)` that quickcheck can still shrink towards `min`.
    pub(crate) fn in_range(g: &mut Gen, min: f64, max: f64) -> f64 {
        // quickcheck will give us awkward f64 values -- we ignore those
        let raw = loop {
            match f64::arbitrary(g) {
                0. => break 0.,
                f if f.is_normal() => break f,
                _ => {}
            }
        };
        min + (raw.abs() % 1e6) / 1e6 * (max - min)
    }

    impl Arbitrary for RotationMatrix {
        fn arbitrary(g: &mut Gen) -> Self {
            use std::f64::consts::PI;

            let roll = in_range(g, -PI, PI);
            let pitch = in_range(g, -PI, PI);
            let yaw = in_range(g, -PI, PI);
            let rotation = nalgebra::Rotation3::from_euler_angles(roll, pitch, yaw);
            Self(Matrix3::from_nalgebra_matrix(rotation.into_inner()))
        }
    }

    /// Asserts that every row has unit norm and the rows are mutually orthogonal.
    pub(crate) fn assert_orthonormal(m: &Matrix3, epsilon: f64) {
        for i in 0..3 {
            assert_abs_diff_eq!(m.row(i).norm(), 1., epsilon = epsilon);
            for j in (i + 1)..3 {
                assert_abs_diff_eq!(m.row(i).dot(&m.row(j)), 0., epsilon = epsilon);
            }
        }
    }

    #[test]
    fn construction_is_row_major() {
        let m = Matrix3::new(1., 2., 3., 4., 5., 6., 7., 8., 9.);
        assert_eq!(m[(0, 1)], 2.);
        assert_eq!(m[(1, 0)], 4.);
        assert_eq!(m[(2, 1)], 8.);
        assert_eq!(m.row(1), Vector3::new(4., 5., 6.));
        assert_eq!(m.column(1), Vector3::new(2., 5., 8.));
        assert_eq!(
            m.to_rows(),
            [[1., 2., 3.], [4., 5., 6.], [7., 8., 9.]]
        );
        assert_eq!(Matrix3::from_rows(m.to_rows()), m);
    }

    #[test]
    fn from_columns_places_vectors_in_columns() {
        let m = Matrix3::from_columns(
            Vector3::new(1., 4., 7.),
            Vector3::new(2., 5., 8.),
            Vector3::new(3., 6., 9.),
        );
        assert_eq!(m, Matrix3::new(1., 2., 3., 4., 5., 6., 7., 8., 9.));
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let m = Matrix3::new(1., 2., 3., 4., 5., 6., 7., 8., 9.);
        assert_eq!(m.transpose(), Matrix3::new(1., 4., 7., 2., 5., 8., 3., 6., 9.));
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn multiply_is_row_by_column() {
        let a = Matrix3::new(1., 2., 3., 4., 5., 6., 7., 8., 9.);
        let b = Matrix3::new(9., 8., 7., 6., 5., 4., 3., 2., 1.);
        assert_eq!(
            a.multiply(&b),
            Matrix3::new(30., 24., 18., 84., 69., 54., 138., 114., 90.)
        );
        assert_eq!(a.multiply(&Matrix3::identity()), a);
    }

    #[test]
    fn transform_is_matrix_vector_product() {
        let m = Matrix3::new(1., 2., 3., 4., 5., 6., 7., 8., 9.);
        let v = Vector3::new(1., 0., -1.);
        assert_eq!(m.transform(v), Vector3::new(-2., -2., -2.));
        assert_eq!(v.transform(&m), m * v);
    }

    quickcheck::quickcheck! {
        fn generated_rotations_are_orthonormal(r: RotationMatrix) -> () {
            assert_orthonormal(&r.0, 1e-12);
            assert_relative_eq!(r.0 * r.0.transpose(), Matrix3::identity(), epsilon = 1e-12);
        }
    }
}
