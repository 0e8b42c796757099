use crate::ellipsoid::Ellipsoid;
use crate::frame::{in_frame, in_frame_with};
use crate::geodetic::GeodeticCoordinates;
use crate::matrix::Matrix3;
use crate::vector::Vector3;
use std::fmt;
use std::fmt::{Display, Formatter};
use uom::si::f64::Length;
use uom::si::length::meter;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position relative to a reference ellipsoid, expressed as an n-vector and a depth.
///
/// The n-vector says _where_ on the ellipsoid the position is (it is the unit normal to the
/// ellipsoid surface there), and the depth says how far below the surface the position is along
/// that normal. Depth is negative above the surface, so [`height`](Position::height) is simply
/// `-depth`.
///
/// This is the n-vector counterpart of a Cartesian ECEF vector, and the two are converted with
/// [`Position::to_ecef`] and [`Position::from_ecef`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub n_vector: Vector3,
    pub depth: Length,
}

impl Position {
    /// Constructs a position from an n-vector and a depth below the ellipsoid surface.
    #[must_use]
    pub fn new(n_vector: Vector3, depth: impl Into<Length>) -> Self {
        Self {
            n_vector,
            depth: depth.into(),
        }
    }

    /// Constructs a position from an n-vector and a height above the ellipsoid surface.
    #[must_use]
    pub fn at_height(n_vector: Vector3, height: impl Into<Length>) -> Self {
        Self {
            n_vector,
            depth: -height.into(),
        }
    }

    /// Constructs a position from geodetic coordinates and a height above the ellipsoid surface.
    #[must_use]
    pub fn from_geodetic(
        coordinates: &GeodeticCoordinates,
        height: impl Into<Length>,
        frame: &Matrix3,
    ) -> Self {
        Self::at_height(coordinates.to_n_vector(frame), height)
    }

    /// Returns the height above the ellipsoid surface, ie, `-depth`.
    #[must_use]
    pub fn height(&self) -> Length {
        -self.depth
    }

    /// Returns the geodetic latitude and longitude of this position.
    #[must_use]
    pub fn geodetic_coordinates(&self, frame: &Matrix3) -> GeodeticCoordinates {
        self.n_vector.to_geodetic_coordinates(frame)
    }

    /// Converts this position into an ECEF vector (in meters) in the given E-frame.
    ///
    /// `n_vector` is assumed to be a unit vector.
    ///
    /// ```
    /// use nvector::{frame, Ellipsoid, GeodeticCoordinates, Position};
    /// use uom::si::{f64::Length, length::meter};
    ///
    /// let frame = frame::z_axis_north();
    /// let p = Position::from_geodetic(
    ///     &GeodeticCoordinates::from_degrees(0., 0.),
    ///     Length::new::<meter>(0.),
    ///     &frame,
    /// );
    /// let ecef = p.to_ecef(&Ellipsoid::WGS84, &frame);
    /// assert!((ecef.x() - 6_378_137.).abs() < 1e-6);
    /// ```
    #[must_use]
    pub fn to_ecef(&self, ellipsoid: &Ellipsoid, frame: &Matrix3) -> Vector3 {
        let depth = self.depth.get::<meter>();
        let b = ellipsoid.b();
        let one_minus_f_sq = (1. - ellipsoid.f()).powi(2);
        in_frame(frame, self.n_vector, |n| {
            let (x, y, z) = (n.x(), n.y(), n.z());
            let denominator = f64::sqrt(x * x + y * y / one_minus_f_sq + z * z / one_minus_f_sq);
            // the point on the ellipsoid surface with normal n
            let surface = Vector3::new(x, y / one_minus_f_sq, z / one_minus_f_sq) * (b / denominator);
            surface - n * depth
        })
    }

    /// Converts an ECEF vector (in meters) in the given E-frame into a position.
    ///
    /// This is an exact, closed-form solution (Gade, 2010) rather than an iterative one. It is
    /// valid everywhere except very close to the centre of the ellipsoid, specifically inside the
    /// evolute of the ellipsoid's meridian section. There the intermediate quantities become
    /// non-finite and the result contains `NaN`s; no error is raised. Use
    /// [`Position::checked_from_ecef`] to get an [`Option`] instead.
    ///
    /// The returned n-vector is normalized.
    #[must_use]
    pub fn from_ecef(ecef: Vector3, ellipsoid: &Ellipsoid, frame: &Matrix3) -> Self {
        let a = ellipsoid.a();
        let e_2 = ellipsoid.eccentricity_squared();
        let e_4 = e_2 * e_2;

        let (n_vector, height) = in_frame_with(frame, ecef, |ecef| {
            let (x, y, z) = (ecef.x(), ecef.y(), ecef.z());

            // NOTE: the variable names below follow the derivation in Gade (2010), appendix B.
            let r_2 = y * y + z * z;
            let p = r_2 / (a * a);
            let q = (1. - e_2) / (a * a) * x * x;
            let r = (p + q - e_4) / 6.;
            let s = e_4 * p * q / (4. * r.powi(3));
            let t = f64::cbrt(1. + s + f64::sqrt(s * (2. + s)));
            let u = r * (1. + t + 1. / t);
            let v = f64::sqrt(u * u + e_4 * q);
            let w = e_2 * (u + v - q) / (2. * v);
            let k = f64::sqrt(u + v + w * w) - w;
            let d = k * f64::sqrt(r_2) / (k + e_2);

            let dist = f64::sqrt(d * d + x * x);
            let height = (k + e_2 - 1.) / k * dist;

            let temp = 1. / dist;
            let horizontal = temp * k / (k + e_2);
            let n = Vector3::new(temp * x, horizontal * y, horizontal * z);
            (n, height)
        });

        Self {
            n_vector: n_vector.normalize(),
            depth: Length::new::<meter>(-height),
        }
    }

    /// Like [`Position::from_ecef`], but returns `None` if the result is not finite.
    ///
    /// When it returns `Some`, the position is identical to what [`Position::from_ecef`] returns.
    #[must_use]
    pub fn checked_from_ecef(ecef: Vector3, ellipsoid: &Ellipsoid, frame: &Matrix3) -> Option<Self> {
        let position = Self::from_ecef(ecef, ellipsoid, frame);
        let n = position.n_vector;
        let finite = n.x().is_finite()
            && n.y().is_finite()
            && n.z().is_finite()
            && position.depth.get::<meter>().is_finite();
        finite.then_some(position)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}m depth",
            self.n_vector,
            self.depth.get::<meter>()
        )
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Position {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-8
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        // NOTE: the same epsilon is used for the unitless n-vector and the depth in meters; use
        // the fields directly when they need different tolerances.
        self.n_vector.abs_diff_eq(&other.n_vector, epsilon)
            && self
                .depth
                .get::<meter>()
                .abs_diff_eq(&other.depth.get::<meter>(), epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Position {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.n_vector
            .relative_eq(&other.n_vector, epsilon, max_relative)
            && self.depth.get::<meter>().relative_eq(
                &other.depth.get::<meter>(),
                epsilon,
                max_relative,
            )
    }
}
