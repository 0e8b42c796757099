use crate::matrix::Matrix3;
use crate::util::WrappedAngle;
use crate::vector::Vector3;
use std::fmt;
use std::fmt::{Display, Formatter};
use uom::si::angle::{degree, radian};
use uom::si::f64::Angle;

#[cfg(any(test, feature = "approx"))]
use approx::AbsDiffEq;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position on the reference ellipsoid expressed as geodetic latitude and longitude.
///
/// Latitude is expected to be in [-90°, 90°]. Longitude need not be wrapped to any particular
/// range: every conversion in this crate works through `atan2`, so any real longitude works, and
/// `370°` means the same thing as `10°`. Longitudes produced by this crate are in (-180°, 180°].
///
/// Note that latitude here is _geodetic_ latitude, ie, the angle between the equatorial plane and
/// the normal to the ellipsoid, which is also the angle the [n-vector](Vector3) makes with the
/// equatorial plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeodeticCoordinates {
    pub latitude: Angle,
    pub longitude: Angle,
}

impl GeodeticCoordinates {
    /// Constructs geodetic coordinates from a latitude and longitude.
    #[must_use]
    pub fn new(latitude: impl Into<Angle>, longitude: impl Into<Angle>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    /// Constructs geodetic coordinates from a latitude and longitude given in degrees.
    #[must_use]
    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self::new(
            Angle::new::<degree>(latitude),
            Angle::new::<degree>(longitude),
        )
    }

    /// Returns the n-vector for this position in the given E-frame.
    ///
    /// This is equivalent to [`Vector3::from_geodetic_coordinates`].
    #[must_use]
    pub fn to_n_vector(&self, frame: &Matrix3) -> Vector3 {
        Vector3::from_geodetic_coordinates(self, frame)
    }
}

impl Vector3 {
    /// Converts geodetic latitude and longitude into an n-vector in the given E-frame.
    ///
    /// The result is a unit vector (up to floating-point rounding).
    ///
    /// ```
    /// use nvector::{frame, GeodeticCoordinates, Vector3};
    /// use approx::assert_abs_diff_eq;
    ///
    /// let equator = GeodeticCoordinates::from_degrees(0., 0.);
    /// let n = Vector3::from_geodetic_coordinates(&equator, &frame::z_axis_north());
    /// assert_abs_diff_eq!(n, Vector3::new(1., 0., 0.), epsilon = 1e-15);
    /// ```
    #[must_use]
    pub fn from_geodetic_coordinates(coordinates: &GeodeticCoordinates, frame: &Matrix3) -> Self {
        let lat = coordinates.latitude.get::<radian>();
        let lon = coordinates.longitude.get::<radian>();
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();
        // NOTE: the components are written in the x-axis-north convention, so to get them into
        // `frame` we have to undo the frame rotation rather than apply it.
        frame.transpose() * Vector3::new(sin_lat, sin_lon * cos_lat, -cos_lon * cos_lat)
    }

    /// Converts this n-vector, given in the given E-frame, into geodetic latitude and longitude.
    ///
    /// The vector is not required to be normalized since only its direction is used. At the poles
    /// longitude is undefined; the returned value there is whatever `atan2` makes of the
    /// rounding noise in the horizontal components. The zero vector yields latitude 0° and
    /// longitude ±180°, with the sign following the signs of the zeros after rotation into the
    /// computational frame.
    #[must_use]
    pub fn to_geodetic_coordinates(&self, frame: &Matrix3) -> GeodeticCoordinates {
        let v = *frame * *self;
        let longitude = f64::atan2(v.y(), -v.z());
        let equatorial_component = f64::hypot(v.y(), v.z());
        let latitude = f64::atan2(v.x(), equatorial_component);
        GeodeticCoordinates {
            latitude: Angle::new::<radian>(latitude),
            longitude: Angle::new::<radian>(longitude),
        }
    }
}

/// Renders as `12.00000000°N, 30.00000000°E`, with longitude normalized to [-180°, 180°).
impl Display for GeodeticCoordinates {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let lat = self.latitude.get::<degree>();
        let lon = WrappedAngle::new(self.longitude)
            .to_signed_range()
            .to_degrees();
        // NOTE: `>=` rather than `is_sign_positive` so that -0 comes out as N/E
        let ns = if lat >= 0. { 'N' } else { 'S' };
        let ew = if lon >= 0. { 'E' } else { 'W' };
        write!(f, "{:.8}°{ns}, {:.8}°{ew}", lat.abs(), lon.abs())
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for GeodeticCoordinates {
    /// in radians
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-10
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        // NOTE: longitudes are compared modulo a full turn, but no allowance is made for the
        // poles, where any longitude is as good as any other.
        self.latitude
            .get::<radian>()
            .abs_diff_eq(&other.latitude.get::<radian>(), epsilon)
            && WrappedAngle::new(self.longitude)
                .abs_diff_eq(&WrappedAngle::new(other.longitude), epsilon)
    }
}

pub(crate) fn latitude_longitude(n_vector: Vector3, frame: &Matrix3) -> (f64, f64) {
    let GeodeticCoordinates {
        latitude,
        longitude,
    } = n_vector.to_geodetic_coordinates(frame);
    (latitude.get::<radian>(), longitude.get::<radian>())
}
