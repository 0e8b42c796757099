use crate::ecef::Position;
use crate::ellipsoid::Ellipsoid;
use crate::frame;
use crate::geodetic::GeodeticCoordinates;
use crate::matrix::Matrix3;
use crate::vector::Vector3;
use uom::si::f64::Angle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The E-frame and reference ellipsoid to do conversions in.
///
/// Every frame- or ellipsoid-dependent function in this crate takes both explicitly. `Config`
/// bundles them for callers that always use the same pair, and has a method for each such
/// function that forwards its fields.
///
/// The default is the [z-axis-north](frame::z_axis_north) frame on [WGS84](Ellipsoid::WGS84).
///
/// With the `serde` feature, every field is optional when deserializing and falls back to its
/// default:
///
/// ```
/// # #[cfg(feature = "serde")]
/// # {
/// use nvector::{Config, Ellipsoid};
///
/// let yaml = "
/// ellipsoid:
///   semi_major_axis: 6378135.0
///   flattening: 0.003352779454167505
/// ";
/// let config: Config = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(config.ellipsoid, Ellipsoid::WGS72);
/// assert_eq!(config.frame, Config::default().frame);
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Config {
    pub frame: Matrix3,
    pub ellipsoid: Ellipsoid,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame: frame::z_axis_north(),
            ellipsoid: Ellipsoid::WGS84,
        }
    }
}

impl Config {
    /// Returns this configuration with the E-frame replaced.
    #[must_use]
    pub fn with_frame(self, frame: Matrix3) -> Self {
        Self { frame, ..self }
    }

    /// Returns this configuration with the ellipsoid replaced.
    #[must_use]
    pub fn with_ellipsoid(self, ellipsoid: Ellipsoid) -> Self {
        Self { ellipsoid, ..self }
    }

    /// See [`Vector3::from_geodetic_coordinates`].
    #[must_use]
    pub fn n_vector_from_geodetic(&self, coordinates: &GeodeticCoordinates) -> Vector3 {
        Vector3::from_geodetic_coordinates(coordinates, &self.frame)
    }

    /// See [`Vector3::to_geodetic_coordinates`].
    #[must_use]
    pub fn geodetic_from_n_vector(&self, n_vector: Vector3) -> GeodeticCoordinates {
        n_vector.to_geodetic_coordinates(&self.frame)
    }

    /// See [`Position::to_ecef`].
    #[must_use]
    pub fn to_ecef(&self, position: &Position) -> Vector3 {
        position.to_ecef(&self.ellipsoid, &self.frame)
    }

    /// See [`Position::from_ecef`].
    #[must_use]
    pub fn from_ecef(&self, ecef: Vector3) -> Position {
        Position::from_ecef(ecef, &self.ellipsoid, &self.frame)
    }

    /// See [`Position::checked_from_ecef`].
    #[must_use]
    pub fn checked_from_ecef(&self, ecef: Vector3) -> Option<Position> {
        Position::checked_from_ecef(ecef, &self.ellipsoid, &self.frame)
    }

    /// See [`Vector3::to_rotation_matrix`].
    #[must_use]
    pub fn rotation_matrix_from_n_vector(&self, n_vector: Vector3) -> Matrix3 {
        n_vector.to_rotation_matrix(&self.frame)
    }

    /// See [`Vector3::to_rotation_matrix_using_wander_azimuth`].
    #[must_use]
    pub fn rotation_matrix_using_wander_azimuth(
        &self,
        n_vector: Vector3,
        wander_azimuth: impl Into<Angle>,
    ) -> Matrix3 {
        n_vector.to_rotation_matrix_using_wander_azimuth(wander_azimuth, &self.frame)
    }

    /// See [`Position::delta_to`].
    #[must_use]
    pub fn delta(&self, from: &Position, to: &Position) -> Vector3 {
        from.delta_to(to, &self.ellipsoid, &self.frame)
    }

    /// See [`Position::destination`].
    #[must_use]
    pub fn destination(&self, from: &Position, delta: Vector3) -> Position {
        from.destination(delta, &self.ellipsoid, &self.frame)
    }
}
