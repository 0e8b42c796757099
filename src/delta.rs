use crate::ecef::Position;
use crate::ellipsoid::Ellipsoid;
use crate::matrix::Matrix3;
use crate::vector::Vector3;

impl Position {
    /// Returns the vector from this position to `to`, decomposed in the given E-frame, in meters.
    ///
    /// To get the delta in a local frame instead, multiply by the transpose of that frame's
    /// rotation matrix; for North-East-Down at the origin:
    ///
    /// ```
    /// use nvector::{frame, Ellipsoid, GeodeticCoordinates, Position};
    /// use uom::si::{f64::Length, length::meter};
    ///
    /// let frame = frame::z_axis_north();
    /// let a = Position::from_geodetic(
    ///     &GeodeticCoordinates::from_degrees(0., 0.),
    ///     Length::new::<meter>(0.),
    ///     &frame,
    /// );
    /// let b = Position::from_geodetic(
    ///     &GeodeticCoordinates::from_degrees(0., 0.),
    ///     Length::new::<meter>(100.),
    ///     &frame,
    /// );
    ///
    /// let delta_e = a.delta_to(&b, &Ellipsoid::WGS84, &frame);
    /// let delta_n = a.n_vector.to_rotation_matrix(&frame).transpose() * delta_e;
    /// // b is straight up from a
    /// assert!((delta_n.z() + 100.).abs() < 1e-6);
    /// ```
    #[must_use]
    pub fn delta_to(&self, to: &Position, ellipsoid: &Ellipsoid, frame: &Matrix3) -> Vector3 {
        to.to_ecef(ellipsoid, frame) - self.to_ecef(ellipsoid, frame)
    }

    /// Returns the position reached by moving `delta` (in meters, decomposed in the given E-frame)
    /// from this position.
    #[must_use]
    pub fn destination(&self, delta: Vector3, ellipsoid: &Ellipsoid, frame: &Matrix3) -> Position {
        Position::from_ecef(self.to_ecef(ellipsoid, frame) + delta, ellipsoid, frame)
    }
}
