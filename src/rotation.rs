use crate::euler::EulerXYZ;
use crate::geodetic::latitude_longitude;
use crate::matrix::Matrix3;
use crate::vector::Vector3;
use uom::si::angle::radian;
use uom::si::f64::Angle;

impl Vector3 {
    /// Returns the orientation of the local North-East-Down frame at this n-vector, ie, the
    /// rotation matrix `R_EN` whose columns are the north, east, and down axes decomposed in the
    /// given E-frame.
    ///
    /// At the poles north and east are undefined. There, east is chosen to be the direction of
    /// 90° East on the equator, which makes north point towards 180° on the North Pole and
    /// towards 0° on the South Pole.
    ///
    /// ```
    /// use nvector::{frame, Matrix3, Vector3};
    /// use approx::assert_abs_diff_eq;
    ///
    /// let north_pole = Vector3::new(0., 0., 1.);
    /// let r = north_pole.to_rotation_matrix(&frame::z_axis_north());
    /// assert_abs_diff_eq!(
    ///     r,
    ///     Matrix3::new(-1., 0., 0., 0., 1., 0., 0., 0., -1.),
    ///     epsilon = 1e-14
    /// );
    /// ```
    #[must_use]
    pub fn to_rotation_matrix(&self, frame: &Matrix3) -> Matrix3 {
        let v = *frame * *self;

        let down = -v;

        // east is horizontal, so it lies in the equatorial (y-z) plane
        let (east_y, east_z) = (-v.z(), v.y());
        let horizontal = f64::hypot(east_y, east_z);
        let east = if horizontal == 0. {
            Vector3::new(0., 1., 0.)
        } else {
            Vector3::new(0., east_y / horizontal, east_z / horizontal)
        };

        let north = east.cross(&down);

        frame.transpose() * Matrix3::from_columns(north, east, down)
    }

    /// Returns the orientation of the local wander-azimuth frame at this n-vector, ie, the
    /// rotation matrix `R_EL`.
    ///
    /// The L-frame shares its z-axis (down) with the North-East-Down frame, but its x-axis is
    /// rotated `wander_azimuth` from north towards east. This frame has no singularity at the
    /// poles, which makes it the usual choice for navigating near them.
    #[must_use]
    pub fn to_rotation_matrix_using_wander_azimuth(
        &self,
        wander_azimuth: impl Into<Angle>,
        frame: &Matrix3,
    ) -> Matrix3 {
        let (latitude, longitude) = latitude_longitude(*self, frame);
        let r = EulerXYZ {
            x: Angle::new::<radian>(longitude),
            y: Angle::new::<radian>(-latitude),
            z: wander_azimuth.into(),
        };
        frame.transpose() * r.to_rotation_matrix()
    }

    /// Returns the n-vector for a local frame orientation such as `R_EN` or `R_EL`.
    ///
    /// This is the negated z-axis (ie, up) of the local frame, so it is in whatever E-frame the
    /// rotation matrix was expressed in.
    #[must_use]
    pub fn from_rotation_matrix(m: &Matrix3) -> Self {
        *m * Vector3::new(0., 0., -1.)
    }
}
