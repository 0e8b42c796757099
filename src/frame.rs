//! Axis conventions for the Earth-Centred-Earth-Fixed frame.
//!
//! Every conversion in this crate takes an E-frame matrix that says how the axes of the caller's
//! ECEF frame relate to the axes the formulas are written in. Internally, the formulas put the
//! x-axis through the North Pole, the y-axis through 0° latitude / 90° East, and the z-axis
//! through 0° latitude / 180° longitude. That internal convention is [`x_axis_north`] (the
//! identity).
//!
//! The conventional ECEF axes (z through the North Pole, x through 0°/0°, y through 0°/90°E) are
//! [`z_axis_north`], which is what [`Config::default`](crate::Config::default) uses.
//!
//! ```
//! use nvector::frame;
//! use nvector::Vector3;
//!
//! // the North Pole in each convention
//! let north = Vector3::new(0., 0., 1.);
//! assert_eq!(frame::z_axis_north() * north, Vector3::new(1., 0., 0.));
//! assert_eq!(frame::x_axis_north() * north, north);
//! ```

use crate::matrix::Matrix3;
use crate::vector::Vector3;

/// Returns the E-frame where the z-axis points to the North Pole.
///
/// This is the axis convention usually meant by "ECEF": x points to 0° latitude, 0° longitude, and
/// y points to 0° latitude, 90° East.
#[must_use]
pub fn z_axis_north() -> Matrix3 {
    Matrix3::new(
        0., 0., 1., //
        0., 1., 0., //
        -1., 0., 0., //
    )
}

/// Returns the E-frame where the x-axis points to the North Pole.
///
/// Here y points to 0° latitude, 90° East and z points to 0° latitude, 180° longitude. This is
/// the convention used by Gade (2010).
#[must_use]
pub fn x_axis_north() -> Matrix3 {
    Matrix3::identity()
}

/// Rotates `v` into `frame`, applies `f`, and rotates the result back out.
pub(crate) fn in_frame(frame: &Matrix3, v: Vector3, f: impl FnOnce(Vector3) -> Vector3) -> Vector3 {
    in_frame_with(frame, v, |v| (f(v), ())).0
}

/// Like [`in_frame`], but lets `f` return a frame-independent value alongside the vector.
pub(crate) fn in_frame_with<T>(
    frame: &Matrix3,
    v: Vector3,
    f: impl FnOnce(Vector3) -> (Vector3, T),
) -> (Vector3, T) {
    let (out, extra) = f(*frame * v);
    (frame.transpose() * out, extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::tests::assert_orthonormal;

    #[test]
    fn frames_are_orthonormal() {
        assert_orthonormal(&z_axis_north(), 0.);
        assert_orthonormal(&x_axis_north(), 0.);
    }

    #[test]
    fn z_axis_north_maps_conventional_axes() {
        let frame = z_axis_north();
        // 0°/0° is +x conventionally and -z internally
        assert_eq!(frame * Vector3::new(1., 0., 0.), Vector3::new(0., 0., -1.));
        // 0°/90°E is +y in both
        assert_eq!(frame * Vector3::new(0., 1., 0.), Vector3::new(0., 1., 0.));
    }

    #[test]
    fn in_frame_rotates_back_out() {
        let frame = z_axis_north();
        let v = Vector3::new(1., 2., 3.);
        assert_eq!(in_frame(&frame, v, |v| v), v);

        let (out, seen) = in_frame_with(&frame, v, |inner| (inner * 2., inner));
        assert_eq!(seen, Vector3::new(3., 2., -1.));
        assert_eq!(out, v * 2.);
    }
}
