//! This library implements the [n-vector] formulation of positions on and around the Earth
//! (Gade, 2010), for people who would rather not re-derive the ellipsoid geometry themselves.
//!
//! An n-vector is the unit normal to the reference ellipsoid at a position. Unlike latitude and
//! longitude, it has no singularities at the poles and no discontinuity at ±180°, and the
//! conversions to and from everything else are closed-form. The library provides conversions
//! between four representations of a position:
//!
//! - geodetic latitude and longitude ([`GeodeticCoordinates`]);
//! - the n-vector itself (a unit [`Vector3`]), combined with a depth below the ellipsoid surface
//!   into a [`Position`];
//! - Earth-Centred-Earth-Fixed Cartesian vectors (a [`Vector3`] in meters); and
//! - the orientation of the local North-East-Down frame (a [`Matrix3`]), along with the
//!   wander-azimuth variant of it.
//!
//! It also converts between rotation matrices and Euler angles ([`EulerXYZ`] and [`EulerZYX`]),
//! and computes the delta between two positions or the position reached by applying a delta.
//!
//! Every conversion that depends on the axis convention of the ECEF frame (see [`frame`]) or on
//! the reference [`Ellipsoid`] takes them as explicit arguments. If you always use the same pair,
//! [`Config`] carries them for you.
//!
//! All conversions are pure functions on `Copy` values. They perform no input validation: inputs
//! are assumed to be physically meaningful (unit n-vectors, orthonormal frames), and degenerate
//! inputs produce `NaN`s rather than errors.
//!
//! # Examples
//!
//! Given two positions A and B, find the delta from A to B in the North-East-Down frame at A:
//!
//! ```
//! use nvector::{Config, GeodeticCoordinates, Position};
//! use uom::si::f64::Length;
//! use uom::si::length::meter;
//!
//! // z-axis-north on WGS84
//! let config = Config::default();
//!
//! // 3m and 6m below the ellipsoid surface respectively
//! let a = Position::new(
//!     config.n_vector_from_geodetic(&GeodeticCoordinates::from_degrees(1., 2.)),
//!     Length::new::<meter>(3.),
//! );
//! let b = Position::new(
//!     config.n_vector_from_geodetic(&GeodeticCoordinates::from_degrees(4., 5.)),
//!     Length::new::<meter>(6.),
//! );
//!
//! // the delta decomposed in the ECEF frame
//! let delta_e = config.delta(&a, &b);
//!
//! // and decomposed in the North-East-Down frame at A
//! let r_en = config.rotation_matrix_from_n_vector(a.n_vector);
//! let delta_n = r_en.transpose() * delta_e;
//!
//! assert!((delta_n.x() - 331_730.234_780_89).abs() < 1e-6);
//! assert!((delta_n.y() - 332_997.874_989_27).abs() < 1e-6);
//! assert!((delta_n.z() - 17_404.271_361_94).abs() < 1e-6);
//! ```
//!
//! And the other way around, from an ECEF vector to latitude, longitude, and height:
//!
//! ```
//! use nvector::{Config, Vector3};
//! use uom::si::angle::degree;
//! use uom::si::length::meter;
//!
//! let config = Config::default();
//! let b = config.from_ecef(Vector3::new(0.71, -0.72, 0.1) * 6_371_000.);
//! let coordinates = config.geodetic_from_n_vector(b.n_vector);
//!
//! assert!((coordinates.latitude.get::<degree>() - 5.685_075_73).abs() < 1e-8);
//! assert!((coordinates.longitude.get::<degree>() + 45.400_663_26).abs() < 1e-8);
//! assert!((b.height().get::<meter>() - 95_772.107_618_22).abs() < 1e-6);
//! ```
//!
//! [n-vector]: https://www.ffi.no/en/research/n-vector

mod config;
mod delta;
mod ecef;
mod ellipsoid;
mod euler;
mod geodetic;
mod matrix;
mod rotation;
mod util;
mod vector;

pub mod frame;

pub(crate) type InnerVector = nalgebra::Vector3<f64>;
pub(crate) type InnerMatrix = nalgebra::Matrix3<f64>;

pub use config::Config;
pub use ecef::Position;
pub use ellipsoid::Ellipsoid;
pub use euler::{EulerXYZ, EulerZYX};
pub use geodetic::GeodeticCoordinates;
pub use matrix::Matrix3;
pub use vector::Vector3;
