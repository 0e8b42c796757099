use nvector::{Config, GeodeticCoordinates, Position};
use uom::si::f64::Length;
use uom::si::length::meter;

fn main() {
    // everything below is on WGS84, with the z-axis of the E-frame pointing north
    let config = Config::default();

    // two positions, given as latitude/longitude and depth below the ellipsoid
    let a = Position::new(
        config.n_vector_from_geodetic(&GeodeticCoordinates::from_degrees(1., 2.)),
        Length::new::<meter>(3.),
    );
    let b = Position::new(
        config.n_vector_from_geodetic(&GeodeticCoordinates::from_degrees(4., 5.)),
        Length::new::<meter>(6.),
    );

    // the delta from A to B in the E-frame is just the difference of their ECEF vectors
    let delta_e = config.delta(&a, &b);

    // to see it the way an observer at A would, rotate it into North-East-Down at A
    let r_en = config.rotation_matrix_from_n_vector(a.n_vector);
    let delta_n = r_en.transpose() * delta_e;

    let azimuth = f64::atan2(delta_n.y(), delta_n.x()).to_degrees();
    let elevation = f64::atan2(-delta_n.z(), f64::hypot(delta_n.x(), delta_n.y())).to_degrees();

    println!("A: {} at {}m depth", a.geodetic_coordinates(&config.frame), a.depth.get::<meter>());
    println!("B: {} at {}m depth", b.geodetic_coordinates(&config.frame), b.depth.get::<meter>());
    println!("delta (NED at A): {delta_n}");
    println!("distance: {:.3}m", delta_n.norm());
    println!("azimuth: {azimuth:.8}°");
    println!("elevation: {elevation:.8}°");
}
