use nvector::{frame, Config, Ellipsoid, Position, Vector3};
use uom::si::angle::degree;
use uom::si::length::meter;

fn main() {
    // a point given in ECEF, with the z-axis of the E-frame pointing north
    let ecef = Vector3::new(0.71, -0.72, 0.1) * 6_371_000.;

    for (name, ellipsoid) in [
        ("WGS84", Ellipsoid::WGS84),
        ("GRS80", Ellipsoid::GRS80),
        ("WGS72", Ellipsoid::WGS72),
    ] {
        let config = Config::default().with_ellipsoid(ellipsoid);

        let Some(position) = config.checked_from_ecef(ecef) else {
            println!("{name}: {ecef} is too close to the centre of the Earth");
            continue;
        };
        let coordinates = config.geodetic_from_n_vector(position.n_vector);

        println!(
            "{name}: lat {:.8}°, lon {:.8}°, height {:.8}m",
            coordinates.latitude.get::<degree>(),
            coordinates.longitude.get::<degree>(),
            position.height().get::<meter>(),
        );
    }

    // the same point with the x-axis of the E-frame pointing north instead
    let config = Config::default().with_frame(frame::x_axis_north());
    let relabelled = frame::z_axis_north() * ecef;
    let position = config.from_ecef(relabelled);
    let coordinates = position.geodetic_coordinates(&config.frame);
    println!(
        "x-axis-north: {coordinates} at {:.8}m height",
        position.height().get::<meter>(),
    );

    // and back again
    let back = config.to_ecef(&Position::from_geodetic(
        &coordinates,
        position.height(),
        &config.frame,
    ));
    println!("ECEF: {back} (expected {relabelled})");
}
