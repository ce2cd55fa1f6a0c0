//! Ready-made body sets in SI units: the Jovian moon system and simple
//! disc galaxies around a central black hole.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::params::G_SI;
use super::states::{Body, NVec2};

pub const SOLAR_MASS: f64 = 1.989e30;
pub const BLACK_HOLE_MASS: f64 = 4.3e6 * SOLAR_MASS;

/// Width of the square the Jupiter system is laid out in
pub const JUPITER_WIDTH: f64 = 4.0e9;

/// Width used by the galaxy and collision scenarios
pub const GALAXY_WIDTH: f64 = 1.0e23;

/// A group of bodies that is built and pushed together
pub type Galaxy = Vec<Body>;

/// Jupiter at the centre of its square with the four Galilean moons
pub fn jupiter_system() -> Vec<Body> {
    let c = 0.5 * JUPITER_WIDTH;
    vec![
        // jupiter
        Body::new(NVec2::new(c, c), NVec2::zeros(), 1.898e27),
        // io
        Body::new(NVec2::new(c - 421_600_000.0, c), NVec2::new(0.0, -17_320.0), 8.9319e22),
        // europa
        Body::new(NVec2::new(c, c + 670_900_000.0), NVec2::new(-13_740.0, 0.0), 4.7998e22),
        // ganymede
        Body::new(NVec2::new(c + 1_070_400_000.0, c), NVec2::new(0.0, 10_870.0), 1.4819e23),
        // callisto
        Body::new(NVec2::new(c, c - 1_882_700_000.0), NVec2::new(8_200.0, 0.0), 1.0759e23),
    ]
}

/// A black hole at `center` with `n` solar-mass stars scattered uniformly
/// over a disc of the given `radius`.
///
/// Each star starts on a counter-clockwise circular orbit around the hole.
/// Stars closer than 5% of the radius are pushed out to that distance so no
/// star starts on top of the hole.
pub fn galaxy(n: usize, radius: f64, center: NVec2, seed: u64) -> Galaxy {
    let mut rng = StdRng::seed_from_u64(seed);
    let inner = 0.05 * radius;

    let mut bodies = Vec::with_capacity(n + 1);
    bodies.push(Body::new(center, NVec2::zeros(), BLACK_HOLE_MASS));

    for _ in 0..n {
        let u: f64 = rng.gen_range(0.0..1.0);
        let dist = (radius * u.sqrt()).max(inner);
        let angle = rng.gen_range(0.0..TAU);
        let (sin, cos) = angle.sin_cos();

        let x = center + NVec2::new(cos, sin) * dist;
        let speed = (G_SI * BLACK_HOLE_MASS / dist).sqrt();
        let v = NVec2::new(-sin, cos) * speed;

        bodies.push(Body::new(x, v, SOLAR_MASS));
    }
    bodies
}

/// Give every body of `galaxy` an extra velocity `dv`
pub fn push(galaxy: &mut Galaxy, dv: NVec2) {
    for b in galaxy.iter_mut() {
        b.v += dv;
    }
}
