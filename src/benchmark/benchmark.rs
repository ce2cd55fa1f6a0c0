use std::time::Instant;

use crate::error::Result;
use crate::simulation::barnes_hut::{QuadTree, TreeConfig};
use crate::simulation::engine::Engine;
use crate::simulation::forces::{BarnesHutGravity, DirectGravity, ForceModel};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2, Universe};

const WIDTH: f64 = 10.0;

/// Helper to build a manual Universe of size `n`
fn make_universe(n: usize) -> Result<Universe> {
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions inside [0, WIDTH]^2, no rand needed
        let x = NVec2::new(
            (1.0 + (i_f * 0.37).sin()) * 0.5 * WIDTH,
            (1.0 + (i_f * 0.13).cos()) * 0.5 * WIDTH,
        );
        bodies.push(Body::new(x, NVec2::zeros(), 1.0));
    }

    Universe::new(bodies, WIDTH)
}

/// Helper for shared parameters
fn make_params() -> Parameters {
    Parameters {
        dt: 0.001,
        theta: 0.7,
        G: 0.1,
        eps2: 1e-4,
    }
}

/// Largest per-body difference `|a(i) - b(i)|` between two force models
pub fn max_force_error(a: &impl ForceModel, b: &impl ForceModel, sys: &Universe) -> f64 {
    (0..sys.len())
        .map(|i| (a.net_force(i, sys) - b.net_force(i, sys)).norm())
        .fold(0.0, f64::max)
}

/// Time one full force pass (every body) with direct and Barnes–Hut gravity
pub fn bench_gravity() -> Result<()> {
    // Different system sizes to test
    let ns = [200, 400, 800, 1600, 3200, 6400];
    let params = make_params();

    for n in ns {
        let sys = make_universe(n)?;
        let direct = DirectGravity::from_params(&params);

        let t0 = Instant::now();
        let direct_forces: Vec<NVec2> = (0..n).map(|i| direct.net_force(i, &sys)).collect();
        let dt_direct = t0.elapsed().as_secs_f64();

        // Barnes–Hut timing includes building the tree
        let t1 = Instant::now();
        let tree = QuadTree::build(&sys, &TreeConfig::default())?;
        let bh = BarnesHutGravity::new(&tree, &params);
        let bh_forces: Vec<NVec2> = (0..n).map(|i| bh.net_force(i, &sys)).collect();
        let dt_bh = t1.elapsed().as_secs_f64();

        let max_err = direct_forces
            .iter()
            .zip(&bh_forces)
            .map(|(d, b)| (d - b).norm())
            .fold(0.0, f64::max);

        println!("N = {n:5}, direct = {:8.6} s, BH = {:8.6} s, max |direct - BH| = {:.3e}", dt_direct, dt_bh, max_err);
    }
    Ok(())
}

/// Time whole engine generations, printed as CSV
/// Paste output directly into a spreadsheet to graph
pub fn bench_step() -> Result<()> {
    println!("N,direct_ms,bh_ms");

    let bh_engine = Engine::new(make_params(), TreeConfig::default())?;
    let direct_engine = bh_engine.direct();

    // Steps of 400 to give a smoother graph
    for n in (400..=6400).step_by(400) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 1600 { 3 } else { 1 };
        let sys = make_universe(n)?;

        let t0 = Instant::now();
        direct_engine.run(sys.clone(), steps)?;
        let ms_direct = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        let t1 = Instant::now();
        bh_engine.run(sys, steps)?;
        let ms_bh = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6},{:.6}", n, ms_direct, ms_bh);
    }
    Ok(())
}
