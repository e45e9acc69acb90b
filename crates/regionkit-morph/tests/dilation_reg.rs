//! Dilation regression test
//!
//! Checks cross and square dilation against the brute-force neighbor law
//! on fixtures and seeded random domains, in 2D and across planes.
//!
//! Run with:
//! ```
//! cargo test -p regionkit-morph --test dilation_reg
//! ```

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use regionkit_core::{ConnectivityType, IntervalDomain, PlaneDomain};
use regionkit_morph::{dilate_domain, dilate_planes};
use regionkit_test::{
    RegParams, domain_from_ascii, domain_from_pixels, load_test_domain, pixel_set, random_domain,
    random_planes, voxel_set,
};

/// Every pixel within one neighbor step of the input
fn brute_dilate(
    pixels: &BTreeSet<(i32, i32)>,
    connectivity: ConnectivityType,
) -> BTreeSet<(i32, i32)> {
    let mut out = BTreeSet::new();
    for &(line, col) in pixels {
        for dl in -1..=1 {
            for dc in -1..=1 {
                if connectivity.is_neighbor_offset(dl, dc) {
                    out.insert((line + dl, col + dc));
                }
            }
        }
    }
    out
}

/// Every voxel within one 6-, 18- or 26-neighbor step of the input
fn brute_dilate_3d(
    voxels: &BTreeSet<(i32, i32, i32)>,
    connectivity: ConnectivityType,
) -> BTreeSet<(i32, i32, i32)> {
    let max_steps = match connectivity {
        ConnectivityType::SixWay => 1,
        ConnectivityType::EighteenWay => 2,
        _ => 3,
    };
    let mut out = BTreeSet::new();
    for &(plane, line, col) in voxels {
        for dp in -1..=1 {
            for dl in -1..=1 {
                for dc in -1..=1 {
                    let steps = [dp, dl, dc].iter().filter(|&&d| d != 0).count();
                    if steps <= max_steps {
                        out.insert((plane + dp, line + dl, col + dc));
                    }
                }
            }
        }
    }
    out
}

#[test]
fn dilation_reg() {
    let mut rp = RegParams::new("dilation");

    // -----------------------------------------------------------
    // Two isolated pixels grow into two 3x3 blocks
    // -----------------------------------------------------------
    let two = domain_from_pixels([(2, 2), (7, 7)]).expect("build");
    let square = dilate_domain(&two, ConnectivityType::EightWay).expect("dilate");
    let expected = domain_from_ascii(
        "@ 1 1\n\
         ###.....\n\
         ###.....\n\
         ###.....\n\
         ........\n\
         ........\n\
         .....###\n\
         .....###\n\
         .....###\n",
    )
    .expect("parse");
    rp.compare_domains(&expected, &square);
    rp.compare_values(18.0, square.area() as f64, 0.0);

    // -----------------------------------------------------------
    // Plus sign fixture
    // -----------------------------------------------------------
    let cross = load_test_domain("cross.txt").expect("load cross.txt");
    let c4 = dilate_domain(&cross, ConnectivityType::FourWay).expect("dilate 4");
    let c8 = dilate_domain(&cross, ConnectivityType::EightWay).expect("dilate 8");
    eprintln!("cross: area {} -> {} (4), {} (8)", cross.area(), c4.area(), c8.area());
    rp.compare_values(25.0, c4.area() as f64, 0.0);
    rp.compare_values(33.0, c8.area() as f64, 0.0);
    rp.check(
        c4.bounds() == cross.bounds().map(|b| b.expand(1)),
        "output bounds grow by one",
    );

    // -----------------------------------------------------------
    // Ring: the square fills the hole
    // -----------------------------------------------------------
    let ring = load_test_domain("ring.txt").expect("load ring.txt");
    let filled = dilate_domain(&ring, ConnectivityType::EightWay).expect("dilate");
    rp.compare_values(49.0, filled.area() as f64, 0.0);
    rp.compare_domains(&IntervalDomain::rect(10, 16, 20, 26).expect("rect"), &filled);
    let r4 = dilate_domain(&ring, ConnectivityType::FourWay).expect("dilate");
    rp.compare_values(45.0, r4.area() as f64, 0.0);

    // -----------------------------------------------------------
    // Empty stays empty
    // -----------------------------------------------------------
    for conn in [ConnectivityType::FourWay, ConnectivityType::EightWay] {
        let out = dilate_domain(&IntervalDomain::Empty, conn).expect("dilate");
        rp.check(out == IntervalDomain::Empty, "empty dilates to empty");
    }

    assert!(rp.cleanup(), "dilation regression test failed");
}

#[test]
fn dilation_random_reg() {
    let mut rp = RegParams::new("dilation_random");

    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let lines = rng.random_range(1..30);
        let cols = rng.random_range(1..30);
        let density = rng.random_range(0.05..0.6);
        let domain = random_domain(&mut rng, lines, cols, density).expect("random domain");
        let pixels = pixel_set(&domain);

        for connectivity in [ConnectivityType::FourWay, ConnectivityType::EightWay] {
            let out = dilate_domain(&domain, connectivity).expect("dilate");
            let got = pixel_set(&out);
            rp.check(
                pixels.is_subset(&got),
                &format!("extensive, seed {} conn {}", seed, connectivity.value()),
            );
            rp.check(
                got == brute_dilate(&pixels, connectivity),
                &format!("neighbor law, seed {} conn {}", seed, connectivity.value()),
            );
            rp.check(out.validate().is_ok(), "dilated domain is well formed");
        }
    }

    assert!(rp.cleanup(), "dilation random regression test failed");
}

#[test]
fn dilation_planes_reg() {
    let mut rp = RegParams::new("dilation_planes");

    for seed in 0..12u64 {
        let mut rng = StdRng::seed_from_u64(500 + seed);
        let depth = rng.random_range(1..6);
        let planes = random_planes(&mut rng, depth, 12, 12, 0.15).expect("random planes");
        let voxels = voxel_set(&planes);

        for connectivity in [
            ConnectivityType::SixWay,
            ConnectivityType::EighteenWay,
            ConnectivityType::TwentySixWay,
        ] {
            let out = dilate_planes(&planes, connectivity).expect("dilate");
            rp.check(
                voxel_set(&out) == brute_dilate_3d(&voxels, connectivity),
                &format!("3D neighbor law, seed {} conn {}", seed, connectivity.value()),
            );
            rp.check(out.validate().is_ok(), "dilated planes are well formed");
        }
    }

    // A single voxel with empty planes around it
    let lone = PlaneDomain::new(
        -1,
        vec![
            IntervalDomain::Empty,
            IntervalDomain::rect(4, 4, 4, 4).expect("rect"),
            IntervalDomain::Empty,
        ],
    )
    .expect("planes");
    let out = dilate_planes(&lone, ConnectivityType::SixWay).expect("dilate");
    rp.compare_values(7.0, out.volume() as f64, 0.0);
    rp.compare_values(-1.0, out.plane1() as f64, 0.0);
    rp.compare_values(3.0, out.depth() as f64, 0.0);

    assert!(rp.cleanup(), "dilation planes regression test failed");
}
