//! Erosion regression test
//!
//! Run with:
//! ```
//! cargo test -p regionkit-morph --test erosion_reg
//! ```

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use regionkit_core::{ConnectivityType, IntervalDomain};
use regionkit_morph::{dilate_domain, erode_domain};
use regionkit_test::{RegParams, load_test_domain, pixel_set, random_domain};

fn brute_erode(
    pixels: &BTreeSet<(i32, i32)>,
    connectivity: ConnectivityType,
) -> BTreeSet<(i32, i32)> {
    pixels
        .iter()
        .copied()
        .filter(|&(line, col)| {
            (-1..=1).all(|dl| {
                (-1..=1).all(|dc| {
                    !connectivity.is_neighbor_offset(dl, dc)
                        || pixels.contains(&(line + dl, col + dc))
                })
            })
        })
        .collect()
}

#[test]
fn erosion_reg() {
    let mut rp = RegParams::new("erosion");

    // Plus sign: only the center keeps all four neighbors
    let cross = load_test_domain("cross.txt").expect("load cross.txt");
    let e4 = erode_domain(&cross, ConnectivityType::FourWay).expect("erode 4");
    let e8 = erode_domain(&cross, ConnectivityType::EightWay).expect("erode 8");
    rp.compare_values(1.0, e4.area() as f64, 0.0);
    rp.check(e4.contains(2, 2), "center survives");
    rp.check(e8 == IntervalDomain::Empty, "square erodes the plus away");

    // Filled ring erodes back to the 5x5 block
    let ring = load_test_domain("ring.txt").expect("load ring.txt");
    let filled = dilate_domain(&ring, ConnectivityType::EightWay).expect("dilate");
    let closed = erode_domain(&filled, ConnectivityType::EightWay).expect("erode");
    rp.compare_domains(&IntervalDomain::rect(11, 15, 21, 25).expect("rect"), &closed);

    // Eroding the ring itself leaves nothing
    let out = erode_domain(&ring, ConnectivityType::FourWay).expect("erode");
    rp.check(out == IntervalDomain::Empty, "ring erodes away");

    assert!(rp.cleanup(), "erosion regression test failed");
}

#[test]
fn erosion_random_reg() {
    let mut rp = RegParams::new("erosion_random");

    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(2000 + seed);
        let lines = rng.random_range(1..30);
        let cols = rng.random_range(1..30);
        let density = rng.random_range(0.5..0.95);
        let domain = random_domain(&mut rng, lines, cols, density).expect("random domain");
        let pixels = pixel_set(&domain);

        for connectivity in [ConnectivityType::FourWay, ConnectivityType::EightWay] {
            let out = erode_domain(&domain, connectivity).expect("erode");
            let got = pixel_set(&out);
            rp.check(
                got.is_subset(&pixels),
                &format!("anti-extensive, seed {} conn {}", seed, connectivity.value()),
            );
            rp.check(
                got == brute_erode(&pixels, connectivity),
                &format!("erosion law, seed {} conn {}", seed, connectivity.value()),
            );
            rp.check(
                out.clone().standardized() == out,
                "eroded domain is standard",
            );
        }

        // Closing by the square contains the input
        let grown = dilate_domain(&domain, ConnectivityType::EightWay).expect("dilate");
        let closed = erode_domain(&grown, ConnectivityType::EightWay).expect("erode");
        rp.check(
            pixels.is_subset(&pixel_set(&closed)),
            &format!("closing is extensive, seed {}", seed),
        );
    }

    assert!(rp.cleanup(), "erosion random regression test failed");
}
