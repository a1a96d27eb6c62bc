use approx::assert_relative_eq;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use units::Time;

use crate::error::EvolutionError;
use crate::lifetime::{LifetimeModel, LifetimeTable, MAX_PROGENITOR_MASS_MSUN};

const TABLE_MASSES: [f64; 13] = [
    0.6, 0.8, 1.0, 1.5, 2.0, 3.0, 5.0, 8.0, 12.0, 20.0, 40.0, 70.0, 120.0,
];
const TABLE_METALLICITIES: [f64; 5] = [0.0004, 0.004, 0.008, 0.02, 0.05];

/// Smooth lifetimes, log10 t[yr] = 10 - 2.8 x + 0.55 x² + 2 Z with x = log10 m.
fn table() -> LifetimeTable {
    let log_dying_time = TABLE_METALLICITIES
        .iter()
        .map(|&z| {
            TABLE_MASSES
                .iter()
                .map(|&m| {
                    let x = m.log10();
                    10.0 - 2.8 * x + 0.55 * x * x + 2.0 * z
                })
                .collect()
        })
        .collect();
    LifetimeTable::new(TABLE_MASSES.to_vec(), TABLE_METALLICITIES.to_vec(), log_dying_time)
        .expect("valid lifetime table")
}

fn all_models() -> [LifetimeModel; 3] {
    [
        LifetimeModel::PadovaniMatteucci,
        LifetimeModel::MaederMeynet,
        LifetimeModel::Tabulated(table()),
    ]
}

#[test]
fn padovani_matteucci_inverts_its_lifetime() {
    let model = LifetimeModel::PadovaniMatteucci;
    let masses = [
        0.7, 1.0, 1.2, 2.0, 2.9, 3.5, 5.0, 6.0, 6.5, 8.0, 10.0, 12.0, 14.0, 20.0, 30.0, 50.0, 70.0,
        90.0, 99.0,
    ];

    for mass in masses {
        let age = model.lifetime(mass, 0.02);
        let recovered = model.dying_mass(age, 0.02);
        assert_relative_eq!(recovered, mass, max_relative = 0.01);
    }
}

#[test]
fn maeder_meynet_inverts_its_lifetime() {
    let model = LifetimeModel::MaederMeynet;
    let masses = [
        0.7, 1.0, 1.2, 2.0, 2.9, 3.5, 5.0, 6.0, 8.0, 10.0, 12.0, 14.0, 20.0, 30.0, 50.0, 70.0,
        90.0, 99.0,
    ];

    for mass in masses {
        let age = model.lifetime(mass, 0.02);
        let recovered = model.dying_mass(age, 0.02);
        assert_relative_eq!(recovered, mass, max_relative = 0.01);
    }
}

#[test]
fn tabulated_inverts_its_lifetime() {
    let model = LifetimeModel::Tabulated(table());
    let masses = [0.7, 1.0, 2.0, 4.0, 6.0, 9.0, 15.0, 30.0, 60.0, 90.0];

    // Exact along a tabulated metallicity row
    for z in [0.0004, 0.004, 0.02] {
        for mass in masses {
            let age = model.lifetime(mass, z);
            assert_relative_eq!(model.dying_mass(age, z), mass, max_relative = 1e-9);
        }
    }

    // Close between rows
    for z in [0.001, 0.01] {
        for mass in masses {
            let age = model.lifetime(mass, z);
            assert_relative_eq!(model.dying_mass(age, z), mass, max_relative = 0.01);
        }
    }
}

#[test]
fn dying_mass_never_increases_with_age() {
    let mut rng = ChaChaRng::seed_from_u64(42);

    for model in all_models() {
        for _ in 0..20 {
            let z = rng.random_range(0.0..0.05);
            let mut ages: Vec<f64> = (0..200).map(|_| rng.random_range(-3.0..1.2)).collect();
            ages.sort_by(|a, b| a.total_cmp(b));

            let masses: Vec<f64> = ages
                .iter()
                .map(|&log_age| model.dying_mass(Time::from_gyr(10f64.powf(log_age)), z))
                .collect();
            for pair in masses.windows(2) {
                // The closed-form PM93 branches meet with a small seam near 40 Myr
                assert!(
                    pair[1] <= pair[0] * (1.0 + 5e-3),
                    "{}: dying mass rose from {} to {}",
                    model.name(),
                    pair[0],
                    pair[1]
                );
            }
        }
    }
}

#[test]
fn dying_mass_is_capped_at_the_imf_maximum() {
    for model in all_models() {
        assert_eq!(model.dying_mass(Time::zero(), 0.02), MAX_PROGENITOR_MASS_MSUN);
        assert_eq!(model.dying_mass(Time::from_myr(1.0), 0.02), MAX_PROGENITOR_MASS_MSUN);
        assert!(model.dying_mass(Time::from_myr(5.0), 0.02) <= MAX_PROGENITOR_MASS_MSUN);
    }
}

#[test]
fn closed_forms_ignore_metallicity() {
    for model in [LifetimeModel::PadovaniMatteucci, LifetimeModel::MaederMeynet] {
        let age = Time::from_gyr(1.0);
        assert_eq!(model.dying_mass(age, 0.0001), model.dying_mass(age, 0.03));
        assert_eq!(model.lifetime(3.0, 0.0001), model.lifetime(3.0, 0.03));
    }
}

#[test]
fn tabulated_lifetimes_grow_with_metallicity() {
    let model = LifetimeModel::Tabulated(table());

    let poor = model.lifetime(2.0, 0.004);
    let rich = model.lifetime(2.0, 0.02);
    assert!(rich > poor);
    // Heavier stars die first at fixed age in metal-rich populations
    let age = Time::from_gyr(1.0);
    assert!(model.dying_mass(age, 0.02) > model.dying_mass(age, 0.004));
}

#[test]
fn tabulated_clamps_outside_the_table() {
    let model = LifetimeModel::Tabulated(table());

    // Older than the lightest tabulated star's lifetime
    assert_relative_eq!(model.dying_mass(Time::from_gyr(100.0), 0.02), 0.6);
    // Metallicity beyond either end uses the edge row
    let age = Time::from_gyr(1.0);
    assert_relative_eq!(model.dying_mass(age, 0.1), model.dying_mass(age, 0.05));
    assert_relative_eq!(model.dying_mass(age, 0.0), model.dying_mass(age, 0.0004));
    // Masses beyond the grid hold the edge lifetime
    assert_relative_eq!(
        model.lifetime(0.1, 0.02).to_gyr(),
        model.lifetime(0.6, 0.02).to_gyr()
    );
}

#[test]
fn padovani_matteucci_reference_points() {
    let model = LifetimeModel::PadovaniMatteucci;

    // Dying mass at 50 Myr
    assert_relative_eq!(
        model.dying_mass(Time::from_gyr(0.05), 0.02),
        5.907_017_907_979_166,
        max_relative = 1e-9
    );
    // Lifetime of the heaviest SNIa progenitor
    assert_relative_eq!(
        model.lifetime(8.0, 0.02).to_gyr(),
        0.028_613_254_814_144_91,
        max_relative = 1e-9
    );
    // Low-mass stars outlive the universe
    assert_relative_eq!(model.lifetime(0.5, 0.02).to_gyr(), 160.0);
}

#[test]
fn table_rejects_bad_shapes() {
    let ragged = LifetimeTable::new(
        vec![1.0, 2.0],
        vec![0.01, 0.02],
        vec![vec![10.0, 9.0], vec![10.0]],
    );
    assert!(matches!(ragged, Err(EvolutionError::InvalidTable { table: "lifetime", .. })));

    let unsorted = LifetimeTable::new(vec![2.0, 1.0], vec![0.01, 0.02], vec![vec![9.0, 10.0]; 2]);
    assert!(matches!(unsorted, Err(EvolutionError::InvalidTable { .. })));

    let short = LifetimeTable::new(vec![1.0], vec![0.01, 0.02], vec![vec![10.0]; 2]);
    assert!(matches!(short, Err(EvolutionError::InvalidTable { .. })));

    let missing_row = LifetimeTable::new(vec![1.0, 2.0], vec![0.01, 0.02], vec![vec![10.0, 9.0]]);
    assert!(matches!(missing_row, Err(EvolutionError::InvalidTable { .. })));
}
