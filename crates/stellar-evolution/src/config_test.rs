use crate::config::{ImfShape, LifetimeModelKind, MassTransfer, SnIaConfig, StellarEvolutionConfig};
use crate::element::Element;
use crate::error::EvolutionError;

#[test]
fn defaults_match_the_reference_model() {
    let config = StellarEvolutionConfig::default();

    assert_eq!(config.lifetime_model, LifetimeModelKind::Tabulated);
    assert_eq!(config.imf.shape, ImfShape::Chabrier);
    assert_eq!(config.imf.bins, 200);
    assert_eq!(
        config.snia,
        SnIaConfig {
            efficiency: 2.0e-3,
            timescale_gyr: 2.0
        }
    );
    assert_eq!(
        config.mass_transfer,
        MassTransfer {
            snia: true,
            snii: true,
            agb: true
        }
    );
    assert_eq!(config.snii_yield_factors[Element::Iron], 1.0);
    assert!(config.validate().is_ok());
}

#[test]
fn lifetime_model_from_legacy_flag() {
    assert_eq!(LifetimeModelKind::try_from(0u8), Ok(LifetimeModelKind::PadovaniMatteucci));
    assert_eq!(LifetimeModelKind::try_from(1u8), Ok(LifetimeModelKind::MaederMeynet));
    assert_eq!(LifetimeModelKind::try_from(2u8), Ok(LifetimeModelKind::Tabulated));
    assert_eq!(LifetimeModelKind::try_from(3u8), Err(EvolutionError::UnknownLifetimeModel(3)));
}

#[test]
fn partial_parameters_fill_in_defaults() {
    let json = r#"{
        "lifetime_model": "MaederMeynet",
        "imf": { "shape": { "Salpeter": { "exponent": 2.35 } } },
        "snia": { "timescale_gyr": 3.0 },
        "mass_transfer": { "agb": false }
    }"#;
    let config: StellarEvolutionConfig = serde_json::from_str(json).expect("valid parameters");

    assert_eq!(config.lifetime_model, LifetimeModelKind::MaederMeynet);
    assert_eq!(config.imf.shape, ImfShape::Salpeter { exponent: 2.35 });
    assert_eq!(config.imf.max_mass, 100.0);
    assert_eq!(config.snia.timescale_gyr, 3.0);
    assert_eq!(config.snia.efficiency, 2.0e-3);
    assert!(!config.mass_transfer.agb);
    assert!(config.mass_transfer.snii);
    assert_eq!(config.yield_table_path, None);
}

#[test]
fn empty_parameters_are_the_defaults() {
    let config: StellarEvolutionConfig = serde_json::from_str("{}").expect("valid parameters");
    assert_eq!(config, StellarEvolutionConfig::default());
}

#[test]
fn validate_rejects_unusable_values() {
    let mut config = StellarEvolutionConfig::default();
    config.snia.timescale_gyr = 0.0;
    assert_eq!(
        config.validate(),
        Err(EvolutionError::InvalidParameter {
            name: "snia.timescale_gyr",
            value: 0.0
        })
    );

    let mut config = StellarEvolutionConfig::default();
    config.imf.max_mass = 0.05;
    assert!(matches!(
        config.validate(),
        Err(EvolutionError::InvalidParameter { name: "imf.max_mass", .. })
    ));

    let mut config = StellarEvolutionConfig::default();
    config.imf.bins = 1;
    assert!(config.validate().is_err());

    let mut config = StellarEvolutionConfig::default();
    config.snii_yield_factors[Element::Oxygen] = -1.0;
    assert!(matches!(
        config.validate(),
        Err(EvolutionError::InvalidParameter { name: "snii_yield_factors", .. })
    ));

    let mut config = StellarEvolutionConfig::default();
    config.snia.efficiency = f64::NAN;
    assert!(config.validate().is_err());
}
