use std::io::Write as _;

use super::*;

#[test]
fn empty_json_is_the_default_config() {
    let cfg: ScanimateConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, ScanimateConfig::default());
}

#[test]
fn json_fields_map_onto_config() {
    let cfg: ScanimateConfig = serde_json::from_str(
        r#"{ "pattern": "vgrid", "stripe_width": 2, "downsample": 3, "fit": "pad", "parallel": true, "threads": 4 }"#,
    )
    .unwrap();
    assert_eq!(cfg.pattern, Orientation::Vertical);
    assert_eq!(cfg.stripe_width, 2);
    assert_eq!(cfg.downsample, 3);
    assert_eq!(cfg.fit, FitMode::Pad);
    assert_eq!(cfg.grid_config(5), GridConfig::new(2, 5, Orientation::Vertical));

    let composite = cfg.composite_config();
    assert!(composite.parallel);
    assert_eq!(composite.threads, Some(4));
    assert_eq!(composite.stripe_width, 2);
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(serde_json::from_str::<ScanimateConfig>(r#"{ "stripes": 2 }"#).is_err());
}

#[test]
fn validate_rejects_zero_sizes() {
    for cfg in [
        ScanimateConfig {
            stripe_width: 0,
            ..ScanimateConfig::default()
        },
        ScanimateConfig {
            downsample: 0,
            ..ScanimateConfig::default()
        },
        ScanimateConfig {
            threads: Some(0),
            ..ScanimateConfig::default()
        },
    ] {
        assert!(matches!(
            cfg.validate(),
            Err(ScanimateError::InvalidParameter(_))
        ));
    }
}

#[test]
fn from_path_reads_and_validates() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.json");
    std::fs::File::create(&good)
        .unwrap()
        .write_all(br#"{ "stripe_width": 4 }"#)
        .unwrap();
    assert_eq!(ScanimateConfig::from_path(&good).unwrap().stripe_width, 4);

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, r#"{ "stripe_width": 0 }"#).unwrap();
    assert!(ScanimateConfig::from_path(&bad).is_err());

    let err = ScanimateConfig::from_path(&dir.path().join("missing.json")).unwrap_err();
    assert!(err.to_string().contains("open config"));
}
