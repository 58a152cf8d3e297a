use anyhow::Result;
use ensemble::BoxPolicy;
use ensemble_tool::config::{Config, RepsConfig};
use std::path::Path;

#[test]
fn bundled_config_loads() -> Result<()> {
    let config = Config::open(Path::new(env!("CARGO_MANIFEST_DIR")).join("ensemble.json5"))?;

    assert_eq!(config.ensemble.iou_threshold, 0.5);
    assert_eq!(config.ensemble.box_policy, BoxPolicy::Anchor);
    assert_eq!(config.ensemble.weights.get("best"), 1.2);
    assert_eq!(config.reps, RepsConfig::default());
    config.ensemble.build()?;
    Ok(())
}

#[test]
fn omitted_sections_take_defaults() -> Result<()> {
    let config = Config::from_json5(r#"{ version: "0.1.0" }"#)?;
    assert_eq!(config.ensemble.iou_threshold, 0.5);
    assert_eq!(config.ensemble.min_confidence, 0.0);
    assert!(config.ensemble.weights.is_empty());
    assert_eq!(config.reps.smoothing_alpha, 0.7);
    Ok(())
}

#[test]
fn incompatible_version_is_rejected() {
    assert!(Config::from_json5(r#"{ version: "0.2.0" }"#).is_err());
    assert!(Config::from_json5(r#"{ version: "latest" }"#).is_err());
}

#[test]
fn invalid_weight_is_rejected() {
    let text = r#"{ version: "0.1.0", ensemble: { weights: { best: -1.0 } } }"#;
    assert!(Config::from_json5(text).is_err());
}

#[test]
fn weighted_average_policy_is_parsed() -> Result<()> {
    let text = r#"{ version: "0.1.0", ensemble: { box_policy: "weighted_average" } }"#;
    let config = Config::from_json5(text)?;
    assert_eq!(config.ensemble.box_policy, BoxPolicy::WeightedAverage);
    Ok(())
}

#[test]
fn out_of_range_parameters_are_rejected_on_load() {
    let bad_iou = r#"{ version: "0.1.0", ensemble: { iou_threshold: 1.5 } }"#;
    assert!(Config::from_json5(bad_iou).is_err());

    let bad_min_confidence = r#"{ version: "0.1.0", ensemble: { min_confidence: -0.5 } }"#;
    assert!(Config::from_json5(bad_min_confidence).is_err());

    let bad_alpha = r#"{ version: "0.1.0", reps: { smoothing_alpha: 2.0 } }"#;
    assert!(Config::from_json5(bad_alpha).is_err());
}
