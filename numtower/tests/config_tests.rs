//! Configuration flowing into arithmetic.

mod common;

use common::{bf, lit, precision};
use numtower::arith::{add, shl};
use numtower::config::TowerConfig;
use numtower::context::NumericContext;
use numtower::error::ErrorKind;
use numtower::types::{TypeRegistry, ValueKind};
use numtower::value::Value;
use pretty_assertions::assert_eq;

#[test]
fn test_custom_type_names_in_errors() {
    let config = TowerConfig::from_toml_str(
        r#"
        [type_names]
        small_int = "Core::Integer"
        nil = "Core::Nothing"
        "#,
    )
    .unwrap();
    let ctx = NumericContext::from_config(&config);
    let err = add(&ctx, &lit("1"), &Value::Nil).unwrap_err();
    assert_eq!(
        err.to_string(),
        "`Core::Nothing` can't be coerced into `Core::Integer`"
    );
}

#[test]
fn test_explicit_type_names_capability() {
    let config = TowerConfig::default();
    let names = TypeRegistry::new().with_name(ValueKind::Int8, "I8");
    let ctx = NumericContext::new(&names, &config);
    let err = add(&ctx, &Value::Int8(1), &Value::Int16(1)).unwrap_err();
    assert_eq!(err.to_string(), "`Std::Int16` can't be coerced into `I8`");
}

#[test]
fn test_min_precision_is_configurable() {
    let config = TowerConfig::from_toml_str("min_bigfloat_precision = 128").unwrap();
    let ctx = NumericContext::from_config(&config);
    let r = add(&ctx, &lit("1"), &bf(0.5, 64)).unwrap();
    assert_eq!(precision(&r), 128);
}

#[test]
fn test_max_shift_bits_is_configurable() {
    let config = TowerConfig::from_toml_str("max_shift_bits = 100").unwrap();
    let ctx = NumericContext::from_config(&config);
    assert!(shl(&ctx, &lit("1"), &lit("100")).is_ok());
    let err = shl(&ctx, &lit("1"), &lit("101")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
}

#[test]
fn test_config_file_round_trip() {
    let dir = std::env::temp_dir().join(format!("numtower-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("tower.toml");
    std::fs::write(&path, "float_precision = 60\n").unwrap();
    let config = TowerConfig::from_file(&path).unwrap();
    assert_eq!(config.float_precision, 60);
    std::fs::remove_dir_all(&dir).unwrap();

    assert!(TowerConfig::from_file(&dir.join("missing.toml")).is_err());
}
