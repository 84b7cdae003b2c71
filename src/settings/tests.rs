//! Tests for settings registry

use super::definitions::{DEFAULT_ADDITION_CAPACITY, DEFAULT_TAB_WIDTH, MAX_ADDITION_CAPACITY};
use crate::table::PieceTable;
use super::*;

#[test]
fn test_defaults() {
    let options = TableOptions::default();
    assert!(options.coalesce);
    assert_eq!(options.addition_capacity, DEFAULT_ADDITION_CAPACITY);
    assert_eq!(options.tab_width, DEFAULT_TAB_WIDTH);
}

#[test]
fn test_registry_names() {
    let registry = create_table_settings_registry();
    let names: Vec<_> = registry.names().collect();
    assert_eq!(names, vec!["coalesce", "addition_capacity", "tab_width"]);
}

#[test]
fn test_resolve_exact_alias_and_prefix() {
    let registry = create_table_settings_registry();
    assert_eq!(registry.resolve("coalesce").unwrap().name, "coalesce");
    assert_eq!(registry.resolve("merge").unwrap().name, "coalesce");
    assert_eq!(registry.resolve("ts").unwrap().name, "tab_width");
    assert_eq!(registry.resolve("add").unwrap().name, "addition_capacity");
}

#[test]
fn test_resolve_unknown() {
    let registry = create_table_settings_registry();
    assert_eq!(
        registry.resolve("wrap").unwrap_err(),
        SettingError::UnknownOption("wrap".to_string())
    );
    assert!(matches!(
        registry.resolve(""),
        Err(SettingError::UnknownOption(_))
    ));
}

fn set_flag(_: &mut (), _: SettingValue) -> Result<(), SettingError> {
    Ok(())
}

const AMBIGUOUS: &[SettingDescriptor<()>] = &[
    SettingDescriptor {
        name: "wrap",
        aliases: &[],
        ty: SettingType::Boolean,
        set: set_flag,
    },
    SettingDescriptor {
        name: "wrapscan",
        aliases: &[],
        ty: SettingType::Boolean,
        set: set_flag,
    },
];

#[test]
fn test_resolve_ambiguous_prefix() {
    let registry = SettingsRegistry::new(AMBIGUOUS);
    // Exact name beats prefix
    assert_eq!(registry.resolve("wrap").unwrap().name, "wrap");

    let err = registry.resolve("wr").unwrap_err();
    assert_eq!(
        err,
        SettingError::Ambiguous {
            prefix: "wr".to_string(),
            matches: vec!["wrap", "wrapscan"],
        }
    );
    assert_eq!(
        err.to_string(),
        "ambiguous option 'wr': matches wrap, wrapscan"
    );
}

#[test]
fn test_parse_boolean_values() {
    let ty = SettingType::Boolean;
    for v in ["true", "1", "on", "YES"] {
        assert_eq!(
            SettingsRegistry::<TableOptions>::parse_value(&ty, v),
            Ok(SettingValue::Bool(true))
        );
    }
    for v in ["false", "0", "Off", "no"] {
        assert_eq!(
            SettingsRegistry::<TableOptions>::parse_value(&ty, v),
            Ok(SettingValue::Bool(false))
        );
    }
    assert!(matches!(
        SettingsRegistry::<TableOptions>::parse_value(&ty, "maybe"),
        Err(SettingError::Parse(_))
    ));
}

#[test]
fn test_parse_integer_bounds() {
    let ty = SettingType::Integer {
        min: Some(1),
        max: Some(16),
    };
    assert_eq!(
        SettingsRegistry::<TableOptions>::parse_value(&ty, "8"),
        Ok(SettingValue::Integer(8))
    );
    assert!(matches!(
        SettingsRegistry::<TableOptions>::parse_value(&ty, "0"),
        Err(SettingError::Validation(_))
    ));
    assert!(matches!(
        SettingsRegistry::<TableOptions>::parse_value(&ty, "17"),
        Err(SettingError::Validation(_))
    ));
    assert!(matches!(
        SettingsRegistry::<TableOptions>::parse_value(&ty, "-1"),
        Err(SettingError::Parse(_))
    ));
}

#[test]
fn test_apply_assignments() {
    let options = TableOptions::default()
        .with_assignments(["coalesce=off", "ts=8", "cap=64"])
        .unwrap();
    assert!(!options.coalesce);
    assert_eq!(options.tab_width, 8);
    assert_eq!(options.addition_capacity, 64);
}

#[test]
fn test_addition_capacity_upper_bound() {
    let at_max = format!("cap={}", MAX_ADDITION_CAPACITY);
    let options = TableOptions::default()
        .with_assignments([at_max.as_str()])
        .unwrap();
    assert_eq!(options.addition_capacity, MAX_ADDITION_CAPACITY);

    let mut pt = PieceTable::with_options("abc", options);
    pt.insert(3, "d").unwrap();
    assert_eq!(pt.materialize(), "abcd");

    let past_max = format!("cap={}", MAX_ADDITION_CAPACITY + 1);
    let err = TableOptions::default()
        .with_assignments([past_max.as_str()])
        .unwrap_err();
    assert!(matches!(err, SettingError::Validation(_)));
}

#[test]
fn test_unreservable_capacity_does_not_abort() {
    // Bypasses the registry bound; construction still succeeds
    let options = TableOptions {
        addition_capacity: usize::MAX,
        ..TableOptions::default()
    };
    let mut pt = PieceTable::with_options("abc", options);
    pt.insert(0, "x").unwrap();
    assert_eq!(pt.materialize(), "xabc");
}

#[test]
fn test_bare_and_negated_booleans() {
    let options = TableOptions::default()
        .with_assignments(["nocoalesce"])
        .unwrap();
    assert!(!options.coalesce);

    let options = options.with_assignments(["merge"]).unwrap();
    assert!(options.coalesce);
}

#[test]
fn test_bare_integer_needs_value() {
    let err = TableOptions::default()
        .with_assignments(["tab_width"])
        .unwrap_err();
    assert!(matches!(err, SettingError::Parse(_)));

    let err = TableOptions::default()
        .with_assignments(["nots"])
        .unwrap_err();
    assert!(matches!(err, SettingError::Parse(_)));
}

#[test]
fn test_failed_assignment_reports_first_error() {
    let err = TableOptions::default()
        .with_assignments(["ts=4", "bogus=1", "ts=0"])
        .unwrap_err();
    assert_eq!(err, SettingError::UnknownOption("bogus".to_string()));
}
