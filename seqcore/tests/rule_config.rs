use seqcore::magic::ENV_RULES_CONFIG_PATH;
use seqcore::prelude::*;

const MULTIPLICATIVE: &str = r#"
["~"]
ant = "mul"
con = "mul"

["&"]
ant = "mul"
con = "mul"

["v"]
ant = "mul"
con = "mul"

["->"]
ant = "mul"
con = "mul"
"#;

#[test]
fn uniform_matches_file() {
    let config = RuleConfig::from_toml_str(MULTIPLICATIVE, "<inline>").unwrap();
    assert_eq!(config, RuleConfig::uniform(Discipline::Multiplicative));
}

#[test]
fn save_then_load() {
    let dir = std::env::temp_dir().join(format!("seqcore-{}-rules", std::process::id()));
    let path = dir.join("nested").join("rules.toml");

    let config = RuleConfig::uniform(Discipline::Additive)
        .with(Connective::Conditional, Side::Consequent, Discipline::Multiplicative)
        .unwrap();
    config.save_to_toml(&path).unwrap();
    assert_eq!(RuleConfig::load_from_toml(&path).unwrap(), config);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn malformed_toml_names_the_file() {
    let err = RuleConfig::from_toml_str("[\"&\"\nant = ", "rules.toml").unwrap_err();
    assert!(matches!(err, SeqError::ConfigParseError { ref file, .. } if file == "rules.toml"));
    assert!(err.to_string().contains("rules.toml"));
}

#[test]
fn wrong_value_type_is_a_parse_error() {
    let text = MULTIPLICATIVE.replacen("\"mul\"", "3", 1);
    let err = RuleConfig::from_toml_str(&text, "<inline>").unwrap_err();
    assert!(matches!(err, SeqError::ConfigParseError { .. }));
}

#[test]
fn unknown_side_key_is_rejected() {
    let text = MULTIPLICATIVE.replacen("ant = \"mul\"", "left = \"mul\"", 1);
    let err = RuleConfig::from_toml_str(&text, "<inline>").unwrap_err();
    assert!(matches!(
        err,
        SeqError::UnknownConnective { ref connective, side: Some(ref side) }
            if connective == "~" && side == "left"
    ));
}

#[test]
fn missing_file_is_io_error() {
    let path = std::env::temp_dir().join("seqcore-definitely-absent").join("rules.toml");
    assert!(matches!(
        RuleConfig::load_from_toml(&path),
        Err(SeqError::IoError(_))
    ));
}

#[test]
fn default_path_ends_in_seqtree_rules() {
    if std::env::var(ENV_RULES_CONFIG_PATH).is_ok() {
        return;
    }
    let path = RuleConfig::default_path();
    assert!(path.ends_with("seqtree/rules.toml"), "{}", path.display());
}
