use pretty_assertions::assert_eq;

use super::*;

#[test]
fn empty_document_uses_defaults() {
	assert_eq!(SelectorConfig::from_toml_str("").unwrap(), SelectorConfig::default());
	assert!(SelectorConfig::default().observability);
}

#[test]
fn parses_all_keys() {
	let config = SelectorConfig::from_toml_str(
		r#"
adapter-name = "journal"
host-version = 13
observability = false
"#,
	)
	.unwrap();

	assert_eq!(
		config,
		SelectorConfig {
			adapter_name: Some("journal".to_owned()),
			host_version: Some(CapabilityVersion::of(13)),
			observability: false,
		}
	);
}

#[test]
fn rejects_unknown_keys() {
	let err = SelectorConfig::from_toml_str("adapter = \"journal\"").unwrap_err();
	assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn rejects_zero_host_version() {
	assert!(SelectorConfig::from_toml_str("host-version = 0").is_err());
}
