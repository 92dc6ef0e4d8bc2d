//! Detect configuration keys missing from an existing config file.
//! Missing keys are not an error (serde defaults fill them in) but `config --check`
//! reports them so the file can be completed by hand.

use serde_yaml::Value;

pub const EXPECTED_KEYS: &[&str] = &[
    "api_base_url",
    "database",
    "work_baseline",
    "user_idle_timeout_minutes",
    "admin_idle_timeout_minutes",
    "separator_char",
];

/// Return the expected keys not present in `content`.
/// An unparsable file reports every key as missing.
pub fn missing_keys(content: &str) -> Vec<&'static str> {
    let yaml: Value = serde_yaml::from_str(content).unwrap_or(Value::Null);

    let Some(map) = yaml.as_mapping() else {
        return EXPECTED_KEYS.to_vec();
    };

    EXPECTED_KEYS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(Value::String(k.to_string())))
        .collect()
}
