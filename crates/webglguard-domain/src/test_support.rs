use crate::model::{SettingValue, SettingsSnapshot};
use crate::policy::{Predicate, Rule};

pub fn snapshot_of(entries: &[(&str, SettingValue)]) -> SettingsSnapshot {
    let mut builder = SettingsSnapshot::builder();
    for (key, value) in entries {
        builder.insert_setting(*key, value.clone(), None);
    }
    builder.build()
}

pub fn rule_eq(key: &str, value: SettingValue) -> Rule {
    let description = format!("{key} equals {value}");
    Rule::setting(
        &format!("test.{key}"),
        &description,
        key,
        Predicate::Equals(value),
    )
}
