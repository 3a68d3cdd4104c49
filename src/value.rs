//! Converts YAML data into template values so data files can be fed to
//! [`crate::compose::ComposedTemplate::render`].

use gtmpl_value::Value;
use serde_yaml::Value as Yaml;
use std::collections::HashMap;

/// Converts a YAML document into a [`Value`]. Mappings become objects (keys
/// are stringified), sequences become arrays and null becomes nil.
pub fn from_yaml(yaml: &Yaml) -> Value {
    match yaml {
        Yaml::Null => Value::Nil,
        Yaml::Bool(b) => Value::Bool(*b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                Value::from(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Sequence(items) => Value::Array(items.iter().map(from_yaml).collect()),
        Yaml::Mapping(mapping) => {
            let mut m: HashMap<String, Value> = HashMap::new();
            for (k, v) in mapping {
                m.insert(key_string(k), from_yaml(v));
            }
            Value::Object(m)
        }
    }
}

fn key_string(key: &Yaml) -> String {
    match key {
        Yaml::String(s) => s.clone(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        Yaml::Null => "null".to_owned(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_start_matches("---").trim().to_owned())
            .unwrap_or_default(),
    }
}
