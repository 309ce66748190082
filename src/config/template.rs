//! Template expansion for configuration files
//!
//! A config file is rendered with `minijinja` before it is parsed. The context holds
//! every top-level scalar of the file itself plus `env`, the process environment:
//!
//! ```yaml
//! name: acme
//! workdir: "{{ env.HOME }}/{{ name }}"
//! ```
//!
//! Rendering repeats until the output stops changing, so values may refer to other
//! templated values.

use std::collections::BTreeMap;

use minijinja::Environment;
use serde_json::Value;

/// Upper bound on render passes; guards against self-referencing values
const MAX_PASSES: usize = 16;

/// Render `source` until it reaches a fixed point
pub fn render(source: &str, env: &BTreeMap<String, String>) -> Result<String, minijinja::Error> {
    let mut engine = Environment::new();
    engine.set_keep_trailing_newline(true);
    let mut current = source.to_string();

    for _ in 0..MAX_PASSES {
        if !current.contains("{{") && !current.contains("{%") {
            break;
        }
        let rendered = engine.render_str(&current, context(&current, env))?;
        if rendered == current {
            break;
        }
        current = rendered;
    }

    Ok(current)
}

fn context(source: &str, env: &BTreeMap<String, String>) -> BTreeMap<String, Value> {
    let mut ctx = BTreeMap::new();

    // Files that are not yet valid YAML contribute no values of their own
    if let Ok(serde_yaml::Value::Mapping(mapping)) = serde_yaml::from_str(source) {
        for (key, value) in mapping {
            let (Some(key), Some(value)) = (key.as_str(), scalar(&value)) else {
                continue;
            };
            ctx.insert(key.to_string(), value);
        }
    }

    let env: serde_json::Map<String, Value> = env
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();
    ctx.insert("env".to_string(), Value::Object(env));

    ctx
}

fn scalar(value: &serde_yaml::Value) -> Option<Value> {
    match value {
        serde_yaml::Value::String(s) => Some(Value::String(s.clone())),
        serde_yaml::Value::Bool(b) => Some(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => serde_json::to_value(n).ok(),
        _ => None,
    }
}
