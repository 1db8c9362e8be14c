use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;

/// Trait for types that can be requested as structured model output.
///
/// Automatically implemented for any type that implements `JsonSchema + DeserializeOwned`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate a strict JSON schema in the shape OpenAI-compatible servers
    /// accept for `response_format`:
    ///
    /// 1. `additionalProperties: false` on every object schema
    /// 2. ALL properties listed in `required`, even nullable ones
    /// 3. Fully inlined schemas (no `$ref` references)
    fn response_schema() -> serde_json::Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        strictify_objects(&mut value);
        inline_definitions(&mut value);

        if let serde_json::Value::Object(map) = &mut value {
            map.remove("definitions");
            map.remove("$schema");
        }

        value
    }

    fn type_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

fn strictify_objects(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if map.get("type") == Some(&serde_json::Value::String("object".to_string())) {
                map.insert(
                    "additionalProperties".to_string(),
                    serde_json::Value::Bool(false),
                );

                if let Some(serde_json::Value::Object(props)) = map.get("properties") {
                    let keys: Vec<serde_json::Value> = props
                        .keys()
                        .map(|k| serde_json::Value::String(k.clone()))
                        .collect();
                    map.insert("required".to_string(), serde_json::Value::Array(keys));
                }
            }

            for (_, v) in map.iter_mut() {
                strictify_objects(v);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr.iter_mut() {
                strictify_objects(item);
            }
        }
        _ => {}
    }
}

fn inline_definitions(value: &mut serde_json::Value) {
    let definitions = match value {
        serde_json::Value::Object(map) => map.get("definitions").cloned(),
        _ => None,
    };

    if let Some(defs) = definitions {
        resolve_refs(value, &defs);
    }
}

fn resolve_refs(value: &mut serde_json::Value, definitions: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if let Some(serde_json::Value::String(ref_path)) = map.get("$ref").cloned() {
                if let Some(name) = ref_path.strip_prefix("#/definitions/") {
                    if let Some(def) = definitions.get(name) {
                        *value = def.clone();
                        resolve_refs(value, definitions);
                        return;
                    }
                }
            }

            // schemars wraps single refs in allOf when the field carries metadata
            if let Some(serde_json::Value::Array(all_of)) = map.get("allOf").cloned() {
                if all_of.len() == 1 {
                    if let Some(inner) = all_of.into_iter().next() {
                        *value = inner;
                        resolve_refs(value, definitions);
                        return;
                    }
                }
            }

            for (_, v) in map.iter_mut() {
                resolve_refs(v, definitions);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr.iter_mut() {
                resolve_refs(item, definitions);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    struct Ruling {
        flagged: bool,
        category: Option<String>,
        reasoning: String,
    }

    #[test]
    fn schema_is_strict_object() {
        let schema = Ruling::response_schema();
        let obj = schema.as_object().unwrap();

        assert_eq!(
            obj.get("additionalProperties"),
            Some(&serde_json::Value::Bool(false))
        );
        assert!(!obj.contains_key("$schema"));
    }

    #[test]
    fn all_properties_required_including_optional() {
        let schema = Ruling::response_schema();
        let required = schema["required"].as_array().unwrap();
        let names: Vec<&str> = required.iter().filter_map(|v| v.as_str()).collect();

        assert!(names.contains(&"flagged"));
        assert!(names.contains(&"category"));
        assert!(names.contains(&"reasoning"));
    }

    #[test]
    fn nested_types_are_inlined() {
        #[derive(Deserialize, JsonSchema)]
        struct Detail {
            note: String,
        }

        #[derive(Deserialize, JsonSchema)]
        struct Outer {
            detail: Detail,
        }

        let schema = Outer::response_schema();
        let obj = schema.as_object().unwrap();
        assert!(!obj.contains_key("definitions"));

        let detail = schema["properties"]["detail"].as_object().unwrap();
        assert!(!detail.contains_key("$ref"));
        assert_eq!(
            detail.get("additionalProperties"),
            Some(&serde_json::Value::Bool(false))
        );
    }
}
