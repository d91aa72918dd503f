use serde_json::{Map, Value};

use crate::error::SnapshotError;
use crate::rn;
use crate::templates::RnTemplates;

pub const DN_SEPARATOR: char = '/';

/// Computes the DN path of an object.
///
/// A non-empty `dn` attribute is taken verbatim. Otherwise the class's RN
/// template is rendered against `attributes` and appended to `parent`.
pub fn resolve<T: RnTemplates + ?Sized>(
    attributes: &Map<String, Value>,
    parent: &[String],
    class: &str,
    templates: &T,
) -> Result<Vec<String>, SnapshotError> {
    if let Some(dn) = attributes.get("dn").and_then(Value::as_str)
        && !dn.is_empty()
    {
        return Ok(split(dn));
    }

    let template = templates
        .rn_template(class)
        .ok_or_else(|| SnapshotError::TemplateNotFound {
            class: class.to_string(),
        })?;

    let mut path = Vec::with_capacity(parent.len() + 1);
    path.extend_from_slice(parent);
    path.push(rn::render(template, attributes));
    Ok(path)
}

pub fn split(dn: &str) -> Vec<String> {
    dn.split(DN_SEPARATOR).map(str::to_string).collect()
}

pub fn join(path: &[String]) -> String {
    path.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateTable;
    use serde_json::json;

    fn attrs(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    fn uni() -> Vec<String> {
        vec!["uni".to_string()]
    }

    #[test]
    fn existing_dn_wins_without_template_lookup() {
        let empty = TemplateTable::new();
        let path = resolve(&attrs(json!({ "dn": "uni/a/b" })), &uni(), "FakeTestClass", &empty)
            .unwrap();
        assert_eq!(path, vec!["uni", "a", "b"]);
    }

    #[test]
    fn renders_template_under_parent() {
        let mut table = TemplateTable::new();
        table.insert("fvTenant", "tn-{name}");
        let path = resolve(&attrs(json!({ "name": "a" })), &uni(), "fvTenant", &table).unwrap();
        assert_eq!(path, vec!["uni", "tn-a"]);
    }

    #[test]
    fn empty_dn_falls_back_to_template() {
        let table = TemplateTable::builtin();
        let path = resolve(
            &attrs(json!({ "dn": "", "name": "b" })),
            &uni(),
            "fvTenant",
            &table,
        )
        .unwrap();
        assert_eq!(join(&path), "uni/tn-b");
    }

    #[test]
    fn unknown_class_is_template_not_found() {
        let table = TemplateTable::builtin();
        let err = resolve(&Map::new(), &uni(), "FakeTestClass", &table).unwrap_err();
        assert!(
            matches!(err, SnapshotError::TemplateNotFound { ref class } if class == "FakeTestClass")
        );
    }

    #[test]
    fn root_object_has_single_segment() {
        let table = TemplateTable::builtin();
        let path = resolve(&Map::new(), &[], "polUni", &table).unwrap();
        assert_eq!(path, vec!["uni"]);
    }
}
