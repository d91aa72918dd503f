use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// A decoded tree node: the class tag and body of a `{ class: body }` wrapper.
///
/// Children stay undecoded until they are popped off the walker's stack.
#[derive(Debug, Clone, PartialEq)]
pub struct MoNode {
    pub class: String,
    pub attributes: Map<String, Value>,
    pub children: Vec<Value>,
}

impl MoNode {
    /// Decodes a wrapper object. The first key names the class; returns `None`
    /// for anything that is not a non-empty object.
    pub fn decode(wrapper: Value) -> Option<Self> {
        let Value::Object(map) = wrapper else {
            return None;
        };
        let (class, body) = map.into_iter().next()?;

        let Value::Object(mut body) = body else {
            return Some(Self {
                class,
                attributes: Map::new(),
                children: Vec::new(),
            });
        };

        let attributes = match body.remove("attributes") {
            Some(Value::Object(attrs)) => attrs,
            _ => Map::new(),
        };
        let children = match body.remove("children") {
            Some(Value::Array(children)) => children,
            _ => Vec::new(),
        };

        Some(Self {
            class,
            attributes,
            children,
        })
    }
}

/// The indexed copy of a managed object: class and attributes only.
///
/// `attributes["dn"]` always holds the DN it is indexed under.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagedObject {
    class: String,
    attributes: Map<String, Value>,
}

impl ManagedObject {
    pub(crate) fn new(class: String, mut attributes: Map<String, Value>, dn: String) -> Self {
        attributes.insert("dn".to_string(), Value::String(dn));
        Self { class, attributes }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn dn(&self) -> &str {
        self.attr("dn").unwrap_or_default()
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

impl Serialize for ManagedObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Body<'a>(&'a Map<String, Value>);

        impl Serialize for Body<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("attributes", self.0)?;
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.class, &Body(&self.attributes))?;
        map.end()
    }
}
