use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

/// Lookup of the RN template for a managed-object class.
pub trait RnTemplates {
    fn rn_template(&self, class: &str) -> Option<&str>;
}

impl RnTemplates for HashMap<String, String> {
    fn rn_template(&self, class: &str) -> Option<&str> {
        self.get(class).map(String::as_str)
    }
}

/// Well-known classes, enough to resolve the common tenant tree when no
/// generated table is configured.
const BUILTIN: &[(&str, &str)] = &[
    ("polUni", "uni"),
    ("infraInfra", "infra"),
    ("fabricInst", "fabric"),
    ("fvTenant", "tn-{name}"),
    ("fvCtx", "ctx-{name}"),
    ("fvBD", "BD-{name}"),
    ("fvSubnet", "subnet-{[ip]}"),
    ("fvAp", "ap-{name}"),
    ("fvAEPg", "epg-{name}"),
    ("fvRsBd", "rsbd"),
    ("fvRsCtx", "rsctx"),
    ("fvRsCons", "rscons-{tnVzBrCPName}"),
    ("fvRsProv", "rsprov-{tnVzBrCPName}"),
    ("fvRsPathAtt", "rspathAtt-{[tDn]}"),
    ("vzBrCP", "brc-{name}"),
    ("vzSubj", "subj-{name}"),
    ("vzFilter", "flt-{name}"),
    ("vzEntry", "e-{name}"),
    ("l3extOut", "out-{name}"),
    ("fvnsVlanInstP", "vlanns-{[name]}-{allocMode}"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TemplateTable {
    templates: HashMap<String, String>,
}

impl TemplateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        BUILTIN.iter().copied().collect()
    }

    /// Reads a JSON object mapping class names to RN templates.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rn template table: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse rn template table: {}", path.display()))
    }

    pub fn insert(&mut self, class: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(class.into(), template.into());
    }

    /// Layers `other` over `self`; entries in `other` win.
    pub fn merge(mut self, other: TemplateTable) -> Self {
        self.templates.extend(other.templates);
        self
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl RnTemplates for TemplateTable {
    fn rn_template(&self, class: &str) -> Option<&str> {
        self.templates.rn_template(class)
    }
}

impl<C: Into<String>, T: Into<String>> FromIterator<(C, T)> for TemplateTable {
    fn from_iter<I: IntoIterator<Item = (C, T)>>(iter: I) -> Self {
        Self {
            templates: iter
                .into_iter()
                .map(|(c, t)| (c.into(), t.into()))
                .collect(),
        }
    }
}
