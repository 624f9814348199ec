//! Event families and type resolution.
//!
//! A family is a named group of concrete event types ("mouse" expands to
//! `mousedown`, `mouseup`, `click`, ...). Resolution turns an [`EventTypes`]
//! selector into the flat list of concrete types an operation works on.

use crate::types::EventTypes;

/// Source of event family definitions.
pub trait EventTypeResolver {
    /// Returns true if `name` is a known family.
    fn is_family(&self, name: &str) -> bool;

    /// Concrete types of a family, in catalog order. Empty for unknown names.
    fn types_for_family(&self, name: &str) -> Vec<String>;

    /// Every known concrete type, in catalog order.
    fn all_types(&self) -> Vec<String>;

    /// Known family names, in catalog order.
    fn families(&self) -> Vec<String>;
}

/// Resolves a selector into concrete event types.
///
/// `All` yields the full catalog; a single name expands to its family or is
/// taken literally; a list resolves element by element and keeps duplicates.
/// The result depends only on the selector and the resolver.
pub fn resolve_event_types<R>(resolver: &R, types: &EventTypes) -> Vec<String>
where
    R: EventTypeResolver + ?Sized,
{
    match types {
        EventTypes::All => resolver.all_types(),
        EventTypes::One(name) => resolve_name(resolver, name),
        EventTypes::Many(names) => names
            .iter()
            .flat_map(|name| resolve_name(resolver, name))
            .collect(),
    }
}

fn resolve_name<R>(resolver: &R, name: &str) -> Vec<String>
where
    R: EventTypeResolver + ?Sized,
{
    if resolver.is_family(name) {
        resolver.types_for_family(name)
    } else {
        vec![name.to_string()]
    }
}

/// Table-driven resolver.
///
/// [`EventCatalog::default`] carries the standard DOM families; hosts with
/// other event models build their own with [`EventCatalog::new`] and
/// [`EventCatalog::with_family`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCatalog {
    families: Vec<(String, Vec<String>)>,
}

const DOM_FAMILIES: &[(&str, &[&str])] = &[
    ("composition", &["composition", "compositionstart", "compositionend"]),
    ("contextmenu", &["contextmenu"]),
    ("drag", &["dragstart", "draggesture", "drag", "dragenter", "dragexit", "dragleave", "dragover", "dragdrop", "drop", "dragend"]),
    ("focus", &["focus", "blur"]),
    ("form", &["submit", "reset", "change", "select", "input"]),
    ("key", &["keydown", "keyup", "keypress"]),
    ("load", &["load", "beforeunload", "unload", "abort", "error"]),
    ("mouse", &["mousedown", "mouseup", "click", "dblclick", "mouseover", "mouseout", "mousemove"]),
    ("mutation", &["DOMSubtreeModified", "DOMNodeInserted", "DOMNodeRemoved", "DOMAttrModified", "DOMCharacterDataModified"]),
    ("paint", &["paint", "resize", "scroll"]),
    ("scroll", &["overflow", "underflow", "overflowchanged"]),
    ("text", &["text"]),
    ("ui", &["DOMActivate", "DOMFocusIn", "DOMFocusOut"]),
    ("clipboard", &["cut", "copy", "paste"]),
    ("touch", &["touchstart", "touchend", "touchmove", "touchenter", "touchleave", "touchcancel"]),
];

impl EventCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self { families: Vec::new() }
    }

    /// Adds (or replaces) a family.
    #[must_use]
    pub fn with_family<I, S>(mut self, name: impl Into<String>, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let types: Vec<String> = types.into_iter().map(Into::into).collect();
        match self.families.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = types,
            None => self.families.push((name, types)),
        }
        self
    }

    /// Number of families.
    #[must_use]
    pub fn len(&self) -> usize {
        self.families.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

impl Default for EventCatalog {
    fn default() -> Self {
        DOM_FAMILIES
            .iter()
            .fold(Self::new(), |catalog, (name, types)| {
                catalog.with_family(*name, types.iter().copied())
            })
    }
}

impl EventTypeResolver for EventCatalog {
    fn is_family(&self, name: &str) -> bool {
        self.families.iter().any(|(n, _)| n == name)
    }

    fn types_for_family(&self, name: &str) -> Vec<String> {
        self.families
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, types)| types.clone())
            .unwrap_or_default()
    }

    fn all_types(&self) -> Vec<String> {
        // Families may overlap; the catalog lists each concrete type once.
        let mut out: Vec<String> = Vec::new();
        for (_, types) in &self.families {
            for t in types {
                if !out.contains(t) {
                    out.push(t.clone());
                }
            }
        }
        out
    }

    fn families(&self) -> Vec<String> {
        self.families.iter().map(|(n, _)| n.clone()).collect()
    }
}
