//! Editable request fields for the active endpoint

use serde::{Deserialize, Serialize};

use crate::catalog::EndpointDescriptor;

pub type FieldId = u64;

/// Where a field travels in the outgoing request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Header,
    Query,
    Body,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Header => "Header",
            FieldKind::Query => "Query",
            FieldKind::Body => "Body",
        }
    }

    /// Display and assembly order: headers, then query, then body
    pub fn priority(&self) -> u8 {
        match self {
            FieldKind::Header => 1,
            FieldKind::Query => 2,
            FieldKind::Body => 3,
        }
    }
}

/// One editable name/value pair
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    pub name: String,
    /// Empty means unset; the field is left out of the request
    pub value: String,
    pub kind: FieldKind,
    pub removed: bool,
}

impl Field {
    pub fn is_active(&self) -> bool {
        !self.removed
    }

    pub fn has_value(&self) -> bool {
        !self.value.is_empty()
    }
}

/// Turns a dotted name into bracket notation: `a.b.c` -> `a[b][c]`
pub fn normalize_name(name: &str) -> String {
    if !name.contains('.') {
        return name.to_string();
    }

    name.split('.')
        .enumerate()
        .map(|(i, segment)| {
            if i == 0 {
                segment.to_string()
            } else {
                format!("[{}]", segment)
            }
        })
        .collect()
}

/// Session-only field collection. Ids come from a counter that is never
/// reset, so an id stays unique even across reseeds.
#[derive(Clone, Debug, Default)]
pub struct FieldSet {
    fields: Vec<Field>,
    next_id: FieldId,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> FieldId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn push(&mut self, name: String, value: String, kind: FieldKind) -> FieldId {
        let id = self.next_id();
        self.fields.push(Field {
            id,
            name,
            value,
            kind,
            removed: false,
        });
        id
    }

    /// Replace every field with the endpoint's declared headers and parameters
    pub fn seed(&mut self, endpoint: &EndpointDescriptor) {
        self.fields.clear();

        for header in endpoint.header_fields() {
            self.push(normalize_name(&header.field), String::new(), FieldKind::Header);
        }

        let kind = if endpoint.execution_method().is_get() {
            FieldKind::Query
        } else {
            FieldKind::Body
        };
        for param in endpoint.parameter_fields() {
            self.push(normalize_name(&param.field), String::new(), kind);
        }

        tracing::debug!(group = %endpoint.group, name = %endpoint.name, fields = self.fields.len(), "Fields seeded");
    }

    pub fn add(&mut self, kind: FieldKind) -> FieldId {
        self.push(String::new(), String::new(), kind)
    }

    /// Soft delete: the record stays, hidden from requests and listings
    pub fn remove(&mut self, id: FieldId) {
        match self.fields.iter_mut().find(|f| f.id == id) {
            Some(field) => field.removed = true,
            None => tracing::debug!(id, "remove: unknown field"),
        }
    }

    pub fn rename(&mut self, id: FieldId, name: impl Into<String>) {
        match self.active_mut(id) {
            Some(field) => field.name = name.into(),
            None => tracing::debug!(id, "rename: unknown field"),
        }
    }

    pub fn set_value(&mut self, id: FieldId, value: impl Into<String>) {
        match self.active_mut(id) {
            Some(field) => field.value = value.into(),
            None => tracing::debug!(id, "set_value: unknown field"),
        }
    }

    /// Copy `id` to the end of the set under a fresh id. The copy is always active.
    pub fn duplicate(&mut self, id: FieldId) -> Option<FieldId> {
        let Some(source) = self.fields.iter().find(|f| f.id == id).cloned() else {
            tracing::debug!(id, "duplicate: unknown field");
            return None;
        };
        Some(self.push(source.name, source.value, source.kind))
    }

    pub fn get(&self, id: FieldId) -> Option<&Field> {
        self.active().find(|f| f.id == id)
    }

    /// Active fields in insertion order
    pub fn active(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_active())
    }

    /// Active fields grouped Header, Query, Body; insertion order within a kind
    pub fn ordered(&self) -> Vec<&Field> {
        let mut fields: Vec<&Field> = self.active().collect();
        fields.sort_by_key(|f| f.kind.priority());
        fields
    }

    pub fn len(&self) -> usize {
        self.active().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn active_mut(&mut self, id: FieldId) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.id == id && f.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FieldGroup, ParamField, HEADER_GROUP, PARAMETER_GROUP};

    fn endpoint(method: &str, headers: &[&str], params: &[&str]) -> EndpointDescriptor {
        let group = |key: &str, names: &[&str]| {
            let mut g = FieldGroup::default();
            g.fields.insert(
                key.to_string(),
                names
                    .iter()
                    .map(|n| ParamField {
                        field: n.to_string(),
                        ..Default::default()
                    })
                    .collect(),
            );
            g
        };
        let mut ep = EndpointDescriptor::new(method, "/x", "G", "n");
        ep.header = Some(group(HEADER_GROUP, headers));
        ep.parameter = Some(group(PARAMETER_GROUP, params));
        ep
    }

    fn names(fields: &[&Field]) -> Vec<String> {
        fields.iter().map(|f| f.name.clone()).collect()
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("a.b.c"), "a[b][c]");
        assert_eq!(normalize_name("user"), "user");
        assert_eq!(normalize_name("a[b][c]"), "a[b][c]");
        assert_eq!(normalize_name(&normalize_name("a.b")), "a[b]");
    }

    #[test]
    fn test_seed_post_uses_body() {
        let mut set = FieldSet::new();
        set.seed(&endpoint("post", &["X-Token"], &["id", "meta.color"]));

        let fields = set.ordered();
        assert_eq!(names(&fields), vec!["X-Token", "id", "meta[color]"]);
        assert_eq!(fields[0].kind, FieldKind::Header);
        assert_eq!(fields[1].kind, FieldKind::Body);
        assert!(fields.iter().all(|f| f.value.is_empty() && !f.removed));
    }

    #[test]
    fn test_seed_get_uses_query() {
        let mut set = FieldSet::new();
        set.seed(&endpoint("GET", &[], &["page"]));
        assert_eq!(set.ordered()[0].kind, FieldKind::Query);
    }

    #[test]
    fn test_seed_replaces_and_keeps_counting() {
        let mut set = FieldSet::new();
        set.seed(&endpoint("post", &[], &["a", "b"]));
        set.seed(&endpoint("post", &[], &["c"]));

        let fields = set.ordered();
        assert_eq!(names(&fields), vec!["c"]);
        assert_eq!(fields[0].id, 2);
    }

    #[test]
    fn test_seed_without_parameters_still_clears() {
        let mut set = FieldSet::new();
        set.seed(&endpoint("post", &[], &["a"]));
        set.seed(&EndpointDescriptor::new("get", "/", "G", "bare"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_is_soft() {
        let mut set = FieldSet::new();
        let a = set.add(FieldKind::Query);
        let b = set.add(FieldKind::Query);
        set.remove(a);

        assert_eq!(set.len(), 1);
        assert!(set.get(a).is_none());
        // ids are not reused after a removal
        let c = set.add(FieldKind::Body);
        assert!(c > b);
    }

    #[test]
    fn test_edits_on_unknown_or_removed_are_noops() {
        let mut set = FieldSet::new();
        let a = set.add(FieldKind::Body);
        set.rename(a, "name");
        set.set_value(a, "widget");
        set.remove(a);

        set.rename(a, "other");
        set.set_value(a, "other");
        set.rename(99, "ghost");
        set.set_value(99, "ghost");
        set.remove(99);

        let copy = set.duplicate(a).unwrap();
        let field = set.get(copy).unwrap();
        assert_eq!(field.name, "name");
        assert_eq!(field.value, "widget");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_duplicate_copies_with_greater_id() {
        let mut set = FieldSet::new();
        let a = set.add(FieldKind::Header);
        set.rename(a, "X-Trace");
        set.set_value(a, "1");
        let _b = set.add(FieldKind::Query);
        set.remove(a);

        let copy = set.duplicate(a).unwrap();
        assert!(set.active().all(|f| f.id <= copy));
        let field = set.get(copy).unwrap();
        assert_eq!(field.name, "X-Trace");
        assert_eq!(field.value, "1");
        assert_eq!(field.kind, FieldKind::Header);
        assert!(!field.removed);
        assert_eq!(set.duplicate(1234), None);
    }

    #[test]
    fn test_ordered_groups_by_kind_stably() {
        let mut set = FieldSet::new();
        for (kind, name) in [
            (FieldKind::Body, "b1"),
            (FieldKind::Query, "q1"),
            (FieldKind::Header, "h1"),
            (FieldKind::Body, "b2"),
            (FieldKind::Header, "h2"),
            (FieldKind::Query, "q2"),
        ] {
            let id = set.add(kind);
            set.rename(id, name);
        }

        assert_eq!(
            names(&set.ordered()),
            vec!["h1", "h2", "q1", "q2", "b1", "b2"]
        );
    }
}
