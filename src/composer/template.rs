//! Path template resolution (`/users/:id`, `/files/:name(\w+)`)

use crate::composer::fields::{normalize_name, Field, FieldId};

/// A concrete path plus the fields that were spent filling it
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedPath {
    pub path: String,
    pub consumed: Vec<FieldId>,
}

impl ResolvedPath {
    pub fn is_consumed(&self, id: FieldId) -> bool {
        self.consumed.contains(&id)
    }
}

/// Placeholder name of a `:name` or `:name(regex)` segment
fn placeholder(segment: &str) -> Option<&str> {
    let rest = segment.strip_prefix(':')?;
    let name = rest.split('(').next().unwrap_or(rest);
    (!name.is_empty()).then_some(name)
}

/// Substitute placeholders with the first active, non-empty field of the same
/// (normalized) name. Unmatched placeholders stay in the path verbatim.
/// Values are inserted as typed, without percent-encoding, so a `?` or `#`
/// in a value changes how the final URL parses.
pub fn resolve_path<'a>(
    template: &str,
    fields: impl IntoIterator<Item = &'a Field>,
) -> ResolvedPath {
    let candidates: Vec<&Field> = fields
        .into_iter()
        .filter(|f| f.is_active() && f.has_value())
        .collect();
    let mut consumed = Vec::new();

    let segments: Vec<String> = template
        .split('/')
        .map(|segment| {
            let Some(name) = placeholder(segment) else {
                return segment.to_string();
            };
            match candidates.iter().find(|f| normalize_name(&f.name) == name) {
                Some(field) => {
                    consumed.push(field.id);
                    field.value.clone()
                }
                None => {
                    tracing::debug!(placeholder = name, "Unresolved path placeholder");
                    segment.to_string()
                }
            }
        })
        .collect();

    ResolvedPath {
        path: segments.join("/"),
        consumed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::fields::{FieldKind, FieldSet};

    fn set(entries: &[(&str, &str)]) -> FieldSet {
        let mut set = FieldSet::new();
        for (name, value) in entries {
            let id = set.add(FieldKind::Body);
            set.rename(id, *name);
            set.set_value(id, *value);
        }
        set
    }

    #[test]
    fn test_unresolved_placeholder_passes_through() {
        let fields = set(&[("id", "42")]);
        let resolved = resolve_path("/users/:id/:missing", fields.active());
        assert_eq!(resolved.path, "/users/42/:missing");
        assert_eq!(resolved.consumed, vec![0]);
    }

    #[test]
    fn test_regex_suffix_is_ignored() {
        let fields = set(&[("slug", "hello-world")]);
        let resolved = resolve_path(r"/posts/:slug([a-z\-]+)", fields.active());
        assert_eq!(resolved.path, "/posts/hello-world");
    }

    #[test]
    fn test_skips_empty_and_removed_fields() {
        let mut fields = set(&[("id", ""), ("id", "7"), ("id", "8")]);
        fields.remove(1);
        let resolved = resolve_path("/items/:id", fields.active());
        assert_eq!(resolved.path, "/items/8");
        assert_eq!(resolved.consumed, vec![2]);
        assert!(!resolved.is_consumed(0));
    }

    #[test]
    fn test_matches_normalized_names() {
        let fields = set(&[("user.id", "5")]);
        let resolved = resolve_path("/u/:user[id]", fields.active());
        assert_eq!(resolved.path, "/u/5");
    }

    #[test]
    fn test_template_without_placeholders() {
        let fields = set(&[("id", "1")]);
        let resolved = resolve_path("/health", fields.active());
        assert_eq!(resolved.path, "/health");
        assert!(resolved.consumed.is_empty());
    }

    #[test]
    fn test_values_are_not_percent_encoded() {
        let fields = set(&[("id", "a b?c#d")]);
        let resolved = resolve_path("/users/:id", fields.active());
        assert_eq!(resolved.path, "/users/a b?c#d");
    }
}
