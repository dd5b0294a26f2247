//! Request assembly - partitions fields into header/query/body buckets

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::composer::fields::{Field, FieldKind};
use crate::composer::template::ResolvedPath;
use crate::constants::FORM_CONTENT_TYPE;
use crate::models::HttpMethod;

/// Insertion-ordered string map with unique keys.
/// Inserting an existing key replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParamMap {
    entries: Vec<(String, String)>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Each entry as an encoded `key=value` pair, in insertion order
    pub fn encoded_pairs(&self) -> impl Iterator<Item = String> + '_ {
        self.iter().map(|pair| {
            form_urlencoded::Serializer::new(String::new())
                .extend_pairs(std::iter::once(pair))
                .finish()
        })
    }

    /// `application/x-www-form-urlencoded` serialization. Bracketed keys such
    /// as `a[b][c]` are kept as literal keys, which servers read as nesting.
    pub fn encode(&self) -> String {
        self.encoded_pairs().collect::<Vec<_>>().join("&")
    }
}

impl Serialize for ParamMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A fully resolved request. Built once per submit by [`assemble`] and only
/// read afterwards, by the transport and by both text renderers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: HttpMethod,
    host: String,
    path: String,
    headers: ParamMap,
    query: ParamMap,
    body: ParamMap,
}

impl RequestDescriptor {
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &ParamMap {
        &self.headers
    }

    pub fn query(&self) -> &ParamMap {
        &self.query
    }

    pub fn body(&self) -> &ParamMap {
        &self.body
    }

    /// Encoded query string, `None` when there are no query fields
    pub fn query_string(&self) -> Option<String> {
        (!self.query.is_empty()).then(|| self.query.encode())
    }

    /// Encoded form body, `None` when there are no body fields
    pub fn form_body(&self) -> Option<String> {
        (!self.body.is_empty()).then(|| self.body.encode())
    }

    /// Target URL exactly as sent: joined host and path, plus the query string
    pub fn url(&self) -> String {
        let mut url = join_url(&self.host, &self.path);
        if let Some(query) = self.query_string() {
            url.push('?');
            url.push_str(&query);
        }
        url
    }
}

/// Join host and path with exactly one `/` between them
pub fn join_url(host: &str, path: &str) -> String {
    match (host.ends_with('/'), path.starts_with('/')) {
        (true, true) => format!("{}{}", host, &path[1..]),
        (false, false) if !host.is_empty() && !path.is_empty() => format!("{}/{}", host, path),
        _ => format!("{}{}", host, path),
    }
}

/// Build the descriptor from the resolved path and the ordered field list.
/// Consumed, removed and empty fields are dropped.
pub fn assemble<'a>(
    method: HttpMethod,
    host: &str,
    resolved: ResolvedPath,
    fields: impl IntoIterator<Item = &'a Field>,
) -> RequestDescriptor {
    let mut headers = ParamMap::new();
    let mut query = ParamMap::new();
    let mut body = ParamMap::new();

    if !method.is_get() {
        headers.insert("content-type", FORM_CONTENT_TYPE);
    }

    for field in fields {
        if !field.is_active() || !field.has_value() || resolved.is_consumed(field.id) {
            continue;
        }
        let bucket = match field.kind {
            FieldKind::Header => &mut headers,
            FieldKind::Query => &mut query,
            FieldKind::Body => &mut body,
        };
        bucket.insert(field.name.as_str(), field.value.as_str());
    }

    RequestDescriptor {
        method,
        host: host.to_string(),
        path: resolved.path,
        headers,
        query,
        body,
    }
}
