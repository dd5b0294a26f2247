//! Data models for apidoc endpoint records and project metadata

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::HttpMethod;

/// Group key apidoc uses for declared request headers
pub const HEADER_GROUP: &str = "Header";
/// Group key apidoc uses for declared request parameters
pub const PARAMETER_GROUP: &str = "Parameter";

/// One documented field of an endpoint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamField {
    #[serde(default)]
    pub group: String,
    #[serde(default, rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub optional: bool,
    pub field: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub allowed_values: Vec<String>,
    #[serde(default)]
    pub size: Option<String>,
}

impl ParamField {
    /// Nested fields (`a.b.c`) are shown by their last segment, indented by depth
    pub fn display_name(&self) -> String {
        let segments: Vec<&str> = self.field.split('.').collect();
        let last = segments.last().copied().unwrap_or_default();
        format!("{}{}", "  ".repeat(segments.len().saturating_sub(1)), last)
    }

    pub fn plain_description(&self) -> String {
        strip_html(&self.description)
    }

    pub fn allowed_values_display(&self) -> Vec<String> {
        self.allowed_values
            .iter()
            .map(|v| v.replace('"', ""))
            .collect()
    }
}

/// Request/response example attached to a field group
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Example {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// Named field lists plus examples (`header`, `parameter`, `success`, `error`)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldGroup {
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<ParamField>>,
    #[serde(default)]
    pub examples: Vec<Example>,
}

impl FieldGroup {
    pub fn named(&self, name: &str) -> &[ParamField] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Deprecation {
    #[serde(default)]
    pub content: Option<String>,
}

/// A documented endpoint as emitted by apidoc
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    /// HTTP method(s), possibly `|`-joined for documentation
    #[serde(rename = "type", default)]
    pub method: String,
    /// URL template (e.g., "/users/:id")
    pub url: String,
    #[serde(default)]
    pub title: String,
    pub name: String,
    pub group: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deprecated: Option<Deprecation>,
    #[serde(default)]
    pub header: Option<FieldGroup>,
    #[serde(default)]
    pub parameter: Option<FieldGroup>,
    #[serde(default)]
    pub success: Option<FieldGroup>,
    #[serde(default)]
    pub error: Option<FieldGroup>,
}

/// A titled table of fields for the documentation view
#[derive(Clone, Debug)]
pub struct FieldTable<'a> {
    pub title: &'static str,
    pub rows: Vec<&'a ParamField>,
}

impl EndpointDescriptor {
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
        group: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        EndpointDescriptor {
            method: method.into(),
            url: url.into(),
            title: String::new(),
            name: name.into(),
            group: group.into(),
            version: None,
            description: None,
            deprecated: None,
            header: None,
            parameter: None,
            success: None,
            error: None,
        }
    }

    /// Every method listed for documentation, upper-cased
    pub fn methods(&self) -> Vec<String> {
        self.method
            .split('|')
            .map(|m| m.trim().to_uppercase())
            .filter(|m| !m.is_empty())
            .collect()
    }

    /// The single method used when the endpoint is executed
    pub fn execution_method(&self) -> HttpMethod {
        match self.method.split('|').find_map(|m| m.parse().ok()) {
            Some(method) => method,
            None => {
                tracing::warn!(method = %self.method, group = %self.group, name = %self.name, "No executable method, using GET");
                HttpMethod::GET
            }
        }
    }

    pub fn header_fields(&self) -> &[ParamField] {
        self.header
            .as_ref()
            .map(|g| g.named(HEADER_GROUP))
            .unwrap_or_default()
    }

    pub fn parameter_fields(&self) -> &[ParamField] {
        self.parameter
            .as_ref()
            .map(|g| g.named(PARAMETER_GROUP))
            .unwrap_or_default()
    }

    pub fn success_examples(&self) -> &[Example] {
        self.success
            .as_ref()
            .map(|g| g.examples.as_slice())
            .unwrap_or_default()
    }

    pub fn display_title(&self) -> String {
        if self.title.is_empty() {
            self.name.clone()
        } else {
            self.title.clone()
        }
    }

    pub fn plain_description(&self) -> Option<String> {
        self.description.as_deref().map(strip_html)
    }

    /// Documentation tables, in display order. Absent groups are skipped.
    /// Parameters keep their declared order; other tables sort by field name.
    pub fn field_tables(&self) -> Vec<FieldTable<'_>> {
        let sources: [(&'static str, &Option<FieldGroup>, &str); 5] = [
            ("Header", &self.header, HEADER_GROUP),
            ("Parameter", &self.parameter, PARAMETER_GROUP),
            ("Success 200", &self.success, "Success 200"),
            ("Error 4xx", &self.error, "Error 4xx"),
            ("Error 200", &self.error, "Error 200"),
        ];

        sources
            .into_iter()
            .filter_map(|(title, group, key)| {
                let fields = group.as_ref()?.fields.get(key)?;
                let mut rows: Vec<&ParamField> = fields.iter().collect();
                if key != PARAMETER_GROUP {
                    rows.sort_by(|a, b| a.field.cmp(&b.field));
                }
                Some(FieldTable { title, rows })
            })
            .collect()
    }

    /// Substring search over the catalog listing
    pub fn matches(&self, search: &str) -> bool {
        search.is_empty()
            || self.name.contains(search)
            || self.title.contains(search)
            || self.group.contains(search)
            || self.url.contains(search)
            || self
                .parameter_fields()
                .iter()
                .any(|p| p.field.contains(search) || p.description.contains(search))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadmeSection {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Project-level metadata (`api_project.json`)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Base URL of the documented API
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub header: Option<ReadmeSection>,
    #[serde(default)]
    pub generator: Option<GeneratorInfo>,
}

impl ProjectInfo {
    pub fn display_title(&self) -> String {
        self.header
            .as_ref()
            .and_then(|h| h.title.clone())
            .or_else(|| self.title.clone())
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| String::from("API"))
    }

    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        let time = self.generator.as_ref()?.time.as_deref()?;
        DateTime::parse_from_rfc3339(time)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    /// Long-form read-me text with markup removed
    pub fn readme(&self) -> String {
        self.header
            .as_ref()
            .and_then(|h| h.content.as_deref())
            .or(self.description.as_deref())
            .map(strip_html)
            .unwrap_or_default()
    }
}

/// Drops HTML tags from apidoc descriptions
pub fn strip_html(text: &str) -> String {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("static regex"));
    tag.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(field: &str) -> ParamField {
        ParamField {
            field: field.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>List <b>all</b> users</p>"), "List all users");
    }

    #[test]
    fn test_execution_method_takes_first_known() {
        let mut ep = EndpointDescriptor::new("get|post", "/a", "G", "n");
        assert_eq!(ep.execution_method(), HttpMethod::GET);
        assert_eq!(ep.methods(), vec!["GET", "POST"]);

        ep.method = "link|put".to_string();
        assert_eq!(ep.execution_method(), HttpMethod::PUT);

        ep.method = String::new();
        assert_eq!(ep.execution_method(), HttpMethod::GET);
    }

    #[test]
    fn test_display_name_indents_nested() {
        assert_eq!(param("user").display_name(), "user");
        assert_eq!(param("user.address.city").display_name(), "    city");
    }

    #[test]
    fn test_field_tables_sort_non_parameter() {
        let mut ep = EndpointDescriptor::new("post", "/a", "G", "n");
        let mut params = FieldGroup::default();
        params
            .fields
            .insert(PARAMETER_GROUP.to_string(), vec![param("z"), param("a")]);
        let mut success = FieldGroup::default();
        success
            .fields
            .insert("Success 200".to_string(), vec![param("z"), param("a")]);
        ep.parameter = Some(params);
        ep.success = Some(success);

        let tables = ep.field_tables();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].title, "Parameter");
        assert_eq!(tables[0].rows[0].field, "z");
        assert_eq!(tables[1].title, "Success 200");
        assert_eq!(tables[1].rows[0].field, "a");
    }

    #[test]
    fn test_field_tables_include_both_error_groups() {
        let mut ep = EndpointDescriptor::new("get", "/a", "G", "n");
        let mut error = FieldGroup::default();
        error
            .fields
            .insert("Error 4xx".to_string(), vec![param("NotFound")]);
        error
            .fields
            .insert("Error 200".to_string(), vec![param("msg"), param("code")]);
        ep.error = Some(error);

        let titles: Vec<&str> = ep.field_tables().iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Error 4xx", "Error 200"]);
        assert_eq!(ep.field_tables()[1].rows[0].field, "code");
    }

    #[test]
    fn test_matches_parameter_description() {
        let mut ep = EndpointDescriptor::new("get", "/users", "User", "GetUsers");
        let mut params = FieldGroup::default();
        let mut p = param("page");
        p.description = "<p>Page number</p>".to_string();
        params.fields.insert(PARAMETER_GROUP.to_string(), vec![p]);
        ep.parameter = Some(params);

        assert!(ep.matches(""));
        assert!(ep.matches("Page number"));
        assert!(ep.matches("/users"));
        assert!(!ep.matches("orders"));
    }

    #[test]
    fn test_generated_at_parses_rfc3339() {
        let project = ProjectInfo {
            generator: Some(GeneratorInfo {
                time: Some("2021-08-10T08:51:31.594Z".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let at = project.generated_at().unwrap();
        assert_eq!(at.format("%Y-%m-%d").to_string(), "2021-08-10");
    }
}
