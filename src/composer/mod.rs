//! Request composer - fields, path templating, assembly and text renderings
//!
//! Flow on submit:
//! 1. `template::resolve_path` fills `:name` placeholders from the fields
//! 2. `assembler::assemble` buckets what is left into headers/query/body
//! 3. `render` turns the resulting descriptor into an axios call and a cURL command

pub mod assembler;
pub mod fields;
pub mod render;
pub mod template;

pub use assembler::{assemble, join_url, ParamMap, RequestDescriptor};
pub use fields::{normalize_name, Field, FieldId, FieldKind, FieldSet};
pub use render::{to_call, to_curl};
pub use template::{resolve_path, ResolvedPath};

use crate::models::HttpMethod;

/// Build a fresh descriptor from the current field state
pub fn compose(host: &str, method: HttpMethod, url_template: &str, fields: &FieldSet) -> RequestDescriptor {
    let resolved = resolve_path(url_template, fields.active());
    assemble(method, host, resolved, fields.ordered())
}
