//! Text renderings of a request descriptor: an axios call and a cURL command
//!
//! Both read the encoded forms the descriptor already holds, so the query
//! string and form body shown are byte-for-byte what the transport sends.

use serde::Serialize;

use crate::composer::assembler::{join_url, ParamMap, RequestDescriptor};

/// Marker for the nested-bracket query serializer the call uses
const PARAMS_SERIALIZER: &str = "qs.stringify";

#[derive(Serialize)]
struct CallConfig<'a> {
    method: &'a str,
    url: &'a str,
    headers: &'a ParamMap,
    #[serde(rename = "paramsSerializer")]
    params_serializer: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<&'a ParamMap>,
    #[serde(rename = "baseURL")]
    base_url: &'a str,
}

/// Format the request as an axios call
pub fn to_call(descriptor: &RequestDescriptor) -> String {
    let config = CallConfig {
        method: descriptor.method().as_str(),
        url: descriptor.path(),
        headers: descriptor.headers(),
        params_serializer: PARAMS_SERIALIZER,
        data: descriptor.form_body(),
        params: (!descriptor.query().is_empty()).then(|| descriptor.query()),
        base_url: descriptor.host(),
    };

    // Only string maps and strings: serialization cannot fail
    let literal = serde_json::to_string_pretty(&config).unwrap_or_default();
    format!("import axios from 'axios';\n\nconst res = axios({});", literal)
}

/// Escape the characters a POSIX shell still expands inside double quotes
fn shell_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Format the request as a cURL command
pub fn to_curl(descriptor: &RequestDescriptor) -> String {
    let mut target = join_url(descriptor.host(), descriptor.path());
    if let Some(query) = descriptor.query_string() {
        target.push('?');
        target.push_str(&query);
    }

    let mut lines = vec![format!(
        "curl -X {} \"{}\"",
        descriptor.method().as_str(),
        shell_escape(&target)
    )];

    // Headers
    for (name, value) in descriptor.headers().iter() {
        lines.push(format!("  -H \"{}\"", shell_escape(&format!("{}: {}", name, value))));
    }

    // Body, pair by pair in the encoding the transport sends
    for pair in descriptor.body().encoded_pairs() {
        lines.push(format!("  -d \"{}\"", shell_escape(&pair)));
    }

    lines
        .into_iter()
        .map(|line| format!("{} \\\n", line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::assembler::assemble;
    use crate::composer::fields::{FieldKind, FieldSet};
    use crate::composer::template::resolve_path;
    use crate::models::HttpMethod;

    fn descriptor(method: HttpMethod, host: &str, entries: &[(FieldKind, &str, &str)]) -> RequestDescriptor {
        let mut set = FieldSet::new();
        for (kind, name, value) in entries {
            let id = set.add(*kind);
            set.rename(id, *name);
            set.set_value(id, *value);
        }
        let resolved = resolve_path("/items/:id", set.active());
        assemble(method, host, resolved, set.ordered())
    }

    #[test]
    fn test_curl_post_form() {
        let d = descriptor(
            HttpMethod::POST,
            "http://x.com",
            &[(FieldKind::Body, "id", "7"), (FieldKind::Body, "name", "widget")],
        );
        assert_eq!(
            to_curl(&d),
            "curl -X POST \"http://x.com/items/7\" \\\n  -H \"content-type: application/x-www-form-urlencoded\" \\\n  -d \"name=widget\" \\\n"
        );
    }

    #[test]
    fn test_curl_get_with_query_and_trailing_slash_host() {
        let d = descriptor(
            HttpMethod::GET,
            "http://x.com/",
            &[
                (FieldKind::Query, "q", "blue shoes"),
                (FieldKind::Header, "X-Token", "abc"),
            ],
        );
        assert_eq!(
            to_curl(&d),
            "curl -X GET \"http://x.com/items/:id?q=blue+shoes\" \\\n  -H \"X-Token: abc\" \\\n"
        );
    }

    #[test]
    fn test_curl_body_matches_sent_form() {
        let d = descriptor(
            HttpMethod::POST,
            "http://x.com",
            &[(FieldKind::Body, "note", "a&b=c \"q\""), (FieldKind::Body, "tags[0]", "x y")],
        );
        let curl = to_curl(&d);

        let payloads: Vec<&str> = curl
            .lines()
            .filter_map(|l| l.trim().strip_prefix("-d \""))
            .filter_map(|l| l.strip_suffix("\" \\"))
            .collect();
        assert_eq!(payloads.join("&"), d.form_body().unwrap());
        assert!(curl.contains("  -d \"note=a%26b%3Dc+%22q%22\" \\\n"));
        assert!(to_call(&d).contains("\"data\": \"note=a%26b%3Dc+%22q%22&tags%5B0%5D=x+y\""));
    }

    #[test]
    fn test_curl_escapes_shell_characters_in_headers() {
        let d = descriptor(
            HttpMethod::GET,
            "http://x.com",
            &[(FieldKind::Header, "X-Note", "say \"$HOME\" `id` \\")],
        );
        assert!(to_curl(&d).contains("  -H \"X-Note: say \\\"\\$HOME\\\" \\`id\\` \\\\\" \\\n"));
    }

    #[test]
    fn test_call_shape() {
        let d = descriptor(
            HttpMethod::POST,
            "http://x.com",
            &[(FieldKind::Body, "name", "widget"), (FieldKind::Query, "dry", "1")],
        );
        let text = to_call(&d);
        assert!(text.starts_with("import axios from 'axios';\n\nconst res = axios({\n"));
        assert!(text.ends_with("});"));

        let start = text.find('{').unwrap();
        let end = text.rfind('}').unwrap();
        let json: serde_json::Value = serde_json::from_str(&text[start..=end]).unwrap();
        assert_eq!(json["method"], "POST");
        assert_eq!(json["url"], "/items/:id");
        assert_eq!(json["headers"]["content-type"], "application/x-www-form-urlencoded");
        assert_eq!(json["paramsSerializer"], "qs.stringify");
        assert_eq!(json["data"], "name=widget");
        assert_eq!(json["params"]["dry"], "1");
        assert_eq!(json["baseURL"], "http://x.com");
    }

    #[test]
    fn test_call_omits_empty_data_and_params() {
        let d = descriptor(HttpMethod::GET, "http://x.com", &[]);
        let text = to_call(&d);
        assert!(!text.contains("\"data\""));
        assert!(!text.contains("\"params\""));
        assert!(text.contains("\"headers\": {}"));
    }

    #[test]
    fn test_renderers_are_idempotent() {
        let d = descriptor(
            HttpMethod::PUT,
            "http://x.com",
            &[(FieldKind::Body, "a[b]", "c d"), (FieldKind::Header, "X-A", "1")],
        );
        assert_eq!(to_curl(&d), to_curl(&d));
        assert_eq!(to_call(&d), to_call(&d));
    }
}
