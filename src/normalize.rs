use serde_json::{Map, Value};
use url::Url;

pub const UNNAMED_SITE: &str = "未命名";
pub const UNNAMED_FOLDER: &str = "文件夹";

#[derive(Debug, Clone)]
pub struct Site {
    pub name: String,
    pub target: String,
    /// Host component of `target`, when it parses as a URL.
    pub host: Option<String>,
    pub bg_image: String,
    pub bg_type: String,
    pub bg_color: String,
    pub bg_text: String,
    pub kind: String,
    pub id: String,
}

impl Site {
    pub fn display_url(&self) -> &str {
        self.host.as_deref().unwrap_or(&self.target)
    }
}

#[derive(Debug, Clone)]
pub enum Node {
    Folder { name: String, children: Vec<Site> },
    Site(Site),
}

#[derive(Debug, Default)]
pub struct Extraction {
    pub columns: Vec<Vec<Node>>,
    /// Records skipped because they matched neither the folder nor the site shape.
    pub dropped: usize,
}

fn str_field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .filter_map(Value::as_str)
        .find(|s| !s.is_empty())
}

fn qualifies_as_site(obj: &Map<String, Value>) -> bool {
    obj.get("type").and_then(Value::as_str) == Some("web")
        || str_field(obj, &["target", "url"]).is_some()
}

pub fn normalize_site(obj: &Map<String, Value>) -> Site {
    let target = str_field(obj, &["target", "url"]).unwrap_or("").to_string();
    // Host extraction never fails; an unparseable target just leaves host unset.
    let host = Url::parse(&target)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string));
    let name = str_field(obj, &["name", "title", "id"])
        .map(str::to_string)
        .or_else(|| (!target.is_empty()).then(|| target.clone()))
        .unwrap_or_else(|| UNNAMED_SITE.to_string());
    Site {
        name,
        host,
        bg_image: str_field(obj, &["bgImage", "icon"]).unwrap_or("").to_string(),
        bg_type: str_field(obj, &["bgType"]).unwrap_or("").to_string(),
        bg_color: str_field(obj, &["bgColor"]).unwrap_or("").to_string(),
        bg_text: str_field(obj, &["bgText"]).unwrap_or("").to_string(),
        kind: str_field(obj, &["type"]).unwrap_or("web").to_string(),
        id: str_field(obj, &["id", "uuid"]).unwrap_or("").to_string(),
        target,
    }
}

/// Walks `data.site.sites` column by column, classifying each record as a
/// folder or a standalone site. Anything malformed is skipped and counted,
/// never raised. Input order is preserved.
///
/// Folders flatten to one level: a folder nested inside a folder is dropped.
pub fn extract_columns(sites: &[Value]) -> Extraction {
    let mut out = Extraction::default();
    for col in sites {
        let Some(col) = col.as_array() else {
            out.dropped += 1;
            continue;
        };
        let mut items = Vec::new();
        for item in col {
            let Some(obj) = item.as_object() else {
                out.dropped += 1;
                continue;
            };
            if let Some(children) = obj.get("children").and_then(Value::as_array) {
                let mut kids = Vec::new();
                for child in children {
                    match child.as_object() {
                        Some(c) if qualifies_as_site(c) => kids.push(normalize_site(c)),
                        _ => out.dropped += 1,
                    }
                }
                let name = str_field(obj, &["name"]).unwrap_or(UNNAMED_FOLDER).to_string();
                items.push(Node::Folder { name, children: kids });
            } else if qualifies_as_site(obj) {
                items.push(Node::Site(normalize_site(obj)));
            } else {
                out.dropped += 1;
            }
        }
        out.columns.push(items);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        v.as_object().unwrap().clone()
    }

    #[test]
    fn name_falls_back_through_title_id_target() {
        let s = normalize_site(&obj(json!({"title": "T", "target": "https://a.b"})));
        assert_eq!(s.name, "T");
        let s = normalize_site(&obj(json!({"id": "42", "target": "https://a.b"})));
        assert_eq!(s.name, "42");
        let s = normalize_site(&obj(json!({"target": "https://a.b"})));
        assert_eq!(s.name, "https://a.b");
        let s = normalize_site(&obj(json!({"type": "web"})));
        assert_eq!(s.name, UNNAMED_SITE);
    }

    #[test]
    fn empty_strings_do_not_count_as_present() {
        let s = normalize_site(&obj(json!({"name": "", "title": "T", "target": "https://a.b"})));
        assert_eq!(s.name, "T");
    }

    #[test]
    fn url_field_backs_up_target() {
        let s = normalize_site(&obj(json!({"name": "n", "url": "https://example.com/x"})));
        assert_eq!(s.target, "https://example.com/x");
        assert_eq!(s.display_url(), "example.com");
    }

    #[test]
    fn unparseable_target_displays_raw() {
        let s = normalize_site(&obj(json!({"name": "n", "target": "not a url"})));
        assert_eq!(s.host, None);
        assert_eq!(s.display_url(), "not a url");
    }

    #[test]
    fn host_extraction() {
        let s = normalize_site(&obj(json!({"name": "n", "target": "http://a.b/path?q=1"})));
        assert_eq!(s.host.as_deref(), Some("a.b"));
    }

    #[test]
    fn classifies_folders_and_sites() {
        let sites = json!([[
            {"name": "F", "children": [{"name": "S", "target": "https://example.com"}]},
            {"name": "X", "target": "http://a.b"}
        ]]);
        let ex = extract_columns(sites.as_array().unwrap());
        assert_eq!(ex.dropped, 0);
        assert_eq!(ex.columns.len(), 1);
        match &ex.columns[0][0] {
            Node::Folder { name, children } => {
                assert_eq!(name, "F");
                assert_eq!(children.len(), 1);
                assert_eq!(children[0].name, "S");
            }
            other => panic!("expected folder, got {other:?}"),
        }
        assert!(matches!(&ex.columns[0][1], Node::Site(s) if s.name == "X"));
    }

    #[test]
    fn node_without_target_or_web_type_is_dropped() {
        let sites = json!([[{"name": "junk", "type": "widget"}]]);
        let ex = extract_columns(sites.as_array().unwrap());
        assert!(ex.columns[0].is_empty());
        assert_eq!(ex.dropped, 1);
    }

    #[test]
    fn folder_with_only_malformed_children_keeps_empty_folder() {
        let sites = json!([[{"name": "F", "children": [{"note": "no target"}]}]]);
        let ex = extract_columns(sites.as_array().unwrap());
        match &ex.columns[0][0] {
            Node::Folder { children, .. } => assert!(children.is_empty()),
            other => panic!("expected folder, got {other:?}"),
        }
        assert_eq!(ex.dropped, 1);
    }

    #[test]
    fn nested_folders_are_flattened_away() {
        let sites = json!([[
            {"name": "outer", "children": [
                {"name": "inner", "children": [{"name": "S", "target": "https://a.b"}]},
                {"name": "kept", "target": "https://c.d"}
            ]}
        ]]);
        let ex = extract_columns(sites.as_array().unwrap());
        match &ex.columns[0][0] {
            Node::Folder { children, .. } => {
                assert_eq!(children.len(), 1);
                assert_eq!(children[0].name, "kept");
            }
            other => panic!("expected folder, got {other:?}"),
        }
        assert_eq!(ex.dropped, 1);
    }

    #[test]
    fn non_object_entries_are_counted_not_fatal() {
        let sites = json!([["stray", {"name": "X", "target": "http://a.b"}], 7]);
        let ex = extract_columns(sites.as_array().unwrap());
        assert_eq!(ex.columns.len(), 1);
        assert_eq!(ex.columns[0].len(), 1);
        assert_eq!(ex.dropped, 2);
    }

    #[test]
    fn order_is_preserved() {
        let sites = json!([[
            {"name": "a", "target": "http://a.a"},
            {"name": "b", "target": "http://b.b"},
            {"name": "c", "target": "http://c.c"}
        ]]);
        let ex = extract_columns(sites.as_array().unwrap());
        let names: Vec<_> = ex.columns[0]
            .iter()
            .map(|n| match n {
                Node::Site(s) => s.name.as_str(),
                Node::Folder { name, .. } => name.as_str(),
            })
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
