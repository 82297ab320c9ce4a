use std::sync::LazyLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use pulldown_cmark::{Options, Parser, html};
use regex::Regex;
use serde_json::{Map, Value, json};

use crate::halo::{API_CONTENT, CONSOLE_POSTS};

pub const DEFAULT_TITLE: &str = "Untitled";
pub const EXCERPT_CHARS: usize = 500;

// RFC 3986 unreserved characters stay literal in query values.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

static SLUG_INVALID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_-]+").expect("valid slug pattern"));

/// Fields shared by both post-creation shapes.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub owner: String,
}

impl PostDraft {
    pub fn title(&self) -> &str {
        if self.title.trim().is_empty() {
            DEFAULT_TITLE
        } else {
            &self.title
        }
    }

    fn spec(&self, publish: bool) -> Map<String, Value> {
        let mut spec = Map::new();
        spec.insert("title".into(), json!(self.title()));
        spec.insert("slug".into(), json!(self.slug));
        spec.insert("visible".into(), json!("PUBLIC"));
        spec.insert("allowComment".into(), json!(true));
        spec.insert(
            "excerpt".into(),
            json!({ "autoGenerate": true, "raw": build_excerpt(&self.content) }),
        );
        spec.insert("publish".into(), json!(publish));
        spec.insert("deleted".into(), json!(false));
        spec.insert("pinned".into(), json!(false));
        spec.insert("priority".into(), json!(0));
        spec.insert("template".into(), json!(""));
        let owner = self.owner.trim();
        if !owner.is_empty() {
            spec.insert("owner".into(), json!(owner));
        }
        spec
    }

    fn post_resource(&self, spec: Map<String, Value>) -> Value {
        json!({
            "apiVersion": API_CONTENT,
            "kind": "Post",
            "metadata": { "name": self.slug, "labels": {} },
            "spec": spec,
        })
    }
}

/// Sanitizes a caller slug, or synthesizes `post-<unix-ts>` when nothing usable remains.
pub fn resolve_slug(requested: Option<&str>, now_ts: i64) -> String {
    let sanitized = requested.map(sanitize_slug).unwrap_or_default();
    if sanitized.is_empty() {
        format!("post-{now_ts}")
    } else {
        sanitized
    }
}

pub fn sanitize_slug(raw: &str) -> String {
    SLUG_INVALID
        .replace_all(raw.trim(), "-")
        .trim_matches('-')
        .to_string()
}

pub fn build_excerpt(content: &str) -> String {
    match content.char_indices().nth(EXCERPT_CHARS) {
        Some((byte_index, _)) => format!("{}...", &content[..byte_index]),
        None => content.to_string(),
    }
}

pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::all());
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Console draft body: content and post created together, unpublished.
pub fn build_draft_payload(draft: &PostDraft) -> Value {
    json!({
        "content": {
            "content": render_markdown(&draft.content),
            "raw": draft.content,
            "rawType": "MARKDOWN",
            "version": 0,
        },
        "post": draft.post_resource(draft.spec(false)),
    })
}

/// Bare content-API post resource, already flagged for publishing.
pub fn build_content_post_payload(draft: &PostDraft) -> Value {
    let mut spec = draft.spec(true);
    spec.insert("raw".into(), json!(draft.content));
    spec.insert("originalContent".into(), json!(draft.content));
    draft.post_resource(spec)
}

pub fn build_reply_payload(
    reply_id: &str,
    post_name: &str,
    parent_id: &str,
    content: &str,
) -> Value {
    json!({
        "apiVersion": API_CONTENT,
        "kind": "Comment",
        "metadata": { "name": reply_id },
        "spec": {
            "content": content,
            "subjectRef": {
                "group": "content.halo.run",
                "kind": "Post",
                "name": post_name,
                "version": "v1alpha1",
            },
            "parentId": parent_id,
        },
    })
}

pub fn publish_path(name: &str, head_snapshot: Option<&str>) -> String {
    match head_snapshot.map(str::trim).filter(|value| !value.is_empty()) {
        Some(snapshot) => format!(
            "{CONSOLE_POSTS}/{name}/publish?headSnapshot={}&async=false",
            utf8_percent_encode(snapshot, QUERY_VALUE)
        ),
        None => format!("{CONSOLE_POSTS}/{name}/publish?async=false"),
    }
}

pub fn head_snapshot(post: &Value) -> Option<String> {
    ["headSnapshot", "releaseSnapshot"].iter().find_map(|key| {
        ["status", "spec"]
            .iter()
            .find_map(|section| non_blank(post.get(section).and_then(|value| value.get(key))))
    })
}

pub fn metadata_name(resource: &Value) -> Option<String> {
    non_blank(resource.pointer("/metadata/name"))
}

/// Username out of a user-detail or user-list item.
pub fn username(user: &Value) -> Option<String> {
    for key in ["username", "name", "displayName"] {
        for section in ["metadata", "spec"] {
            if let Some(name) = non_blank(user.get(section).and_then(|value| value.get(key))) {
                return Some(name);
            }
        }
    }
    non_blank(user.get("name"))
}

fn non_blank(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(text) => text.trim().to_string(),
        Value::Null | Value::Bool(false) => return None,
        other => other.to_string(),
    };
    if text.is_empty() { None } else { Some(text) }
}
