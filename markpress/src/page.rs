//! Data records handed to page templates, and their conversion into template values.
//!
//! Every record becomes a [`Value::Object`] with snake_case keys, so a post template reads
//! `{{.metadata.title}}` and `{{.content}}`, and the index template ranges over `{{.posts}}`.
//!
//! Templates are plain text templates, so strings are HTML-escaped here before they reach them.
//! The rendered post body in `content` is the only value inserted verbatim.

use crate::{PostMetadata, PostRecord};
use gtmpl::Value;
use pulldown_cmark_escape::{escape_href, escape_html};
use std::collections::HashMap;

/// Data for the index page: every post, newest first.
#[derive(Clone, Copy)]
pub struct IndexPageData<'a> {
    pub posts: &'a [PostRecord],
    pub page: &'a str,
}

/// Data for a page with no per-post content, such as the about page.
#[derive(Clone, Copy)]
pub struct StaticPageData<'a> {
    pub page: &'a str,
    pub title: &'a str,
}

fn string(s: &str) -> Value {
    Value::String(s.to_owned())
}

fn escaped(s: &str) -> Value {
    let mut out = String::with_capacity(s.len());
    // Writing to a `String` cannot fail
    let _ = escape_html(&mut out, s);
    Value::String(out)
}

fn escaped_href(s: &str) -> Value {
    let mut out = String::with_capacity(s.len());
    let _ = escape_href(&mut out, s);
    Value::String(out)
}

impl From<&PostMetadata> for Value {
    fn from(metadata: &PostMetadata) -> Value {
        let date = metadata.date;

        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("slug".to_owned(), escaped(&metadata.slug));
        m.insert("title".to_owned(), escaped(&metadata.title));
        m.insert("description".to_owned(), escaped(&metadata.description));
        m.insert(
            "date".to_owned(),
            Value::String(date.strftime("%Y-%m-%d").to_string()),
        );
        m.insert("datetime".to_owned(), Value::String(date.to_string()));
        m.insert(
            "date_human".to_owned(),
            Value::String(date.strftime("%B %-d, %Y").to_string()),
        );
        m.insert("language".to_owned(), escaped(&metadata.language));
        m.insert(
            "tags".to_owned(),
            Value::Array(metadata.tags.iter().map(|tag| escaped(tag)).collect()),
        );
        Value::Object(m)
    }
}

impl From<&PostRecord> for Value {
    fn from(post: &PostRecord) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("metadata".to_owned(), Value::from(&post.metadata));
        m.insert("content".to_owned(), string(&post.content));
        m.insert("page".to_owned(), string(post.page));
        m.insert("url".to_owned(), escaped_href(&post.url()));
        Value::Object(m)
    }
}

impl From<&IndexPageData<'_>> for Value {
    fn from(index: &IndexPageData<'_>) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert(
            "posts".to_owned(),
            Value::Array(index.posts.iter().map(Value::from).collect()),
        );
        m.insert("page".to_owned(), string(index.page));
        Value::Object(m)
    }
}

impl From<&StaticPageData<'_>> for Value {
    fn from(data: &StaticPageData<'_>) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("page".to_owned(), string(data.page));
        m.insert("title".to_owned(), escaped(data.title));
        Value::Object(m)
    }
}
