//! Atomic query artifacts

use std::collections::HashMap;

use serde_json::{json, Map, Value};

use crate::method::ParamValue;

/// One highlighted field of a search request
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightField {
    pub field: String,
    pub pre_tags: Vec<String>,
    pub post_tags: Vec<String>,
    /// Extra backend options such as `fragment_size`
    pub options: HashMap<String, ParamValue>,
}

impl HighlightField {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            pre_tags: Vec::new(),
            post_tags: Vec::new(),
            options: HashMap::new(),
        }
    }

    pub fn with_tags(mut self, pre_tag: impl Into<String>, post_tag: impl Into<String>) -> Self {
        self.pre_tags.push(pre_tag.into());
        self.post_tags.push(post_tag.into());
        self
    }

    pub fn with_options(mut self, options: HashMap<String, ParamValue>) -> Self {
        self.options = options;
        self
    }

    /// Renders the per-field highlight body
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        for (key, value) in &self.options {
            body.insert(key.clone(), value.to_json());
        }
        if !self.pre_tags.is_empty() {
            body.insert("pre_tags".into(), json!(self.pre_tags));
            body.insert("post_tags".into(), json!(self.post_tags));
        }
        Value::Object(body)
    }
}

/// Query artifact handed back to the query compiler
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AtomicQuery {
    /// Backend query clause, opaque to the translator
    query: Option<Value>,
    highlighter: Vec<HighlightField>,
}

impl AtomicQuery {
    pub fn new(query: Value) -> Self {
        Self {
            query: Some(query),
            highlighter: Vec::new(),
        }
    }

    /// A query that only contributes highlighted fields
    pub fn highlight_only(field: HighlightField) -> Self {
        Self {
            query: None,
            highlighter: vec![field],
        }
    }

    pub fn query(&self) -> Option<&Value> {
        self.query.as_ref()
    }

    pub fn highlighter(&self) -> &[HighlightField] {
        &self.highlighter
    }

    /// Renders `{"query": ..., "highlight": {"fields": {...}}}`; absent parts are omitted
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        if let Some(query) = &self.query {
            body.insert("query".into(), query.clone());
        }
        if !self.highlighter.is_empty() {
            let fields: Map<String, Value> = self
                .highlighter
                .iter()
                .map(|h| (h.field.clone(), h.to_json()))
                .collect();
            body.insert("highlight".into(), json!({ "fields": fields }));
        }
        Value::Object(body)
    }
}
