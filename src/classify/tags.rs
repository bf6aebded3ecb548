//! Tag partitioning: tools vs. industries.

use crate::config::{TOOL_KEYWORDS, TOOL_PROMOTION_COUNT};

pub struct TagPartitioner {
    dictionary: Vec<String>,
    promotion_count: usize,
}

impl TagPartitioner {
    pub fn new(dictionary: &[&str], promotion_count: usize) -> Self {
        Self {
            dictionary: dictionary.iter().map(|k| k.to_lowercase()).collect(),
            promotion_count,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(TOOL_KEYWORDS, TOOL_PROMOTION_COUNT)
    }

    /// Split free-text tags into (tools, industries). A tag counts as a tool
    /// when it contains any dictionary keyword, case-insensitively. When no
    /// tag matches but tags exist, the first few raw tags are promoted into
    /// tools so the field is never trivially empty.
    pub fn partition(&self, tags: &[String]) -> (Vec<String>, Vec<String>) {
        let mut tools = Vec::new();
        let mut industries = Vec::new();

        for tag in tags {
            let lower = tag.to_lowercase();
            if self.dictionary.iter().any(|kw| lower.contains(kw.as_str())) {
                tools.push(tag.clone());
            } else {
                industries.push(tag.clone());
            }
        }

        if tools.is_empty() && !tags.is_empty() {
            tools = tags.iter().take(self.promotion_count).cloned().collect();
        }

        (tools, industries)
    }
}
