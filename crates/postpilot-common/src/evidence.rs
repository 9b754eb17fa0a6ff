//! Derived features of a UI snapshot.
//!
//! Every classification and policy decision works off an `Evidence` value
//! rather than the raw elements: lowercased, trimmed text and description per
//! element, plus one concatenated blob for cheap substring queries. Extraction
//! is pure and never fails; missing fields are already empty strings at the
//! protocol layer.

use crate::protocol::UiElement;

#[derive(Debug, Clone, PartialEq)]
pub struct Evidence {
    texts: Vec<String>,
    descs: Vec<String>,
    resource_ids: Vec<String>,
    all_text: String,
}

impl Evidence {
    pub fn extract(elements: &[UiElement]) -> Self {
        let texts: Vec<String> = elements
            .iter()
            .map(|e| e.text.trim().to_lowercase())
            .collect();
        let descs: Vec<String> = elements
            .iter()
            .map(|e| e.desc.trim().to_lowercase())
            .collect();
        let resource_ids: Vec<String> = elements
            .iter()
            .map(|e| e.resource_id.trim().to_lowercase())
            .collect();

        let mut parts: Vec<&str> = Vec::with_capacity(texts.len() + descs.len());
        parts.extend(texts.iter().filter(|s| !s.is_empty()).map(String::as_str));
        parts.extend(descs.iter().filter(|s| !s.is_empty()).map(String::as_str));
        let all_text = parts.join(" ");

        Self {
            texts,
            descs,
            resource_ids,
            all_text,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn text(&self, index: usize) -> &str {
        self.texts.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn desc(&self, index: usize) -> &str {
        self.descs.get(index).map(String::as_str).unwrap_or("")
    }

    /// The concatenated lowercase blob (texts then descriptions).
    pub fn all_text(&self) -> &str {
        &self.all_text
    }

    /// Substring query against the blob. `phrase` must already be lowercase.
    pub fn contains(&self, phrase: &str) -> bool {
        self.all_text.contains(phrase)
    }

    pub fn texts(&self) -> impl Iterator<Item = (usize, &str)> {
        self.texts.iter().map(String::as_str).enumerate()
    }

    pub fn descs(&self) -> impl Iterator<Item = (usize, &str)> {
        self.descs.iter().map(String::as_str).enumerate()
    }

    pub fn find_text_exact(&self, needle: &str) -> Option<usize> {
        self.texts.iter().position(|t| t == needle)
    }

    pub fn find_desc_exact(&self, needle: &str) -> Option<usize> {
        self.descs.iter().position(|d| d == needle)
    }

    pub fn find_text_contains(&self, needle: &str) -> Option<usize> {
        self.texts
            .iter()
            .position(|t| !t.is_empty() && t.contains(needle))
    }

    pub fn find_desc_contains(&self, needle: &str) -> Option<usize> {
        self.descs
            .iter()
            .position(|d| !d.is_empty() && d.contains(needle))
    }

    /// Match a fragment of the (version-unstable) resource identifier.
    pub fn find_resource_id(&self, fragment: &str) -> Option<usize> {
        self.resource_ids
            .iter()
            .position(|r| !r.is_empty() && r.contains(fragment))
    }

    pub fn any_resource_id(&self, fragment: &str) -> bool {
        self.find_resource_id(fragment).is_some()
    }
}
