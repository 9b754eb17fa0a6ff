//! Signal → weight tables, kept as data so each rule is independently
//! testable and diffable.

use postpilot_common::Evidence;

/// How a signal's phrase is matched against the evidence.
///
/// Text and description phrases are the primary signals; resource-id
/// fragments are reassigned across app builds and carry boost weights only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    /// Substring of the concatenated all-text blob.
    AllText,
    /// Exact match of one element's text.
    TextExact,
    /// Substring of one element's text.
    TextContains,
    /// Exact match of one element's description.
    DescExact,
    /// Substring of one element's description.
    DescContains,
    /// Fragment of one element's resource identifier (boost only).
    ResourceId,
    /// A numeric percent indicator anywhere in the blob (e.g. "47%").
    Percent,
}

#[derive(Debug, Clone, Copy)]
pub struct Signal {
    pub kind: SignalKind,
    pub phrase: &'static str,
    pub weight: f32,
    pub tag: &'static str,
}

impl Signal {
    pub const fn all_text(phrase: &'static str, weight: f32, tag: &'static str) -> Self {
        Self {
            kind: SignalKind::AllText,
            phrase,
            weight,
            tag,
        }
    }

    pub const fn text_exact(phrase: &'static str, weight: f32, tag: &'static str) -> Self {
        Self {
            kind: SignalKind::TextExact,
            phrase,
            weight,
            tag,
        }
    }

    pub const fn text_contains(phrase: &'static str, weight: f32, tag: &'static str) -> Self {
        Self {
            kind: SignalKind::TextContains,
            phrase,
            weight,
            tag,
        }
    }

    pub const fn desc_exact(phrase: &'static str, weight: f32, tag: &'static str) -> Self {
        Self {
            kind: SignalKind::DescExact,
            phrase,
            weight,
            tag,
        }
    }

    pub const fn desc_contains(phrase: &'static str, weight: f32, tag: &'static str) -> Self {
        Self {
            kind: SignalKind::DescContains,
            phrase,
            weight,
            tag,
        }
    }

    pub const fn resource_id(fragment: &'static str, weight: f32, tag: &'static str) -> Self {
        Self {
            kind: SignalKind::ResourceId,
            phrase: fragment,
            weight,
            tag,
        }
    }

    pub const fn percent(weight: f32, tag: &'static str) -> Self {
        Self {
            kind: SignalKind::Percent,
            phrase: "",
            weight,
            tag,
        }
    }

    /// Whether this signal fires against the given evidence. The percent
    /// matcher is evaluated by the classifier, which owns the compiled regex.
    pub fn hits(&self, evidence: &Evidence) -> bool {
        match self.kind {
            SignalKind::AllText => evidence.contains(self.phrase),
            SignalKind::TextExact => evidence.find_text_exact(self.phrase).is_some(),
            SignalKind::TextContains => evidence.find_text_contains(self.phrase).is_some(),
            SignalKind::DescExact => evidence.find_desc_exact(self.phrase).is_some(),
            SignalKind::DescContains => evidence.find_desc_contains(self.phrase).is_some(),
            SignalKind::ResourceId => evidence.any_resource_id(self.phrase),
            SignalKind::Percent => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postpilot_common::protocol::UiElement;

    fn evidence(entries: &[(&str, &str, &str)]) -> Evidence {
        let elements: Vec<UiElement> = entries
            .iter()
            .map(|(text, desc, id)| UiElement {
                text: text.to_string(),
                desc: desc.to_string(),
                resource_id: id.to_string(),
                ..Default::default()
            })
            .collect();
        Evidence::extract(&elements)
    }

    #[test]
    fn exact_does_not_fire_on_substring() {
        let ev = evidence(&[("Not now, thanks", "", "")]);
        assert!(!Signal::text_exact("not now", 0.4, "t").hits(&ev));
        assert!(Signal::text_contains("not now", 0.4, "t").hits(&ev));
    }

    #[test]
    fn all_text_spans_text_and_desc() {
        let ev = evidence(&[("", "Create", ""), ("For You", "", "")]);
        assert!(Signal::all_text("create", 0.3, "t").hits(&ev));
        assert!(Signal::all_text("for you", 0.3, "t").hits(&ev));
    }

    #[test]
    fn resource_id_fragment() {
        let ev = evidence(&[("Post", "", "com.instagram.android:id/row_caption")]);
        assert!(Signal::resource_id("caption", 0.1, "t").hits(&ev));
        assert!(!Signal::resource_id("publish", 0.1, "t").hits(&ev));
    }

    #[test]
    fn percent_is_classifier_evaluated() {
        let ev = evidence(&[("47%", "", "")]);
        assert!(!Signal::percent(0.3, "t").hits(&ev));
    }
}
