//! Shared target-location cascade for policy handlers.
//!
//! Tiers, most stable first: known-stable resource-id fragment, exact
//! text/description, substring, fuzzy text (Jaro-Winkler), and finally a
//! fixed fractional coordinate on the device profile. Each tier carries its
//! own confidence band; the rationale names the tier and the matched phrase
//! so logs show how a target was found.

use postpilot_common::protocol::{Target, UiElement};
use postpilot_common::Evidence;
use strsim::jaro_winkler;

pub const CONF_RESOURCE_ID: f32 = 0.96;
pub const CONF_EXACT: f32 = 0.92;
pub const CONF_SUBSTRING: f32 = 0.86;
pub const CONF_FUZZY: f32 = 0.82;
pub const CONF_COORDINATE: f32 = 0.65;

/// Declarative description of one control to find.
#[derive(Debug, Clone, Copy)]
pub struct ControlSpec {
    /// Resource-id fragments known to survive app updates for this control.
    /// Usually empty: identifiers drift and text does not.
    pub id_fragments: &'static [&'static str],
    /// Exact text or description matches.
    pub exact: &'static [&'static str],
    /// Substring matches over text and description.
    pub substrings: &'static [&'static str],
    /// Candidates for the fuzzy tier.
    pub fuzzy: &'static [&'static str],
}

impl ControlSpec {
    pub const fn phrases(
        exact: &'static [&'static str],
        substrings: &'static [&'static str],
    ) -> Self {
        Self {
            id_fragments: &[],
            exact,
            substrings,
            fuzzy: &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    ResourceId,
    Exact,
    Substring,
    Fuzzy,
}

#[derive(Debug, Clone)]
pub struct Located {
    pub index: usize,
    pub confidence: f32,
    pub tier: MatchTier,
    pub matched: String,
}

impl Located {
    pub fn target(&self, elements: &[UiElement]) -> Target {
        Target::from_element(self.index, &elements[self.index])
    }

    pub fn rationale(&self, control: &str) -> String {
        let tier = match self.tier {
            MatchTier::ResourceId => "resource id",
            MatchTier::Exact => "exact match",
            MatchTier::Substring => "substring match",
            MatchTier::Fuzzy => "fuzzy match",
        };
        format!("{} located by {} {:?}", control, tier, self.matched)
    }
}

/// Walk the cascade for one control. Returns the first tier that produces a
/// match; prefers clickable elements when a phrase matches several.
pub fn find_control(
    elements: &[UiElement],
    evidence: &Evidence,
    spec: &ControlSpec,
    fuzzy_min: f64,
) -> Option<Located> {
    for fragment in spec.id_fragments {
        if let Some(index) = evidence.find_resource_id(fragment) {
            return Some(Located {
                index,
                confidence: CONF_RESOURCE_ID,
                tier: MatchTier::ResourceId,
                matched: fragment.to_string(),
            });
        }
    }

    for phrase in spec.exact {
        let text_hit = evidence.find_text_exact(phrase);
        let desc_hit = evidence.find_desc_exact(phrase);
        if let Some(index) = prefer_clickable(elements, text_hit, desc_hit) {
            return Some(Located {
                index,
                confidence: CONF_EXACT,
                tier: MatchTier::Exact,
                matched: phrase.to_string(),
            });
        }
    }

    for phrase in spec.substrings {
        let text_hit = evidence.find_text_contains(phrase);
        let desc_hit = evidence.find_desc_contains(phrase);
        if let Some(index) = prefer_clickable(elements, text_hit, desc_hit) {
            return Some(Located {
                index,
                confidence: CONF_SUBSTRING,
                tier: MatchTier::Substring,
                matched: phrase.to_string(),
            });
        }
    }

    for candidate in spec.fuzzy {
        let mut best: Option<(usize, f64)> = None;
        for (index, text) in evidence.texts() {
            if text.is_empty() {
                continue;
            }
            let score = jaro_winkler(text, candidate);
            if score >= fuzzy_min && best.map_or(true, |(_, b)| score > b) {
                best = Some((index, score));
            }
        }
        if let Some((index, _)) = best {
            return Some(Located {
                index,
                confidence: CONF_FUZZY,
                tier: MatchTier::Fuzzy,
                matched: candidate.to_string(),
            });
        }
    }

    None
}

/// Of two candidate indices, pick a clickable one when available, else the
/// first present. Accessibility dumps often mark the label clickable and the
/// sibling not, so this keeps taps on the control that accepts them.
fn prefer_clickable(
    elements: &[UiElement],
    first: Option<usize>,
    second: Option<usize>,
) -> Option<usize> {
    match (first, second) {
        (Some(a), Some(b)) => {
            if elements.get(a).map_or(false, |e| e.clickable) {
                Some(a)
            } else if elements.get(b).map_or(false, |e| e.clickable) {
                Some(b)
            } else {
                Some(a)
            }
        }
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}
