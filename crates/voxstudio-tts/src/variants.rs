//! Voice-variant selection
//!
//! Local engines expose few voices, so the studio offers "variants" that
//! derive extra characters from pitch/rate shifts. Matching a variant to a
//! concrete engine voice is a priority-ordered rule table: the first rule
//! that applies to the variant and finds a matching voice wins. A native
//! gender match keeps the engine voice's own pitch; otherwise the variant's
//! pitch shift simulates the character on the fallback voice.

use crate::types::{VoiceGender, VoiceInfo};

/// A derived voice character: pitch/rate multipliers applied on top of an
/// engine voice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceVariant {
    pub id: &'static str,
    pub label: &'static str,
    pub pitch: f32,
    pub rate: f32,
}

/// Built-in variant profiles.
pub const VOICE_VARIANTS: &[VoiceVariant] = &[
    VoiceVariant {
        id: "standard",
        label: "Standard",
        pitch: 1.0,
        rate: 1.0,
    },
    VoiceVariant {
        id: "male_deep",
        label: "Male (deep)",
        pitch: 0.8,
        rate: 0.9,
    },
    VoiceVariant {
        id: "male_medium",
        label: "Male (medium)",
        pitch: 0.85,
        rate: 1.0,
    },
    VoiceVariant {
        id: "male_fast",
        label: "Male (fast)",
        pitch: 0.9,
        rate: 1.15,
    },
    VoiceVariant {
        id: "female_soft",
        label: "Female (soft)",
        pitch: 1.1,
        rate: 0.95,
    },
    VoiceVariant {
        id: "female_bright",
        label: "Female (bright)",
        pitch: 1.2,
        rate: 1.05,
    },
];

/// The voice and effective pitch/rate chosen for a variant.
#[derive(Debug, Clone, Copy)]
pub struct VariantSelection<'a> {
    pub voice: Option<&'a VoiceInfo>,
    pub pitch: f32,
    pub rate: f32,
}

struct VariantRule {
    applies: fn(&VoiceVariant) -> bool,
    voice_matches: fn(&VoiceInfo) -> bool,
}

/// Priority-ordered matching table. Rules are tried top to bottom; the
/// first one that applies to the variant and finds a voice decides.
const RULES: &[VariantRule] = &[
    VariantRule {
        applies: |v| v.id.starts_with("male"),
        voice_matches: |info| info.gender == Some(VoiceGender::Male),
    },
    VariantRule {
        applies: |v| v.id.starts_with("female"),
        voice_matches: |info| info.gender == Some(VoiceGender::Female),
    },
];

pub fn variant_by_id(id: &str) -> Option<&'static VoiceVariant> {
    VOICE_VARIANTS.iter().find(|v| v.id == id)
}

/// Resolve a variant against the voices an engine actually offers.
///
/// A native gender match returns that voice with pitch 1.0 (the voice
/// already carries the character) and the variant's rate; otherwise the
/// first available voice is used with the variant's full pitch/rate shift.
pub fn resolve_voice<'a>(variant: &VoiceVariant, voices: &'a [VoiceInfo]) -> VariantSelection<'a> {
    for rule in RULES {
        if (rule.applies)(variant) {
            if let Some(voice) = voices.iter().find(|v| (rule.voice_matches)(v)) {
                return VariantSelection {
                    voice: Some(voice),
                    pitch: 1.0,
                    rate: variant.rate,
                };
            }
        }
    }
    VariantSelection {
        voice: voices.first(),
        pitch: variant.pitch,
        rate: variant.rate,
    }
}
