//! Decision-maker archetypes
//!
//! Four judicial temperaments that modulate the reasoning stages' tone and
//! evidence weighting. Lookup never fails: unknown ids fall back to the
//! common-sense profile.

use serde::Serialize;

/// Weight adjustments an archetype applies when evaluating evidence
#[derive(Debug, Clone, Serialize)]
pub struct EvidenceModifiers {
    pub document_weight: f64,
    pub testimony_weight: f64,
    pub photo_weight: f64,
    pub gap_penalty: f64,
    pub preference: &'static str,
}

/// A named decision-maker profile parameterizing a pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct Archetype {
    pub id: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub tone: &'static str,
    pub personality_prompt: &'static str,
    pub evidence_modifiers: EvidenceModifiers,
}

pub const DEFAULT_ARCHETYPE_ID: &str = "common_sense";

static ARCHETYPES: &[Archetype] = &[
    Archetype {
        id: "strict",
        name: "Judge Morrison",
        title: "The Strict Judge",
        tone: "formal",
        personality_prompt: "You are Judge Morrison, known for strict adherence to procedure and \
            evidence standards. You require documentary evidence for any monetary claim, give \
            minimal weight to unsupported testimony, penalize gaps in timelines and \
            documentation, follow the elements of each cause of action precisely, are skeptical \
            of round-number damages, speak formally, cite statutes by number, and do not award \
            damages that are not proven with specificity.",
        evidence_modifiers: EvidenceModifiers {
            document_weight: 1.5,
            testimony_weight: 0.5,
            photo_weight: 1.3,
            gap_penalty: -1.0,
            preference: "Strongly prefers documentary evidence. Oral testimony without \
                corroboration is insufficient.",
        },
    },
    Archetype {
        id: "common_sense",
        name: "Judge Whitehorse",
        title: "The Common-Sense Judge",
        tone: "conversational",
        personality_prompt: "You are Judge Whitehorse, known for a common-sense approach to \
            justice. You focus on the overall fairness of the situation, consider the totality \
            of the evidence rather than only documents, give reasonable weight to credible \
            testimony, look for the equitable result, use plain language, are patient with \
            unrepresented parties, and may adjust damage amounts to reflect what is truly fair.",
        evidence_modifiers: EvidenceModifiers {
            document_weight: 1.0,
            testimony_weight: 1.0,
            photo_weight: 1.0,
            gap_penalty: 0.0,
            preference: "Considers all evidence equally. Values credibility and consistency \
                over formality.",
        },
    },
    Archetype {
        id: "evidence_heavy",
        name: "Judge Ironside",
        title: "The Evidence-Heavy Judge",
        tone: "analytical",
        personality_prompt: "You are Judge Ironside, known for meticulous evidence analysis. You \
            weight documentary and photographic evidence very heavily, discount verbal claims \
            that could have been but were not documented, pay close attention to dates and \
            timestamps, systematically review evidence item by item, and reference specific \
            pieces of evidence in your reasoning.",
        evidence_modifiers: EvidenceModifiers {
            document_weight: 1.8,
            testimony_weight: 0.3,
            photo_weight: 1.6,
            gap_penalty: -1.5,
            preference: "Physical evidence is decisive. Verbal claims without backup carry \
                little weight.",
        },
    },
    Archetype {
        id: "formalist",
        name: "Judge Calloway",
        title: "The Formalist Judge",
        tone: "precise",
        personality_prompt: "You are Judge Calloway, a legal formalist. You apply each element \
            of the governing claim mechanically to the proven facts, decline to weigh equities \
            that the law does not recognize, hold the plaintiff strictly to the burden of proof \
            on every element, and write conclusions of law with explicit statutory grounding.",
        evidence_modifiers: EvidenceModifiers {
            document_weight: 1.2,
            testimony_weight: 0.8,
            photo_weight: 1.1,
            gap_penalty: -0.5,
            preference: "Evidence matters only insofar as it proves or fails to prove a legal \
                element.",
        },
    },
];

impl Archetype {
    /// Look up an archetype by id, defaulting to the common-sense profile
    /// for unknown ids
    pub fn lookup(id: &str) -> &'static Archetype {
        ARCHETYPES
            .iter()
            .find(|a| a.id == id)
            .unwrap_or_else(|| Archetype::default_profile())
    }

    pub fn default_profile() -> &'static Archetype {
        ARCHETYPES
            .iter()
            .find(|a| a.id == DEFAULT_ARCHETYPE_ID)
            .expect("default archetype is always registered")
    }

    /// All registered archetype ids
    pub fn all_ids() -> Vec<&'static str> {
        ARCHETYPES.iter().map(|a| a.id).collect()
    }
}
