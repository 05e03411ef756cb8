//! Typed domain artifacts produced and consumed by the reasoning pipeline

pub mod archetype;
pub mod classification;
pub mod comparison;
pub mod config;
pub mod evidence;
pub mod facts;
pub mod judgment;
pub mod metadata;
pub mod reasoning;
pub mod snapshot;

pub use archetype::{Archetype, EvidenceModifiers};
pub use classification::{Classification, JurisdictionalCheck, LegalIssue};
pub use comparison::{
    AwardRange, ComparisonInsights, ComparisonResult, ComparisonRun, Consensus, RulingRisk,
};
pub use config::Config;
pub use evidence::{ElementScore, EvidenceScores};
pub use facts::{CaseFacts, Claim, EvidenceMention, KeyDate, Parties, Party, PartyDescription};
pub use judgment::{
    Advisory, AdvisoryText, CaseStrength, ConclusionOfLaw, CourtPreparation, EvidenceAction,
    EvidenceRecommendation, Judgment, Priority, StrategicAdvice, StrengthLabel,
};
pub use metadata::{CallRecord, PipelineMetadata};
pub use reasoning::{
    ConfidenceLevel, CounterclaimAnalysis, DamagesAnalysis, ElementFinding, EvidenceAnalysis,
    FinalDetermination, LiabilityFinding, ReasoningChain,
};
pub use snapshot::{CaseSnapshot, HearingMessage, HearingSnapshot};
