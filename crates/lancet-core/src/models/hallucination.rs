use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::claim::Claim;

/// How dangerous a hallucination of a given type is if surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Penalty weight used by the safety score.
    pub fn weight(&self) -> f64 {
        match self {
            Self::Critical => 1.0,
            Self::High => 0.5,
            Self::Medium => 0.2,
            Self::Low => 0.1,
        }
    }
}

/// Taxonomy of claim-verification failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HallucinationType {
    // Anatomical
    AnatomicalStructureError,
    AnatomicalLocationError,
    AnatomicalRelationshipError,
    // Instrument
    InstrumentIncorrect,
    InstrumentNonexistent,
    InstrumentUsageError,
    // Procedural
    StepOrderError,
    StepOmission,
    StepFabrication,
    TechniqueError,
    // Complication
    ComplicationExaggerated,
    ComplicationMinimized,
    ComplicationInvented,
    ManagementError,
    // Contraindication
    ContraindicationMissed,
    ContraindicationInvented,
    // Quantitative
    DosageError,
    MeasurementError,
    StatisticError,
    // Source attribution
    NoCitation,
    FalseCitation,
    OutdatedInformation,
}

/// Taxonomy family a hallucination type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonomyCategory {
    Anatomical,
    Instrument,
    Procedural,
    Complication,
    Contraindication,
    Quantitative,
    Attribution,
}

impl TaxonomyCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Anatomical => "anatomical",
            Self::Instrument => "instrument",
            Self::Procedural => "procedural",
            Self::Complication => "complication",
            Self::Contraindication => "contraindication",
            Self::Quantitative => "quantitative",
            Self::Attribution => "attribution",
        }
    }
}

/// One unverified claim mapped onto the taxonomy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HallucinationRecord {
    pub claim: Claim,
    pub hallucination_type: HallucinationType,
    pub category: TaxonomyCategory,
    pub severity: Severity,
    /// Certainty of the classification itself, not of the underlying fact.
    pub classification_confidence: f64,
}

/// Counts per severity level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

/// Aggregate hallucination analysis for one answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HallucinationAnalysis {
    pub records: Vec<HallucinationRecord>,
    pub category_distribution: BTreeMap<TaxonomyCategory, usize>,
    pub severity_counts: SeverityCounts,
    pub recommendations: Vec<String>,
    /// 1.0 = clean; severity-weighted penalty otherwise. Always in [0, 1].
    pub safety_score: f64,
}

impl HallucinationAnalysis {
    pub fn total(&self) -> usize {
        self.records.len()
    }
}
