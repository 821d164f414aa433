//! Checkable factual claims extracted from a generated answer.
//!
//! The extraction service returns loosely-typed JSON. `RawClaimSet` is the
//! permissive boundary form; `ClaimSet::from_raw` applies strict per-category
//! field validation and reports every record it has to drop, so garbage from
//! the service never reaches verification.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The four verifiable claim categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimCategory {
    Instrument,
    StepOrder,
    Anatomy,
    Complication,
}

impl ClaimCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Instrument => "instruments",
            Self::StepOrder => "step order",
            Self::Anatomy => "anatomy",
            Self::Complication => "complications",
        }
    }
}

/// Ordering relation asserted between two procedure steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepRelation {
    #[default]
    Precedes,
    Follows,
    Requires,
}

impl StepRelation {
    fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "" | "PRECEDES" => Some(Self::Precedes),
            "FOLLOWS" => Some(Self::Follows),
            "REQUIRES" => Some(Self::Requires),
            _ => None,
        }
    }
}

/// Relation asserted between a procedure and an anatomical structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnatomyRelation {
    #[default]
    Involves,
    Targets,
    Avoids,
    Identifies,
}

impl AnatomyRelation {
    fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "" | "INVOLVES" => Some(Self::Involves),
            "TARGETS" => Some(Self::Targets),
            "AVOIDS" => Some(Self::Avoids),
            "IDENTIFIES" => Some(Self::Identifies),
            _ => None,
        }
    }
}

/// "Step X uses instrument Y."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentClaim {
    pub step: String,
    pub instrument: String,
    #[serde(default)]
    pub usage: String,
}

/// "In procedure P, step A precedes/follows/requires step B."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOrderClaim {
    pub procedure: String,
    pub step_before: String,
    pub step_after: String,
    pub relation: StepRelation,
}

/// "Procedure P involves/targets/avoids/identifies structure S."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnatomyClaim {
    pub procedure: String,
    pub structure: String,
    pub relation: AnatomyRelation,
}

/// "Procedure P may cause complication C, managed by M."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplicationClaim {
    pub procedure: String,
    pub complication: String,
    #[serde(default)]
    pub management: String,
}

/// A single checkable claim, tagged by category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Claim {
    Instrument(InstrumentClaim),
    StepOrder(StepOrderClaim),
    Anatomy(AnatomyClaim),
    Complication(ComplicationClaim),
}

impl Claim {
    pub fn category(&self) -> ClaimCategory {
        match self {
            Self::Instrument(_) => ClaimCategory::Instrument,
            Self::StepOrder(_) => ClaimCategory::StepOrder,
            Self::Anatomy(_) => ClaimCategory::Anatomy,
            Self::Complication(_) => ClaimCategory::Complication,
        }
    }

    /// Lowercased one-line rendering, used for display and keyword scans.
    pub fn describe(&self) -> String {
        let text = match self {
            Self::Instrument(c) => format!("step '{}' uses instrument '{}'", c.step, c.instrument),
            Self::StepOrder(c) => format!(
                "in '{}', step '{}' {:?} step '{}'",
                c.procedure, c.step_before, c.relation, c.step_after
            ),
            Self::Anatomy(c) => format!(
                "procedure '{}' {:?} anatomy '{}'",
                c.procedure, c.relation, c.structure
            ),
            Self::Complication(c) => format!(
                "procedure '{}' may cause complication '{}' managed by '{}'",
                c.procedure, c.complication, c.management
            ),
        };
        text.to_lowercase()
    }
}

/// All claims extracted from one answer, grouped by category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimSet {
    pub instrument_claims: Vec<InstrumentClaim>,
    pub step_order_claims: Vec<StepOrderClaim>,
    pub anatomy_claims: Vec<AnatomyClaim>,
    pub complication_claims: Vec<ComplicationClaim>,
}

impl ClaimSet {
    pub fn total(&self) -> usize {
        self.instrument_claims.len()
            + self.step_order_claims.len()
            + self.anatomy_claims.len()
            + self.complication_claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Strictly validate a raw service payload, collecting one defect per
    /// dropped record. Missing string fields decode as empty strings and are
    /// left for verification to reject; only wrong-shaped records are dropped.
    pub fn from_raw(raw: RawClaimSet) -> (Self, Vec<ClaimDefect>) {
        let mut set = Self::default();
        let mut defects = Vec::new();

        for value in raw.instrument_claims {
            match decode::<RawInstrumentClaim>(&value) {
                Ok(c) => set.instrument_claims.push(InstrumentClaim {
                    step: c.step,
                    instrument: c.instrument,
                    usage: c.usage,
                }),
                Err(reason) => defects.push(ClaimDefect {
                    category: ClaimCategory::Instrument,
                    reason,
                    payload: value,
                }),
            }
        }

        for value in raw.step_order_claims {
            match decode::<RawStepOrderClaim>(&value) {
                Ok(c) => match StepRelation::parse(&c.relationship) {
                    Some(relation) => set.step_order_claims.push(StepOrderClaim {
                        procedure: c.procedure,
                        step_before: c.step_before,
                        step_after: c.step_after,
                        relation,
                    }),
                    None => defects.push(ClaimDefect {
                        category: ClaimCategory::StepOrder,
                        reason: format!("unknown step relation '{}'", c.relationship),
                        payload: value,
                    }),
                },
                Err(reason) => defects.push(ClaimDefect {
                    category: ClaimCategory::StepOrder,
                    reason,
                    payload: value,
                }),
            }
        }

        for value in raw.anatomy_claims {
            match decode::<RawAnatomyClaim>(&value) {
                Ok(c) => match AnatomyRelation::parse(&c.relationship) {
                    Some(relation) => set.anatomy_claims.push(AnatomyClaim {
                        procedure: c.procedure,
                        structure: c.anatomical_structure,
                        relation,
                    }),
                    None => defects.push(ClaimDefect {
                        category: ClaimCategory::Anatomy,
                        reason: format!("unknown anatomy relation '{}'", c.relationship),
                        payload: value,
                    }),
                },
                Err(reason) => defects.push(ClaimDefect {
                    category: ClaimCategory::Anatomy,
                    reason,
                    payload: value,
                }),
            }
        }

        for value in raw.complication_claims {
            match decode::<RawComplicationClaim>(&value) {
                Ok(c) => set.complication_claims.push(ComplicationClaim {
                    procedure: c.procedure,
                    complication: c.complication,
                    management: c.management,
                }),
                Err(reason) => defects.push(ClaimDefect {
                    category: ClaimCategory::Complication,
                    reason,
                    payload: value,
                }),
            }
        }

        (set, defects)
    }

    /// Iterate every claim as the tagged union, category order.
    pub fn iter(&self) -> impl Iterator<Item = Claim> + '_ {
        self.instrument_claims
            .iter()
            .cloned()
            .map(Claim::Instrument)
            .chain(self.step_order_claims.iter().cloned().map(Claim::StepOrder))
            .chain(self.anatomy_claims.iter().cloned().map(Claim::Anatomy))
            .chain(
                self.complication_claims
                    .iter()
                    .cloned()
                    .map(Claim::Complication),
            )
    }
}

/// Loosely-typed claims as returned by the extraction service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawClaimSet {
    pub instrument_claims: Vec<Value>,
    pub step_order_claims: Vec<Value>,
    pub anatomy_claims: Vec<Value>,
    pub complication_claims: Vec<Value>,
}

/// One record dropped at the claim boundary, with the reason it was dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimDefect {
    pub category: ClaimCategory,
    pub reason: String,
    pub payload: Value,
}

fn decode<T: serde::de::DeserializeOwned>(value: &Value) -> Result<T, String> {
    serde_json::from_value(value.clone()).map_err(|e| e.to_string())
}

// Permissive record shapes: absent fields decode as empty strings, unknown
// fields are ignored, wrong value types are rejected.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawInstrumentClaim {
    step: String,
    instrument: String,
    usage: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStepOrderClaim {
    procedure: String,
    step_before: String,
    step_after: String,
    relationship: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawAnatomyClaim {
    procedure: String,
    anatomical_structure: String,
    relationship: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawComplicationClaim {
    procedure: String,
    complication: String,
    management: String,
}
