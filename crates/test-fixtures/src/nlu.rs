//! Scripted NLU service doubles: entity extraction, claim extraction, and
//! query decomposition with configurable failure modes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use lancet_core::errors::{ExtractionError, LancetResult};
use lancet_core::models::{ExtractedEntities, RawClaimSet};
use lancet_core::traits::{ClaimExtractor, EntityExtractor, TextGenerator};

/// Dictionary-based entity tagger over a small built-in surgical vocabulary.
#[derive(Debug, Clone)]
pub struct StaticEntityExtractor {
    procedures: Vec<String>,
    anatomy: Vec<String>,
    instruments: Vec<String>,
    complications: Vec<String>,
}

impl Default for StaticEntityExtractor {
    fn default() -> Self {
        let list = |terms: &[&str]| terms.iter().map(|t| t.to_string()).collect();
        Self {
            procedures: list(&[
                "appendectomy",
                "cholecystectomy",
                "thyroidectomy",
                "hernia repair",
                "colectomy",
            ]),
            anatomy: list(&[
                "appendix",
                "gallbladder",
                "cecum",
                "thyroid",
                "cystic duct",
                "colon",
            ]),
            instruments: list(&[
                "scalpel",
                "trocar",
                "laparoscope",
                "forceps",
                "stapler",
                "clip applier",
            ]),
            complications: list(&["bleeding", "infection", "perforation", "bile leak"]),
        }
    }
}

impl StaticEntityExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_procedures(mut self, procedures: &[&str]) -> Self {
        self.procedures = procedures.iter().map(|p| p.to_string()).collect();
        self
    }
}

#[async_trait]
impl EntityExtractor for StaticEntityExtractor {
    async fn extract_entities(&self, text: &str) -> LancetResult<ExtractedEntities> {
        let haystack = text.to_lowercase();
        let matches = |terms: &[String]| {
            terms
                .iter()
                .filter(|t| haystack.contains(t.as_str()))
                .cloned()
                .collect::<Vec<_>>()
        };
        Ok(ExtractedEntities {
            procedures: matches(&self.procedures),
            anatomy: matches(&self.anatomy),
            instruments: matches(&self.instruments),
            complications: matches(&self.complications),
            ..Default::default()
        })
    }
}

/// Claim extractor returning a canned payload, or failing on demand.
pub struct ScriptedClaimExtractor {
    claims: Option<RawClaimSet>,
    calls: AtomicUsize,
}

impl ScriptedClaimExtractor {
    /// Always returns the given payload.
    pub fn returning(claims: RawClaimSet) -> Self {
        Self {
            claims: Some(claims),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fails, as an unreachable or unconfigured service would.
    pub fn failing() -> Self {
        Self {
            claims: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClaimExtractor for ScriptedClaimExtractor {
    async fn extract_claims(&self, _answer: &str, _query: &str) -> LancetResult<RawClaimSet> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.claims {
            Some(claims) => Ok(claims.clone()),
            None => Err(ExtractionError::ServiceUnavailable {
                reason: "scripted failure".into(),
            }
            .into()),
        }
    }
}

enum DecomposeScript {
    Subqueries(Vec<String>),
    Empty,
    Fail,
}

/// Text-generation double covering decomposition and canned answers.
pub struct ScriptedDecomposer {
    script: DecomposeScript,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedDecomposer {
    pub fn returning(subqueries: &[&str]) -> Self {
        Self {
            script: DecomposeScript::Subqueries(
                subqueries.iter().map(|s| s.to_string()).collect(),
            ),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Service "succeeds" but produces nothing usable.
    pub fn returning_empty() -> Self {
        Self {
            script: DecomposeScript::Empty,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            script: DecomposeScript::Fail,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Delay every call, for exercising per-call timeouts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedDecomposer {
    async fn decompose(&self, _query: &str) -> LancetResult<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.script {
            DecomposeScript::Subqueries(subqueries) => Ok(subqueries.clone()),
            DecomposeScript::Empty => Ok(Vec::new()),
            DecomposeScript::Fail => Err(ExtractionError::ServiceUnavailable {
                reason: "scripted failure".into(),
            }
            .into()),
        }
    }

    async fn generate_answer(&self, _query: &str, contexts: &[String]) -> LancetResult<String> {
        Ok(format!("draft answer over {} contexts", contexts.len()))
    }
}
