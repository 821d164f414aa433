use serde::{Deserialize, Serialize};

use super::entities::ExtractedEntities;

/// Which retrieval component produced an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceModality {
    /// Dense similarity search over the vector index.
    Vector,
    /// Knowledge-graph traversal.
    Graph,
}

/// Provenance and enrichment attached to a retrieved item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemMetadata {
    /// Originating document or store name.
    pub source: Option<String>,
    pub title: Option<String>,
    /// Procedure a synthetic graph item was built from.
    pub procedure: Option<String>,
    /// For graph-neighborhood items: the procedure they relate to.
    pub related_to: Option<String>,
    /// Traversal distance from the matched procedure (0 = exact match).
    pub graph_distance: Option<usize>,
    /// Related-procedure names attached during entity expansion.
    pub related_procedures: Vec<String>,
    /// Entities extracted from the item text during expansion.
    pub entities: Option<ExtractedEntities>,
}

/// One candidate produced by the vector index or the graph store.
///
/// Immutable after creation: re-weighting produces a new record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedItem {
    pub id: String,
    pub text: String,
    pub modality: SourceModality,
    /// Score as reported by the producing component.
    pub raw_score: f64,
    /// `raw_score` scaled by the modality weight.
    pub weighted_score: f64,
    pub metadata: ItemMetadata,
}

impl RetrievedItem {
    /// Copy of this item re-scored with the given modality weight.
    pub fn weighted(&self, modality_weight: f64) -> Self {
        Self {
            weighted_score: self.raw_score * modality_weight,
            ..self.clone()
        }
    }
}
