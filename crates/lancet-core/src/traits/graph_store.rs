use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::LancetResult;
use crate::models::{ProcedureContext, RelatedProcedure};

/// Node labels in the knowledge graph schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Procedure,
    Step,
    Anatomy,
    Instrument,
    Complication,
    Technique,
    Medication,
}

/// Edge labels in the knowledge graph schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    Involves,
    Requires,
    MayCause,
    UsesTechnique,
    RequiresMedication,
    Uses,
    Precedes,
    Follows,
    Targets,
    Avoids,
    Identifies,
    Prevents,
    ContraindicatedWith,
}

/// A declarative pattern over the graph.
///
/// Name matching is case-insensitive substring containment: node identity at
/// this layer is by name, not surrogate key. With `relations` empty and no
/// target side, the pattern matches bare nodes of `from_type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphPattern {
    pub from_type: NodeType,
    pub from_name_contains: Option<String>,
    /// Acceptable edge labels; any listed label satisfies the pattern.
    pub relations: Vec<RelationType>,
    pub to_type: Option<NodeType>,
    pub to_name_contains: Option<String>,
}

impl GraphPattern {
    /// Pattern matching any node of `node_type` whose name contains `name`.
    pub fn node(node_type: NodeType, name: impl Into<String>) -> Self {
        Self {
            from_type: node_type,
            from_name_contains: Some(name.into()),
            relations: Vec::new(),
            to_type: None,
            to_name_contains: None,
        }
    }

    /// Pattern matching `(from)-[relation]->(to)` with named endpoints.
    pub fn relation(
        from_type: NodeType,
        from_name: impl Into<String>,
        relations: Vec<RelationType>,
        to_type: NodeType,
        to_name: impl Into<String>,
    ) -> Self {
        Self {
            from_type,
            from_name_contains: Some(from_name.into()),
            relations,
            to_type: Some(to_type),
            to_name_contains: Some(to_name.into()),
        }
    }
}

/// One row matched by a pattern query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphMatch {
    pub from: String,
    pub relation: Option<RelationType>,
    pub to: Option<String>,
}

/// Read side of the knowledge graph store.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Rows matching the pattern. The store applies case-insensitive
    /// containment to the name constraints.
    async fn match_pattern(&self, pattern: &GraphPattern) -> LancetResult<Vec<GraphMatch>>;

    /// Full neighborhood of a procedure, grouped by entity type.
    async fn procedure_context(&self, name: &str) -> LancetResult<Option<ProcedureContext>>;

    /// Procedures reachable from `name` within `max_depth` edges, nearest
    /// first.
    async fn related_procedures(
        &self,
        name: &str,
        max_depth: usize,
    ) -> LancetResult<Vec<RelatedProcedure>>;

    /// Does any edge with one of `relations` connect the named nodes?
    async fn relation_holds(
        &self,
        from_type: NodeType,
        from_name: &str,
        relations: Vec<RelationType>,
        to_type: NodeType,
        to_name: &str,
    ) -> LancetResult<bool> {
        let pattern = GraphPattern::relation(from_type, from_name, relations, to_type, to_name);
        Ok(!self.match_pattern(&pattern).await?.is_empty())
    }

    /// Does a node of `node_type` whose name contains `name` exist?
    async fn node_exists(&self, node_type: NodeType, name: &str) -> LancetResult<bool> {
        let pattern = GraphPattern::node(node_type, name);
        Ok(!self.match_pattern(&pattern).await?.is_empty())
    }
}
