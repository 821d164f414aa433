//! petgraph-backed knowledge graph double.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use lancet_core::errors::LancetResult;
use lancet_core::models::{ProcedureContext, RelatedProcedure};
use lancet_core::traits::{GraphMatch, GraphPattern, GraphStore, NodeType, RelationType};

#[derive(Debug, Clone)]
struct Node {
    node_type: NodeType,
    name: String,
}

#[derive(Default)]
struct Inner {
    graph: DiGraph<Node, RelationType>,
    by_key: HashMap<(NodeType, String), NodeIndex>,
}

impl Inner {
    fn node(&mut self, node_type: NodeType, name: &str) -> NodeIndex {
        let key = (node_type, name.to_lowercase());
        if let Some(idx) = self.by_key.get(&key) {
            return *idx;
        }
        let idx = self.graph.add_node(Node {
            node_type,
            name: name.to_string(),
        });
        self.by_key.insert(key, idx);
        idx
    }

    fn edge(
        &mut self,
        from_type: NodeType,
        from: &str,
        relation: RelationType,
        to_type: NodeType,
        to: &str,
    ) {
        let a = self.node(from_type, from);
        let b = self.node(to_type, to);
        self.graph.add_edge(a, b, relation);
    }

    fn matching_nodes(&self, node_type: NodeType, contains: Option<&str>) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|idx| {
                let node = &self.graph[*idx];
                node.node_type == node_type
                    && contains
                        .map(|c| node.name.to_lowercase().contains(&c.to_lowercase()))
                        .unwrap_or(true)
            })
            .collect()
    }
}

/// In-memory knowledge graph with case-insensitive containment matching,
/// the same identity rule the production store applies.
#[derive(Default)]
pub struct InMemoryGraphStore {
    inner: Mutex<Inner>,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest a procedure with its typed neighborhood, mirroring the
    /// ingestion relationship map (anatomy INVOLVES, instruments REQUIRES,
    /// complications MAY_CAUSE, techniques USES_TECHNIQUE, medications
    /// REQUIRES_MEDICATION).
    #[allow(clippy::too_many_arguments)]
    pub fn add_procedure(
        &self,
        name: &str,
        anatomy: &[&str],
        instruments: &[&str],
        complications: &[&str],
        techniques: &[&str],
        medications: &[&str],
    ) {
        let mut inner = self.inner.lock().unwrap();
        inner.node(NodeType::Procedure, name);
        for entity in anatomy {
            inner.edge(
                NodeType::Procedure,
                name,
                RelationType::Involves,
                NodeType::Anatomy,
                entity,
            );
        }
        for entity in instruments {
            inner.edge(
                NodeType::Procedure,
                name,
                RelationType::Requires,
                NodeType::Instrument,
                entity,
            );
        }
        for entity in complications {
            inner.edge(
                NodeType::Procedure,
                name,
                RelationType::MayCause,
                NodeType::Complication,
                entity,
            );
        }
        for entity in techniques {
            inner.edge(
                NodeType::Procedure,
                name,
                RelationType::UsesTechnique,
                NodeType::Technique,
                entity,
            );
        }
        for entity in medications {
            inner.edge(
                NodeType::Procedure,
                name,
                RelationType::RequiresMedication,
                NodeType::Medication,
                entity,
            );
        }
    }

    /// Record an ordered step chain for a procedure (each step PRECEDES the
    /// next).
    pub fn add_step_sequence(&self, steps: &[&str]) {
        let mut inner = self.inner.lock().unwrap();
        for pair in steps.windows(2) {
            inner.edge(
                NodeType::Step,
                pair[0],
                RelationType::Precedes,
                NodeType::Step,
                pair[1],
            );
        }
    }

    /// Record that a step uses an instrument.
    pub fn add_step_instrument(&self, step: &str, instrument: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.edge(
            NodeType::Step,
            step,
            RelationType::Uses,
            NodeType::Instrument,
            instrument,
        );
    }

    /// Add a bare node with no relations.
    pub fn add_node(&self, node_type: NodeType, name: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.node(node_type, name);
    }

    /// Add an arbitrary typed edge.
    pub fn add_relation(
        &self,
        from_type: NodeType,
        from: &str,
        relation: RelationType,
        to_type: NodeType,
        to: &str,
    ) {
        let mut inner = self.inner.lock().unwrap();
        inner.edge(from_type, from, relation, to_type, to);
    }
}

#[async_trait]
impl GraphStore for InMemoryGraphStore {
    async fn match_pattern(&self, pattern: &GraphPattern) -> LancetResult<Vec<GraphMatch>> {
        let inner = self.inner.lock().unwrap();
        let from_nodes = inner.matching_nodes(pattern.from_type, pattern.from_name_contains.as_deref());

        // Node-only pattern.
        if pattern.relations.is_empty() && pattern.to_type.is_none() {
            return Ok(from_nodes
                .into_iter()
                .map(|idx| GraphMatch {
                    from: inner.graph[idx].name.clone(),
                    relation: None,
                    to: None,
                })
                .collect());
        }

        let mut rows = Vec::new();
        for from_idx in from_nodes {
            for edge in inner.graph.edges_directed(from_idx, Direction::Outgoing) {
                let relation = *edge.weight();
                if !pattern.relations.is_empty() && !pattern.relations.contains(&relation) {
                    continue;
                }
                let target = &inner.graph[edge.target()];
                if let Some(to_type) = pattern.to_type {
                    if target.node_type != to_type {
                        continue;
                    }
                }
                if let Some(contains) = &pattern.to_name_contains {
                    if !target.name.to_lowercase().contains(&contains.to_lowercase()) {
                        continue;
                    }
                }
                rows.push(GraphMatch {
                    from: inner.graph[from_idx].name.clone(),
                    relation: Some(relation),
                    to: Some(target.name.clone()),
                });
            }
        }
        Ok(rows)
    }

    async fn procedure_context(&self, name: &str) -> LancetResult<Option<ProcedureContext>> {
        let inner = self.inner.lock().unwrap();
        let Some(idx) = inner
            .matching_nodes(NodeType::Procedure, Some(name))
            .into_iter()
            .next()
        else {
            return Ok(None);
        };

        let mut context = ProcedureContext {
            procedure: inner.graph[idx].name.clone(),
            ..Default::default()
        };
        for edge in inner.graph.edges_directed(idx, Direction::Outgoing) {
            let target = &inner.graph[edge.target()];
            let bucket = match target.node_type {
                NodeType::Anatomy => &mut context.anatomy,
                NodeType::Instrument => &mut context.instruments,
                NodeType::Complication => &mut context.complications,
                NodeType::Technique => &mut context.techniques,
                NodeType::Medication => &mut context.medications,
                _ => continue,
            };
            if !bucket.contains(&target.name) {
                bucket.push(target.name.clone());
            }
        }
        Ok(Some(context))
    }

    async fn related_procedures(
        &self,
        name: &str,
        max_depth: usize,
    ) -> LancetResult<Vec<RelatedProcedure>> {
        let inner = self.inner.lock().unwrap();
        let Some(start) = inner
            .matching_nodes(NodeType::Procedure, Some(name))
            .into_iter()
            .next()
        else {
            return Ok(Vec::new());
        };

        // Breadth-first over undirected adjacency: procedures sharing an
        // entity sit two hops apart.
        let mut related = Vec::new();
        let mut visited: HashMap<NodeIndex, usize> = HashMap::from([(start, 0)]);
        let mut queue = VecDeque::from([start]);
        while let Some(idx) = queue.pop_front() {
            let depth = visited[&idx];
            if depth >= max_depth {
                continue;
            }
            for neighbor in inner.graph.neighbors_undirected(idx) {
                if visited.contains_key(&neighbor) {
                    continue;
                }
                visited.insert(neighbor, depth + 1);
                queue.push_back(neighbor);
                let node = &inner.graph[neighbor];
                if node.node_type == NodeType::Procedure {
                    related.push(RelatedProcedure {
                        name: node.name.clone(),
                        distance: depth + 1,
                    });
                }
            }
        }
        related.sort_by_key(|r| r.distance);
        related.truncate(10);
        Ok(related)
    }
}
