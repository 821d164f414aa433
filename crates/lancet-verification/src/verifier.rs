//! Graph-based claim verification.
//!
//! Each claim category maps to a graph pattern; case-insensitive containment
//! matching on node names tolerates lexical variation between the answer and
//! the graph. An unverifiable claim is the expected signal here, not an
//! error; only a graph that cannot be queried at all degrades a claim to a
//! `QueryFailed` outcome.

use std::sync::Arc;

use tracing::{debug, warn};

use lancet_core::config::RemoteCallConfig;
use lancet_core::models::{
    AnatomyClaim, Claim, ClaimSet, ComplicationClaim, FailureReason, InstrumentClaim,
    StepOrderClaim, StepRelation, VerificationOutcome, VerificationReport,
};
use lancet_core::remote::RemotePolicy;
use lancet_core::traits::{GraphPattern, GraphStore, NodeType, RelationType};

/// Verifies extracted claims against the knowledge graph.
pub struct GraphVerifier {
    graph: Arc<dyn GraphStore>,
    policy: RemotePolicy,
}

impl GraphVerifier {
    pub fn new(graph: Arc<dyn GraphStore>, remote: &RemoteCallConfig) -> Self {
        Self {
            graph,
            policy: RemotePolicy::store(remote),
        }
    }

    /// Verify every claim and aggregate the per-category and overall scores.
    pub async fn verify(&self, claims: &ClaimSet) -> VerificationReport {
        let mut outcomes = Vec::with_capacity(claims.total());

        for claim in &claims.instrument_claims {
            outcomes.push(self.verify_instrument(claim).await);
        }
        for claim in &claims.step_order_claims {
            outcomes.push(self.verify_step_order(claim).await);
        }
        for claim in &claims.anatomy_claims {
            outcomes.push(self.verify_anatomy(claim).await);
        }
        for claim in &claims.complication_claims {
            outcomes.push(self.verify_complication(claim).await);
        }

        let report = VerificationReport::from_outcomes(outcomes);
        debug!(
            verified = report.verified_claims,
            total = report.total_claims,
            score = report.overall_score,
            "claim verification complete"
        );
        report
    }

    /// Does the named step use the named instrument? Falls back to checking
    /// that both nodes exist at all, tolerating sparse USES edges.
    async fn verify_instrument(&self, claim: &InstrumentClaim) -> VerificationOutcome {
        let wrapped = Claim::Instrument(claim.clone());
        if claim.step.trim().is_empty() {
            return VerificationOutcome::unverified(
                wrapped,
                FailureReason::MissingField {
                    field: "step".into(),
                },
            );
        }
        if claim.instrument.trim().is_empty() {
            return VerificationOutcome::unverified(
                wrapped,
                FailureReason::MissingField {
                    field: "instrument".into(),
                },
            );
        }

        let uses = self
            .relation_holds(
                NodeType::Step,
                &claim.step,
                vec![RelationType::Uses],
                NodeType::Instrument,
                &claim.instrument,
            )
            .await;
        match uses {
            Ok(true) => VerificationOutcome::verified(wrapped),
            Ok(false) => {
                // Alternative: both entities exist, just without the edge.
                let step_exists = self.node_exists(NodeType::Step, &claim.step).await;
                let instrument_exists = self
                    .node_exists(NodeType::Instrument, &claim.instrument)
                    .await;
                match (step_exists, instrument_exists) {
                    (Ok(true), Ok(true)) => VerificationOutcome::verified(wrapped),
                    (Ok(_), Ok(_)) => VerificationOutcome::unverified(
                        wrapped,
                        FailureReason::NotInGraph {
                            detail: "no graph relationship found".into(),
                        },
                    ),
                    (Err(e), _) | (_, Err(e)) => self.query_failed(wrapped, e),
                }
            }
            Err(e) => self.query_failed(wrapped, e),
        }
    }

    /// Is the claimed ordering relation recorded between the two steps?
    async fn verify_step_order(&self, claim: &StepOrderClaim) -> VerificationOutcome {
        let wrapped = Claim::StepOrder(claim.clone());
        if claim.step_before.trim().is_empty() {
            return VerificationOutcome::unverified(
                wrapped,
                FailureReason::MissingField {
                    field: "step_before".into(),
                },
            );
        }
        if claim.step_after.trim().is_empty() {
            return VerificationOutcome::unverified(
                wrapped,
                FailureReason::MissingField {
                    field: "step_after".into(),
                },
            );
        }

        let relation = match claim.relation {
            StepRelation::Precedes => RelationType::Precedes,
            StepRelation::Follows => RelationType::Follows,
            StepRelation::Requires => RelationType::Requires,
        };
        match self
            .relation_holds(
                NodeType::Step,
                &claim.step_before,
                vec![relation],
                NodeType::Step,
                &claim.step_after,
            )
            .await
        {
            Ok(true) => VerificationOutcome::verified(wrapped),
            Ok(false) => VerificationOutcome::unverified(
                wrapped,
                FailureReason::NotInGraph {
                    detail: "step ordering not found in graph".into(),
                },
            ),
            Err(e) => self.query_failed(wrapped, e),
        }
    }

    /// Is the structure related to any procedure? A structure that exists in
    /// the graph without the claimed relation still gets partial credit,
    /// reducing false negatives from sparse graphs.
    async fn verify_anatomy(&self, claim: &AnatomyClaim) -> VerificationOutcome {
        let wrapped = Claim::Anatomy(claim.clone());
        if claim.structure.trim().is_empty() {
            return VerificationOutcome::unverified(
                wrapped,
                FailureReason::MissingField {
                    field: "anatomical structure".into(),
                },
            );
        }

        let pattern = GraphPattern {
            from_type: NodeType::Procedure,
            from_name_contains: None,
            relations: vec![
                RelationType::Involves,
                RelationType::Targets,
                RelationType::Avoids,
                RelationType::Identifies,
            ],
            to_type: Some(NodeType::Anatomy),
            to_name_contains: Some(claim.structure.clone()),
        };
        let related = self
            .policy
            .run("anatomy_pattern", || {
                let pattern = pattern.clone();
                let graph = Arc::clone(&self.graph);
                async move { graph.match_pattern(&pattern).await }
            })
            .await;

        match related {
            Ok(rows) if !rows.is_empty() => VerificationOutcome::verified(wrapped),
            Ok(_) => match self.node_exists(NodeType::Anatomy, &claim.structure).await {
                Ok(true) => VerificationOutcome::verified(wrapped),
                Ok(false) => VerificationOutcome::unverified(
                    wrapped,
                    FailureReason::NotInGraph {
                        detail: "anatomical structure not found in graph".into(),
                    },
                ),
                Err(e) => self.query_failed(wrapped, e),
            },
            Err(e) => self.query_failed(wrapped, e),
        }
    }

    /// Is the complication known to the graph at all?
    async fn verify_complication(&self, claim: &ComplicationClaim) -> VerificationOutcome {
        let wrapped = Claim::Complication(claim.clone());
        if claim.complication.trim().is_empty() {
            return VerificationOutcome::unverified(
                wrapped,
                FailureReason::MissingField {
                    field: "complication".into(),
                },
            );
        }

        match self
            .node_exists(NodeType::Complication, &claim.complication)
            .await
        {
            Ok(true) => VerificationOutcome::verified(wrapped),
            Ok(false) => VerificationOutcome::unverified(
                wrapped,
                FailureReason::NotInGraph {
                    detail: "complication not found in graph".into(),
                },
            ),
            Err(e) => self.query_failed(wrapped, e),
        }
    }

    async fn relation_holds(
        &self,
        from_type: NodeType,
        from_name: &str,
        relations: Vec<RelationType>,
        to_type: NodeType,
        to_name: &str,
    ) -> Result<bool, lancet_core::LancetError> {
        self.policy
            .run("relation_holds", || {
                let graph = Arc::clone(&self.graph);
                let relations = relations.clone();
                let from_name = from_name.to_string();
                let to_name = to_name.to_string();
                async move {
                    graph
                        .relation_holds(from_type, &from_name, relations, to_type, &to_name)
                        .await
                }
            })
            .await
    }

    async fn node_exists(
        &self,
        node_type: NodeType,
        name: &str,
    ) -> Result<bool, lancet_core::LancetError> {
        self.policy
            .run("node_exists", || {
                let graph = Arc::clone(&self.graph);
                let name = name.to_string();
                async move { graph.node_exists(node_type, &name).await }
            })
            .await
    }

    fn query_failed(
        &self,
        claim: Claim,
        error: lancet_core::LancetError,
    ) -> VerificationOutcome {
        warn!(error = %error, "graph verification query failed");
        VerificationOutcome::unverified(
            claim,
            FailureReason::QueryFailed {
                reason: error.to_string(),
            },
        )
    }
}
