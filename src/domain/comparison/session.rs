//! ComparisonSession aggregate.
//!
//! Drives the pairwise question sequence and keeps weights and the
//! consistency diagnostic in step with every recorded judgment.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{ComparisonSessionId, CriterionId, Timestamp, ValidationError};

use super::weights::{self, ConsistencyReport, CONSISTENCY_THRESHOLD};
use super::{
    all_pairs, pair_count, ComparisonError, ComparisonMatrix, InvalidPairReason, Pair, ScaleValue,
};

/// One axis of value being weighted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    pub name: String,
}

impl Criterion {
    pub fn new(id: CriterionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// The pair the session wants answered next, by criterion id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairPrompt {
    pub pair: Pair,
    pub first: CriterionId,
    pub second: CriterionId,
}

/// Weight assigned to one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionWeight {
    pub criterion_id: CriterionId,
    pub weight: f64,
}

/// Answered versus total pair count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
}

impl Progress {
    /// True once every pair has been answered.
    pub fn is_complete(&self) -> bool {
        self.answered == self.total
    }
}

/// One stored judgment, in the orientation of the canonical pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgmentRecord {
    pub first: CriterionId,
    pub second: CriterionId,
    pub value: ScaleValue,
}

/// Persisted form of a session.
///
/// Only the facts are stored; pending pairs, weights and the consistency
/// report are recomputed on restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSessionRecord {
    pub id: ComparisonSessionId,
    pub criteria: Vec<Criterion>,
    /// Judgments in the order they were answered.
    pub judgments: Vec<JudgmentRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Pairwise comparison session.
///
/// # Invariants
///
/// - criteria ids are unique and fixed for the session's lifetime
/// - `pending` and `answered` are disjoint and together hold all `n(n-1)/2` pairs
/// - exactly one judgment is stored per answered pair
/// - `weights` has one entry per criterion and sums to 1 (when `n > 0`)
#[derive(Debug, Clone)]
pub struct ComparisonSession {
    id: ComparisonSessionId,
    criteria: Vec<Criterion>,
    matrix: ComparisonMatrix,
    pending: Vec<Pair>,
    answered: Vec<Pair>,
    weights: Vec<f64>,
    consistency: ConsistencyReport,
    consistency_threshold: f64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl ComparisonSession {
    /// Starts a fresh session over `criteria`.
    ///
    /// # Errors
    ///
    /// - `InvalidCriteria` if two criteria share an id
    pub fn new(criteria: Vec<Criterion>) -> Result<Self, ComparisonError> {
        Self::validate_criteria(&criteria)?;

        let n = criteria.len();
        let now = Timestamp::now();
        Ok(Self {
            id: ComparisonSessionId::new(),
            matrix: ComparisonMatrix::new(n),
            pending: all_pairs(n),
            answered: Vec::new(),
            weights: weights::uniform_weights(n),
            consistency: ConsistencyReport::perfect(n),
            consistency_threshold: CONSISTENCY_THRESHOLD,
            criteria,
            created_at: now,
            updated_at: now,
        })
    }

    /// Overrides the advisory consistency threshold (default 0.10).
    pub fn with_consistency_threshold(mut self, threshold: f64) -> Self {
        self.consistency_threshold = threshold;
        self
    }

    /// Rebuilds a session from its persisted record, replaying judgments.
    ///
    /// # Errors
    ///
    /// - `InvalidCriteria` if the stored criteria are invalid
    /// - `CorruptRecord` if a judgment names unknown criteria or repeats a pair
    pub fn reconstitute(record: ComparisonSessionRecord) -> Result<Self, ComparisonError> {
        let mut session = Self::new(record.criteria)?;
        session.id = record.id;
        session.created_at = record.created_at;

        for judgment in &record.judgments {
            let (i, j) = session
                .indices_of(&judgment.first, &judgment.second)
                .map_err(|e| ComparisonError::corrupt(e.to_string()))?;
            let pair = session
                .pending_pair(i, j)
                .map_err(|e| ComparisonError::corrupt(e.to_string()))?;
            session.apply(pair, i, j, judgment.value);
        }

        session.updated_at = record.updated_at;
        Ok(session)
    }

    /// Converts the session into its persisted form.
    pub fn to_record(&self) -> ComparisonSessionRecord {
        let judgments = self
            .answered
            .iter()
            .filter_map(|pair| {
                let value = self.matrix.judgment(pair.first(), pair.second())?;
                Some(JudgmentRecord {
                    first: self.criteria[pair.first()].id.clone(),
                    second: self.criteria[pair.second()].id.clone(),
                    value,
                })
            })
            .collect();

        ComparisonSessionRecord {
            id: self.id,
            criteria: self.criteria.clone(),
            judgments,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ComparisonSessionId {
        &self.id
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn pending_pairs(&self) -> &[Pair] {
        &self.pending
    }

    pub fn answered_pairs(&self) -> &[Pair] {
        &self.answered
    }

    pub fn matrix(&self) -> &ComparisonMatrix {
        &self.matrix
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Raw weight vector aligned with `criteria()`.
    pub fn weight_vector(&self) -> &[f64] {
        &self.weights
    }

    /// Weights keyed by criterion, in criteria order.
    pub fn weights(&self) -> Vec<CriterionWeight> {
        self.criteria
            .iter()
            .zip(&self.weights)
            .map(|(c, w)| CriterionWeight {
                criterion_id: c.id.clone(),
                weight: *w,
            })
            .collect()
    }

    /// Weights sorted from most to least important.
    ///
    /// Ties keep criteria order.
    pub fn ranked_weights(&self) -> Vec<CriterionWeight> {
        let mut ranked = self.weights();
        ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        ranked
    }

    /// Weight of a single criterion.
    pub fn weight_of(&self, id: &CriterionId) -> Option<f64> {
        self.index_of(id).map(|i| self.weights[i])
    }

    pub fn consistency_ratio(&self) -> f64 {
        self.consistency.ratio
    }

    pub fn consistency_report(&self) -> &ConsistencyReport {
        &self.consistency
    }

    pub fn consistency_threshold(&self) -> f64 {
        self.consistency_threshold
    }

    /// Advisory flag: an inconsistent session stays valid and inspectable.
    pub fn is_consistent(&self) -> bool {
        self.consistency.is_within(self.consistency_threshold)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            answered: self.answered.len(),
            total: pair_count(self.criteria.len()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    /// The next pair to ask about, or `None` when every pair is answered.
    pub fn next_pair(&self) -> Option<PairPrompt> {
        self.pending.first().map(|pair| self.prompt_for(*pair))
    }

    /// Recorded judgment for `a` versus `b`, honoring reciprocity.
    ///
    /// Returns `None` for unknown ids or unanswered pairs.
    pub fn judgment(&self, a: &CriterionId, b: &CriterionId) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        let pair = Pair::new(i, j)?;
        if !self.matrix.is_answered(&pair) {
            return None;
        }
        self.matrix.judgment(i, j).map(|v| v.value())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Records "`a` is `value` times as important as `b`".
    ///
    /// Either orientation of a pending pair is accepted; `(b, a, v)` is the
    /// same judgment as `(a, b, 1/v)`. Weights and the consistency report are
    /// recomputed before returning.
    ///
    /// # Errors
    ///
    /// - `InvalidPair` if an id is unknown, both ids are equal, or the pair
    ///   was already answered
    /// - `InvalidScaleValue` if `value` is not on the 9-point scale
    ///
    /// The session is left untouched on error.
    pub fn submit_judgment(
        &mut self,
        a: &CriterionId,
        b: &CriterionId,
        value: f64,
    ) -> Result<Option<PairPrompt>, ComparisonError> {
        let (i, j) = self.indices_of(a, b)?;
        let pair = self.pending_pair(i, j)?;
        let value = ScaleValue::try_from_f64(value)?;

        self.apply(pair, i, j, value);
        self.updated_at = Timestamp::now();

        tracing::debug!(
            session_id = %self.id,
            first = %a,
            second = %b,
            value = %value,
            ratio = self.consistency.ratio,
            "Recorded pairwise judgment"
        );

        Ok(self.next_pair())
    }

    /// Discards all judgments and restores the full pending set.
    ///
    /// Idempotent; the result equals a fresh session over the same criteria
    /// (id and creation time are kept).
    pub fn reset(&mut self) {
        let n = self.criteria.len();
        let was_pristine = self.answered.is_empty();

        self.matrix.clear();
        self.pending = all_pairs(n);
        self.answered.clear();
        self.weights = weights::uniform_weights(n);
        self.consistency = ConsistencyReport::perfect(n);

        if !was_pristine {
            self.updated_at = Timestamp::now();
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn validate_criteria(criteria: &[Criterion]) -> Result<(), ValidationError> {
        let mut seen = HashSet::with_capacity(criteria.len());
        for criterion in criteria {
            if !seen.insert(&criterion.id) {
                return Err(ValidationError::duplicate("criteria", criterion.id.as_str()));
            }
        }
        Ok(())
    }

    fn index_of(&self, id: &CriterionId) -> Option<usize> {
        self.criteria.iter().position(|c| &c.id == id)
    }

    fn indices_of(
        &self,
        a: &CriterionId,
        b: &CriterionId,
    ) -> Result<(usize, usize), ComparisonError> {
        let unknown = || {
            ComparisonError::invalid_pair(a.as_str(), b.as_str(), InvalidPairReason::UnknownCriterion)
        };
        let i = self.index_of(a).ok_or_else(unknown)?;
        let j = self.index_of(b).ok_or_else(unknown)?;
        Ok((i, j))
    }

    fn pending_pair(&self, i: usize, j: usize) -> Result<Pair, ComparisonError> {
        let first = self.criteria[i].id.as_str();
        let second = self.criteria[j].id.as_str();
        let pair = Pair::new(i, j).ok_or_else(|| {
            ComparisonError::invalid_pair(first, second, InvalidPairReason::SameCriterion)
        })?;
        if self.matrix.is_answered(&pair) {
            return Err(ComparisonError::invalid_pair(
                first,
                second,
                InvalidPairReason::AlreadyAnswered,
            ));
        }
        Ok(pair)
    }

    fn apply(&mut self, pair: Pair, i: usize, j: usize, value: ScaleValue) {
        self.matrix.record(i, j, value);
        self.pending.retain(|p| *p != pair);
        self.answered.push(pair);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.weights = weights::geometric_mean_weights(&self.matrix);
        self.consistency = weights::consistency(&self.matrix, &self.weights);
    }

    fn prompt_for(&self, pair: Pair) -> PairPrompt {
        PairPrompt {
            pair,
            first: self.criteria[pair.first()].id.clone(),
            second: self.criteria[pair.second()].id.clone(),
        }
    }
}

/// Two sessions are equal when they describe the same comparison state.
///
/// Timestamps are ignored so a reset session compares equal to a fresh one.
impl PartialEq for ComparisonSession {
    fn eq(&self, other: &Self) -> bool {
        self.criteria == other.criteria
            && self.matrix == other.matrix
            && self.pending == other.pending
            && self.answered == other.answered
            && self.weights == other.weights
            && self.consistency == other.consistency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cid(s: &str) -> CriterionId {
        CriterionId::new(s).unwrap()
    }

    fn criteria(ids: &[&str]) -> Vec<Criterion> {
        ids.iter()
            .map(|id| Criterion::new(cid(id), id.to_uppercase()))
            .collect()
    }

    fn session(ids: &[&str]) -> ComparisonSession {
        ComparisonSession::new(criteria(ids)).unwrap()
    }

    fn weight_sum(session: &ComparisonSession) -> f64 {
        session.weight_vector().iter().sum()
    }

    #[test]
    fn new_session_has_uniform_weights_and_zero_ratio() {
        let s = session(&["a", "b", "c", "d"]);
        assert_eq!(s.pending_pairs().len(), 6);
        assert!(s.answered_pairs().is_empty());
        assert!(s.weight_vector().iter().all(|w| (w - 0.25).abs() < 1e-12));
        assert_eq!(s.consistency_ratio(), 0.0);
        assert!(s.is_consistent());
        assert!(!s.is_complete());
    }

    #[test]
    fn new_rejects_duplicate_ids() {
        let result = ComparisonSession::new(criteria(&["a", "b", "a"]));
        assert!(matches!(result, Err(ComparisonError::InvalidCriteria(_))));
    }

    #[test]
    fn single_criterion_session_is_complete_immediately() {
        let s = session(&["only"]);
        assert!(s.is_complete());
        assert!(s.next_pair().is_none());
        assert_eq!(s.weight_vector(), &[1.0]);
    }

    #[test]
    fn next_pair_follows_index_order() {
        let mut s = session(&["a", "b", "c"]);
        let first = s.next_pair().unwrap();
        assert_eq!((first.first.as_str(), first.second.as_str()), ("a", "b"));

        let next = s.submit_judgment(&cid("a"), &cid("b"), 3.0).unwrap().unwrap();
        assert_eq!((next.first.as_str(), next.second.as_str()), ("a", "c"));

        let next = s.submit_judgment(&cid("a"), &cid("c"), 5.0).unwrap().unwrap();
        assert_eq!((next.first.as_str(), next.second.as_str()), ("b", "c"));

        let done = s.submit_judgment(&cid("b"), &cid("c"), 3.0).unwrap();
        assert!(done.is_none());
        assert!(s.is_complete());
        assert_eq!(s.progress(), Progress { answered: 3, total: 3 });
    }

    #[test]
    fn out_of_order_answers_are_accepted() {
        let mut s = session(&["a", "b", "c"]);
        let next = s.submit_judgment(&cid("b"), &cid("c"), 1.0).unwrap().unwrap();
        assert_eq!((next.first.as_str(), next.second.as_str()), ("a", "b"));
    }

    #[test]
    fn reversed_submission_is_stored_as_reciprocal() {
        let mut s = session(&["a", "b"]);
        s.submit_judgment(&cid("b"), &cid("a"), 5.0).unwrap();

        assert!((s.judgment(&cid("a"), &cid("b")).unwrap() - 0.2).abs() < 1e-12);
        assert_eq!(s.judgment(&cid("b"), &cid("a")).unwrap(), 5.0);
        assert!(s.weight_of(&cid("b")).unwrap() > s.weight_of(&cid("a")).unwrap());
    }

    #[test]
    fn answering_a_pair_twice_is_rejected_in_either_orientation() {
        let mut s = session(&["a", "b", "c"]);
        s.submit_judgment(&cid("a"), &cid("b"), 3.0).unwrap();
        let before = s.clone();

        let err = s.submit_judgment(&cid("a"), &cid("b"), 5.0).unwrap_err();
        assert!(matches!(
            err,
            ComparisonError::InvalidPair { reason: InvalidPairReason::AlreadyAnswered, .. }
        ));

        let err = s.submit_judgment(&cid("b"), &cid("a"), 1.0 / 3.0).unwrap_err();
        assert!(matches!(err, ComparisonError::InvalidPair { .. }));
        assert_eq!(s, before);
    }

    #[test]
    fn unknown_and_self_pairs_are_rejected() {
        let mut s = session(&["a", "b"]);
        assert!(matches!(
            s.submit_judgment(&cid("a"), &cid("zzz"), 3.0),
            Err(ComparisonError::InvalidPair { reason: InvalidPairReason::UnknownCriterion, .. })
        ));
        assert!(matches!(
            s.submit_judgment(&cid("a"), &cid("a"), 1.0),
            Err(ComparisonError::InvalidPair { reason: InvalidPairReason::SameCriterion, .. })
        ));
        assert_eq!(s.progress().answered, 0);
    }

    #[test]
    fn off_scale_value_is_rejected_without_mutation() {
        let mut s = session(&["a", "b"]);
        let before = s.clone();
        let err = s.submit_judgment(&cid("a"), &cid("b"), 4.0).unwrap_err();
        assert!(matches!(err, ComparisonError::InvalidScaleValue { .. }));
        assert_eq!(s, before);
        assert_eq!(s.pending_pairs().len(), 1);
    }

    #[test]
    fn weights_update_after_every_judgment() {
        let mut s = session(&["a", "b", "c"]);
        s.submit_judgment(&cid("a"), &cid("b"), 9.0).unwrap();
        assert!(s.weight_of(&cid("a")).unwrap() > s.weight_of(&cid("c")).unwrap());
        assert!((weight_sum(&s) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn inconsistent_complete_session_is_flagged_not_rejected() {
        let mut s = session(&["a", "b", "c"]);
        s.submit_judgment(&cid("a"), &cid("b"), 9.0).unwrap();
        s.submit_judgment(&cid("b"), &cid("c"), 9.0).unwrap();
        s.submit_judgment(&cid("a"), &cid("c"), 1.0 / 9.0).unwrap();

        assert!(s.is_complete());
        assert!(!s.is_consistent());
        assert!(s.consistency_ratio() > 0.10);
        assert!((weight_sum(&s) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn custom_threshold_changes_advisory_flag_only() {
        let mut s = session(&["a", "b", "c"]).with_consistency_threshold(0.01);
        s.submit_judgment(&cid("a"), &cid("b"), 3.0).unwrap();
        s.submit_judgment(&cid("a"), &cid("c"), 5.0).unwrap();
        s.submit_judgment(&cid("b"), &cid("c"), 3.0).unwrap();

        assert!(s.consistency_ratio() > 0.01);
        assert!(!s.is_consistent());
        assert!(s.consistency_report().is_consistent());
    }

    #[test]
    fn ranked_weights_are_descending() {
        let mut s = session(&["a", "b", "c"]);
        s.submit_judgment(&cid("c"), &cid("a"), 7.0).unwrap();
        let ranked = s.ranked_weights();
        assert_eq!(ranked[0].criterion_id.as_str(), "c");
        assert!(ranked.windows(2).all(|w| w[0].weight >= w[1].weight));
    }

    #[test]
    fn reset_twice_equals_fresh_session() {
        let mut s = session(&["a", "b", "c"]);
        s.submit_judgment(&cid("a"), &cid("b"), 3.0).unwrap();
        s.submit_judgment(&cid("b"), &cid("c"), 1.0 / 5.0).unwrap();

        s.reset();
        let once = s.clone();
        s.reset();

        assert_eq!(s, once);
        assert_eq!(s, session(&["a", "b", "c"]));
        assert_eq!(s.pending_pairs().len(), 3);
        assert!(s.next_pair().is_some());
    }

    #[test]
    fn record_round_trip_preserves_state() {
        let mut s = session(&["a", "b", "c"]);
        s.submit_judgment(&cid("b"), &cid("c"), 7.0).unwrap();
        s.submit_judgment(&cid("b"), &cid("a"), 3.0).unwrap();

        let json = serde_json::to_string(&s.to_record()).unwrap();
        let record: ComparisonSessionRecord = serde_json::from_str(&json).unwrap();
        let restored = ComparisonSession::reconstitute(record).unwrap();

        assert_eq!(restored, s);
        assert_eq!(restored.id(), s.id());
        assert_eq!(restored.answered_pairs(), s.answered_pairs());
    }

    #[test]
    fn reconstitute_rejects_repeated_pair() {
        let s = session(&["a", "b"]);
        let mut record = s.to_record();
        let judgment = JudgmentRecord {
            first: cid("a"),
            second: cid("b"),
            value: ScaleValue::try_from_f64(3.0).unwrap(),
        };
        record.judgments = vec![judgment.clone(), judgment];

        assert!(matches!(
            ComparisonSession::reconstitute(record),
            Err(ComparisonError::CorruptRecord(_))
        ));
    }

    #[test]
    fn reconstitute_rejects_unknown_criterion() {
        let s = session(&["a", "b"]);
        let mut record = s.to_record();
        record.judgments.push(JudgmentRecord {
            first: cid("a"),
            second: cid("ghost"),
            value: ScaleValue::EQUAL,
        });
        assert!(ComparisonSession::reconstitute(record).is_err());
    }

    fn scale_value() -> impl Strategy<Value = f64> {
        prop::sample::select(ScaleValue::all().into_iter().map(|v| v.value()).collect::<Vec<_>>())
    }

    proptest! {
        #[test]
        fn every_pair_is_emitted_exactly_once(
            n in 2usize..8,
            values in prop::collection::vec(scale_value(), 28),
        ) {
            let ids: Vec<String> = (0..n).map(|i| format!("c{}", i)).collect();
            let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
            let mut s = session(&refs);

            let mut seen = HashSet::new();
            let mut k = 0;
            while let Some(prompt) = s.next_pair() {
                prop_assert!(seen.insert(prompt.pair));
                s.submit_judgment(&prompt.first, &prompt.second, values[k]).unwrap();
                k += 1;
                prop_assert!((weight_sum(&s) - 1.0).abs() < 1e-9);
                prop_assert_eq!(s.pending_pairs().len() + s.answered_pairs().len(), n * (n - 1) / 2);
            }
            prop_assert_eq!(seen.len(), n * (n - 1) / 2);
        }

        #[test]
        fn reciprocal_is_always_used_for_reverse_pair(v in scale_value()) {
            let mut s = session(&["a", "b"]);
            s.submit_judgment(&cid("a"), &cid("b"), v).unwrap();
            let forward = s.judgment(&cid("a"), &cid("b")).unwrap();
            let reverse = s.judgment(&cid("b"), &cid("a")).unwrap();
            prop_assert!((reverse - 1.0 / v).abs() < 1e-12);
            prop_assert!((forward * reverse - 1.0).abs() < 1e-12);
        }
    }
}
