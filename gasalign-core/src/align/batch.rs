use super::backtrack::Backtrack;
use super::matrix::{Matrix, ScoreMatrix};
use super::rules::RuleSet;
use super::MatchType;
use crate::alphabets::dna;

/// Result of aligning one batch of queries.
///
/// Every input query lands in exactly one of the two lists: `mapped` holds
/// one group of accepted [`Backtrack`]s per query, `unmapped` the original
/// query strings that produced none.
#[derive(Clone, Debug, Default)]
pub struct AlignmentBatch {
    pub unmapped: Vec<String>,
    pub mapped: Vec<Vec<Backtrack>>,
}

impl AlignmentBatch {
    pub fn total_reads(&self) -> usize {
        self.mapped.len() + self.unmapped.len()
    }

    pub fn mapped_fraction(&self) -> f64 {
        if self.total_reads() == 0 {
            return 0.0;
        }
        self.mapped.len() as f64 / self.total_reads() as f64
    }

    pub fn unmapped_fraction(&self) -> f64 {
        if self.total_reads() == 0 {
            return 0.0;
        }
        self.unmapped.len() as f64 / self.total_reads() as f64
    }
}

/// Aligns every query against every target, in both orientations when
/// requested, and groups the surviving backtracks per query.
pub(super) fn map_queries(
    targets: &[String],
    rules: &RuleSet,
    score_min: i32,
    match_type: MatchType,
    rev_comp: bool,
    queries: &[String],
    keep_matrix: bool,
) -> AlignmentBatch {
    let per_query: Vec<Vec<Backtrack>> = par_map!(queries, |query| {
        align_one(targets, rules, score_min, match_type, rev_comp, query, keep_matrix)
    });

    let mut batch = AlignmentBatch::default();
    for (query, hits) in queries.iter().zip(per_query) {
        if hits.is_empty() {
            batch.unmapped.push(query.clone());
        } else {
            batch.mapped.push(hits);
        }
    }
    batch
}

fn align_one(
    targets: &[String],
    rules: &RuleSet,
    score_min: i32,
    match_type: MatchType,
    rev_comp: bool,
    query: &str,
    keep_matrix: bool,
) -> Vec<Backtrack> {
    let rc = if rev_comp {
        Some(dna::revcomp_str(query))
    } else {
        None
    };

    let mut candidates: Vec<ScoreMatrix> = Vec::new();
    for (target_id, target) in targets.iter().enumerate() {
        let variants =
            std::iter::once((query, false)).chain(rc.as_deref().map(|seq| (seq, true)));
        for (seq, reversed) in variants {
            if let Some(sm) = evaluate(target, target_id, seq, reversed, query, rules, score_min)
            {
                candidates.push(sm);
            }
        }
    }

    let mut kept = Vec::new();
    for sm in candidates {
        let mut bt = Backtrack::new(sm, match_type);
        if !keep_matrix {
            bt.sm.matrix = None;
        }
        if bt.pass_mode && rules.accepts(&bt.events) {
            kept.push(bt);
        }
    }
    kept
}

/// Scores one (target, variant) pair, returning the record to backtrack or
/// None when the pair cannot reach the configured floor.
fn evaluate(
    target: &str,
    target_id: usize,
    seq: &str,
    reversed: bool,
    original: &str,
    rules: &RuleSet,
    score_min: i32,
) -> Option<ScoreMatrix> {
    let len = seq.len() as i32;
    // even a perfect match cannot reach the floor
    if score_min > len {
        return None;
    }

    if seq == target {
        return Some(ScoreMatrix {
            query: seq.to_string(),
            target: target.to_string(),
            target_id,
            score: len,
            reversed,
            original_seq: original.to_string(),
            matrix: None,
            exact: true,
        });
    }
    if rules.exact_only() || target.is_empty() || seq.is_empty() {
        return None;
    }

    let (matrix, best) = Matrix::fill(target.as_bytes(), seq.as_bytes());
    let score = best as i32;
    if score < score_min.max(len - rules.max_penalty()) {
        return None;
    }
    Some(ScoreMatrix {
        query: seq.to_string(),
        target: target.to_string(),
        target_id,
        score,
        reversed,
        original_seq: original.to_string(),
        matrix: Some(matrix),
        exact: false,
    })
}
