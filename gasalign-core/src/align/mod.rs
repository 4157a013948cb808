mod backtrack;
mod batch;
mod cigar;
mod matrix;
mod rules;

pub use backtrack::Backtrack;
pub use batch::AlignmentBatch;
pub use cigar::{Events, Op};
pub use matrix::{Matrix, ScoreMatrix};
pub use rules::RuleSet;


use crate::error::{GasError, GasResult};

/// Geometric constraint on an acceptable alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchType {
    /// Full-length match starting at the first target base.
    Exact,
    /// Query contained within the target span.
    QueryInTarget,
    /// Target contained within the query span.
    TargetInQuery,
    /// Any overlap.
    #[default]
    Any,
}

impl TryFrom<i64> for MatchType {
    type Error = GasError;

    fn try_from(value: i64) -> GasResult<Self> {
        match value {
            0 => Ok(MatchType::Exact),
            1 => Ok(MatchType::QueryInTarget),
            2 => Ok(MatchType::TargetInQuery),
            3 => Ok(MatchType::Any),
            _ => Err(GasError::InvalidMatchType { value }),
        }
    }
}

/// Short-sequence aligner over a fixed target set.
///
/// Configuration is immutable after construction; `align_queries` may be
/// called any number of times.
#[derive(Clone, Debug)]
pub struct Aligner {
    targets: Vec<String>,
    rules: RuleSet,
    score_min: i32,
    rev_comp: bool,
    match_type: MatchType,
}

impl Aligner {
    pub fn new(
        targets: Vec<String>,
        rules: &[String],
        score_min: i32,
        rev_comp: bool,
        match_type: MatchType,
    ) -> GasResult<Self> {
        if targets.is_empty() {
            return Err(GasError::EmptyTargets);
        }
        if score_min < 0 {
            return Err(GasError::NegativeScoreMin { value: score_min });
        }
        Ok(Aligner {
            targets,
            rules: RuleSet::compile(rules),
            score_min,
            rev_comp,
            match_type,
        })
    }

    /// Aligns `queries` against the configured targets.
    ///
    /// With `keep_matrix` false every score matrix is dropped as soon as its
    /// backtrack has been decoded.
    pub fn align_queries(&self, queries: &[String], keep_matrix: bool) -> AlignmentBatch {
        batch::map_queries(
            &self.targets,
            &self.rules,
            self.score_min,
            self.match_type,
            self.rev_comp,
            queries,
            keep_matrix,
        )
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn exact_only(&self) -> bool {
        self.rules.exact_only()
    }

    pub fn max_penalty(&self) -> i32 {
        self.rules.max_penalty()
    }

    /// Smallest penalty across the configured rules; informational only.
    pub fn min_penalty(&self) -> i32 {
        self.rules.min_penalty()
    }
}
