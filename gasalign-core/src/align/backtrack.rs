use super::cigar::{self, Events};
use super::matrix::{Matrix, ScoreMatrix, GAP};
use super::MatchType;
use std::fmt;

/// A decoded alignment: the three aligned strings plus their CIGAR/MD
/// reduction and shape verdict.
///
/// `align_target`, `align_match` and `align_query` line up column by column;
/// `-` marks a gap, a space padding outside the aligned region and `|` a
/// matched base in the match string.
#[derive(Clone, Debug)]
pub struct Backtrack {
    pub sm: ScoreMatrix,
    pub align_target: String,
    pub align_match: String,
    pub align_query: String,
    pub cigar: String,
    pub md: String,
    /// 1-based position within the target of the first aligned column.
    pub t_pos: usize,
    /// Edit distance: insertions + deletions + mismatches.
    pub nm: usize,
    pub events: Events,
    /// Whether the alignment satisfies the configured match type.
    pub pass_mode: bool,
}

impl Backtrack {
    /// Decodes `sm` and classifies the result against `match_type`.
    ///
    /// Panics when `sm` carries neither a matrix nor the exact flag; that
    /// state cannot be produced by the batch driver.
    pub fn new(sm: ScoreMatrix, match_type: MatchType) -> Self {
        if sm.exact {
            let len = sm.query.len();
            return Backtrack {
                align_target: sm.target.clone(),
                align_match: "|".repeat(len),
                align_query: sm.query.clone(),
                cigar: format!("{len}M"),
                md: len.to_string(),
                t_pos: 1,
                nm: 0,
                events: Events::default(),
                pass_mode: true,
                sm,
            };
        }
        let matrix = sm
            .matrix
            .as_ref()
            .expect("backtrack needs a score matrix or an exact mapping");
        let (align_target, align_match, align_query) =
            walk(sm.target.as_bytes(), sm.query.as_bytes(), matrix, sm.score);
        let reduced = cigar::reduce(&align_target, &align_match, &align_query, match_type);
        Backtrack {
            sm,
            align_target,
            align_match,
            align_query,
            cigar: reduced.cigar,
            md: reduced.md,
            t_pos: reduced.t_pos,
            nm: reduced.nm,
            events: reduced.events,
            pass_mode: reduced.pass_mode,
        }
    }
}

/// Reconstructs the aligned strings from a filled matrix.
///
/// Starts at the first cell holding the maximum score and walks towards the
/// origin with a fixed move precedence: exhausted sequence overhangs, then
/// the diagonal, then a vertical gap, then a horizontal gap. Boundary cells
/// always resolve diagonally; whether they mark `|` falls out of base
/// equality.
fn walk(target: &[u8], query: &[u8], f: &Matrix, score: i32) -> (String, String, String) {
    let (start_i, start_j) = f.first_max(score);
    let mut t_rev: Vec<u8> = Vec::new();
    let mut m_rev: Vec<u8> = Vec::new();
    let mut q_rev: Vec<u8> = Vec::new();

    let mut i = start_i as isize;
    let mut j = start_j as isize;
    while i >= 0 || j >= 0 {
        if i < 0 {
            // remaining query is a 5' overhang
            for k in (0..=j as usize).rev() {
                t_rev.push(b' ');
                m_rev.push(b' ');
                q_rev.push(query[k]);
            }
            j = -1;
        } else if j < 0 {
            // remaining target precedes the aligned region
            for k in (0..=i as usize).rev() {
                t_rev.push(target[k]);
                m_rev.push(b' ');
                q_rev.push(b' ');
            }
            i = -1;
        } else if i == 0 || j == 0 {
            let (tc, qc) = (target[i as usize], query[j as usize]);
            t_rev.push(tc);
            m_rev.push(if tc == qc { b'|' } else { b' ' });
            q_rev.push(qc);
            i -= 1;
            j -= 1;
        } else {
            let (ti, tj) = (i as usize, j as usize);
            let (tc, qc) = (target[ti], query[tj]);
            let here = f.get(ti, tj);
            if here == f.get(ti - 1, tj - 1) + (tc == qc) as i16 {
                t_rev.push(tc);
                m_rev.push(if tc == qc { b'|' } else { b' ' });
                q_rev.push(qc);
                i -= 1;
                j -= 1;
            } else if here == f.get(ti - 1, tj) + GAP {
                // deletion from the query
                t_rev.push(tc);
                m_rev.push(b' ');
                q_rev.push(b'-');
                i -= 1;
            } else {
                // insertion into the query
                t_rev.push(b'-');
                m_rev.push(b' ');
                q_rev.push(qc);
                j -= 1;
            }
        }
    }

    t_rev.reverse();
    m_rev.reverse();
    q_rev.reverse();
    t_rev.extend_from_slice(&target[start_i + 1..]);
    q_rev.extend_from_slice(&query[start_j + 1..]);

    // padding keeps the reducer's column scan simple; it stops as soon as the
    // query is exhausted
    let pad = q_rev.len();
    if t_rev.len() < pad {
        t_rev.resize(pad, b' ');
    }
    if m_rev.len() < pad {
        m_rev.resize(pad, b' ');
    }
    let to_string = |v: Vec<u8>| String::from_utf8(v).expect("alignment strings are ASCII");
    (to_string(t_rev), to_string(m_rev), to_string(q_rev))
}

impl fmt::Display for Backtrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Score: {}, Cigar: {}, MD: {}, TargetId: {}, TargetPos: {}\n\
             Events (D/I/M): {}/{}/{}\n\
             T: {}\nM: {}\nQ: {}",
            self.sm.score,
            self.cigar,
            self.md,
            self.sm.target_id,
            self.t_pos,
            self.events.del,
            self.events.ins,
            self.events.mismatch,
            self.align_target,
            self.align_match,
            self.align_query
        )
    }
}
