use super::MatchType;
use std::fmt::Write;

const SPACE: u8 = b' ';
const DASH: u8 = b'-';

/// CIGAR operations. M covers matches and mismatches, I consumes query only,
/// D consumes target only, S is an unaligned (soft clipped) query base.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    M,
    I,
    D,
    S,
}

impl Op {
    fn as_char(self) -> char {
        match self {
            Op::M => 'M',
            Op::I => 'I',
            Op::D => 'D',
            Op::S => 'S',
        }
    }
}

/// Per-class difference counts of a decoded alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Events {
    pub del: usize,
    pub ins: usize,
    pub mismatch: usize,
}

enum MdOp {
    Match,
    Sub(u8),
    Del(u8),
}

pub(super) struct Reduced {
    pub cigar: String,
    pub md: String,
    pub t_pos: usize,
    pub nm: usize,
    pub events: Events,
    pub pass_mode: bool,
}

/// Classifies the aligned columns into CIGAR/MD form.
///
/// Columns are read `(target, match, query)` over the query-alignment
/// length; the target alignment may extend further when the target overhangs
/// the aligned region, and those columns do not belong to the mapping.
pub(super) fn reduce(
    t_align: &str,
    m_align: &str,
    q_align: &str,
    match_type: MatchType,
) -> Reduced {
    let t = t_align.as_bytes();
    let m = m_align.as_bytes();
    let q = q_align.as_bytes();
    let q_len = q.len();

    let mut ops: Vec<Op> = Vec::with_capacity(q_len);
    let mut md_ops: Vec<MdOp> = Vec::new();
    let mut events = Events::default();
    let mut nm = 0usize;
    // 1-based start of the aligned region within the target
    let mut t_pos = q.iter().take_while(|&&b| b == SPACE).count() + 1;

    for idx in 0..q_len {
        let (tc, qc) = (t[idx], q[idx]);
        if tc == SPACE && qc != SPACE && qc != DASH {
            ops.push(Op::S);
            continue;
        }
        if tc == DASH {
            events.ins += 1;
            nm += 1;
            ops.push(Op::I);
            continue;
        }
        if qc == DASH {
            events.del += 1;
            nm += 1;
            ops.push(Op::D);
            md_ops.push(MdOp::Del(tc));
            continue;
        }
        if tc == qc {
            ops.push(Op::M);
            md_ops.push(MdOp::Match);
            continue;
        }
        if qc == SPACE {
            continue;
        }
        debug_assert_eq!(m[idx], SPACE, "match column over unequal bases");
        if m[idx..].iter().all(|&b| b == SPACE) {
            // nothing but soft clip remains
            for _ in idx..q_len {
                ops.push(Op::S);
            }
            break;
        }
        if ops.is_empty() || ops.last() == Some(&Op::S) {
            debug_assert!(
                ops.iter().all(|&op| op == Op::S),
                "soft clip run must be leading"
            );
            ops.push(Op::S);
            t_pos += 1;
            continue;
        }
        events.mismatch += 1;
        nm += 1;
        ops.push(Op::M);
        md_ops.push(MdOp::Sub(tc));
    }

    let cigar = ops_to_cigar(&ops);
    let md = md_to_string(&md_ops);
    let pass_mode = passes_shape(match_type, t_align, q_align, t_pos, &ops);
    Reduced {
        cigar,
        md,
        t_pos,
        nm,
        events,
        pass_mode,
    }
}

fn ops_to_cigar(ops: &[Op]) -> String {
    let mut cigar = String::new();
    let mut run: Option<(Op, usize)> = None;
    for &op in ops {
        match run {
            Some((current, len)) if current == op => run = Some((current, len + 1)),
            Some((current, len)) => {
                write!(cigar, "{len}{}", current.as_char()).unwrap();
                run = Some((op, 1));
            }
            None => run = Some((op, 1)),
        }
    }
    if let Some((current, len)) = run {
        write!(cigar, "{len}{}", current.as_char()).unwrap();
    }
    cigar
}

fn md_to_string(md_ops: &[MdOp]) -> String {
    #[derive(PartialEq)]
    enum Prev {
        None,
        Base,
        Del,
    }

    let mut md = String::new();
    let mut match_run = 0usize;
    let mut prev = Prev::None;
    for op in md_ops {
        match op {
            MdOp::Match => match_run += 1,
            MdOp::Sub(base) => {
                if match_run > 0 {
                    write!(md, "{match_run}").unwrap();
                    match_run = 0;
                } else if prev == Prev::Del {
                    // separate the deletion run from the mismatch base
                    md.push('0');
                }
                md.push(*base as char);
                prev = Prev::Base;
            }
            MdOp::Del(base) => {
                if match_run > 0 {
                    write!(md, "{match_run}").unwrap();
                    match_run = 0;
                    prev = Prev::Base;
                }
                if prev != Prev::Del {
                    md.push('^');
                }
                md.push(base.to_ascii_uppercase() as char);
                prev = Prev::Del;
            }
        }
    }
    if match_run > 0 || md.is_empty() {
        write!(md, "{match_run}").unwrap();
    }
    md
}

fn passes_shape(
    match_type: MatchType,
    t_align: &str,
    q_align: &str,
    t_pos: usize,
    ops: &[Op],
) -> bool {
    match match_type {
        MatchType::Any => true,
        MatchType::Exact => {
            t_pos == 1
                && !t_align.starts_with(' ')
                && !ops.contains(&Op::S)
                && q_align.len() == t_align.trim().len()
        }
        MatchType::QueryInTarget => {
            !t_align.starts_with(' ') && q_align.len() <= t_align.trim_end().len()
        }
        MatchType::TargetInQuery => {
            !q_align.starts_with(' ')
                && !q_align.ends_with(' ')
                && q_align.len() == t_align.len()
        }
    }
}
