use super::cigar::Events;

/// Compiled fuzzy-match rules.
///
/// Each rule is an arrangement of the letters I, D and M (case-insensitive)
/// bounding the insertions, deletions and mismatches a single mapping may
/// carry, e.g. `IMM` permits one insertion and two mismatches. The rule with
/// the largest penalty decides how far below a perfect score a matrix is
/// still worth backtracking.
#[derive(Clone, Debug)]
pub struct RuleSet {
    rules: Vec<String>,
    min_penalty: i32,
    max_penalty: i32,
    exact_only: bool,
}

fn count(rule: &str, letter: u8) -> usize {
    rule.bytes().filter(|&b| b == letter).count()
}

impl RuleSet {
    pub fn compile(rules: &[String]) -> Self {
        let rules: Vec<String> = rules.iter().map(|r| r.to_uppercase()).collect();
        let mut max_penalty = 0;
        let mut min_penalty = i32::MAX;
        for rule in &rules {
            let d = count(rule, b'D') as i32;
            let i = count(rule, b'I') as i32;
            let m = count(rule, b'M') as i32;
            // D/I lose two points of score relative to a perfect match, M one
            let penalty = 2 * d + 2 * i + m;
            max_penalty = max_penalty.max(penalty);
            min_penalty = min_penalty.min(penalty);
        }
        let exact_only = rules.is_empty();
        if exact_only {
            min_penalty = 0;
        }
        RuleSet {
            rules,
            min_penalty,
            max_penalty,
            exact_only,
        }
    }

    /// True when the event counts of a decoded alignment are within at least
    /// one rule. With no rules configured only event-free alignments pass.
    pub fn accepts(&self, events: &Events) -> bool {
        if self.rules.is_empty() {
            return events.del == 0 && events.ins == 0 && events.mismatch == 0;
        }
        self.rules.iter().any(|rule| {
            events.del <= count(rule, b'D')
                && events.ins <= count(rule, b'I')
                && events.mismatch <= count(rule, b'M')
        })
    }

    pub fn max_penalty(&self) -> i32 {
        self.max_penalty
    }

    pub fn min_penalty(&self) -> i32 {
        self.min_penalty
    }

    pub fn exact_only(&self) -> bool {
        self.exact_only
    }
}
