use crate::align::AlignmentBatch;
use crate::error::GasResult;
use csv::WriterBuilder;
use std::io::Write;

const HEADER: [&str; 8] = [
    "#query",
    "reversed",
    "t_id",
    "t_pos",
    "seq",
    "cigar",
    "md",
    "repeat_2-7...",
];

/// Writes one row per query.
///
/// Unmapped rows carry dot placeholders. Mapped rows start with the original
/// query and then repeat six columns (`reversed`, `t_id`, `t_pos`, `seq`,
/// `cigar`, `md`) for every hit tied for the group's best score, so rows
/// have varying width.
pub fn write_batch<W: Write>(writer: W, batch: &AlignmentBatch) -> GasResult<()> {
    let mut out = WriterBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_writer(writer);
    out.write_record(HEADER)?;

    for query in &batch.unmapped {
        out.write_record([query.as_str(), ".", ".", ".", "."])?;
    }
    for group in &batch.mapped {
        let best = group
            .iter()
            .map(|bt| bt.sm.score)
            .max()
            .expect("mapped groups are non-empty");
        let mut row = vec![group[0].sm.original_seq.clone()];
        for bt in group.iter().filter(|bt| bt.sm.score == best) {
            row.push(bt.sm.reversed.to_string());
            row.push(bt.sm.target_id.to_string());
            row.push(bt.t_pos.to_string());
            row.push(bt.sm.query.clone());
            row.push(bt.cigar.clone());
            row.push(bt.md.clone());
        }
        out.write_record(&row)?;
    }
    out.flush()?;
    Ok(())
}
