pub mod lines;
pub mod tsv;

pub use lines::{read_seq_lines, read_seq_lines_from_bytes, read_seq_lines_from_reader};
pub use tsv::write_batch;
