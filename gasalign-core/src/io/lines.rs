use crate::alphabets::dna;
use crate::error::{GasError, GasResult};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

/// Leading bytes of a gzip member.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Reads sequences from a one-per-line file, gzip-compressed or plain.
pub fn read_seq_lines(path: impl AsRef<Path>) -> GasResult<Vec<String>> {
    let file = File::open(path)?;
    read_seq_lines_from_reader(BufReader::new(file))
}

pub fn read_seq_lines_from_bytes(data: &[u8]) -> GasResult<Vec<String>> {
    read_seq_lines_from_reader(BufReader::new(Cursor::new(data)))
}

/// Reads one sequence per line, sniffing the gzip magic bytes rather than
/// trusting file names. Blank lines are skipped, surrounding whitespace is
/// trimmed and sequences are checked against the IUPAC DNA alphabet.
pub fn read_seq_lines_from_reader<R: BufRead>(mut reader: R) -> GasResult<Vec<String>> {
    let head = reader.fill_buf()?;
    if head.starts_with(&GZIP_MAGIC) {
        collect_lines(BufReader::new(MultiGzDecoder::new(reader)))
    } else {
        collect_lines(reader)
    }
}

fn collect_lines<R: BufRead>(reader: R) -> GasResult<Vec<String>> {
    let alphabet = dna::iupac_alphabet();
    let mut seqs = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let seq = line.trim();
        if seq.is_empty() {
            continue;
        }
        if let Some(bad) = seq.bytes().find(|&b| !alphabet.contains(b)) {
            return Err(GasError::InvalidSeqChar {
                ch: bad as char,
                line: idx + 1,
            });
        }
        seqs.push(seq.to_string());
    }
    Ok(seqs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn plain_lines() {
        let seqs = read_seq_lines_from_bytes(b"ACGT\nTTAA\n").unwrap();
        assert_eq!(seqs, vec!["ACGT".to_string(), "TTAA".to_string()]);
    }

    #[test]
    fn blank_lines_and_whitespace() {
        let seqs = read_seq_lines_from_bytes(b"  ACGT \n\n\nTTAA").unwrap();
        assert_eq!(seqs, vec!["ACGT".to_string(), "TTAA".to_string()]);
    }

    #[test]
    fn gzip_detected_by_magic() {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b"ACGT\nGGCC\n").unwrap();
        let gz = enc.finish().unwrap();
        let seqs = read_seq_lines_from_bytes(&gz).unwrap();
        assert_eq!(seqs, vec!["ACGT".to_string(), "GGCC".to_string()]);
    }

    #[test]
    fn iupac_codes_allowed() {
        let seqs = read_seq_lines_from_bytes(b"ACGTN\nacgtn\n").unwrap();
        assert_eq!(seqs.len(), 2);
    }

    #[test]
    fn invalid_character_reports_line() {
        let err = read_seq_lines_from_bytes(b"ACGT\nAC#T\n").unwrap_err();
        match err {
            GasError::InvalidSeqChar { ch, line } => {
                assert_eq!(ch, '#');
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_input() {
        assert!(read_seq_lines_from_bytes(b"").unwrap().is_empty());
    }
}
