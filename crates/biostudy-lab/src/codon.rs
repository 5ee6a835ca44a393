//! Standard genetic code translation.

use crate::sequence::Sequence;

/// Symbol emitted for stop codons.
pub const STOP: char = '*';
/// Symbol emitted for codons containing `N`.
pub const UNKNOWN: char = 'X';

const BASES: [u8; 4] = [b'T', b'C', b'A', b'G'];

/// Amino acids indexed by codon in TCAG order (first base slowest).
const STANDARD_CODE: &[u8; 64] =
    b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

fn base_index(base: u8) -> Option<usize> {
    BASES.iter().position(|&b| b == base)
}

/// Translates one upper-case codon.
pub fn translate_codon(codon: &[u8]) -> char {
    let [first, second, third] = codon else {
        return UNKNOWN;
    };
    match (base_index(*first), base_index(*second), base_index(*third)) {
        (Some(i), Some(j), Some(k)) => STANDARD_CODE[i * 16 + j * 4 + k] as char,
        _ => UNKNOWN,
    }
}

/// Translates reading frame 1. A trailing partial codon is ignored.
pub fn translate(sequence: &Sequence) -> String {
    sequence
        .as_str()
        .as_bytes()
        .chunks_exact(3)
        .map(translate_codon)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_known_sequence() {
        let seq = Sequence::parse("ATGGCCTAA").unwrap();
        assert_eq!(translate(&seq), "MA*");
    }

    #[test]
    fn test_translate_ignores_partial_codon() {
        let seq = Sequence::parse("ATGTG").unwrap();
        assert_eq!(translate(&seq), "M");
    }

    #[test]
    fn test_translate_unknown_codon() {
        let seq = Sequence::parse("ATGNNNTGG").unwrap();
        assert_eq!(translate(&seq), "MXW");
    }

    #[test]
    fn test_codon_table_spot_checks() {
        assert_eq!(translate_codon(b"TTT"), 'F');
        assert_eq!(translate_codon(b"TGA"), STOP);
        assert_eq!(translate_codon(b"TAG"), STOP);
        assert_eq!(translate_codon(b"GGG"), 'G');
        assert_eq!(translate_codon(b"CAT"), 'H');
        assert_eq!(translate_codon(b"AGA"), 'R');
    }
}
