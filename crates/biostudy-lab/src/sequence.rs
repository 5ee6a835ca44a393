//! Validated nucleotide sequences and their composition.

use serde::Serialize;

use crate::error::{LabError, Result};

/// An upper-case DNA sequence over `ACGTN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence(String);

impl Sequence {
    /// Parses user input, ignoring whitespace and case.
    pub fn parse(input: &str) -> Result<Self> {
        let mut bases = String::with_capacity(input.len());
        for c in input.chars().filter(|c| !c.is_whitespace()) {
            let base = c.to_ascii_uppercase();
            if !matches!(base, 'A' | 'C' | 'G' | 'T' | 'N') {
                return Err(LabError::InvalidBase {
                    base: c,
                    position: bases.len() + 1,
                });
            }
            bases.push(base);
        }
        if bases.is_empty() {
            return Err(LabError::Empty);
        }
        Ok(Self(bases))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Base counts and GC percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SequenceStats {
    pub length: usize,
    pub a: usize,
    pub c: usize,
    pub g: usize,
    pub t: usize,
    pub n: usize,
    pub gc_percent: f64,
}

pub fn stats(sequence: &Sequence) -> SequenceStats {
    let (mut a, mut c, mut g, mut t, mut n) = (0, 0, 0, 0, 0);
    for base in sequence.0.bytes() {
        match base {
            b'A' => a += 1,
            b'C' => c += 1,
            b'G' => g += 1,
            b'T' => t += 1,
            _ => n += 1,
        }
    }
    let called = a + c + g + t;
    let gc_percent = if called == 0 {
        0.0
    } else {
        (g + c) as f64 * 100.0 / called as f64
    };
    SequenceStats {
        length: sequence.len(),
        a,
        c,
        g,
        t,
        n,
        gc_percent,
    }
}

/// GC percentage over called bases; `N` is excluded from the denominator.
pub fn gc_content(sequence: &Sequence) -> f64 {
    stats(sequence).gc_percent
}

pub fn reverse_complement(sequence: &Sequence) -> Sequence {
    let complemented = sequence
        .0
        .chars()
        .rev()
        .map(|base| match base {
            'A' => 'T',
            'T' => 'A',
            'C' => 'G',
            'G' => 'C',
            other => other,
        })
        .collect();
    Sequence(complemented)
}
