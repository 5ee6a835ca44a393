//! DNA lab utilities.
//!
//! Small, table-driven computations over short nucleotide sequences:
//! base composition, GC content, reverse complement and translation with
//! the standard genetic code.

mod codon;
mod error;
mod sequence;

pub use codon::{STOP, UNKNOWN, translate, translate_codon};
pub use error::{LabError, Result};
pub use sequence::{Sequence, SequenceStats, gc_content, reverse_complement, stats};
