//! Streaming FASTQ parsing, record handling and paired-end utilities.
//!
//! The parser reads records from any `io::Read` source through an internal
//! buffer. The sequence length of records is not limited by the buffer
//! size: the buffer grows until the record fits, so that the bytes of each
//! record are copied at most once. How it grows can be configured through
//! the [`policy`](policy) module.
//!
//! # Example
//!
//! This code prints the ID of each record and collects the records:
//!
//! ```rust
//! use fq_io::fastq::Reader;
//! use fq_io::{Record, SequenceRecord};
//!
//! let input = b"@read1/1 some description\nACGT\n+\nB@B@\n";
//! let mut reader = Reader::new(&input[..]);
//!
//! while let Some(result) = reader.next() {
//!     let record = result.expect("Error reading record");
//!     println!("{}", String::from_utf8_lossy(record.id_bytes()));
//! }
//!
//! let mut reader = Reader::new(&input[..]);
//! let records: Result<Vec<SequenceRecord>, _> = reader.records().collect();
//! assert_eq!(records.unwrap()[0].sequence(), "ACGT");
//! ```
//!
//! # Owned records
//!
//! [`Reader::next()`](fastq::Reader::next) hands out records borrowing from
//! the buffer. Owned records come in two flavours: [`SequenceRecord`]
//! (ASCII text, qualities optional) and [`BytesRecord`] (opaque bytes,
//! qualities mandatory). Any other type can be built directly by the parser
//! by implementing [`FromFastq`].
//!
//! # Paired-end input
//!
//! Whether two records (or raw buffers) from parallel streams belong
//! together is decided by [`ids_match`], [`records_are_mates`] and
//! [`paired_fastq_heads`].

macro_rules! unwrap_or {
    ($expr:expr, $or:block) => {
        match $expr {
            Some(item) => item,
            None => $or,
        }
    };
}

pub mod ascii;
mod core;
pub mod fastq;
mod pairing;
pub mod policy;
mod record;

pub use crate::pairing::{ids_match, paired_fastq_heads, records_are_mates};
pub use crate::record::{BytesRecord, FromFastq, Record, RecordError, SequenceRecord};

/// Commonly used traits
pub mod prelude {
    pub use crate::record::{FromFastq, Record};
}
