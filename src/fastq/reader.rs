use crate::ascii::is_ascii;
use crate::core::{self, shorten, trim_cr, SNIPPET_LIMIT};
use crate::fastq::{Error, ErrorKind, Result};
use crate::policy::{BufPolicy, StdPolicy};
use crate::record::{FromFastq, Record, RecordError, SequenceRecord};
use memchr::{memchr, memchr_iter};
use std::fs::File;
use std::io;
use std::marker::PhantomData;
use std::path::Path;

/// FASTQ parser.
///
/// Records are searched in an internal buffer that is filled from the
/// underlying reader. If a record does not fit, the buffer grows according
/// to the configured [`BufPolicy`](crate::policy::BufPolicy) until it does;
/// records are thus never size-limited by the initial capacity, and the
/// bytes of a record are copied at most once after having been read.
///
/// [`next()`](Reader::next) returns [`RefRecord`](RefRecord)s borrowing
/// from the buffer. Owned records of any type implementing
/// [`FromFastq`](crate::FromFastq) are obtained with
/// [`read_next()`](Reader::read_next) or the
/// [`records()`](Reader::records) / [`into_records()`](Reader::into_records)
/// iterators.
pub struct Reader<R: io::Read, P = StdPolicy>
where
    P: BufPolicy,
{
    buf_reader: core::BufReader<R, P>,
    buf_pos: BufferPosition,
    // Index of the record currently searched or emitted (0-based)
    record_idx: u64,
    // Whether the first record has been located
    started: bool,
    // A located record is pending emission (see second_header_repeated)
    peeked: bool,
    // Whether the first record repeats its header after '+'
    first_two_headers: Option<bool>,
    // The source is exhausted
    eof: bool,
    // A synthetic '\n' was appended to complete the final line
    extra_newline: bool,
    // Terminal: end of input reached or an error was returned
    finished: bool,
}

impl<R> Reader<R, StdPolicy>
where
    R: io::Read,
{
    /// Creates a new reader with the default initial buffer capacity of
    /// 64 KiB.
    pub fn new(reader: R) -> Self {
        Self::with_cap_and_policy(reader, core::BUFSIZE, StdPolicy)
    }

    /// Creates a reader with the given initial buffer capacity (≥ 1).
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self::with_cap_and_policy(reader, capacity, StdPolicy)
    }
}

impl Reader<File, StdPolicy> {
    /// Creates a reader from a file path.
    pub fn from_path<F: AsRef<Path>>(path: F) -> io::Result<Reader<File>> {
        File::open(path).map(Reader::new)
    }
}

impl<R, P> Reader<R, P>
where
    R: io::Read,
    P: BufPolicy,
{
    /// Creates a new reader with a given initial buffer capacity (≥ 1) and
    /// growth policy.
    pub fn with_cap_and_policy(reader: R, capacity: usize, policy: P) -> Reader<R, P> {
        Reader {
            buf_reader: core::BufReader::new(reader, capacity, policy),
            buf_pos: BufferPosition::default(),
            record_idx: 0,
            started: false,
            peeked: false,
            first_two_headers: None,
            eof: false,
            extra_newline: false,
            finished: false,
        }
    }

    /// Searches the next record and returns a [`RefRecord`](RefRecord) that
    /// borrows its data from the underlying buffer of this reader.
    ///
    /// Parsing errors are fatal: after an error has been returned once, all
    /// further calls return `None`.
    pub fn next(&mut self) -> Option<Result<RefRecord<'_>>> {
        match self.advance() {
            Ok(false) => None,
            Ok(true) => Some(Ok(RefRecord {
                buffer: self.buf_reader.buffer(),
                buf_pos: &self.buf_pos,
            })),
            Err(e) => Some(Err(e)),
        }
    }

    /// Searches the next record and builds an owned record of type `T` from
    /// it, copying each field once.
    ///
    /// For builders with [`ASCII_ONLY`](crate::FromFastq::ASCII_ONLY) set,
    /// the whole record is validated as 7-bit ASCII in a single sweep
    /// beforehand; non-ASCII input fails with `ErrorKind::NonAscii`.
    pub fn read_next<T: FromFastq>(&mut self) -> Option<Result<T>> {
        match self.advance() {
            Ok(false) => None,
            Err(e) => Some(Err(e)),
            Ok(true) => {
                let buffer = self.buf_reader.buffer();
                let pos = &self.buf_pos;
                if T::ASCII_ONLY && !is_ascii(&buffer[pos.start..pos.end]) {
                    let line = self.record_idx * 4;
                    self.finished = true;
                    return Some(Err(Error::new(ErrorKind::NonAscii { line })));
                }
                // ASCII_ONLY builders require validated input; the sweep
                // above covers the whole record span.
                let record = unsafe {
                    T::from_fastq(pos.head(buffer), pos.seq(buffer), pos.qual(buffer))
                };
                Some(Ok(record))
            }
        }
    }

    /// Returns whether the first record of the input repeats its header
    /// after the `+`, parsing the first record if it has not been reached
    /// yet. The record itself is still returned by the following call to
    /// [`next()`](Reader::next) or [`read_next()`](Reader::read_next).
    ///
    /// Knowing this allows rewriting a file in its original flavour. On
    /// empty input, `false` is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use fq_io::fastq::Reader;
    /// use fq_io::Record;
    ///
    /// let mut reader = Reader::new(&b"@id\nACGT\n+id\nIIII\n"[..]);
    /// assert!(reader.second_header_repeated().unwrap());
    /// // the first record is still there
    /// let record = reader.next().unwrap().unwrap();
    /// assert_eq!(record.name(), b"id");
    /// ```
    pub fn second_header_repeated(&mut self) -> Result<bool> {
        if self.first_two_headers.is_none() && !self.finished && self.advance()? {
            self.peeked = true;
        }
        Ok(self.first_two_headers.unwrap_or(false))
    }

    /// Returns an iterator over owned records of type `T`, borrowing the
    /// reader.
    pub fn records<T: FromFastq>(&mut self) -> RecordsIter<'_, R, P, T> {
        RecordsIter {
            rdr: self,
            _marker: PhantomData,
        }
    }

    /// Returns an iterator over owned records of type `T` that takes
    /// ownership of the reader.
    pub fn into_records<T: FromFastq>(self) -> RecordsIntoIter<R, P, T> {
        RecordsIntoIter {
            rdr: self,
            _marker: PhantomData,
        }
    }

    /// Returns the position of the record currently emitted (or about to be
    /// emitted).
    pub fn position(&self) -> Position {
        Position {
            line: self.record_idx * 4,
            byte: self.buf_reader.file_offset() + self.buf_pos.start as u64,
            record: self.record_idx,
        }
    }

    // Moves to the next record start and locates it, filling (and possibly
    // enlarging) the buffer as needed. Ok(true) means `buf_pos` holds a
    // complete, validated record.
    fn advance(&mut self) -> Result<bool> {
        match self.advance_inner() {
            Err(e) => {
                self.finished = true;
                Err(e)
            }
            other => other,
        }
    }

    fn advance_inner(&mut self) -> Result<bool> {
        if self.finished {
            return Ok(false);
        }
        if self.peeked {
            self.peeked = false;
            return Ok(true);
        }
        if self.started {
            // discard the record emitted before
            self.buf_pos.start = self.buf_pos.end;
            self.record_idx += 1;
        }
        loop {
            if self.find()? {
                self.started = true;
                return Ok(true);
            }
            if self.eof {
                return self.check_end();
            }
            self.refill()?;
        }
    }

    // Tries to locate a complete record at `buf_pos.start` by searching the
    // four line endings. Returns false if the buffered data ends first.
    fn find(&mut self) -> Result<bool> {
        let pos = {
            let buffer = self.buf_reader.buffer();
            let start = self.buf_pos.start;
            let seq = unwrap_or!(find_line(buffer, start), {
                return Ok(false);
            });
            let sep = unwrap_or!(find_line(buffer, seq), {
                return Ok(false);
            });
            let qual = unwrap_or!(find_line(buffer, sep), {
                return Ok(false);
            });
            let end = unwrap_or!(find_line(buffer, qual), {
                return Ok(false);
            });
            BufferPosition {
                start,
                seq,
                sep,
                qual,
                end,
            }
        };
        self.buf_pos = pos;
        self.validate()?;
        if self.first_two_headers.is_none() {
            let two = !self.buf_pos.sep_head(self.buf_reader.buffer()).is_empty();
            self.first_two_headers = Some(two);
        }
        Ok(true)
    }

    // Should only be called on a complete BufferPosition
    fn validate(&self) -> Result<()> {
        let buffer = self.buf_reader.buffer();
        let pos = &self.buf_pos;

        let start_byte = buffer[pos.start];
        if start_byte != b'@' {
            return Err(Error::new(ErrorKind::InvalidStart {
                line: self.record_idx * 4,
                found: start_byte,
            }));
        }

        let sep_byte = buffer[pos.sep];
        if sep_byte != b'+' {
            return Err(Error::new(ErrorKind::InvalidSep {
                line: self.record_idx * 4 + 2,
                found: sep_byte,
            }));
        }

        let sep_head = pos.sep_head(buffer);
        if !sep_head.is_empty() && sep_head != pos.head(buffer) {
            return Err(Error::new(ErrorKind::SecondHeaderMismatch {
                line: self.record_idx * 4 + 2,
                head: shorten(pos.head(buffer), SNIPPET_LIMIT),
                sep_head: shorten(sep_head, SNIPPET_LIMIT),
            }));
        }

        let seq_len = pos.seq(buffer).len();
        let qual_len = pos.qual(buffer).len();
        if seq_len != qual_len {
            return Err(Error::new(ErrorKind::UnequalLengths {
                line: self.record_idx * 4 + 3,
                seq: seq_len,
                qual: qual_len,
            }));
        }
        Ok(())
    }

    // Makes room for (or grows) the buffer and reads more data. At EOF,
    // repairs a missing final newline with a synthetic one.
    fn refill(&mut self) -> Result<()> {
        if self.buf_pos.start == 0 && self.buf_reader.is_full() {
            // a single record occupies the whole buffer
            if !self.buf_reader.grow() {
                return Err(Error::new(ErrorKind::BufferLimit));
            }
        } else if self.buf_pos.start > 0 {
            self.buf_reader.make_room(self.buf_pos.start);
            self.buf_pos.start = 0;
        }

        let num_read = self.buf_reader.fill_buf()?;
        if num_read == 0 {
            self.eof = true;
            let buffer = self.buf_reader.buffer();
            if buffer.len() > self.buf_pos.start && buffer[buffer.len() - 1] != b'\n' {
                if !self.buf_reader.append_newline() {
                    return Err(Error::new(ErrorKind::BufferLimit));
                }
                self.extra_newline = true;
            }
        }
        Ok(())
    }

    // Called when no further record can be found and the input is
    // exhausted: either a clean end of input, or a truncated record.
    fn check_end(&mut self) -> Result<bool> {
        self.finished = true;
        let buffer = self.buf_reader.buffer();
        let leftover = &buffer[self.buf_pos.start..];
        if leftover.is_empty() {
            return Ok(false);
        }
        let newlines = memchr_iter(b'\n', leftover).count() as u64;
        let line = self.record_idx * 4 + newlines - self.extra_newline as u64;
        Err(Error::new(ErrorKind::UnexpectedEnd { line }))
    }
}

#[inline]
fn find_line(buffer: &[u8], search_start: usize) -> Option<usize> {
    memchr(b'\n', &buffer[search_start..]).map(|pos| search_start + pos + 1)
}

/// Holds line number, byte offset and record index of a FASTQ record,
/// as returned by [`Reader::position()`](Reader::position).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    line: u64,
    byte: u64,
    record: u64,
}

impl Position {
    /// Line index (0-based)
    #[inline]
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Byte offset within the input
    #[inline]
    pub fn byte(&self) -> u64 {
        self.byte
    }

    /// Record index (0-based) in the input
    #[inline]
    pub fn record(&self) -> u64 {
        self.record
    }
}

/// Represents the position of a record within the buffer: `start` points at
/// the `@`, `seq`, `sep` and `qual` at the respective line starts, `end`
/// past the final newline.
#[derive(Debug, Clone, Default)]
struct BufferPosition {
    start: usize,
    seq: usize,
    sep: usize,
    qual: usize,
    end: usize,
}

impl BufferPosition {
    #[inline]
    fn head<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        trim_cr(&buffer[self.start + 1..self.seq - 1])
    }

    #[inline]
    fn seq<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        trim_cr(&buffer[self.seq..self.sep - 1])
    }

    #[inline]
    fn sep_head<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        trim_cr(&buffer[self.sep + 1..self.qual - 1])
    }

    #[inline]
    fn qual<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        trim_cr(&buffer[self.qual..self.end - 1])
    }
}

/// A FASTQ record that borrows data from the reader's buffer
#[derive(Debug, Clone)]
pub struct RefRecord<'a> {
    buffer: &'a [u8],
    buf_pos: &'a BufferPosition,
}

impl<'a> Record for RefRecord<'a> {
    #[inline]
    fn name(&self) -> &[u8] {
        self.buf_pos.head(self.buffer)
    }

    #[inline]
    fn sequence(&self) -> &[u8] {
        self.buf_pos.seq(self.buffer)
    }

    #[inline]
    fn qualities(&self) -> Option<&[u8]> {
        Some(self.buf_pos.qual(self.buffer))
    }
}

impl<'a> RefRecord<'a> {
    /// Returns the header repeated after the `+`, or `None` if the
    /// separator line is bare.
    #[inline]
    pub fn second_header(&self) -> Option<&'a [u8]> {
        let sep_head = self.buf_pos.sep_head(self.buffer);
        if sep_head.is_empty() {
            None
        } else {
            Some(sep_head)
        }
    }

    /// Copies the data into an owned [`SequenceRecord`](SequenceRecord),
    /// validating it as ASCII text.
    pub fn to_sequence_record(&self) -> std::result::Result<SequenceRecord, RecordError> {
        let name = String::from_utf8(self.name().to_vec())
            .map_err(|_| RecordError::NonAscii { field: "name" })?;
        let sequence = String::from_utf8(self.sequence().to_vec())
            .map_err(|_| RecordError::NonAscii { field: "sequence" })?;
        let qualities = String::from_utf8(self.buf_pos.qual(self.buffer).to_vec())
            .map_err(|_| RecordError::NonAscii { field: "qualities" })?;
        SequenceRecord::new(name, sequence, Some(qualities))
    }

    /// Copies the data into an owned [`BytesRecord`](crate::BytesRecord).
    pub fn to_bytes_record(&self) -> crate::BytesRecord {
        // BytesRecord has no ASCII requirement
        unsafe {
            crate::BytesRecord::from_fastq(
                self.name(),
                self.sequence(),
                self.buf_pos.qual(self.buffer),
            )
        }
    }

    /// Writes the record to the given `io::Write` instance as it appeared
    /// in the input (including `\r` bytes, if any), which is faster than
    /// re-assembling it from the field slices. A missing final newline is
    /// written as `\n`.
    pub fn write_unchanged<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        let data = &self.buffer[self.buf_pos.start..self.buf_pos.end];
        writer.write_all(data)
    }
}

/// Borrowed iterator over owned records of type `T`
pub struct RecordsIter<'a, R, P, T>
where
    R: io::Read,
    P: BufPolicy,
{
    rdr: &'a mut Reader<R, P>,
    _marker: PhantomData<T>,
}

impl<'a, R, P, T> Iterator for RecordsIter<'a, R, P, T>
where
    R: io::Read,
    P: BufPolicy,
    T: FromFastq,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rdr.read_next()
    }
}

/// Iterator over owned records of type `T` that owns the underlying reader
pub struct RecordsIntoIter<R, P, T>
where
    R: io::Read,
    P: BufPolicy,
{
    rdr: Reader<R, P>,
    _marker: PhantomData<T>,
}

impl<R, P, T> Iterator for RecordsIntoIter<R, P, T>
where
    R: io::Read,
    P: BufPolicy,
    T: FromFastq,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rdr.read_next()
    }
}
