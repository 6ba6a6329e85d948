use crate::policy::BufPolicy;
use std::io;

/// The default initial buffer size for readers.
pub const BUFSIZE: usize = 64 * 1024;

/// Buffered reader owning the parse buffer, managing buffer growth based on
/// `BufPolicy` and the relocation of buffer contents with `make_room()`.
/// Does not implement `std::io::BufRead`: consumption is driven by the
/// parser, which tracks the start of the pending record itself.
///
/// The buffer layout is
///
/// ```text
/// [ emitted ][ pending record(s) ][ free ]
/// 0          start               end     capacity
/// ```
///
/// where `start` is owned by the parser and `end` by this type.
pub(crate) struct BufReader<R, P> {
    reader: R,
    buf: Box<[u8]>,
    // Bytes in buf[..end] were read from the source (or synthesized, see
    // append_newline); buf[end..] is free space.
    end: usize,
    // Number of bytes discarded by make_room(), i.e. the position of buf[0]
    // within the whole input.
    file_offset: u64,
    policy: P,
}

impl<R, P> BufReader<R, P>
where
    R: io::Read,
    P: BufPolicy,
{
    #[inline]
    pub fn new(reader: R, capacity: usize, policy: P) -> Self {
        assert!(capacity >= 1, "reader buffer capacity must be at least 1");
        BufReader {
            reader,
            buf: vec![0; capacity].into_boxed_slice(),
            end: 0,
            file_offset: 0,
            policy,
        }
    }

    #[inline]
    pub fn buffer(&self) -> &[u8] {
        &self.buf[..self.end]
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.end == self.buf.len()
    }

    #[inline]
    pub fn file_offset(&self) -> u64 {
        self.file_offset
    }

    /// Makes sure the buffer is full after this call (unless EOF reached).
    /// Returns the number of bytes read; zero means end of input.
    /// Code adapted from `io::Read::read_exact`.
    pub fn fill_buf(&mut self) -> io::Result<usize> {
        let mut num_read = 0;
        while self.end < self.buf.len() {
            match self.reader.read(&mut self.buf[self.end..]) {
                Ok(0) => break,
                Ok(n) => {
                    self.end += n;
                    num_read += n;
                }
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(num_read)
    }

    /// Move the bytes in `buf[offset..end]` to the start of the buffer,
    /// discarding everything before `offset`.
    pub fn make_room(&mut self, offset: usize) {
        debug_assert!(offset <= self.end);
        self.buf.copy_within(offset..self.end, 0);
        self.end -= offset;
        self.file_offset += offset as u64;
    }

    /// Grow the buffer according to the policy, preserving its contents.
    /// Returns `false` if the policy's limit does not allow further growth.
    pub fn grow(&mut self) -> bool {
        let cap = self.buf.len();
        let new_size = match self.policy.next_size(cap) {
            Some(s) => s,
            None => return false,
        };
        debug_assert!(new_size > cap);
        let mut new_buf = vec![0; new_size].into_boxed_slice();
        new_buf[..self.end].copy_from_slice(&self.buf[..self.end]);
        self.buf = new_buf;
        true
    }

    /// Append a synthetic final newline, used when the input ends without
    /// one. Returns `false` if the buffer was full and could not grow.
    pub fn append_newline(&mut self) -> bool {
        if self.end == self.buf.len() && !self.grow() {
            return false;
        }
        self.buf[self.end] = b'\n';
        self.end += 1;
        true
    }
}
