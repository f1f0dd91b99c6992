//! Accumulates raw bytes read from a client until a full HTTP/1.1 request
//! has arrived.
//!
//! Only the framing is inspected: the request line for the method, and the
//! `Content-Length` / `Transfer-Encoding` headers to find the end of the body.
//! The bytes themselves are kept untouched so they can be echoed verbatim.
//!
//! Parsing is incremental. Each [`Request::update`] resumes where the previous
//! one stopped, so feeding a request in many small reads stays linear.

const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";
const CRLF: &[u8] = b"\r\n";

/// Methods that never carry a request body.
pub const BODILESS_METHODS: [&str; 5] = ["CONNECT", "GET", "HEAD", "OPTIONS", "TRACE"];

/// Returns true if the request line starts with a bodiless method.
pub fn bodiless_request(line: &str) -> bool {
    BODILESS_METHODS.iter().any(|method| line.starts_with(method))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BodyFraming {
    None,
    Length(usize),
    Chunked,
}

/// Where the chunked-body walk currently stands.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ChunkState {
    /// Waiting for a chunk-size line starting at `pos`.
    Size,
    /// After the zero-size chunk: trailer lines until an empty one.
    Trailers,
}

/// Facts about the head, computed once when it has fully arrived.
#[derive(Debug, Clone)]
struct Head {
    /// Offset of the first body byte.
    end: usize,
    request_line: String,
    framing: BodyFraming,
}

#[derive(Debug, Default, Clone)]
pub struct Request {
    raw: Vec<u8>,
    head: Option<Head>,
    /// Offset from which the head terminator search resumes.
    scanned: usize,
    /// Absolute offset of the next unparsed chunk-size or trailer line.
    chunk_pos: usize,
    chunk_state: Option<ChunkState>,
    complete: bool,
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn parse_framing(head: &str) -> BodyFraming {
    let mut framing = BodyFraming::None;

    // Skip the request line; the rest are `name: value` pairs.
    for line in head.split("\r\n").skip(1) {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        let value = value.trim();

        if name.eq_ignore_ascii_case("transfer-encoding") && value.to_ascii_lowercase().contains("chunked") {
            // Chunked wins over any Content-Length.
            return BodyFraming::Chunked;
        }
        if name.eq_ignore_ascii_case("content-length") {
            if let Ok(len) = value.parse::<usize>() {
                framing = BodyFraming::Length(len);
            }
        }
    }

    framing
}

/// Parses a chunk-size line, ignoring chunk extensions after `;`.
fn parse_chunk_size(line: &[u8]) -> Option<usize> {
    let line = std::str::from_utf8(line).ok()?;
    let size = line.split(';').next().unwrap_or_default().trim();
    usize::from_str_radix(size, 16).ok()
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, chunk: &[u8]) {
        self.raw.extend_from_slice(chunk);
        if !self.complete {
            self.advance();
        }
    }

    /// Every byte received so far, in arrival order.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.raw
    }

    pub fn head_complete(&self) -> bool {
        self.head.is_some()
    }

    /// The request line, once the head has arrived.
    pub fn request_line(&self) -> Option<&str> {
        self.head.as_ref().map(|h| h.request_line.as_str())
    }

    /// True once the head and, for methods that may carry one, the whole body have arrived.
    pub fn body_complete(&self) -> bool {
        self.complete
    }

    fn advance(&mut self) {
        if self.head.is_none() && !self.scan_head() {
            return;
        }
        let Some((end, framing, bodiless)) = self
            .head
            .as_ref()
            .map(|h| (h.end, h.framing, bodiless_request(&h.request_line)))
        else {
            return;
        };

        self.complete = bodiless
            || match framing {
                BodyFraming::None => true,
                BodyFraming::Length(len) => self.raw.len() - end >= len,
                BodyFraming::Chunked => self.walk_chunks(),
            };
    }

    /// Looks for the end of the head in the newly arrived bytes.
    fn scan_head(&mut self) -> bool {
        // Back up so a terminator split across reads is still found.
        let from = self.scanned.saturating_sub(HEAD_TERMINATOR.len() - 1);
        self.scanned = self.raw.len();

        let Some(pos) = find(&self.raw[from..], HEAD_TERMINATOR) else {
            return false;
        };
        let end = from + pos + HEAD_TERMINATOR.len();

        let text = String::from_utf8_lossy(&self.raw[..end]);
        let request_line = text.split("\r\n").next().unwrap_or_default().to_string();
        let framing = parse_framing(&text);

        if framing == BodyFraming::Chunked {
            self.chunk_pos = end;
            self.chunk_state = Some(ChunkState::Size);
        }
        self.head = Some(Head {
            end,
            request_line,
            framing,
        });
        true
    }

    /// Walks chunk-size lines and trailers from `chunk_pos`. True once the
    /// blank line after the zero-size chunk (and any trailers) has arrived.
    fn walk_chunks(&mut self) -> bool {
        loop {
            // Still inside the data of the previous chunk.
            if self.chunk_pos >= self.raw.len() {
                return false;
            }
            let Some(line_len) = find(&self.raw[self.chunk_pos..], CRLF) else {
                return false;
            };
            let line_start = self.chunk_pos;
            let next = line_start + line_len + CRLF.len();

            match self.chunk_state {
                Some(ChunkState::Size) => match parse_chunk_size(&self.raw[line_start..line_start + line_len]) {
                    Some(0) => {
                        self.chunk_state = Some(ChunkState::Trailers);
                        self.chunk_pos = next;
                    }
                    // Skip the data and its trailing CRLF.
                    Some(size) => self.chunk_pos = next + size + CRLF.len(),
                    None => {
                        log::debug!("Malformed chunk size line at offset {}, echoing as is", line_start);
                        return true;
                    }
                },
                Some(ChunkState::Trailers) => {
                    if line_len == 0 {
                        return true;
                    }
                    self.chunk_pos = next;
                }
                None => return true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CHUNKED_HEAD: &[u8] = b"POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n";

    fn chunked(body: &[u8]) -> Request {
        let mut req = Request::new();
        req.update(CHUNKED_HEAD);
        req.update(body);
        req
    }

    #[test]
    fn test_bodiless_request() {
        assert!(bodiless_request("GET / HTTP/1.1"));
        assert!(bodiless_request("OPTIONS * HTTP/1.1"));
        assert!(!bodiless_request("POST / HTTP/1.1\r\n\r\nBODY"));
        assert!(!bodiless_request("PUT / HTTP/1.1\r\nContent-Type: total/funk\r\n\r\nBODY"));
    }

    #[test]
    fn get_is_complete_at_end_of_head() {
        let mut req = Request::new();
        req.update(b"GET / HTTP/1.1\r\nHost: loc");
        assert!(!req.head_complete());
        assert!(!req.body_complete());
        assert_eq!(req.request_line(), None);

        req.update(b"alhost\r\n\r\n");
        assert!(req.head_complete());
        assert!(req.body_complete());
        assert_eq!(req.request_line(), Some("GET / HTTP/1.1"));
    }

    #[test]
    fn head_terminator_split_across_reads() {
        let mut req = Request::new();
        req.update(b"GET / HTTP/1.1\r\n\r");
        assert!(!req.body_complete());
        req.update(b"\n");
        assert!(req.body_complete());
    }

    #[test]
    fn post_waits_for_content_length() {
        let mut req = Request::new();
        req.update(b"POST / HTTP/1.1\r\ncontent-length: 4\r\n\r\nBO");
        assert!(req.head_complete());
        assert!(!req.body_complete());

        req.update(b"DY");
        assert!(req.body_complete());
        assert_eq!(req.raw(), b"POST / HTTP/1.1\r\ncontent-length: 4\r\n\r\nBODY");
    }

    #[test]
    fn post_without_length_is_complete_at_end_of_head() {
        let mut req = Request::new();
        req.update(b"POST / HTTP/1.1\r\nOther: other\r\n\r\n");
        assert!(req.body_complete());
    }

    #[test]
    fn chunked_body_waits_for_last_chunk() {
        let mut req = Request::new();
        req.update(b"POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\nContent-Length: 1\r\n\r\n4\r\nBODY\r\n");
        assert!(!req.body_complete());

        req.update(b"0\r\n\r\n");
        assert!(req.body_complete());
    }

    #[test]
    fn chunk_data_ending_in_zero_is_not_the_last_chunk() {
        // "ab0\r\n" is five bytes of data; the request's last chunk has not been sent.
        let mut req = chunked(b"5\r\nab0\r\n\r\n");
        assert!(!req.body_complete());

        req.update(b"0\r\n\r\n");
        assert!(req.body_complete());
    }

    #[test]
    fn chunked_with_trailers_completes_at_blank_line() {
        let mut req = chunked(b"4\r\nBODY\r\n0\r\nX-Trailer: y\r\n");
        assert!(!req.body_complete());

        req.update(b"\r\n");
        assert!(req.body_complete());
    }

    #[test]
    fn chunk_extensions_are_ignored() {
        let req = chunked(b"a;name=value\r\n0123456789\r\n0\r\n\r\n");
        assert!(req.body_complete());
    }

    #[test]
    fn byte_at_a_time_matches_single_read() {
        let whole: &[u8] =
            b"POST /x HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n3\r\n0\r\n\r\n2\r\nhi\r\n0\r\nTrailer: 1\r\n\r\n";

        let mut req = Request::new();
        for (i, byte) in whole.iter().enumerate() {
            assert!(!req.body_complete(), "completed early at byte {i}");
            req.update(std::slice::from_ref(byte));
        }
        assert!(req.body_complete());
        assert_eq!(req.request_line(), Some("POST /x HTTP/1.1"));
        assert_eq!(req.into_raw(), whole.to_vec());
    }

    #[test]
    fn content_length_byte_at_a_time() {
        let whole: &[u8] = b"PUT / HTTP/1.1\r\nContent-Length: 6\r\n\r\n\r\n\r\nab";

        let mut req = Request::new();
        for byte in &whole[..whole.len() - 1] {
            req.update(std::slice::from_ref(byte));
        }
        assert!(!req.body_complete());
        req.update(&whole[whole.len() - 1..]);
        assert!(req.body_complete());
    }
}
