//! Incremental line reassembly over a chunked byte stream.
//!
//! The transport hands back chunks of arbitrary size: a chunk boundary may
//! fall anywhere, including in the middle of a line or in the middle of a
//! multi-byte UTF-8 character (business names and addresses are not
//! ASCII-only). [`LineDecoder`] owns the reassembly so that callers see only
//! complete, trimmed lines in arrival order.

/// Reassembles newline-terminated text lines from raw byte chunks.
///
/// Holds two buffers: decoded text that does not yet contain a newline, and
/// the undecoded tail bytes of a UTF-8 sequence split by a chunk boundary.
/// Split sequences are completed by the next chunk rather than decoded
/// lossily; only genuinely invalid bytes become U+FFFD.
#[derive(Debug, Default)]
pub struct LineDecoder {
    text: String,
    partial: Vec<u8>,
}

impl LineDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and return every line it completed, oldest first.
    ///
    /// Lines are trimmed of surrounding whitespace (which also strips `\r`
    /// from CRLF streams); lines that are empty after trimming are dropped.
    /// Any text after the last newline stays buffered for the next call.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.decode_bytes(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.text.find('\n') {
            let line: String = self.text.drain(..=pos).collect();
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_owned());
            }
        }
        lines
    }

    /// Drain the trailing unterminated line, if any, at end of stream.
    ///
    /// The backend may omit the final newline; the remainder is still one
    /// record and is returned for a parse attempt. Returns `None` when
    /// nothing (or only whitespace) is buffered. Calling this again is a
    /// no-op.
    pub fn finish(&mut self) -> Option<String> {
        if !self.partial.is_empty() {
            // A dangling incomplete sequence can no longer be completed.
            let tail = std::mem::take(&mut self.partial);
            self.text.push_str(&String::from_utf8_lossy(&tail));
        }

        let rest = std::mem::take(&mut self.text);
        let trimmed = rest.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_owned())
        }
    }

    fn decode_bytes(&mut self, chunk: &[u8]) {
        let owned: Vec<u8>;
        let mut input: &[u8] = if self.partial.is_empty() {
            chunk
        } else {
            self.partial.extend_from_slice(chunk);
            owned = std::mem::take(&mut self.partial);
            &owned
        };

        loop {
            match std::str::from_utf8(input) {
                Ok(valid) => {
                    self.text.push_str(valid);
                    break;
                }
                Err(err) => {
                    let valid_len = err.valid_up_to();
                    if valid_len > 0 {
                        // The prefix up to `valid_len` is valid UTF-8, so the
                        // lossy conversion is exact here.
                        self.text
                            .push_str(&String::from_utf8_lossy(&input[..valid_len]));
                    }
                    match err.error_len() {
                        Some(invalid_len) => {
                            // Genuinely invalid bytes, not a split boundary.
                            self.text.push(char::REPLACEMENT_CHARACTER);
                            input = &input[valid_len + invalid_len..];
                        }
                        None => {
                            // The chunk ends mid-character; the rest of the
                            // sequence arrives with the next chunk.
                            self.partial = input[valid_len..].to_vec();
                            break;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "decode_test.rs"]
mod tests;
