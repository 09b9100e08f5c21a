//! Normalization of captured child-process output.

/// Raw output of a child process, in whichever form it was captured.
///
/// Process plumbing hands back bytes; recorded fixtures and fakes hand
/// back text or line sequences. Every form renders to a single string
/// through [`CapturedOutput::normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapturedOutput {
    /// Already-decoded text.
    Text(String),

    /// An ordered sequence of text chunks.
    Lines(Vec<String>),

    /// Raw bytes straight from the pipe.
    Bytes(Vec<u8>),

    /// Anything else; renders empty.
    Unrecognized,
}

impl CapturedOutput {
    /// Normalize to a single string.
    ///
    /// Total over all variants: text is returned unchanged, line sequences
    /// are newline-joined, bytes are decoded lossily as UTF-8, and
    /// unrecognized input becomes the empty string.
    pub fn normalize(self) -> String {
        match self {
            CapturedOutput::Text(text) => text,
            CapturedOutput::Lines(lines) => lines.join("\n"),
            CapturedOutput::Bytes(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            CapturedOutput::Unrecognized => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_passes_through_unchanged() {
        let out = CapturedOutput::Text("hello\nworld".to_string());
        assert_eq!(out.normalize(), "hello\nworld");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = CapturedOutput::Lines(vec!["a".to_string(), "b".to_string()]).normalize();
        let twice = CapturedOutput::Text(once.clone()).normalize();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_lines_are_newline_joined() {
        let out = CapturedOutput::Lines(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(out.normalize(), "a\nb");
    }

    #[test]
    fn test_bytes_decode_as_utf8() {
        let out = CapturedOutput::Bytes(b"ok\n".to_vec());
        assert_eq!(out.normalize(), "ok\n");
    }

    #[test]
    fn test_invalid_utf8_decodes_lossily() {
        let out = CapturedOutput::Bytes(vec![0x66, 0x6f, 0xff, 0x6f]);
        let normalized = out.normalize();
        assert!(normalized.starts_with("fo"));
        assert!(normalized.contains('\u{FFFD}'));
    }

    #[test]
    fn test_unrecognized_renders_empty() {
        assert_eq!(CapturedOutput::Unrecognized.normalize(), "");
    }
}
