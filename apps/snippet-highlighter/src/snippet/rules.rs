//! Segmentation rules
//!
//! Each rule takes the ordered list of pieces produced so far and returns a
//! new ordered list. Rules may split a piece or rewrite its text, but never
//! move text across pieces, so the relative order of the snippet is kept.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{Piece, SegmentKind};

/// Whitespace followed by a single-letter speaker label (`" A:"`)
static TURN_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s[A-Z]:").expect("turn boundary pattern"));

/// A chunk that opens with a speaker label
static TURN_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]:").expect("turn label pattern"));

/// Sentence terminator, whitespace, then an uppercase start
static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.?!]\s+[A-Z]").expect("sentence boundary pattern"));

/// A whole token that numbers a list item: `3.`, `3)`, `6.25`, `6.25.`, `1.2.3)`
///
/// Plain decimals such as `3.5` also match and start a new segment; clause
/// numbers look the same, and the split keeps order.
static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,2}(?:[.)]|(?:\.\d{1,3})+[.)]?)$").expect("list marker pattern")
});

/// Opening quotes that extraction tends to separate from their text
const OPENING_QUOTES: [char; 3] = ['“', '„', '‘'];
/// Closing quotes that extraction tends to separate from their text
const CLOSING_QUOTES: [char; 1] = ['”'];

/// A single, independently testable splitting step
pub trait SegmentRule: Send + Sync {
    /// Rule name, used in trace output
    fn name(&self) -> &'static str;

    /// Transform the ordered pieces
    fn apply(&self, pieces: Vec<Piece>) -> Vec<Piece>;
}

/// Splits prose on speaker turns (`A:`, `B:`) of transcribed dialogue
#[derive(Debug, Default, Clone, Copy)]
pub struct DialogueTurnRule;

impl SegmentRule for DialogueTurnRule {
    fn name(&self) -> &'static str {
        "dialogue-turn"
    }

    fn apply(&self, pieces: Vec<Piece>) -> Vec<Piece> {
        let mut out = Vec::with_capacity(pieces.len());

        for piece in pieces {
            if piece.kind != SegmentKind::Prose {
                out.push(piece);
                continue;
            }

            let boundaries = TURN_BOUNDARY.find_iter(&piece.text).map(|m| m.start());
            let mut buffer = String::new();

            for (_, chunk) in split_at_offsets(&piece.text, boundaries) {
                let chunk = chunk.trim();
                if chunk.is_empty() {
                    continue;
                }

                if TURN_LABEL.is_match(chunk) {
                    flush_prose(&mut buffer, &mut out);
                    out.push(Piece::new(SegmentKind::Dialogue, chunk));
                } else {
                    if !buffer.is_empty() {
                        buffer.push(' ');
                    }
                    buffer.push_str(chunk);
                }
            }

            flush_prose(&mut buffer, &mut out);
        }

        out
    }
}

/// Splits prose after `.`, `?` or `!` when the next token starts uppercase
///
/// Dialogue turns are kept whole.
#[derive(Debug, Default, Clone, Copy)]
pub struct SentenceRule;

impl SegmentRule for SentenceRule {
    fn name(&self) -> &'static str {
        "sentence"
    }

    fn apply(&self, pieces: Vec<Piece>) -> Vec<Piece> {
        let mut out = Vec::with_capacity(pieces.len());

        for piece in pieces {
            if piece.kind != SegmentKind::Prose {
                out.push(piece);
                continue;
            }

            let text = piece.text.as_str();
            let mut start = 0;
            for m in SENTENCE_BOUNDARY.find_iter(text) {
                // Terminator and uppercase letter are both single-byte ASCII
                let end = m.start() + 1;
                if ends_with_list_marker(&text[start..end]) {
                    continue;
                }
                push_trimmed(&mut out, SegmentKind::Prose, &text[start..end]);
                start = m.end() - 1;
            }
            push_trimmed(&mut out, SegmentKind::Prose, &text[start..]);
        }

        out
    }
}

/// Splits every piece before enumerated-item markers, even mid-paragraph
#[derive(Debug, Default, Clone, Copy)]
pub struct NumberedListRule;

impl SegmentRule for NumberedListRule {
    fn name(&self) -> &'static str {
        "numbered-list"
    }

    fn apply(&self, pieces: Vec<Piece>) -> Vec<Piece> {
        let mut out = Vec::with_capacity(pieces.len());

        for piece in pieces {
            let text = piece.text.as_str();
            let markers: Vec<usize> = token_spans(text)
                .into_iter()
                // A marker must be followed by whitespace, so never the last token
                .filter(|&(start, end)| end < text.len() && LIST_MARKER.is_match(&text[start..end]))
                .map(|(start, _)| start)
                .collect();

            if markers.is_empty() {
                out.push(piece);
                continue;
            }

            let offsets = markers.iter().copied().filter(|&offset| offset > 0);
            for (offset, chunk) in split_at_offsets(text, offsets) {
                let leading = chunk.len() - chunk.trim_start().len();
                let chunk = chunk.trim();
                if chunk.is_empty() {
                    continue;
                }
                let kind = if markers.contains(&(offset + leading)) {
                    SegmentKind::ListItem
                } else {
                    piece.kind
                };
                out.push(Piece::new(kind, chunk));
            }
        }

        out
    }
}

/// Collapses `“ text` and `text ”` spacing left behind by text extraction
#[derive(Debug, Default, Clone, Copy)]
pub struct QuoteCleanupRule;

impl SegmentRule for QuoteCleanupRule {
    fn name(&self) -> &'static str {
        "quote-cleanup"
    }

    fn apply(&self, pieces: Vec<Piece>) -> Vec<Piece> {
        pieces
            .into_iter()
            .map(|piece| Piece::new(piece.kind, collapse_quote_spacing(&piece.text)))
            .collect()
    }
}

/// The rule order used by [`super::Segmenter::default`]
pub fn default_rules() -> Vec<Box<dyn SegmentRule>> {
    vec![
        Box::new(DialogueTurnRule),
        Box::new(SentenceRule),
        Box::new(NumberedListRule),
        Box::new(QuoteCleanupRule),
    ]
}

/// Whether the last token of `text` is a list marker such as `7.`
fn ends_with_list_marker(text: &str) -> bool {
    text.split_whitespace()
        .next_back()
        .is_some_and(|token| LIST_MARKER.is_match(token))
}

fn flush_prose(buffer: &mut String, out: &mut Vec<Piece>) {
    if !buffer.is_empty() {
        out.push(Piece::prose(std::mem::take(buffer)));
    }
}

fn push_trimmed(out: &mut Vec<Piece>, kind: SegmentKind, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        out.push(Piece::new(kind, text));
    }
}

/// Cut `text` into consecutive slices starting at each offset
///
/// Offsets must be ascending char boundaries. Each slice comes with its
/// starting byte offset.
fn split_at_offsets(text: &str, offsets: impl IntoIterator<Item = usize>) -> Vec<(usize, &str)> {
    let mut chunks = Vec::new();
    let mut start = 0;
    for offset in offsets {
        if offset > start {
            chunks.push((start, &text[start..offset]));
            start = offset;
        }
    }
    chunks.push((start, &text[start..]));
    chunks
}

/// Byte ranges of whitespace-delimited tokens
fn token_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                spans.push((s, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        spans.push((s, text.len()));
    }

    spans
}

fn collapse_quote_spacing(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        if c.is_whitespace() {
            let after_opening = i > 0 && OPENING_QUOTES.contains(&chars[i - 1]);
            let before_closing = chars.get(i + 1).is_some_and(|n| CLOSING_QUOTES.contains(n));
            if after_opening || before_closing {
                continue;
            }
        }
        out.push(c);
    }

    out.trim().to_string()
}
