//! ANSI-aware text measurement, padding and truncation.
//!
//! Widths are counted in Unicode code points. Two escape grammars are
//! recognized and never counted:
//!
//! - CSI: `ESC [`, any run of non-letters, terminated by the first ASCII letter.
//! - OSC: `ESC ]`, terminated by BEL or by `ESC \`.
//!
//! An `ESC` followed by anything else is an ordinary character. A sequence
//! that never terminates swallows the rest of the string.
//!
//! Wide glyphs (CJK, most emoji) count as one column each.
//!
//! # Example
//!
//! ```rust
//! use statgrid::metrics::{pad_right, truncate, visible_width};
//!
//! assert_eq!(visible_width("\x1b[34mactive\x1b[0m"), 6);
//! assert_eq!(pad_right("ok", 4), "ok  ");
//! assert_eq!(truncate("task-workspace", 10), "task-wo...");
//! ```

const ESC: char = '\x1b';
const BEL: u8 = 0x07;

/// Marker appended by [`truncate`] and used by [`truncate_path`].
pub const ELLIPSIS: &str = "...";

/// SGR reset, appended when a cut drops the sequence that would have closed a style.
pub(crate) const SGR_RESET: &str = "\x1b[0m";

/// OSC 8 with an empty target: ends the current hyperlink.
pub(crate) const LINK_CLOSE: &str = "\x1b]8;;\x1b\\";

/// One unit of a string: a visible code point or a whole escape sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Segment<'a> {
    Text(char),
    Escape { seq: &'a str, csi: bool },
}

struct Segments<'a> {
    s: &'a str,
    pos: usize,
}

fn segments(s: &str) -> Segments<'_> {
    Segments { s, pos: 0 }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.s[self.pos..];
        let mut chars = rest.chars();
        let c = chars.next()?;

        if c == ESC {
            let len = match chars.next() {
                Some('[') => Some((csi_len(rest), true)),
                Some(']') => Some((osc_len(rest), false)),
                _ => None,
            };
            if let Some((len, csi)) = len {
                self.pos += len;
                return Some(Segment::Escape {
                    seq: &rest[..len],
                    csi,
                });
            }
        }

        self.pos += c.len_utf8();
        Some(Segment::Text(c))
    }
}

/// Byte length of the CSI sequence at the start of `rest` (which begins with `ESC [`).
fn csi_len(rest: &str) -> usize {
    match rest[2..].find(|c: char| c.is_ascii_alphabetic()) {
        Some(i) => 2 + i + 1,
        None => rest.len(),
    }
}

/// Byte length of the OSC sequence at the start of `rest` (which begins with `ESC ]`).
///
/// Scanning bytes is sound here: BEL, ESC and `\` never occur inside a
/// multi-byte UTF-8 encoding.
fn osc_len(rest: &str) -> usize {
    let body = &rest.as_bytes()[2..];
    let mut i = 0;
    while i < body.len() {
        match body[i] {
            BEL => return 2 + i + 1,
            0x1b if body.get(i + 1) == Some(&b'\\') => return 2 + i + 2,
            _ => i += 1,
        }
    }
    rest.len()
}

/// Returns the number of visible code points in `s`.
///
/// ```rust
/// use statgrid::metrics::visible_width;
///
/// assert_eq!(visible_width("hello"), 5);
/// assert_eq!(visible_width("\x1b[1;32mbold green\x1b[0m"), 10);
/// assert_eq!(visible_width("\x1b]8;;https://example.com\x07link\x1b]8;;\x07"), 4);
/// ```
pub fn visible_width(s: &str) -> usize {
    segments(s)
        .filter(|seg| matches!(seg, Segment::Text(_)))
        .count()
}

/// Returns `s` with every recognized escape sequence removed.
pub fn strip_escapes(s: &str) -> String {
    segments(s)
        .filter_map(|seg| match seg {
            Segment::Text(c) => Some(c),
            Segment::Escape { .. } => None,
        })
        .collect()
}

/// Pads `s` on the right to exactly `width` visible columns.
///
/// Strings that are already wider are cut to `width` visible code points.
/// The cut keeps every escape sequence that precedes it and drops the ones
/// that follow; if a CSI sequence survives, an SGR reset is appended so the
/// style does not bleed into the next column. A hyperlink left open by the
/// cut is closed the same way.
///
/// ```rust
/// use statgrid::metrics::pad_right;
///
/// assert_eq!(pad_right("42", 5), "42   ");
/// assert_eq!(pad_right("hello world", 5), "hello");
/// assert_eq!(pad_right("\x1b[31mhello\x1b[0m", 3), "\x1b[31mhel\x1b[0m");
/// ```
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_width(s);
    if visible >= width {
        return cut_to_width(s, width);
    }
    let mut out = String::with_capacity(s.len() + width - visible);
    out.push_str(s);
    out.push_str(&" ".repeat(width - visible));
    out
}

/// Pads `s` on the left (right-aligns it) to `width` visible columns.
///
/// Unlike [`pad_right`], wider strings are returned unchanged.
///
/// ```rust
/// use statgrid::metrics::pad_left;
///
/// assert_eq!(pad_left("42", 5), "   42");
/// assert_eq!(pad_left("hello", 3), "hello");
/// ```
pub fn pad_left(s: &str, width: usize) -> String {
    let visible = visible_width(s);
    if visible >= width {
        return s.to_string();
    }
    let mut out = " ".repeat(width - visible);
    out.push_str(s);
    out
}

/// Cuts `s` to at most `width` visible code points, keeping escapes intact.
pub(crate) fn cut_to_width(s: &str, width: usize) -> String {
    if visible_width(s) <= width {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut taken = 0;
    let mut styled = false;
    let mut linked = false;

    for seg in segments(s) {
        if taken == width {
            break;
        }
        match seg {
            Segment::Text(c) => {
                out.push(c);
                taken += 1;
            }
            Segment::Escape { seq, csi } => {
                out.push_str(seq);
                if csi {
                    styled = true;
                } else if let Some(target) = link_target(seq) {
                    linked = !target.is_empty();
                }
            }
        }
    }

    if linked {
        out.push_str(LINK_CLOSE);
    }
    if styled && !out.ends_with(SGR_RESET) {
        out.push_str(SGR_RESET);
    }
    out
}

/// Target URI of an OSC 8 hyperlink sequence; empty for a link close.
fn link_target(seq: &str) -> Option<&str> {
    let (_params, rest) = seq.strip_prefix("\x1b]8;")?.split_once(';')?;
    Some(
        rest.strip_suffix('\x07')
            .or_else(|| rest.strip_suffix("\x1b\\"))
            .unwrap_or(rest),
    )
}

/// Shortens `s` to `max_width` code points, ending in [`ELLIPSIS`].
///
/// Strings that already fit are returned unchanged, and so is everything
/// when `max_width <= 3`: there is no room for a meaningful prefix.
///
/// ```rust
/// use statgrid::metrics::truncate;
///
/// assert_eq!(truncate("short", 10), "short");
/// assert_eq!(truncate("hello world", 8), "hello...");
/// assert_eq!(truncate("hello world", 3), "hello world");
/// ```
pub fn truncate(s: &str, max_width: usize) -> String {
    if max_width <= 3 || s.chars().count() <= max_width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_width - ELLIPSIS.len()).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Shortens a `/`-delimited path, keeping the final segment whole.
///
/// The directory prefix collapses to `.../` when the last segment fits in
/// `max_width - 4` code points; otherwise this falls back to [`truncate`].
///
/// ```rust
/// use statgrid::metrics::truncate_path;
///
/// assert_eq!(truncate_path("src/layout/resolve.rs", 16), ".../resolve.rs");
/// assert_eq!(truncate_path("a/b.rs", 16), "a/b.rs");
/// assert_eq!(truncate_path("dir/averyverylongname.rs", 12), "dir/avery...");
/// ```
pub fn truncate_path(path: &str, max_width: usize) -> String {
    if path.chars().count() <= max_width {
        return path.to_string();
    }

    if let Some((_, file)) = path.rsplit_once('/') {
        let file_width = file.chars().count();
        if !file.is_empty() && max_width >= 4 && file_width <= max_width - 4 {
            return format!("{}/{}", ELLIPSIS, file);
        }
    }

    truncate(path, max_width)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn styled_fragment() -> impl Strategy<Value = (String, String)> {
        let text = "[a-zA-Z0-9 /._-]{0,12}";
        prop_oneof![
            text.prop_map(|t| (t.clone(), t)),
            (text, 0u8..108).prop_map(|(t, code)| (format!("\x1b[{}m{}\x1b[0m", code, t), t)),
            text.prop_map(|t| (format!("\x1b]8;;https://example.com\x07{}\x1b]8;;\x07", t), t)),
            text.prop_map(|t| (format!("\x1b]8;;x\x1b\\{}\x1b]8;;\x1b\\", t), t)),
        ]
    }

    proptest! {
        #[test]
        fn visible_width_matches_stripped_code_points(
            parts in prop::collection::vec(styled_fragment(), 0..6)
        ) {
            let raw: String = parts.iter().map(|(r, _)| r.as_str()).collect();
            let plain: String = parts.iter().map(|(_, p)| p.as_str()).collect();
            prop_assert_eq!(visible_width(&raw), plain.chars().count());
            prop_assert_eq!(strip_escapes(&raw), plain);
        }

        #[test]
        fn pad_right_hits_exact_width(s in "\\PC{0,30}", width in 0usize..40) {
            let s = strip_escapes(&s);
            let padded = pad_right(&s, width);
            if visible_width(&s) <= width {
                prop_assert_eq!(visible_width(&padded), width);
            } else {
                prop_assert_eq!(padded.chars().count(), width);
            }
        }

        #[test]
        fn pad_right_styled_hits_exact_width(
            parts in prop::collection::vec(styled_fragment(), 0..6),
            width in 0usize..40,
        ) {
            let raw: String = parts.iter().map(|(r, _)| r.as_str()).collect();
            prop_assert_eq!(visible_width(&pad_right(&raw, width)), width);
        }

        #[test]
        fn truncate_is_idempotent(s in "\\PC{0,40}", width in 0usize..30) {
            let once = truncate(&s, width);
            prop_assert_eq!(truncate(&once, width), once);
        }

        #[test]
        fn truncate_never_exceeds_width_above_three(s in "\\PC{0,40}", width in 4usize..30) {
            prop_assert!(truncate(&s, width).chars().count() <= width);
        }
    }
}
