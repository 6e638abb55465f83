//! Helpers for decomposing highlight spans.
//!
//! The catalog marks matches as `<mark style="...">match</mark>`; the opening tag may carry attributes.

use common::search_result::HighlightTextSpan;

const START_TAG_PREFIX: &str = "<mark";
const END_TAG: &str = "</mark>";

pub fn decompose_text_into_spans(text: &str) -> Vec<HighlightTextSpan> {
    let mut v = do_decompose_text_into_spans(text);
    let mut index = 0;
    for item in v.iter_mut() {
        if item.is_highlighted {
            item.index = index;
            index += 1;
        }
    }
    v
}

/// True when the text contains at least one highlighted match.
pub fn has_highlight(text: &str) -> bool {
    find_open_tag(text, 0).is_some()
}

/// Position and length of the next `<mark>` / `<mark ...>` tag at or after `from`.
fn find_open_tag(s: &str, from: usize) -> Option<(usize, usize)> {
    let mut search_from = from;
    while let Some(offset) = s[search_from..].find(START_TAG_PREFIX) {
        let pos = search_from + offset;
        let after = pos + START_TAG_PREFIX.len();
        match s[after..].chars().next() {
            Some('>') => return Some((pos, START_TAG_PREFIX.len() + 1)),
            Some(c) if c.is_whitespace() => {
                let close = s[after..].find('>')?;
                return Some((pos, after + close + 1 - pos));
            }
            // `<marker`, `<mark` at end of input: not a tag
            _ => search_from = after,
        }
    }
    None
}

fn do_decompose_text_into_spans(text: &str) -> Vec<HighlightTextSpan> {
    let text = text.replace("  ", " ");
    let s = text.trim();
    if s.is_empty() {
        return vec![];
    }
    if find_open_tag(s, 0).is_none() {
        return vec![HighlightTextSpan { text: s.to_string(), is_highlighted: false, index: 0 }];
    }

    let mut spans: Vec<HighlightTextSpan> = Vec::new();
    let mut buffer = String::new();
    let mut mark_depth: usize = 0;
    let mut i: usize = 0;

    // merges into the previous span when the highlight state matches
    let flush_buffer = |spans: &mut Vec<HighlightTextSpan>, buffer: &mut String, highlighted: bool| {
        if buffer.is_empty() {
            return;
        }
        if let Some(last) = spans.last_mut() {
            if last.is_highlighted == highlighted {
                last.text.push_str(buffer);
                buffer.clear();
                return;
            }
        }
        spans.push(HighlightTextSpan {
            text: std::mem::take(buffer),
            is_highlighted: highlighted,
            index: 0,
        });
    };

    while i < s.len() {
        let next_open = find_open_tag(s, i);
        let next_close = s[i..].find(END_TAG).map(|p| (p + i, END_TAG.len()));

        let (is_open, pos, tag_len) = match (next_open, next_close) {
            (None, None) => break,
            (Some((op, len)), None) => (true, op, len),
            (None, Some((cp, len))) => (false, cp, len),
            (Some((op, olen)), Some((cp, clen))) => {
                if op < cp { (true, op, olen) } else { (false, cp, clen) }
            }
        };

        buffer.push_str(&s[i..pos]);
        flush_buffer(&mut spans, &mut buffer, mark_depth > 0);

        if is_open {
            mark_depth = mark_depth.saturating_add(1);
        } else if mark_depth > 0 {
            mark_depth -= 1;
        } else {
            // stray closer, kept as literal text
            buffer.push_str(END_TAG);
        }
        i = pos + tag_len;
    }

    if i < s.len() {
        buffer.push_str(&s[i..]);
    }
    flush_buffer(&mut spans, &mut buffer, mark_depth > 0);

    spans
}
