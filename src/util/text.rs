use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Single-column ellipsis appended to truncated text.
const ELLIPSIS: char = '…';

/// Terminal columns occupied by `s`, accounting for wide CJK and emoji.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate `s` to at most `max_width` columns, ending in `…` when cut.
///
/// Returns `Cow::Borrowed` when the string already fits. Zero-width
/// characters never count against the budget.
///
/// ```
/// use roost::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Seaside", 10), "Seaside");
/// assert_eq!(truncate_to_width("Seaside cottage", 8), "Seaside…");
/// assert_eq!(truncate_to_width("Loft", 0), "");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    // Reserve one column for the ellipsis
    let budget = max_width - 1;
    let mut used = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        end = idx + c.len_utf8();
    }

    let mut out = String::with_capacity(end + ELLIPSIS.len_utf8());
    out.push_str(s[..end].trim_end());
    out.push(ELLIPSIS);
    Cow::Owned(out)
}

/// Greedy word wrap to `width` columns. Words wider than a line are split.
///
/// Blank input lines are kept as empty strings so paragraphs survive.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = display_width(word);
            let needed = if current.is_empty() {
                word_width
            } else {
                current_width + 1 + word_width
            };

            if needed <= width {
                if !current.is_empty() {
                    current.push(' ');
                    current_width += 1;
                }
                current.push_str(word);
                current_width += word_width;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            // Hard-split words that cannot fit on a line of their own
            for c in word.chars() {
                let w = UnicodeWidthChar::width(c).unwrap_or(0);
                if current_width + w > width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(c);
                current_width += w;
            }
        }

        lines.push(current);
    }

    lines
}

/// Remove terminal control characters and ANSI escape sequences.
///
/// Listing text comes from a fixture file that may have been edited by hand,
/// so anything that could move the cursor or recolor the terminal is
/// dropped before rendering. Tab and newline survive.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    let is_unsafe = |c: char| c == '\x1b' || c == '\x7f' || (c.is_control() && c != '\t' && c != '\n');

    if !s.chars().any(is_unsafe) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\x1b' => match chars.peek() {
                // CSI: parameters until a final byte in @..~
                Some('[') => {
                    chars.next();
                    for c in chars.by_ref() {
                        if ('@'..='~').contains(&c) {
                            break;
                        }
                    }
                }
                // OSC: until BEL or ESC \
                Some(']') => {
                    chars.next();
                    while let Some(c) = chars.next() {
                        if c == '\x07' {
                            break;
                        }
                        if c == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            },
            c if is_unsafe(c) => {}
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}
