//! Terminal output sanitization
//!
//! Clipboard contents are arbitrary and may carry escape sequences that clear
//! the screen, move the cursor or set the window title. Anything captured is
//! passed through [`sanitize_for_terminal`] before it is printed or drawn.

use std::borrow::Cow;

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Remove escape sequences and control characters, keeping tabs and newlines
///
/// Handles CSI (`ESC [ ... letter`) and OSC (`ESC ] ... BEL` or `ESC ] ... ESC \`)
/// sequences; any other escape drops only the escape character itself. Carriage
/// returns are removed so a line cannot overwrite itself. Returns the input
/// unchanged (borrowed) when there is nothing to strip.
pub fn sanitize_for_terminal(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| c.is_control() && c != '\t' && c != '\n') {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESC {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    // Parameters and intermediates up to the final letter
                    for next_ch in chars.by_ref() {
                        if next_ch.is_ascii_alphabetic() || next_ch == '~' {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(next_ch) = chars.next() {
                        if next_ch == BEL {
                            break;
                        }
                        if next_ch == ESC && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        if ch.is_control() && ch != '\t' && ch != '\n' {
            continue;
        }

        result.push(ch);
    }

    Cow::Owned(result)
}
