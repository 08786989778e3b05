//! Character cursor over VDF text.
//!
//! The reader only knows which characters are special. Four whitespace
//! characters separate tokens and four control characters give the text its
//! structure; everything else is string content.

/// Token-separating whitespace: space, tab, newline, carriage return.
pub(crate) const WHITESPACE: [char; 4] = [' ', '\t', '\n', '\r'];

pub(crate) const QUOTE: char = '"';
pub(crate) const OPEN_BRACE: char = '{';
pub(crate) const CLOSE_BRACE: char = '}';
pub(crate) const BACKSLASH: char = '\\';

#[inline]
pub(crate) fn is_whitespace(ch: char) -> bool {
    WHITESPACE.contains(&ch)
}

/// Forward-only cursor with one character of lookahead.
///
/// End of input is `None` from [`Reader::next_char`] and [`Reader::peek_char`].
pub(crate) struct Reader<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        // A UTF-8 byte order mark is not content.
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        Reader {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    pub(crate) fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    pub(crate) fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if is_whitespace(ch) {
                self.next_char();
            } else {
                break;
            }
        }
    }

    pub(crate) fn line(&self) -> usize {
        self.line
    }

    pub(crate) fn column(&self) -> usize {
        self.column
    }
}
