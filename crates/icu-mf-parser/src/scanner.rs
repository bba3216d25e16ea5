//! Character level scanning of message text.
//!
//! [`Scanner`] owns the cursor and keeps the running line and column. It
//! classifies what comes next in message text ([`Scanner::peek_token`]) and
//! reads literal runs with the ICU apostrophe quoting rules
//! ([`Scanner::scan_literal`]). Argument internals are read by the parser
//! through the lower level `bump*` helpers.

use crate::location::{Location, LocationDetails};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Eof,
    /// Literal text, read with [`Scanner::scan_literal`].
    Text,
    /// `{`
    ArgumentStart,
    /// `}`
    CloseBrace,
    /// `#` inside plural content.
    Pound,
    /// `<` followed by a letter.
    TagStart,
    /// `</`
    ClosingTagStart,
}

/// Where in a message the scanner is reading text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextContext {
    /// Inside a `plural` or `selectordinal` branch, where `#` is special.
    pub in_plural: bool,
    pub ignore_tag: bool,
}

#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a str,
    offset: usize,
    line: u32,
    column: u32,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn position(&self) -> LocationDetails {
        LocationDetails::new(self.offset, self.line, self.column)
    }

    pub fn location_from(&self, start: LocationDetails) -> Location {
        Location::new(start, self.position())
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.input.len()
    }

    pub fn current(&self) -> Option<char> {
        self.input[self.offset..].chars().next()
    }

    /// The character after the current one.
    pub fn peek(&self) -> Option<char> {
        let mut chars = self.input[self.offset..].chars();
        chars.next();
        chars.next()
    }

    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.input[start..self.offset]
    }

    pub fn bump(&mut self) -> Option<char> {
        let ch = self.current()?;
        self.offset += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    pub fn bump_if(&mut self, prefix: &str) -> bool {
        if self.input[self.offset..].starts_with(prefix) {
            for _ in prefix.chars() {
                self.bump();
            }
            true
        } else {
            false
        }
    }

    pub fn bump_if_char(&mut self, expected: char) -> bool {
        if self.current() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Advances to the next `target` without consuming it. Returns `false`
    /// after running to the end of input when there is none.
    pub fn bump_until(&mut self, target: char) -> bool {
        while let Some(ch) = self.current() {
            if ch == target {
                return true;
            }
            self.bump();
        }
        false
    }

    pub fn bump_space(&mut self) {
        while self.current().is_some_and(is_white_space) {
            self.bump();
        }
    }

    /// Reads an argument name, selector or type keyword: everything up to
    /// white space or ICU pattern syntax.
    pub fn scan_identifier(&mut self) -> (&'a str, Location) {
        let start = self.position();
        while self
            .current()
            .is_some_and(|ch| !is_white_space(ch) && !is_pattern_syntax(ch))
        {
            self.bump();
        }
        (self.slice_from(start.offset), self.location_from(start))
    }

    pub fn scan_tag_name(&mut self) -> &'a str {
        let start = self.offset;
        while self.current().is_some_and(is_tag_name_char) {
            self.bump();
        }
        self.slice_from(start)
    }

    pub fn peek_token(&self, context: TextContext) -> TokenKind {
        let Some(ch) = self.current() else {
            return TokenKind::Eof;
        };
        match ch {
            '{' => TokenKind::ArgumentStart,
            '}' => TokenKind::CloseBrace,
            '#' if context.in_plural => TokenKind::Pound,
            '<' if !context.ignore_tag => match self.peek() {
                Some('/') => TokenKind::ClosingTagStart,
                Some(next) if next.is_ascii_alphabetic() => TokenKind::TagStart,
                _ => TokenKind::Text,
            },
            _ => TokenKind::Text,
        }
    }

    /// Reads one literal run, resolving quotes. Stops before anything that
    /// [`Scanner::peek_token`] reports as structural.
    pub fn scan_literal(&mut self, context: TextContext) -> (String, Location) {
        let start = self.position();
        let mut value = String::new();
        loop {
            if let Some(quoted) = self.scan_quoted(context) {
                value.push_str(&quoted);
            } else if let Some(ch) = self.scan_unquoted(context) {
                value.push(ch);
            } else if let Some(ch) = self.scan_left_angle(context) {
                value.push(ch);
            } else {
                break;
            }
        }
        (value, self.location_from(start))
    }

    /// `''` is an apostrophe; `'` before a syntax character starts a quoted
    /// run that lasts until the next lone `'`.
    fn scan_quoted(&mut self, context: TextContext) -> Option<String> {
        if self.current() != Some('\'') {
            return None;
        }
        match self.peek() {
            Some('\'') => {
                self.bump();
                self.bump();
                return Some("'".to_string());
            }
            Some('{' | '<' | '>' | '}') => {}
            Some('#') if context.in_plural => {}
            _ => return None,
        }

        self.bump();
        let mut quoted = String::new();
        if let Some(ch) = self.bump() {
            quoted.push(ch);
        }
        while let Some(ch) = self.current() {
            if ch == '\'' {
                if self.peek() == Some('\'') {
                    quoted.push('\'');
                    self.bump();
                } else {
                    self.bump();
                    break;
                }
            } else {
                quoted.push(ch);
            }
            self.bump();
        }
        Some(quoted)
    }

    fn scan_unquoted(&mut self, context: TextContext) -> Option<char> {
        let ch = self.current()?;
        if ch == '<' || ch == '{' || ch == '}' || (ch == '#' && context.in_plural) {
            return None;
        }
        self.bump()
    }

    fn scan_left_angle(&mut self, context: TextContext) -> Option<char> {
        if self.current() != Some('<') {
            return None;
        }
        let starts_tag = self.peek().is_some_and(|ch| ch == '/' || ch.is_ascii_alphabetic());
        if context.ignore_tag || !starts_tag {
            self.bump()
        } else {
            None
        }
    }
}

/// Unicode `Pattern_White_Space`.
pub fn is_white_space(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n'
            | '\u{000B}'
            | '\u{000C}'
            | '\r'
            | ' '
            | '\u{0085}'
            | '\u{200E}'
            | '\u{200F}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Unicode `Pattern_Syntax`.
pub fn is_pattern_syntax(ch: char) -> bool {
    matches!(
        ch,
        '!'..='/'
            | ':'..='@'
            | '['..='^'
            | '`'
            | '{'..='~'
            | '\u{00A1}'..='\u{00A7}'
            | '\u{00A9}'
            | '\u{00AB}'
            | '\u{00AC}'
            | '\u{00AE}'
            | '\u{00B0}'
            | '\u{00B1}'
            | '\u{00B6}'
            | '\u{00BB}'
            | '\u{00BF}'
            | '\u{00D7}'
            | '\u{00F7}'
            | '\u{2010}'..='\u{2027}'
            | '\u{2030}'..='\u{203E}'
            | '\u{2041}'..='\u{2053}'
            | '\u{2055}'..='\u{205E}'
            | '\u{2190}'..='\u{245F}'
            | '\u{2500}'..='\u{2775}'
            | '\u{2794}'..='\u{2BFF}'
            | '\u{2E00}'..='\u{2E7F}'
            | '\u{3001}'..='\u{3003}'
            | '\u{3008}'..='\u{3020}'
            | '\u{3030}'
            | '\u{FD3E}'
            | '\u{FD3F}'
            | '\u{FE45}'
            | '\u{FE46}'
    )
}

/// XML `NameChar`, minus `:`.
pub fn is_tag_name_char(ch: char) -> bool {
    matches!(
        ch,
        '-' | '.'
            | '0'..='9'
            | '_'
            | 'a'..='z'
            | 'A'..='Z'
            | '\u{00B7}'
            | '\u{00C0}'..='\u{00D6}'
            | '\u{00D8}'..='\u{00F6}'
            | '\u{00F8}'..='\u{037D}'
            | '\u{037F}'..='\u{1FFF}'
            | '\u{200C}'..='\u{200D}'
            | '\u{203F}'..='\u{2040}'
            | '\u{2070}'..='\u{218F}'
            | '\u{2C00}'..='\u{2FEF}'
            | '\u{3001}'..='\u{D7FF}'
            | '\u{F900}'..='\u{FDCF}'
            | '\u{FDF0}'..='\u{FFFD}'
            | '\u{10000}'..='\u{EFFFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::{Scanner, TextContext, TokenKind, is_pattern_syntax};
    use crate::location::LocationDetails;

    fn plural() -> TextContext {
        TextContext {
            in_plural: true,
            ignore_tag: false,
        }
    }

    #[test]
    fn tracks_lines_and_columns() {
        let mut scanner = Scanner::new("ab\ncé");
        scanner.bump();
        scanner.bump();
        scanner.bump();
        assert_eq!(scanner.position(), LocationDetails::new(3, 2, 1));
        scanner.bump();
        scanner.bump();
        assert_eq!(scanner.position(), LocationDetails::new(6, 2, 3));
        assert!(scanner.is_eof());
    }

    #[test]
    fn classifies_structural_tokens() {
        let context = TextContext::default();
        assert_eq!(Scanner::new("{a}").peek_token(context), TokenKind::ArgumentStart);
        assert_eq!(Scanner::new("}").peek_token(context), TokenKind::CloseBrace);
        assert_eq!(Scanner::new("<b>").peek_token(context), TokenKind::TagStart);
        assert_eq!(Scanner::new("</b>").peek_token(context), TokenKind::ClosingTagStart);
        assert_eq!(Scanner::new("< b").peek_token(context), TokenKind::Text);
        assert_eq!(Scanner::new("#").peek_token(context), TokenKind::Text);
        assert_eq!(Scanner::new("#").peek_token(plural()), TokenKind::Pound);
        assert_eq!(Scanner::new("").peek_token(context), TokenKind::Eof);
    }

    #[test]
    fn literal_stops_at_argument() {
        let mut scanner = Scanner::new("Hello {name}");
        let (value, location) = scanner.scan_literal(TextContext::default());
        assert_eq!(value, "Hello ");
        assert_eq!(location.end(), LocationDetails::new(6, 1, 7));
        assert_eq!(scanner.current(), Some('{'));
    }

    #[test]
    fn resolves_quotes() {
        let mut scanner = Scanner::new("It''s '{literal}' here");
        let (value, _) = scanner.scan_literal(TextContext::default());
        assert_eq!(value, "It's {literal} here");
        assert!(scanner.is_eof());
    }

    #[test]
    fn keeps_lone_apostrophes() {
        let mut scanner = Scanner::new("don't 'quote'");
        let (value, _) = scanner.scan_literal(TextContext::default());
        assert_eq!(value, "don't 'quote'");
    }

    #[test]
    fn quoted_pound_only_in_plural() {
        let mut scanner = Scanner::new("'#' items");
        let (value, _) = scanner.scan_literal(plural());
        assert_eq!(value, "# items");

        let mut scanner = Scanner::new("'#' items");
        let (value, _) = scanner.scan_literal(TextContext::default());
        assert_eq!(value, "'#' items");
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        let mut scanner = Scanner::new("a '{b");
        let (value, _) = scanner.scan_literal(TextContext::default());
        assert_eq!(value, "a {b");
    }

    #[test]
    fn angle_brackets_are_text_when_tags_are_ignored() {
        let context = TextContext {
            in_plural: false,
            ignore_tag: true,
        };
        let mut scanner = Scanner::new("<b>bold</b>");
        assert_eq!(scanner.peek_token(context), TokenKind::Text);
        let (value, _) = scanner.scan_literal(context);
        assert_eq!(value, "<b>bold</b>");
    }

    #[test]
    fn identifiers_stop_at_pattern_syntax() {
        let mut scanner = Scanner::new("user_name, number");
        let (name, location) = scanner.scan_identifier();
        assert_eq!(name, "user_name");
        assert_eq!(location.end().offset, 9);
        assert!(is_pattern_syntax(','));
        assert!(!is_pattern_syntax('_'));
    }
}
