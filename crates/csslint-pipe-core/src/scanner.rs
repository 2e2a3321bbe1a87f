//! Event scanner feeding rule listeners.
//!
//! This is not a CSS parser. It splits a stylesheet into rule blocks and
//! declarations, tracking positions, and emits the events rules subscribe to:
//!
//! ```text
//! StartStylesheet
//!   StartRule { selectors }   (one per declaration block)
//!     Property { name, value, important }
//!   EndRule
//! EndStylesheet
//! ```
//!
//! Grouping at-rules (`@media`, `@supports`, ...) are transparent: their
//! nested blocks are scanned as if they were top-level. At-rule statements
//! (`@import ...;`) produce no events.

/// At-rules whose block contains rule sets rather than declarations.
const GROUPING_AT_RULES: &[&str] = &["@media", "@supports", "@document", "@layer", "@container"];

/// A selector of a rule block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Selector text, trimmed.
    pub text: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub col: usize,
}

/// Start of a declaration block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartRule {
    /// Comma-separated selectors of the block.
    pub selectors: Vec<Selector>,
    /// Line of the first selector.
    pub line: usize,
    /// Column of the first selector.
    pub col: usize,
}

/// A single `name: value` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property name as written.
    pub name: String,
    /// Value with any `!important` suffix removed.
    pub value: String,
    /// Whether the declaration carried `!important`.
    pub important: bool,
    /// Line of the property name.
    pub line: usize,
    /// Column of the property name.
    pub col: usize,
}

/// End of a declaration block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndRule {
    /// Selectors of the block being closed.
    pub selectors: Vec<Selector>,
    /// Line of the first selector.
    pub line: usize,
    /// Column of the first selector.
    pub col: usize,
}

/// Events emitted while scanning a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Scanning started.
    StartStylesheet,
    /// A declaration block opened.
    StartRule(StartRule),
    /// A declaration inside the current block.
    Property(Property),
    /// The current declaration block closed.
    EndRule(EndRule),
    /// Scanning finished.
    EndStylesheet,
}

/// A character with its 1-indexed position.
#[derive(Debug, Clone, Copy)]
struct Positioned {
    ch: char,
    line: usize,
    col: usize,
}

struct Cursor {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Cursor {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<Positioned> {
        let ch = self.peek()?;
        let positioned = Positioned {
            ch,
            line: self.line,
            col: self.col,
        };
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(positioned)
    }

    fn at_comment(&self) -> bool {
        self.peek() == Some('/') && self.peek_at(1) == Some('*')
    }

    fn skip_comment(&mut self) {
        self.bump();
        self.bump();
        while self.peek().is_some() {
            if self.peek() == Some('*') && self.peek_at(1) == Some('/') {
                self.bump();
                self.bump();
                return;
            }
            self.bump();
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.at_comment() => self.skip_comment(),
                _ => return,
            }
        }
    }

    /// Reads until one of `stops` appears outside strings, comments and
    /// parentheses. The stop character is not consumed.
    fn read_until(&mut self, stops: &[char]) -> Vec<Positioned> {
        let mut out = Vec::new();
        let mut parens = 0usize;
        while let Some(c) = self.peek() {
            if self.at_comment() {
                self.skip_comment();
                continue;
            }
            if parens == 0 && stops.contains(&c) {
                break;
            }
            match c {
                '"' | '\'' => {
                    self.read_string(c, &mut out);
                    continue;
                }
                '(' => parens += 1,
                ')' => parens = parens.saturating_sub(1),
                _ => {}
            }
            if let Some(p) = self.bump() {
                out.push(p);
            }
        }
        out
    }

    fn read_string(&mut self, quote: char, out: &mut Vec<Positioned>) {
        if let Some(p) = self.bump() {
            out.push(p);
        }
        while let Some(p) = self.bump() {
            out.push(p);
            if p.ch == '\\' {
                if let Some(escaped) = self.bump() {
                    out.push(escaped);
                }
            } else if p.ch == quote || p.ch == '\n' {
                return;
            }
        }
    }

    /// Skips a nested `{ ... }` block whose opening brace is next.
    fn skip_block(&mut self) {
        let mut depth = 0usize;
        while let Some(c) = self.peek() {
            if self.at_comment() {
                self.skip_comment();
                continue;
            }
            if c == '"' || c == '\'' {
                let mut sink = Vec::new();
                self.read_string(c, &mut sink);
                continue;
            }
            self.bump();
            match c {
                '{' => depth += 1,
                '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }
}

fn text_of(chars: &[Positioned]) -> String {
    chars.iter().map(|p| p.ch).collect()
}

/// Trims whitespace, returning the remaining slice.
fn trim(chars: &[Positioned]) -> &[Positioned] {
    let start = chars
        .iter()
        .position(|p| !p.ch.is_whitespace())
        .unwrap_or(chars.len());
    let end = chars
        .iter()
        .rposition(|p| !p.ch.is_whitespace())
        .map_or(start, |i| i + 1);
    &chars[start..end.max(start)]
}

fn split_selectors(prelude: &[Positioned]) -> Vec<Selector> {
    let mut selectors = Vec::new();
    let mut parens = 0usize;
    let mut start = 0;
    for (i, p) in prelude.iter().enumerate() {
        match p.ch {
            '(' | '[' => parens += 1,
            ')' | ']' => parens = parens.saturating_sub(1),
            ',' if parens == 0 => {
                push_selector(&mut selectors, &prelude[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    push_selector(&mut selectors, &prelude[start..]);
    selectors
}

fn push_selector(selectors: &mut Vec<Selector>, chars: &[Positioned]) {
    let trimmed = trim(chars);
    if let Some(first) = trimmed.first() {
        selectors.push(Selector {
            text: text_of(trimmed),
            line: first.line,
            col: first.col,
        });
    }
}

fn parse_declaration(chars: &[Positioned]) -> Option<Property> {
    let colon = chars.iter().position(|p| p.ch == ':')?;
    let name_chars = trim(&chars[..colon]);
    let first = name_chars.first()?;
    let raw_value = text_of(trim(&chars[colon + 1..]));

    let (value, important) = match raw_value.rfind('!') {
        Some(bang) if raw_value[bang + 1..].trim().eq_ignore_ascii_case("important") => {
            (raw_value[..bang].trim_end().to_string(), true)
        }
        _ => (raw_value, false),
    };

    Some(Property {
        name: text_of(name_chars),
        value,
        important,
        line: first.line,
        col: first.col,
    })
}

/// Scans a declaration block whose `{` has been consumed.
fn scan_block(cursor: &mut Cursor, events: &mut Vec<Event>) {
    loop {
        cursor.skip_trivia();
        match cursor.peek() {
            None => return,
            Some('}') => {
                cursor.bump();
                return;
            }
            Some(';') => {
                cursor.bump();
            }
            Some(_) => {
                let decl = cursor.read_until(&[';', '}', '{']);
                if cursor.peek() == Some('{') {
                    // nested rule, not supported by the reference rules
                    cursor.skip_block();
                    continue;
                }
                if let Some(property) = parse_declaration(&decl) {
                    events.push(Event::Property(property));
                }
            }
        }
    }
}

fn is_grouping_at_rule(prelude: &str) -> bool {
    let lower = prelude.to_ascii_lowercase();
    GROUPING_AT_RULES.iter().any(|at| {
        lower
            .strip_prefix(at)
            .is_some_and(|rest| {
                rest.is_empty() || rest.starts_with(|c: char| !c.is_alphanumeric() && c != '-')
            })
    })
}

/// Scans a stylesheet into the event sequence rules listen to.
#[must_use]
pub fn scan(text: &str) -> Vec<Event> {
    let mut cursor = Cursor::new(text);
    let mut events = vec![Event::StartStylesheet];

    loop {
        cursor.skip_trivia();
        match cursor.peek() {
            None => break,
            Some('}' | ';') => {
                // closes a grouping at-rule, or a stray terminator
                cursor.bump();
            }
            Some(_) => {
                let prelude = cursor.read_until(&['{', ';', '}']);
                match cursor.peek() {
                    Some('{') => {
                        cursor.bump();
                        let prelude = trim(&prelude);
                        if is_grouping_at_rule(&text_of(prelude)) {
                            continue;
                        }
                        let selectors = split_selectors(prelude);
                        let (line, col) = prelude
                            .first()
                            .map_or((cursor.line, cursor.col), |p| (p.line, p.col));
                        events.push(Event::StartRule(StartRule {
                            selectors: selectors.clone(),
                            line,
                            col,
                        }));
                        scan_block(&mut cursor, &mut events);
                        events.push(Event::EndRule(EndRule {
                            selectors,
                            line,
                            col,
                        }));
                    }
                    Some(';') => {
                        cursor.bump();
                    }
                    _ => {}
                }
            }
        }
    }

    events.push(Event::EndStylesheet);
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn properties(events: &[Event]) -> Vec<&Property> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::Property(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn scans_rule_with_positions() {
        let events = scan(".a {\n  color: red;\n}\n");
        assert_eq!(events.len(), 5);
        let Event::StartRule(start) = &events[1] else {
            panic!("expected StartRule, got {:?}", events[1]);
        };
        assert_eq!(start.selectors[0].text, ".a");
        assert_eq!((start.line, start.col), (1, 1));

        let props = properties(&events);
        assert_eq!(props[0].name, "color");
        assert_eq!(props[0].value, "red");
        assert_eq!((props[0].line, props[0].col), (2, 3));
    }

    #[test]
    fn detects_important_suffix() {
        let events = scan("a { color: red !important; margin: 0 ! IMPORTANT }");
        let props = properties(&events);
        assert!(props[0].important);
        assert_eq!(props[0].value, "red");
        assert!(props[1].important);
        assert_eq!(props[1].value, "0");
    }

    #[test]
    fn splits_selectors_on_top_level_commas() {
        let events = scan("a, .b:not(.c, .d) , #e { }");
        let Event::StartRule(start) = &events[1] else {
            panic!("expected StartRule");
        };
        let texts: Vec<&str> = start.selectors.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["a", ".b:not(.c, .d)", "#e"]);
    }

    #[test]
    fn ignores_comments_and_strings() {
        let events = scan("/* a { color: red } */ a { content: \"};{\"; }");
        let props = properties(&events);
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].value, "\"};{\"");
    }

    #[test]
    fn media_blocks_are_transparent() {
        let events = scan("@import url(x.css);\n@media screen { a { color: red } }");
        let starts = events
            .iter()
            .filter(|e| matches!(e, Event::StartRule(_)))
            .count();
        assert_eq!(starts, 1);
        assert_eq!(properties(&events).len(), 1);
    }

    #[test]
    fn whitespace_only_input_yields_bare_stylesheet() {
        assert_eq!(
            scan("  \n\t"),
            vec![Event::StartStylesheet, Event::EndStylesheet]
        );
    }

    #[test]
    fn unterminated_block_still_closes() {
        let events = scan("a { color: red");
        assert!(matches!(events[events.len() - 2], Event::EndRule(_)));
    }
}
