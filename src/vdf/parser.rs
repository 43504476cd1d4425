//! Tokenizer and parser for VDF text.
//!
//! The parser is iterative: nesting depth is limited only by the input size,
//! never by the call stack.

use thiserror::Error;
use tracing::debug;

use super::VdfNode;

/// Failure to parse a VDF document. Positions are 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VdfParseError {
    /// A quoted string reached end of input before its closing quote
    #[error("unterminated string starting at line {line}, column {column}")]
    UnterminatedString {
        /// Line of the opening quote
        line: usize,
        /// Column of the opening quote
        column: usize,
    },

    /// A `}` with no open block
    #[error("unexpected '}}' at line {line}, column {column}")]
    UnexpectedCloseBrace {
        /// Line of the brace
        line: usize,
        /// Column of the brace
        column: usize,
    },

    /// A `{` where a key was expected
    #[error("unexpected '{{' at line {line}, column {column}; expected a key")]
    UnexpectedOpenBrace {
        /// Line of the brace
        line: usize,
        /// Column of the brace
        column: usize,
    },

    /// End of input inside a block
    #[error("block '{key}' opened at line {line}, column {column} is never closed")]
    UnclosedBlock {
        /// Key of the unclosed block
        key: String,
        /// Line of the key
        line: usize,
        /// Column of the key
        column: usize,
    },

    /// A key followed by `}` or end of input
    #[error("key '{key}' at line {line}, column {column} has no value")]
    MissingValue {
        /// The dangling key
        key: String,
        /// Line of the key
        line: usize,
        /// Column of the key
        column: usize,
    },

    /// The document holds no top-level block
    #[error("document contains no root object")]
    NoRootObject,
}

#[derive(Debug, PartialEq, Eq)]
enum TokenKind {
    /// Quoted or bare string
    Text {
        value: String,
        quoted: bool,
    },
    Open,
    Close,
    Eof,
}

#[derive(Debug)]
struct Token {
    kind: TokenKind,
    line: usize,
    column: usize,
}

struct Lexer<'src> {
    source: &'src [u8],
    pos: usize,
    line: usize,
    line_start: usize,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str) -> Self {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        Self {
            source: source.as_bytes(),
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    fn column(&self) -> usize {
        self.pos - self.line_start + 1
    }

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let ch = self.peek()?;
        self.pos += 1;
        if ch == b'\n' {
            self.line += 1;
            self.line_start = self.pos;
        }
        Some(ch)
    }

    /// Skip whitespace, `//` comments and `[$PLATFORM]` conditionals.
    fn skip_trivia(&mut self) {
        loop {
            while self.peek().is_some_and(|ch| ch.is_ascii_whitespace()) {
                self.bump();
            }

            match self.peek() {
                Some(b'/') if self.source.get(self.pos + 1) == Some(&b'/') => {
                    while self.peek().is_some_and(|ch| ch != b'\n') {
                        self.bump();
                    }
                }
                Some(b'[') => {
                    while let Some(ch) = self.bump() {
                        if ch == b']' || ch == b'\n' {
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, VdfParseError> {
        self.skip_trivia();

        let line = self.line;
        let column = self.column();
        let kind = match self.peek() {
            None => TokenKind::Eof,
            Some(b'{') => {
                self.bump();
                TokenKind::Open
            }
            Some(b'}') => {
                self.bump();
                TokenKind::Close
            }
            Some(b'"') => TokenKind::Text {
                value: self.scan_quoted(line, column)?,
                quoted: true,
            },
            Some(_) => TokenKind::Text {
                value: self.scan_bare(),
                quoted: false,
            },
        };

        Ok(Token {
            kind,
            line,
            column,
        })
    }

    fn scan_quoted(&mut self, line: usize, column: usize) -> Result<String, VdfParseError> {
        self.bump(); // opening quote
        let mut bytes = Vec::new();
        loop {
            match self.bump() {
                None => {
                    return Err(VdfParseError::UnterminatedString {
                        line,
                        column,
                    });
                }
                Some(b'"') => break,
                Some(b'\\') => match self.peek() {
                    Some(escaped @ (b'"' | b'\\')) => {
                        self.bump();
                        bytes.push(escaped);
                    }
                    _ => bytes.push(b'\\'),
                },
                Some(ch) => bytes.push(ch),
            }
        }
        // Only ASCII bytes were dropped, so the slice is still valid UTF-8.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn scan_bare(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|ch| !ch.is_ascii_whitespace() && !matches!(ch, b'{' | b'}' | b'"'))
        {
            self.bump();
        }
        String::from_utf8_lossy(&self.source[start..self.pos]).into_owned()
    }
}

/// A block that has been opened but not yet closed.
struct Frame {
    node: VdfNode,
    line: usize,
    column: usize,
}

/// Parse a VDF document and return its first top-level block.
///
/// # Errors
///
/// Returns [`VdfParseError`] for unbalanced braces, unterminated strings, keys
/// without values, or a document without any top-level block.
pub fn parse(text: &str) -> Result<VdfNode, VdfParseError> {
    let mut lexer = Lexer::new(text);
    let mut stack = vec![Frame {
        node: VdfNode::new(""),
        line: 1,
        column: 1,
    }];

    loop {
        let token = lexer.next_token()?;
        match token.kind {
            TokenKind::Eof => break,
            TokenKind::Open => {
                return Err(VdfParseError::UnexpectedOpenBrace {
                    line: token.line,
                    column: token.column,
                });
            }
            TokenKind::Close => {
                if stack.len() == 1 {
                    return Err(VdfParseError::UnexpectedCloseBrace {
                        line: token.line,
                        column: token.column,
                    });
                }
                if let Some(frame) = stack.pop() {
                    let key = frame.node.name().to_string();
                    if let Some(parent) = stack.last_mut() {
                        parent.node.push_child(key, frame.node);
                    }
                }
            }
            TokenKind::Text {
                value: key,
                quoted,
            } => {
                let value = lexer.next_token()?;
                match value.kind {
                    TokenKind::Text {
                        value,
                        ..
                    } if !quoted && key.starts_with('#') => {
                        debug!("Ignoring VDF directive {} {}", key, value);
                    }
                    TokenKind::Text {
                        value,
                        ..
                    } => {
                        if let Some(frame) = stack.last_mut() {
                            frame.node.insert_attribute(key, value);
                        }
                    }
                    TokenKind::Open => stack.push(Frame {
                        node: VdfNode::new(key),
                        line: token.line,
                        column: token.column,
                    }),
                    TokenKind::Close | TokenKind::Eof => {
                        return Err(VdfParseError::MissingValue {
                            key,
                            line: token.line,
                            column: token.column,
                        });
                    }
                }
            }
        }
    }

    if stack.len() > 1 {
        // Report the innermost unclosed block.
        if let Some(frame) = stack.pop() {
            return Err(VdfParseError::UnclosedBlock {
                key: frame.node.name().to_string(),
                line: frame.line,
                column: frame.column,
            });
        }
    }

    let mut document = stack.pop().map(|frame| frame.node).unwrap_or_default();
    let top_level = document.children.len() + document.attributes.len();
    let mut children = std::mem::take(&mut document.children).into_iter();
    match children.next() {
        Some((_, root)) => {
            if top_level > 1 {
                debug!("VDF document has {} top-level entries; using '{}'", top_level, root.name());
            }
            Ok(root)
        }
        None => Err(VdfParseError::NoRootObject),
    }
}
