use std::str::Chars;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    Number,
    /// A decision variable: `x` immediately followed by digits (`x1`,
    /// `x12`). The digits are part of the token, so `x12` can never lex
    /// as `x1` followed by `2`.
    Var,

    // Operators
    Plus,
    Minus,
    Star,
    Le,
    Ge,
    /// The `->` separator before the optimization direction
    Arrow,

    // Keywords
    Max,

    // Special
    Eof,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, text: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
        }
    }
}

pub struct Lexer<'a> {
    source: &'a str,
    chars: Chars<'a>,
    pos: usize,
    current: Option<char>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut chars = source.chars();
        let current = chars.next();
        Self {
            source,
            chars,
            pos: 0,
            current,
        }
    }

    pub fn tokenize(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.current;
        self.current = self.chars.next();
        if let Some(c) = c {
            self.pos += c.len_utf8();
        }
        c
    }

    fn peek(&self) -> Option<char> {
        self.current
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> Token {
        let start = self.pos;

        // Optional negative
        if self.peek() == Some('-') {
            self.advance();
        }

        // Integer part
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }

        // Decimal part
        if self.peek() == Some('.') {
            let mut chars = self.chars.clone();
            if let Some(next) = chars.next() {
                if next.is_ascii_digit() {
                    self.advance(); // consume the dot
                    while let Some(c) = self.peek() {
                        if c.is_ascii_digit() {
                            self.advance();
                        } else {
                            break;
                        }
                    }
                }
            }
        }

        Token::new(
            TokenKind::Number,
            Span::new(start, self.pos),
            &self.source[start..self.pos],
        )
    }

    fn read_ident(&mut self) -> Token {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
        let text = &self.source[start..self.pos];
        let kind = match text {
            "max" => TokenKind::Max,
            _ if is_var(text) => TokenKind::Var,
            _ => TokenKind::Error,
        };
        Token::new(kind, Span::new(start, self.pos), text)
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.pos;

        let Some(c) = self.peek() else {
            return Token::new(TokenKind::Eof, Span::new(start, start), "");
        };

        match c {
            '+' => {
                self.advance();
                Token::new(TokenKind::Plus, Span::new(start, self.pos), "+")
            }
            '-' => {
                // Could be an arrow, a negative number, or a minus
                let mut chars = self.chars.clone();
                match chars.next() {
                    Some('>') => {
                        self.advance();
                        self.advance();
                        Token::new(TokenKind::Arrow, Span::new(start, self.pos), "->")
                    }
                    Some(next) if next.is_ascii_digit() => self.read_number(),
                    _ => {
                        self.advance();
                        Token::new(TokenKind::Minus, Span::new(start, self.pos), "-")
                    }
                }
            }
            '*' => {
                self.advance();
                Token::new(TokenKind::Star, Span::new(start, self.pos), "*")
            }
            '<' | '>' => {
                self.advance();
                if self.peek() == Some('=') {
                    self.advance();
                    let (kind, text) = if c == '<' {
                        (TokenKind::Le, "<=")
                    } else {
                        (TokenKind::Ge, ">=")
                    };
                    Token::new(kind, Span::new(start, self.pos), text)
                } else {
                    Token::new(
                        TokenKind::Error,
                        Span::new(start, self.pos),
                        &self.source[start..self.pos],
                    )
                }
            }
            c if c.is_ascii_digit() => self.read_number(),
            c if c.is_alphabetic() || c == '_' => self.read_ident(),
            _ => {
                self.advance();
                Token::new(
                    TokenKind::Error,
                    Span::new(start, self.pos),
                    &self.source[start..self.pos],
                )
            }
        }
    }
}

fn is_var(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next() == Some('x') && {
        let rest = chars.as_str();
        !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit())
    }
}
