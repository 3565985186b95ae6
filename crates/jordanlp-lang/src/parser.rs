use crate::lexer::{Lexer, Span, Token, TokenKind};
use jordanlp_solver::{Constraint, Objective, Problem, Relation};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token: expected {expected}, found {found} at position {span:?}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },
    #[error("Unexpected end of input")]
    UnexpectedEof,
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Unknown variable {name}: expected x1..x{num_vars}")]
    UnknownVariable { name: String, num_vars: usize },
    #[error("Variable {0} appears more than once")]
    DuplicateVariable(String),
    #[error("Constraint is missing a relation (<= or >=)")]
    MissingRelation,
}

/// Parser for single objective/constraint lines.
///
/// Produces plain coefficient vectors: no sign normalization happens
/// here. The tableau builder owns the maximize-to-minimize negation and
/// the `>=` to `<=` conversion.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    num_vars: usize,
}

impl Parser {
    fn new(source: &str, num_vars: usize) -> Self {
        Self {
            tokens: Lexer::tokenize(source),
            pos: 0,
            num_vars,
        }
    }

    /// Parse an objective line: `2x1 + 3x2 -> max`.
    ///
    /// Anything after the `-> max` marker is discarded.
    pub fn parse_objective(source: &str, num_vars: usize) -> Result<Objective, ParseError> {
        let mut parser = Parser::new(source, num_vars);
        let coefficients = parser.parse_terms()?;
        parser.expect(TokenKind::Arrow, "->")?;
        parser.expect(TokenKind::Max, "max")?;
        Ok(Objective { coefficients })
    }

    /// Parse a constraint line: `x1 + 2*x2 <= 5` or `x1 - x2 >= -3`.
    pub fn parse_constraint(source: &str, num_vars: usize) -> Result<Constraint, ParseError> {
        let mut parser = Parser::new(source, num_vars);
        let coefficients = parser.parse_terms()?;
        let relation = match parser.peek_kind() {
            TokenKind::Le => Relation::Le,
            TokenKind::Ge => Relation::Ge,
            _ => return Err(ParseError::MissingRelation),
        };
        parser.advance();
        let rhs = parser.parse_signed_number()?;
        parser.expect(TokenKind::Eof, "end of input")?;
        Ok(Constraint {
            coefficients,
            relation,
            rhs,
        })
    }

    /// Parse a whole problem: one objective line plus constraint lines.
    pub fn parse_problem(
        objective: &str,
        constraints: &[&str],
        num_vars: usize,
    ) -> Result<Problem, ParseError> {
        let mut problem = Problem::new(num_vars);
        problem.objective = Self::parse_objective(objective, num_vars)?;
        for line in constraints {
            problem.constraints.push(Self::parse_constraint(line, num_vars)?);
        }
        Ok(problem)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> TokenKind {
        self.current().map(|t| t.kind).unwrap_or(TokenKind::Eof)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ParseError> {
        let token = self.current().cloned();
        match token {
            Some(t) if t.kind == kind => {
                self.advance();
                Ok(t)
            }
            Some(t) => Err(ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: t.text.clone(),
                span: t.span,
            }),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    /// Parse a sum of linear terms into a dense coefficient vector.
    ///
    /// Implicit coefficients follow the classic convention: `x2` is +1,
    /// `-x2` is -1, `+x2` is +1. A variable absent from the line keeps
    /// coefficient 0; a variable mentioned twice is an error. Stops at
    /// the first token that cannot start a term (`->`, `<=`, `>=`, end).
    fn parse_terms(&mut self) -> Result<Vec<f64>, ParseError> {
        let mut coefficients = vec![0.0; self.num_vars];
        let mut seen = vec![false; self.num_vars];

        loop {
            match self.peek_kind() {
                TokenKind::Arrow | TokenKind::Le | TokenKind::Ge | TokenKind::Eof => break,
                _ => {}
            }

            let mut sign = 1.0;
            while matches!(self.peek_kind(), TokenKind::Plus | TokenKind::Minus) {
                if self.peek_kind() == TokenKind::Minus {
                    sign = -sign;
                }
                self.advance();
            }

            let mut coefficient = sign;
            if self.peek_kind() == TokenKind::Number {
                let token = self.advance().cloned().ok_or(ParseError::UnexpectedEof)?;
                coefficient = sign * parse_number(&token)?;
                if self.peek_kind() == TokenKind::Star {
                    self.advance();
                }
            }

            let token = self.expect(TokenKind::Var, "a variable like x1")?;
            let index = self.var_index(&token)?;
            if seen[index - 1] {
                return Err(ParseError::DuplicateVariable(token.text.clone()));
            }
            seen[index - 1] = true;
            coefficients[index - 1] = coefficient;
        }

        Ok(coefficients)
    }

    fn parse_signed_number(&mut self) -> Result<f64, ParseError> {
        let mut sign = 1.0;
        while matches!(self.peek_kind(), TokenKind::Plus | TokenKind::Minus) {
            if self.peek_kind() == TokenKind::Minus {
                sign = -sign;
            }
            self.advance();
        }
        let token = self.expect(TokenKind::Number, "a number")?;
        Ok(sign * parse_number(&token)?)
    }

    fn var_index(&self, token: &Token) -> Result<usize, ParseError> {
        let index: usize = token.text[1..]
            .parse()
            .map_err(|_| ParseError::InvalidNumber(token.text.clone()))?;
        if index == 0 || index > self.num_vars {
            return Err(ParseError::UnknownVariable {
                name: token.text.clone(),
                num_vars: self.num_vars,
            });
        }
        Ok(index)
    }
}

fn parse_number(token: &Token) -> Result<f64, ParseError> {
    token
        .text
        .parse()
        .map_err(|_| ParseError::InvalidNumber(token.text.clone()))
}

/// Highest variable index mentioned in a line (0 when none). Used to
/// infer the variable count when the caller does not supply one.
pub fn max_var_index(source: &str) -> usize {
    Lexer::tokenize(source)
        .iter()
        .filter(|t| t.kind == TokenKind::Var)
        .filter_map(|t| t.text[1..].parse::<usize>().ok())
        .max()
        .unwrap_or(0)
}
