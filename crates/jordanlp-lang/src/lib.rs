pub mod lexer;
pub mod parser;

pub use lexer::{Lexer, Span, Token, TokenKind};
pub use parser::{ParseError, Parser, max_var_index};
