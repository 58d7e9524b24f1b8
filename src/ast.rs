//! Abstract syntax tree for the Lak language.
//!
//! Every node is a plain Rust enum variant (a closed sum type) rather than
//! a class hierarchy reached through runtime casts — matching the
//! "tagged union" design note this language follows. Each node owns its
//! children exclusively (`Box`) and carries the [`Token`] it originated
//! from for diagnostics.
//!
//! `Display` is implemented throughout to produce the canonical,
//! fully-parenthesized `to_string()` form used by the parser's precedence
//! tests: an infix expression always prints as `(L op R)`.

use crate::token::Token;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Identifier {
    pub token: Token,
    pub name: String,
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone)]
pub struct Block {
    pub token: Token,
    pub statements: Vec<Stmt>,
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        write!(f, "}}")
    }
}

#[derive(Debug, Clone)]
pub enum Expr {
    Identifier(Identifier),
    IntegerLiteral {
        token: Token,
        value: i64,
    },
    StringLiteral {
        token: Token,
        value: String,
    },
    BooleanLiteral {
        token: Token,
        value: bool,
    },
    ArrayLiteral {
        token: Token,
        elements: Vec<Expr>,
    },
    HashLiteral {
        token: Token,
        pairs: Vec<(Expr, Expr)>,
    },
    FunctionLiteral {
        token: Token,
        params: Vec<Identifier>,
        body: Block,
    },
    Prefix {
        token: Token,
        operator: String,
        right: Box<Expr>,
    },
    Infix {
        token: Token,
        operator: String,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    If {
        token: Token,
        condition: Box<Expr>,
        consequence: Block,
        alternative: Option<Block>,
    },
    Call {
        token: Token,
        function: Box<Expr>,
        arguments: Vec<Expr>,
    },
    Index {
        token: Token,
        left: Box<Expr>,
        index: Box<Expr>,
    },
}

impl Expr {
    pub fn token(&self) -> &Token {
        match self {
            Expr::Identifier(ident) => &ident.token,
            Expr::IntegerLiteral { token, .. }
            | Expr::StringLiteral { token, .. }
            | Expr::BooleanLiteral { token, .. }
            | Expr::ArrayLiteral { token, .. }
            | Expr::HashLiteral { token, .. }
            | Expr::FunctionLiteral { token, .. }
            | Expr::Prefix { token, .. }
            | Expr::Infix { token, .. }
            | Expr::If { token, .. }
            | Expr::Call { token, .. }
            | Expr::Index { token, .. } => token,
        }
    }
}

fn join(items: &[Expr], sep: &str) -> String {
    items
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(ident) => write!(f, "{}", ident),
            Expr::IntegerLiteral { value, .. } => write!(f, "{}", value),
            Expr::StringLiteral { value, .. } => write!(f, "{}", value),
            Expr::BooleanLiteral { value, .. } => write!(f, "{}", value),
            Expr::ArrayLiteral { elements, .. } => write!(f, "[{}]", join(elements, ", ")),
            Expr::HashLiteral { pairs, .. } => {
                let body = pairs
                    .iter()
                    .map(|(k, v)| format!("{}:{}", k, v))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{{{}}}", body)
            }
            Expr::FunctionLiteral { params, body, .. } => {
                let params = params
                    .iter()
                    .map(|p| p.name.clone())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "fn({}) {}", params, body)
            }
            Expr::Prefix { operator, right, .. } => write!(f, "({}{})", operator, right),
            Expr::Infix {
                operator,
                left,
                right,
                ..
            } => write!(f, "({} {} {})", left, operator, right),
            Expr::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "if{} {}", condition, consequence)?;
                if let Some(alt) = alternative {
                    write!(f, " else {}", alt)?;
                }
                Ok(())
            }
            Expr::Call {
                function,
                arguments,
                ..
            } => write!(f, "{}({})", function, join(arguments, ", ")),
            Expr::Index { left, index, .. } => write!(f, "({}[{}])", left, index),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Let {
        token: Token,
        name: Identifier,
        value: Expr,
    },
    Return {
        token: Token,
        value: Expr,
    },
    Expression {
        token: Token,
        expr: Expr,
    },
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Let { name, value, .. } => write!(f, "let {} = {};", name, value),
            Stmt::Return { value, .. } => write!(f, "return {};", value),
            Stmt::Expression { expr, .. } => write!(f, "{}", expr),
        }
    }
}

#[derive(Debug, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}
