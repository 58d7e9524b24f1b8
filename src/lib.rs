//! The Lak programming language interpreter library.
//!
//! This library provides the core components of the Lak tree-walking
//! interpreter: lexical analysis, parsing, the runtime value model, and
//! evaluation. The CLI binary (`src/main.rs`) is a thin driver over this
//! library's public surface — it owns line-editing, colorized output,
//! and subcommand dispatch, none of which this crate concerns itself
//! with.
//!
//! # Modules
//!
//! - [`token`] — token kinds, keyword table, source spans
//! - [`lexer`] — lexical analysis (tokenization)
//! - [`ast`] — abstract syntax tree definitions
//! - [`parser`] — Pratt parser producing an AST from a token stream
//! - [`object`] — the runtime value model (`Object`, `HashKey`, ...)
//! - [`environment`] — the lexically-scoped name-to-value chain
//! - [`builtins`] — `len`, `first`, `last`, `rest`, `push`, `puts`
//! - [`evaluator`] — the recursive AST walk that drives it all
//!
//! # Example
//!
//! ```
//! use lak::evaluator::Evaluator;
//! use lak::lexer::Lexer;
//! use lak::parser::Parser;
//!
//! let tokens = Lexer::new("let x = 5; x + 1").tokenize();
//! let (program, errors) = Parser::new(tokens).parse_program();
//! let result = Evaluator::new().eval_program(&program, &errors);
//! assert_eq!(result.inspect(), "6");
//! ```

pub mod ast;
pub mod builtins;
pub mod environment;
pub mod evaluator;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod token;
