//! Tree-walking evaluator for the Lak language.
//!
//! Mirrors `original_source`'s `evaluator.cc` dispatch: one `eval` entry
//! point recursing over every AST node variant, canonical `True`/`False`/
//! `Null` singletons shared by `Rc` so non-integer equality can use them,
//! and a `ReturnValue` wrapper that `Block` propagates but `Program` and
//! `apply_function` unwrap exactly once. Every failure is an
//! `Object::Error` value returned in place of a result — there is no
//! exception path anywhere in this module.

use crate::ast::{Block, Expr, Program, Stmt};
use crate::builtins;
use crate::environment::Environment;
use crate::object::{dedup_hash_pairs, hash_lookup, FunctionObj, Object};
use crate::parser::ParseError;
use std::cell::RefCell;
use std::rc::Rc;

/// Owns the canonical `True`/`False`/`Null` singletons and the global
/// environment; one instance is enough to drive a whole REPL session,
/// since `reset_env` discards only the environment, not the singletons.
pub struct Evaluator {
    global_env: Rc<RefCell<Environment>>,
    truth: Rc<Object>,
    falsehood: Rc<Object>,
    null: Rc<Object>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Evaluator {
            global_env: Environment::new(),
            truth: Rc::new(Object::Boolean(true)),
            falsehood: Rc::new(Object::Boolean(false)),
            null: Rc::new(Object::Null),
        }
    }

    /// Discards the current global environment, forgetting every `let`
    /// binding made so far. The canonical singletons are untouched.
    pub fn reset_env(&mut self) {
        self.global_env = Environment::new();
    }

    fn native_bool(&self, value: bool) -> Rc<Object> {
        if value {
            Rc::clone(&self.truth)
        } else {
            Rc::clone(&self.falsehood)
        }
    }

    /// Evaluates a whole program against the evaluator's global
    /// environment. If `errors` is non-empty (the parser could not
    /// produce a usable AST), synthesizes the `abort:` error per §4.3.
    pub fn eval_program(&self, program: &Program, errors: &[ParseError]) -> Rc<Object> {
        if !errors.is_empty() {
            let joined = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("\n");
            return Rc::new(Object::Error(format!("abort: {}", joined)));
        }

        let env = Rc::clone(&self.global_env);
        let mut result = Rc::clone(&self.null);
        for stmt in &program.statements {
            result = self.eval_stmt(stmt, &env);
            match result.as_ref() {
                Object::ReturnValue(inner) => return Rc::clone(inner),
                Object::Error(_) => return result,
                _ => {}
            }
        }
        result
    }

    fn eval_block(&self, block: &Block, env: &Rc<RefCell<Environment>>) -> Rc<Object> {
        let mut result = Rc::clone(&self.null);
        for stmt in &block.statements {
            result = self.eval_stmt(stmt, env);
            if matches!(result.as_ref(), Object::ReturnValue(_) | Object::Error(_)) {
                return result;
            }
        }
        result
    }

    fn eval_stmt(&self, stmt: &Stmt, env: &Rc<RefCell<Environment>>) -> Rc<Object> {
        match stmt {
            Stmt::Let { name, value, .. } => {
                let val = self.eval_expr(value, env);
                if val.is_error() {
                    return val;
                }
                env.borrow_mut().set(name.name.clone(), val);
                Rc::clone(&self.null)
            }
            Stmt::Return { value, .. } => {
                let val = self.eval_expr(value, env);
                if val.is_error() {
                    return val;
                }
                Rc::new(Object::ReturnValue(val))
            }
            Stmt::Expression { expr, .. } => self.eval_expr(expr, env),
        }
    }

    fn eval_expr(&self, expr: &Expr, env: &Rc<RefCell<Environment>>) -> Rc<Object> {
        match expr {
            Expr::IntegerLiteral { value, .. } => Rc::new(Object::Integer(*value)),
            Expr::StringLiteral { value, .. } => Rc::new(Object::Str(value.clone())),
            Expr::BooleanLiteral { value, .. } => self.native_bool(*value),
            Expr::Identifier(ident) => self.eval_identifier(&ident.name, env),
            Expr::ArrayLiteral { elements, .. } => {
                let evaluated = self.eval_expressions(elements, env);
                match evaluated {
                    Ok(elems) => Rc::new(Object::Array(elems)),
                    Err(e) => e,
                }
            }
            Expr::HashLiteral { pairs, .. } => self.eval_hash_literal(pairs, env),
            Expr::FunctionLiteral { params, body, .. } => Rc::new(Object::Function(Rc::new(FunctionObj {
                params: params.clone(),
                body: body.clone(),
                env: Rc::clone(env),
            }))),
            Expr::Prefix { operator, right, .. } => {
                let right_val = self.eval_expr(right, env);
                if right_val.is_error() {
                    return right_val;
                }
                self.eval_prefix_expression(operator, &right_val)
            }
            Expr::Infix {
                operator,
                left,
                right,
                ..
            } => {
                let left_val = self.eval_expr(left, env);
                if left_val.is_error() {
                    return left_val;
                }
                let right_val = self.eval_expr(right, env);
                if right_val.is_error() {
                    return right_val;
                }
                self.eval_infix_expression(operator, &left_val, &right_val)
            }
            Expr::If {
                condition,
                consequence,
                alternative,
                ..
            } => self.eval_if_expression(condition, consequence, alternative.as_ref(), env),
            Expr::Call {
                function, arguments, ..
            } => {
                let func = self.eval_expr(function, env);
                if func.is_error() {
                    return func;
                }
                let args = match self.eval_expressions(arguments, env) {
                    Ok(args) => args,
                    Err(e) => return e,
                };
                self.apply_function(&func, args)
            }
            Expr::Index { left, index, .. } => {
                let left_val = self.eval_expr(left, env);
                if left_val.is_error() {
                    return left_val;
                }
                let index_val = self.eval_expr(index, env);
                if index_val.is_error() {
                    return index_val;
                }
                self.eval_index_expression(&left_val, &index_val)
            }
        }
    }

    fn eval_identifier(&self, name: &str, env: &Rc<RefCell<Environment>>) -> Rc<Object> {
        if let Some(val) = env.borrow().get(name) {
            return val;
        }
        if let Some(builtin) = builtins::lookup(name) {
            return Rc::new(Object::Builtin(builtin));
        }
        Rc::new(Object::Error(format!("identifier not found: {}", name)))
    }

    /// Evaluates a list of expressions left to right; the first error
    /// encountered short-circuits the rest (no sibling expressions are
    /// evaluated after it).
    fn eval_expressions(&self, exprs: &[Expr], env: &Rc<RefCell<Environment>>) -> Result<Vec<Rc<Object>>, Rc<Object>> {
        let mut results = Vec::with_capacity(exprs.len());
        for expr in exprs {
            let val = self.eval_expr(expr, env);
            if val.is_error() {
                return Err(val);
            }
            results.push(val);
        }
        Ok(results)
    }

    fn eval_hash_literal(&self, pairs: &[(Expr, Expr)], env: &Rc<RefCell<Environment>>) -> Rc<Object> {
        let mut entries = Vec::with_capacity(pairs.len());
        for (key_expr, value_expr) in pairs {
            let key = self.eval_expr(key_expr, env);
            if key.is_error() {
                return key;
            }
            let hash_key = match key.hash_key() {
                Some(hk) => hk,
                None => {
                    return Rc::new(Object::Error(format!(
                        "unusable as hash key: {}",
                        key.type_name()
                    )))
                }
            };

            let value = self.eval_expr(value_expr, env);
            if value.is_error() {
                return value;
            }

            entries.push((hash_key, key, value));
        }
        Rc::new(Object::Hash(dedup_hash_pairs(entries)))
    }

    fn eval_prefix_expression(&self, operator: &str, right: &Rc<Object>) -> Rc<Object> {
        match operator {
            "!" => self.native_bool(!right.is_truthy()),
            "-" => match right.as_ref() {
                Object::Integer(n) => Rc::new(Object::Integer(-n)),
                other => Rc::new(Object::Error(format!("unknown operator: -{}", other.type_name()))),
            },
            other => Rc::new(Object::Error(format!(
                "unknown operator: {}{}",
                other,
                right.type_name()
            ))),
        }
    }

    fn eval_infix_expression(&self, operator: &str, left: &Rc<Object>, right: &Rc<Object>) -> Rc<Object> {
        match (left.as_ref(), right.as_ref()) {
            (Object::Integer(l), Object::Integer(r)) => self.eval_integer_infix(operator, *l, *r),
            (Object::Str(l), Object::Str(r)) if operator == "+" => {
                Rc::new(Object::Str(format!("{}{}", l, r)))
            }
            (Object::Str(l), Object::Str(r)) => self.eval_scalar_equality(operator, left, right, l == r, true),
            _ if std::mem::discriminant(left.as_ref()) != std::mem::discriminant(right.as_ref()) => {
                Rc::new(Object::Error(format!(
                    "type mismatch: {} {} {}",
                    left.type_name(),
                    operator,
                    right.type_name()
                )))
            }
            (Object::Boolean(l), Object::Boolean(r)) => self.eval_scalar_equality(operator, left, right, l == r, true),
            (Object::Null, Object::Null) => self.eval_scalar_equality(operator, left, right, true, true),
            _ => self.eval_scalar_equality(operator, left, right, false, false),
        }
    }

    /// Non-integer `==`/`!=`. The distilled spec's historical behavior
    /// compares by identity; this crate compares by value for every
    /// hashable scalar (`Boolean`, `Str`, `Null`) and falls back to
    /// `Rc::ptr_eq` for everything else (`Function`, `Array`, `Hash`,
    /// `Builtin`), per the open question resolved in DESIGN.md.
    fn eval_scalar_equality(
        &self,
        operator: &str,
        left: &Rc<Object>,
        right: &Rc<Object>,
        by_value_equal: bool,
        by_value_applicable: bool,
    ) -> Rc<Object> {
        let equal = if by_value_applicable {
            by_value_equal
        } else {
            Rc::ptr_eq(left, right)
        };
        match operator {
            "==" => self.native_bool(equal),
            "!=" => self.native_bool(!equal),
            _ => Rc::new(Object::Error(format!(
                "unknown operator: {} {} {}",
                left.type_name(),
                operator,
                right.type_name()
            ))),
        }
    }

    fn eval_integer_infix(&self, operator: &str, l: i64, r: i64) -> Rc<Object> {
        match operator {
            "+" => Rc::new(Object::Integer(l + r)),
            "-" => Rc::new(Object::Integer(l - r)),
            "*" => Rc::new(Object::Integer(l * r)),
            "/" => {
                if r == 0 {
                    Rc::new(Object::Error("divide by zero".to_string()))
                } else {
                    Rc::new(Object::Integer(l / r))
                }
            }
            "<" => self.native_bool(l < r),
            ">" => self.native_bool(l > r),
            "<=" => self.native_bool(l <= r),
            ">=" => self.native_bool(l >= r),
            "==" => self.native_bool(l == r),
            "!=" => self.native_bool(l != r),
            other => Rc::new(Object::Error(format!(
                "unknown operator: INTEGER {} INTEGER",
                other
            ))),
        }
    }

    fn eval_if_expression(
        &self,
        condition: &Expr,
        consequence: &Block,
        alternative: Option<&Block>,
        env: &Rc<RefCell<Environment>>,
    ) -> Rc<Object> {
        let cond = self.eval_expr(condition, env);
        if cond.is_error() {
            return cond;
        }

        if cond.is_truthy() {
            self.eval_block(consequence, env)
        } else if let Some(alt) = alternative {
            self.eval_block(alt, env)
        } else {
            Rc::clone(&self.null)
        }
    }

    fn eval_index_expression(&self, left: &Rc<Object>, index: &Rc<Object>) -> Rc<Object> {
        match (left.as_ref(), index.as_ref()) {
            (Object::Array(elems), Object::Integer(i)) => {
                let len = elems.len() as i64;
                let idx = if *i < 0 { i + len } else { *i };
                if idx < 0 || idx >= len {
                    Rc::clone(&self.null)
                } else {
                    Rc::clone(&elems[idx as usize])
                }
            }
            (Object::Hash(pairs), _) => match index.hash_key() {
                Some(key) => hash_lookup(pairs, &key)
                    .map(Rc::clone)
                    .unwrap_or_else(|| Rc::clone(&self.null)),
                None => Rc::new(Object::Error(format!(
                    "unusable as hash key: {}",
                    index.type_name()
                ))),
            },
            _ => Rc::new(Object::Error(format!(
                "index operator not supported: {}",
                left.type_name()
            ))),
        }
    }

    /// Applies a `Function` or `Builtin` to already-evaluated arguments.
    ///
    /// Per `original_source`'s `extend_function_env`: extra arguments are
    /// ignored and missing parameters are bound to `Null`, rather than
    /// promoted to an arity error (see DESIGN.md's open-question record).
    fn apply_function(&self, func: &Rc<Object>, args: Vec<Rc<Object>>) -> Rc<Object> {
        match func.as_ref() {
            Object::Function(function) => {
                let call_env = Environment::enclosed(Rc::clone(&function.env));
                for (i, param) in function.params.iter().enumerate() {
                    let bound = args.get(i).cloned().unwrap_or_else(|| Rc::clone(&self.null));
                    call_env.borrow_mut().set(param.name.clone(), bound);
                }
                let result = self.eval_block(&function.body, &call_env);
                match result.as_ref() {
                    Object::ReturnValue(inner) => Rc::clone(inner),
                    _ => result,
                }
            }
            Object::Builtin(builtin) => builtin(&args),
            other => Rc::new(Object::Error(format!("not a function: {}", other.type_name()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn run(input: &str) -> Rc<Object> {
        let tokens = Lexer::new(input).tokenize();
        let (program, errors) = Parser::new(tokens).parse_program();
        Evaluator::new().eval_program(&program, &errors)
    }

    #[test]
    fn arithmetic_with_precedence() {
        let result = run("(5 + 10 * 2 + 15 / 3) * 2 + -10");
        assert!(matches!(result.as_ref(), Object::Integer(50)));
    }

    #[test]
    fn let_bindings_chain() {
        let result = run("let a = 5; let b = a; let c = a + b + 5; c;");
        assert!(matches!(result.as_ref(), Object::Integer(15)));
    }

    #[test]
    fn closures_capture_their_defining_environment() {
        let result = run(
            "let foo = fn(x) { fn(y) { x + y; }; }; let addtwo = foo(2); addtwo(10);",
        );
        assert!(matches!(result.as_ref(), Object::Integer(12)));
    }

    #[test]
    fn nested_return_unwinds_to_the_function_call_site() {
        let result = run("if (10 > 1) { if (10 > 1) { return 10; } return 1; }");
        assert!(matches!(result.as_ref(), Object::Integer(10)));
    }

    #[test]
    fn string_concatenation() {
        let result = run(r#""hello" + " " + "world""#);
        match result.as_ref() {
            Object::Str(s) => assert_eq!(s, "hello world"),
            other => panic!("expected string, got {:?}", other),
        }
    }

    #[test]
    fn rest_and_push_on_arrays() {
        let result = run("let a = [1,2,3,4]; push(rest(a), 5)");
        match result.as_ref() {
            Object::Array(elems) => {
                let nums: Vec<i64> = elems
                    .iter()
                    .map(|o| match o.as_ref() {
                        Object::Integer(n) => *n,
                        _ => panic!("expected integer"),
                    })
                    .collect();
                assert_eq!(nums, vec![2, 3, 4, 5]);
            }
            other => panic!("expected array, got {:?}", other),
        }
    }

    #[test]
    fn type_mismatch_error() {
        let result = run("5 + true;");
        match result.as_ref() {
            Object::Error(msg) => assert_eq!(msg, "type mismatch: INTEGER + BOOLEAN"),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn unbound_identifier_error() {
        let result = run("foobar;");
        match result.as_ref() {
            Object::Error(msg) => assert_eq!(msg, "identifier not found: foobar"),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn array_index_wraps_negative_and_nulls_out_of_range() {
        assert!(matches!(run("[1,2,3][-1]").as_ref(), Object::Integer(3)));
        assert!(matches!(run("[1,2,3][3]").as_ref(), Object::Null));
    }

    #[test]
    fn hash_literal_accepts_int_str_and_bool_keys() {
        let result = run(r#"let h = {"a": 1, 2: "b", true: 3}; h["a"]"#);
        assert!(matches!(result.as_ref(), Object::Integer(1)));
    }

    #[test]
    fn hash_literal_rejects_unhashable_keys() {
        let result = run("{[1]: 1}");
        match result.as_ref() {
            Object::Error(msg) => assert_eq!(msg, "unusable as hash key: ARRAY"),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn divide_by_zero_is_an_error_not_a_panic() {
        let result = run("1 / 0");
        match result.as_ref() {
            Object::Error(msg) => assert_eq!(msg, "divide by zero"),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn error_short_circuits_argument_evaluation() {
        let result = run("let f = fn(a, b) { a + b }; f(1, foobar, 1/0)");
        match result.as_ref() {
            Object::Error(msg) => assert_eq!(msg, "identifier not found: foobar"),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn missing_call_arguments_bind_to_null() {
        let result = run("let f = fn(a, b) { b }; f(1)");
        assert!(matches!(result.as_ref(), Object::Null));
    }

    #[test]
    fn extra_call_arguments_are_ignored() {
        let result = run("let f = fn(a) { a }; f(1, 2, 3)");
        assert!(matches!(result.as_ref(), Object::Integer(1)));
    }

    #[test]
    fn calling_a_non_function_is_an_error() {
        let result = run("let x = 5; x()");
        match result.as_ref() {
            Object::Error(msg) => assert_eq!(msg, "not a function: INTEGER"),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn equality_is_by_value_for_strings() {
        assert!(matches!(
            run(r#""abc" == "abc""#).as_ref(),
            Object::Boolean(true)
        ));
    }

    #[test]
    fn bang_truthiness_rules() {
        assert!(matches!(run("!5").as_ref(), Object::Boolean(false)));
        assert!(matches!(run("!!5").as_ref(), Object::Boolean(true)));
        assert!(matches!(run("!true").as_ref(), Object::Boolean(false)));
        assert!(matches!(run("!null_like_if").as_ref(), Object::Error(_)));
    }

    #[test]
    fn if_without_else_on_falsy_condition_is_null() {
        assert!(matches!(run("if (false) { 10 }").as_ref(), Object::Null));
    }

    #[test]
    fn parser_errors_abort_evaluation() {
        let tokens = Lexer::new("let x 5;").tokenize();
        let (program, errors) = Parser::new(tokens).parse_program();
        let result = Evaluator::new().eval_program(&program, &errors);
        match result.as_ref() {
            Object::Error(msg) => assert!(msg.starts_with("abort: ")),
            other => panic!("expected error, got {:?}", other),
        }
    }
}
