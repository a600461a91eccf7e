//! Formula salary item evaluation.
//!
//! Formula items are computed from the items resolved before them. The
//! expression language sits behind [`FormulaEvaluator`]; [`ArithmeticFormula`]
//! is the bundled implementation supporting decimal literals, identifiers,
//! `+ - * /`, unary minus and parentheses.

use std::collections::BTreeMap;
use std::iter::Peekable;
use std::str::{Chars, FromStr};

use rust_decimal::Decimal;
use thiserror::Error;

/// Variable name bound to the employee's base salary.
pub const BASE_SALARY_VARIABLE: &str = "base_salary";

/// Variable name bound to the running subtotal before the formula item.
pub const SUBTOTAL_VARIABLE: &str = "subtotal";

/// Maximum nesting of parentheses and unary minus in one expression.
pub const MAX_NESTING_DEPTH: usize = 64;

/// True if `name` is bound by the evaluator itself and cannot be an item id.
pub fn is_reserved_variable(name: &str) -> bool {
    name == BASE_SALARY_VARIABLE || name == SUBTOTAL_VARIABLE
}

/// Why a formula could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// The expression is malformed.
    #[error("syntax error: {0}")]
    Syntax(String),
    /// The expression refers to a variable that is not visible.
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),
    /// The expression divides by zero.
    #[error("division by zero")]
    DivisionByZero,
    /// An intermediate value exceeded the decimal range.
    #[error("arithmetic overflow")]
    Overflow,
}

/// The variables visible to a formula.
///
/// Holds `base_salary`, `subtotal` and the amount of every item resolved
/// earlier in the group, keyed by item id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormulaScope {
    variables: BTreeMap<String, Decimal>,
}

impl FormulaScope {
    /// Creates an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a variable, replacing any previous value.
    pub fn with(mut self, name: impl Into<String>, value: Decimal) -> Self {
        self.variables.insert(name.into(), value);
        self
    }

    /// Looks up a variable.
    pub fn get(&self, name: &str) -> Option<Decimal> {
        self.variables.get(name).copied()
    }

    /// Names of all visible variables.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }
}

/// Evaluates formula item expressions.
pub trait FormulaEvaluator: Send + Sync {
    /// Evaluates `expression` against the visible variables.
    fn evaluate(&self, expression: &str, scope: &FormulaScope) -> Result<Decimal, FormulaError>;
}

/// Recursive-descent evaluator for plain arithmetic expressions.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{ArithmeticFormula, FormulaEvaluator, FormulaScope};
/// use rust_decimal::Decimal;
///
/// let scope = FormulaScope::new()
///     .with("base_salary", Decimal::new(4000, 0))
///     .with("meal", Decimal::new(300, 0));
///
/// let amount = ArithmeticFormula
///     .evaluate("(base_salary + meal) * 0.05", &scope)
///     .unwrap();
/// assert_eq!(amount, Decimal::new(215, 0));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ArithmeticFormula;

impl FormulaEvaluator for ArithmeticFormula {
    fn evaluate(&self, expression: &str, scope: &FormulaScope) -> Result<Decimal, FormulaError> {
        let mut parser = Parser {
            chars: expression.chars().peekable(),
            scope,
            depth: 0,
        };
        let value = parser.expression()?;
        parser.skip_whitespace();
        match parser.chars.next() {
            None => Ok(value),
            Some(c) => Err(FormulaError::Syntax(format!("unexpected '{}'", c))),
        }
    }
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    scope: &'a FormulaScope,
    depth: usize,
}

impl Parser<'_> {
    fn skip_whitespace(&mut self) {
        while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, FormulaError>,
    ) -> Result<T, FormulaError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(FormulaError::Syntax("expression nested too deeply".to_string()));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.chars.peek().copied()
    }

    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Result<Decimal, FormulaError> {
        let mut value = self.term()?;
        while let Some(op @ ('+' | '-')) = self.peek() {
            self.chars.next();
            let rhs = self.term()?;
            value = if op == '+' {
                value.checked_add(rhs)
            } else {
                value.checked_sub(rhs)
            }
            .ok_or(FormulaError::Overflow)?;
        }
        Ok(value)
    }

    // term := unary (('*' | '/') unary)*
    fn term(&mut self) -> Result<Decimal, FormulaError> {
        let mut value = self.unary()?;
        while let Some(op @ ('*' | '/')) = self.peek() {
            self.chars.next();
            let rhs = self.unary()?;
            value = if op == '*' {
                value.checked_mul(rhs).ok_or(FormulaError::Overflow)?
            } else {
                if rhs.is_zero() {
                    return Err(FormulaError::DivisionByZero);
                }
                value.checked_div(rhs).ok_or(FormulaError::Overflow)?
            };
        }
        Ok(value)
    }

    // unary := '-' unary | primary
    fn unary(&mut self) -> Result<Decimal, FormulaError> {
        if self.peek() == Some('-') {
            self.chars.next();
            return Ok(-self.nested(Self::unary)?);
        }
        self.primary()
    }

    // primary := number | identifier | '(' expression ')'
    fn primary(&mut self) -> Result<Decimal, FormulaError> {
        match self.peek() {
            Some('(') => {
                self.chars.next();
                let value = self.nested(Self::expression)?;
                match self.peek() {
                    Some(')') => {
                        self.chars.next();
                        Ok(value)
                    }
                    _ => Err(FormulaError::Syntax("missing ')'".to_string())),
                }
            }
            Some(c) if c.is_ascii_digit() || c == '.' => {
                let literal = self.take_while(|c| c.is_ascii_digit() || c == '.');
                Decimal::from_str(&literal)
                    .map_err(|_| FormulaError::Syntax(format!("invalid number '{}'", literal)))
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let name = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
                self.scope
                    .get(&name)
                    .ok_or(FormulaError::UnknownVariable(name))
            }
            Some(c) => Err(FormulaError::Syntax(format!("unexpected '{}'", c))),
            None => Err(FormulaError::Syntax("unexpected end of expression".to_string())),
        }
    }

    fn take_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(&c) = self.chars.peek() {
            if !accept(c) {
                break;
            }
            out.push(c);
            self.chars.next();
        }
        out
    }
}
