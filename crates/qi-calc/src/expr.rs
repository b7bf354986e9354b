//! Custom formula expressions.
//!
//! Mappings with formula type `CUSTOM` carry a user-authored algebraic
//! expression over named variables, e.g. `(A * C) / B * 100`. This module
//! parses such expressions into an explicit AST with a small
//! recursive-descent parser and evaluates the AST against a set of
//! variable bindings.
//!
//! Grammar:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := NUMBER | IDENT | '-' factor | '(' expr ')'
//! ```
//!
//! `*` and `/` bind tighter than `+` and `-`; operators of equal
//! precedence associate left. Structural faults are [`CalcError::FormulaParse`];
//! runtime faults (division by zero, non-finite intermediate) are
//! [`CalcError::FormulaEvaluation`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{CalcError, Result};

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => f.write_str("+"),
            Self::Sub => f.write_str("-"),
            Self::Mul => f.write_str("*"),
            Self::Div => f.write_str("/"),
        }
    }
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Neg(Box<Expr>),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Parse an expression source string into an AST.
    pub fn parse(source: &str) -> Result<Self> {
        let tokens = tokenize(source)?;
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.expr()?;
        if let Some(token) = parser.peek() {
            return Err(CalcError::FormulaParse(format!(
                "unexpected trailing token '{token}'"
            )));
        }
        Ok(expr)
    }

    /// Every variable name referenced anywhere in the expression.
    #[must_use]
    pub fn variables(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        match self {
            Self::Number(_) => {}
            Self::Variable(name) => {
                names.insert(name.as_str());
            }
            Self::Neg(operand) => operand.collect_variables(names),
            Self::Binary { lhs, rhs, .. } => {
                lhs.collect_variables(names);
                rhs.collect_variables(names);
            }
        }
    }

    /// Evaluate against variable bindings.
    ///
    /// Callers are expected to have checked the bindings cover every
    /// referenced variable; an unbound name still fails cleanly here.
    pub fn eval(&self, bindings: &BTreeMap<String, f64>) -> Result<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Variable(name) => *bindings.get(name).ok_or_else(|| {
                CalcError::FormulaEvaluation(format!("no value bound for variable '{name}'"))
            })?,
            Self::Neg(operand) => -operand.eval(bindings)?,
            Self::Binary { op, lhs, rhs } => {
                let left = lhs.eval(bindings)?;
                let right = rhs.eval(bindings)?;
                match op {
                    BinOp::Add => left + right,
                    BinOp::Sub => left - right,
                    BinOp::Mul => left * right,
                    BinOp::Div => {
                        if right == 0.0 {
                            return Err(CalcError::FormulaEvaluation(
                                "division by zero".to_string(),
                            ));
                        }
                        left / right
                    }
                }
            }
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CalcError::FormulaEvaluation(
                "expression produced a non-finite value".to_string(),
            ))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Ident(name) => f.write_str(name),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
        }
    }
}

fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = source.chars().collect();
    let mut pos = 0;

    while pos < chars.len() {
        let c = chars[pos];
        match c {
            ' ' | '\t' | '\r' | '\n' => pos += 1,
            '+' => {
                tokens.push(Token::Plus);
                pos += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                pos += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                pos += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                pos += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                pos += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                pos += 1;
            }
            '0'..='9' | '.' => {
                let start = pos;
                while pos < chars.len() && (chars[pos].is_ascii_digit() || chars[pos] == '.') {
                    pos += 1;
                }
                let literal: String = chars[start..pos].iter().collect();
                let number = literal.parse::<f64>().map_err(|_| {
                    CalcError::FormulaParse(format!("malformed number literal '{literal}'"))
                })?;
                tokens.push(Token::Number(number));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = pos;
                while pos < chars.len()
                    && (chars[pos].is_ascii_alphanumeric() || chars[pos] == '_')
                {
                    pos += 1;
                }
                tokens.push(Token::Ident(chars[start..pos].iter().collect()));
            }
            other => {
                return Err(CalcError::FormulaParse(format!(
                    "unknown token '{other}'"
                )));
            }
        }
    }

    if tokens.is_empty() {
        return Err(CalcError::FormulaParse("empty formula".to_string()));
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<Expr> {
        let mut lhs = self.term()?;
        while let Some(op) = match self.peek() {
            Some(Token::Plus) => Some(BinOp::Add),
            Some(Token::Minus) => Some(BinOp::Sub),
            _ => None,
        } {
            self.advance();
            let rhs = self.term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr> {
        let mut lhs = self.factor()?;
        while let Some(op) = match self.peek() {
            Some(Token::Star) => Some(BinOp::Mul),
            Some(Token::Slash) => Some(BinOp::Div),
            _ => None,
        } {
            self.advance();
            let rhs = self.factor()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> Result<Expr> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            Some(Token::Ident(name)) => Ok(Expr::Variable(name)),
            Some(Token::Minus) => Ok(Expr::Neg(Box::new(self.factor()?))),
            Some(Token::LParen) => {
                let inner = self.expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(CalcError::FormulaParse(
                        "unbalanced parentheses: expected ')'".to_string(),
                    )),
                }
            }
            Some(token) => Err(CalcError::FormulaParse(format!(
                "unexpected token '{token}'"
            ))),
            None => Err(CalcError::FormulaParse(
                "unexpected end of formula".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
    }

    #[test]
    fn parses_precedence_and_parens() {
        let flat = Expr::parse("A + B * C").unwrap();
        let grouped = Expr::parse("(A + B) * C").unwrap();
        let vars = bindings(&[("A", 2.0), ("B", 3.0), ("C", 4.0)]);
        assert_eq!(flat.eval(&vars).unwrap(), 14.0);
        assert_eq!(grouped.eval(&vars).unwrap(), 20.0);
    }

    #[test]
    fn division_is_left_associative() {
        let expr = Expr::parse("100 / 5 / 2").unwrap();
        assert_eq!(expr.eval(&BTreeMap::new()).unwrap(), 10.0);
    }

    #[test]
    fn subtraction_is_left_associative() {
        let expr = Expr::parse("10 - 4 - 3").unwrap();
        assert_eq!(expr.eval(&BTreeMap::new()).unwrap(), 3.0);
    }

    #[test]
    fn unary_minus_binds_to_factor() {
        let expr = Expr::parse("-A * 2").unwrap();
        let vars = bindings(&[("A", 5.0)]);
        assert_eq!(expr.eval(&vars).unwrap(), -10.0);
    }

    #[test]
    fn collects_referenced_variables() {
        let expr = Expr::parse("(A * C) / B * 100").unwrap();
        let names: Vec<&str> = expr.variables().into_iter().collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn rejects_unbalanced_parentheses() {
        assert!(matches!(
            Expr::parse("(A + B"),
            Err(CalcError::FormulaParse(_))
        ));
        assert!(matches!(
            Expr::parse("A + B)"),
            Err(CalcError::FormulaParse(_))
        ));
    }

    #[test]
    fn rejects_unknown_tokens_and_empty_input() {
        assert!(matches!(
            Expr::parse("A % B"),
            Err(CalcError::FormulaParse(_))
        ));
        assert!(matches!(Expr::parse("   "), Err(CalcError::FormulaParse(_))));
        assert!(matches!(
            Expr::parse("A + "),
            Err(CalcError::FormulaParse(_))
        ));
        assert!(matches!(
            Expr::parse("1.2.3"),
            Err(CalcError::FormulaParse(_))
        ));
    }

    #[test]
    fn division_by_zero_is_an_evaluation_error() {
        let expr = Expr::parse("A / B").unwrap();
        let vars = bindings(&[("A", 1.0), ("B", 0.0)]);
        assert!(matches!(
            expr.eval(&vars),
            Err(CalcError::FormulaEvaluation(_))
        ));
    }
}
