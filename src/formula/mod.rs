//! The formula evaluator: resolves variables against the schema tree and
//! evaluates textual arithmetic expressions through a sandboxed parser.
//!
//! Failure semantics: the editor must stay usable with a malformed formula
//! mid-edit, so [`evaluate`] catches every failure (lexing, parsing,
//! unresolved variables, division by zero), logs a diagnostic, and yields
//! `0.0`. [`try_evaluate`] exposes the underlying error for diagnostics and
//! tests.

use crate::error::FormulaError;
use crate::schema::{Body, Node, NodeId, NodePatch, Schema, WidgetKind};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::warn;

mod parser;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// A parsed arithmetic expression. Restricted on purpose: there is no
/// variant that could call a function or reach outside the schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Sum(Box<Expr>, Box<Expr>),
    Subtract(Box<Expr>, Box<Expr>),
    Multiply(Box<Expr>, Box<Expr>),
    Divide(Box<Expr>, Box<Expr>),
    Negate(Box<Expr>),
    Literal(f64),
    Variable(String),
}

impl Expr {
    /// Parses an expression from its textual form.
    pub fn parse(input: &str) -> Result<Expr, FormulaError> {
        let tokens = parser::lex(input)?;
        if tokens.is_empty() {
            return Err(FormulaError::UnexpectedEnd);
        }
        parser::Parser::new(tokens).parse()
    }

    /// Evaluates with a variable resolver. Never fails on its own: division
    /// by zero produces a non-finite number that the caller checks for.
    pub fn eval(&self, resolve: &impl Fn(&str) -> f64) -> f64 {
        match self {
            Expr::Sum(l, r) => l.eval(resolve) + r.eval(resolve),
            Expr::Subtract(l, r) => l.eval(resolve) - r.eval(resolve),
            Expr::Multiply(l, r) => l.eval(resolve) * r.eval(resolve),
            Expr::Divide(l, r) => l.eval(resolve) / r.eval(resolve),
            Expr::Negate(inner) => -inner.eval(resolve),
            Expr::Literal(n) => *n,
            Expr::Variable(name) => resolve(name),
        }
    }

    /// Collects variable names referenced by the expression, in order of
    /// first appearance.
    pub fn variables(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expr::Sum(l, r)
            | Expr::Subtract(l, r)
            | Expr::Multiply(l, r)
            | Expr::Divide(l, r) => {
                l.collect_variables(names);
                r.collect_variables(names);
            }
            Expr::Negate(inner) => inner.collect_variables(names),
            Expr::Literal(_) => {}
            Expr::Variable(name) => {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
    }
}

/// Resolves a variable by locating the node whose key (falling back to its
/// id) matches, then coercing that node's value to a number.
///
/// DatePicker values convert to epoch-days; everything else coerces the
/// stored value to a number. Missing nodes, unparseable dates, and
/// non-numeric values all resolve to `0.0`.
pub fn resolve_variable(schema: &Schema, key: &str) -> f64 {
    match find_by_key(&schema.nodes, key) {
        Some(node) => coerce_value(node),
        None => 0.0,
    }
}

fn find_by_key<'a>(nodes: &'a [Node], key: &str) -> Option<&'a Node> {
    for node in nodes {
        let matches = match &node.key {
            Some(node_key) => node_key == key,
            None => node.id.as_str() == key,
        };
        if matches {
            return Some(node);
        }
        if let Some(children) = node.children() {
            if let Some(found) = find_by_key(children, key) {
                return Some(found);
            }
        }
    }
    None
}

fn coerce_value(node: &Node) -> f64 {
    let Some(value) = &node.value else {
        return 0.0;
    };
    if node.kind() == WidgetKind::DatePicker {
        return match value.as_str() {
            Some(text) => date_to_epoch_days(text),
            None => 0.0,
        };
    }
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        serde_json::Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

/// Converts a date string into a day count since the Unix epoch
/// (`millis / 86_400_000`, fractional for datetimes). Unparseable input is
/// `0.0`.
fn date_to_epoch_days(text: &str) -> f64 {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(epoch) = NaiveDate::from_ymd_opt(1970, 1, 1) {
            return (date - epoch).num_days() as f64;
        }
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return datetime.timestamp_millis() as f64 / MILLIS_PER_DAY;
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return datetime.and_utc().timestamp_millis() as f64 / MILLIS_PER_DAY;
    }
    0.0
}

/// Evaluates an expression against the schema, surfacing failures.
pub fn try_evaluate(schema: &Schema, expression: &str) -> Result<f64, FormulaError> {
    let expr = Expr::parse(expression)?;
    let result = expr.eval(&|name| resolve_variable(schema, name));
    if result.is_finite() {
        Ok(result)
    } else {
        Err(FormulaError::NonFinite)
    }
}

/// Evaluates an expression against the schema. Every failure is logged and
/// coerced to `0.0`; this never propagates an error to the editor.
pub fn evaluate(schema: &Schema, expression: &str) -> f64 {
    match try_evaluate(schema, expression) {
        Ok(result) => result,
        Err(e) => {
            warn!("formula '{expression}' evaluated to 0: {e}");
            0.0
        }
    }
}

/// Recomputes every Formula node's value in a single pass.
///
/// All expressions are evaluated against the schema as it stood when the
/// pass started, then the results are written back. That keeps the pass
/// idempotent and makes formula-of-formula cycles impossible to hang on:
/// a cycle reads the stale snapshot value instead of chasing a fixpoint.
/// Returns the number of Formula nodes whose value changed.
pub fn recompute(schema: &mut Schema) -> usize {
    let formulas: Vec<(NodeId, String)> = schema
        .nodes_of_kind(WidgetKind::Formula)
        .into_iter()
        .filter_map(|node| match &node.body {
            Body::Formula { expression } => Some((node.id.clone(), expression.clone())),
            _ => None,
        })
        .collect();
    if formulas.is_empty() {
        return 0;
    }

    let snapshot = schema.clone();
    let mut changed = 0;
    for (id, expression) in formulas {
        let result = evaluate(&snapshot, &expression);
        let new_value = serde_json::Value::from(result);
        let already_current = schema
            .find_node(&id)
            .is_some_and(|node| node.value.as_ref() == Some(&new_value));
        if !already_current {
            schema.update_node(&id, &NodePatch::value(new_value));
            changed += 1;
        }
    }
    changed
}
