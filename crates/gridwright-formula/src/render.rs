//! Formula rendering
//!
//! Turns nodes into cell content, given where every placed node lives.
//! Parentheses are emitted only where operator precedence requires them.

use crate::ast::{Formula, Operand, ATOM_PRECEDENCE};
use crate::error::{FormulaError, FormulaResult};
use crate::functions;
use crate::value::{NodeId, Payload, Value};
use ahash::{AHashMap, AHashSet};
use gridwright_core::{CellAddress, CellLocation, Literal};
use std::collections::HashMap;
use std::hash::BuildHasher;

/// Precedence given to a comma-separated list so operators wrap it
const LIST_PRECEDENCE: u8 = 0;

/// Looks up where a node was placed
pub trait Resolver {
    /// Location of the node, or `None` if it was never placed
    fn resolve(&self, id: NodeId) -> Option<&CellLocation>;
}

impl Resolver for AHashMap<NodeId, CellLocation> {
    fn resolve(&self, id: NodeId) -> Option<&CellLocation> {
        self.get(&id)
    }
}

impl<S: BuildHasher> Resolver for HashMap<NodeId, CellLocation, S> {
    fn resolve(&self, id: NodeId) -> Option<&CellLocation> {
        self.get(&id)
    }
}

/// What ends up in a cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    /// A constant
    Literal(Literal),
    /// Formula text including the leading `=`
    Formula(String),
}

impl CellContent {
    /// Text used for column-width estimation
    pub fn display_text(&self) -> String {
        match self {
            CellContent::Literal(l) => l.display_text(),
            CellContent::Formula(f) => f.trim_start_matches('=').to_string(),
        }
    }
}

/// Renders nodes as seen from one sheet.
///
/// References to nodes on other sheets get a sheet prefix; references to
/// parameters are absolute. Placed nodes render as references, unplaced
/// formula nodes are inlined.
pub struct Renderer<'a, R: Resolver + ?Sized> {
    resolver: &'a R,
    sheet: &'a str,
}

impl<'a, R: Resolver + ?Sized> Renderer<'a, R> {
    /// Create a renderer for cells on `sheet`
    pub fn new(resolver: &'a R, sheet: &'a str) -> Self {
        Self { resolver, sheet }
    }

    /// Render the content of the cell holding `value`
    pub fn render_cell(&self, value: &Value) -> FormulaResult<CellContent> {
        let mut visiting = AHashSet::new();
        visiting.insert(value.id());
        match value.payload() {
            None => Err(FormulaError::Undefined(value.label())),
            Some(Payload::Literal(l)) => Ok(CellContent::Literal(l.clone())),
            Some(Payload::Formula(f)) => {
                let text = self.formula(f, &mut visiting)?;
                Ok(CellContent::Formula(format!("={}", text)))
            }
            Some(Payload::Reference(target)) => {
                if let Some(literal) = self.unplaced_constant(target)? {
                    return Ok(CellContent::Literal(literal.clone()));
                }
                let (text, _) = self.value(target, &mut visiting)?;
                Ok(CellContent::Formula(format!("={}", text)))
            }
        }
    }

    /// Follow unplaced references; a chain ending in an unplaced constant
    /// makes the mirroring cell hold that constant.
    fn unplaced_constant<'v>(&self, target: &'v Value) -> FormulaResult<Option<&'v Literal>> {
        let mut seen = AHashSet::new();
        let mut current = target;
        loop {
            if self.resolver.resolve(current.id()).is_some() {
                return Ok(None);
            }
            if !seen.insert(current.id()) {
                return Err(FormulaError::CyclicReference(current.label()));
            }
            match current.payload() {
                Some(Payload::Literal(l)) => return Ok(Some(l)),
                Some(Payload::Reference(next)) => current = next,
                _ => return Ok(None),
            }
        }
    }

    /// Render a formula without the leading `=`
    pub fn render_formula(&self, formula: &Formula) -> FormulaResult<String> {
        self.formula(formula, &mut AHashSet::new())
    }

    /// Render a single operand without the leading `=`
    pub fn render_operand(&self, operand: &Operand) -> FormulaResult<String> {
        self.operand(operand, &mut AHashSet::new()).map(|(text, _)| text)
    }

    fn operand(
        &self,
        operand: &Operand,
        visiting: &mut AHashSet<NodeId>,
    ) -> FormulaResult<(String, u8)> {
        match operand {
            Operand::Literal(l) => Ok((l.to_formula_token(), ATOM_PRECEDENCE)),
            Operand::Value(v) => self.value(v, visiting),
            Operand::Formula(f) => Ok((self.formula(f, visiting)?, f.precedence())),
            Operand::Range(values) => self.range(values, visiting),
        }
    }

    fn value(&self, value: &Value, visiting: &mut AHashSet<NodeId>) -> FormulaResult<(String, u8)> {
        if let Some(location) = self.resolver.resolve(value.id()) {
            return Ok((
                location.render(self.sheet, value.is_parameter()),
                ATOM_PRECEDENCE,
            ));
        }
        if !visiting.insert(value.id()) {
            return Err(FormulaError::CyclicReference(value.label()));
        }
        let rendered = match value.payload() {
            None => Err(FormulaError::Undefined(value.label())),
            Some(Payload::Literal(_)) => Err(FormulaError::UnresolvedReference(value.label())),
            Some(Payload::Reference(target)) => self.value(target, visiting),
            Some(Payload::Formula(f)) => self
                .formula(f, visiting)
                .map(|text| (text, f.precedence())),
        };
        visiting.remove(&value.id());
        rendered
    }

    fn formula(&self, formula: &Formula, visiting: &mut AHashSet<NodeId>) -> FormulaResult<String> {
        match formula {
            Formula::Binary { op, lhs, rhs } => {
                let parent = op.precedence();
                let (left, left_prec) = self.operand(lhs, visiting)?;
                let (right, right_prec) = self.operand(rhs, visiting)?;
                let wrap_right =
                    right_prec < parent || (right_prec == parent && !op.is_associative());
                Ok(format!(
                    "{}{}{}",
                    parenthesize(left, left_prec < parent),
                    op.symbol(),
                    parenthesize(right, wrap_right)
                ))
            }
            Formula::Unary { op, operand } => {
                let (inner, inner_prec) = self.operand(operand, visiting)?;
                Ok(format!(
                    "{}{}",
                    op.symbol(),
                    parenthesize(inner, inner_prec < op.precedence())
                ))
            }
            Formula::Call { name, args } => {
                if args.is_empty() {
                    return Err(FormulaError::EmptyOperands(name.clone()));
                }
                let name = name.to_ascii_uppercase();
                // A list spreads into extra arguments unless written as a union
                let spreads = functions::is_variadic(&name);
                let mut rendered = Vec::with_capacity(args.len());
                for arg in args {
                    let (text, prec) = self.operand(arg, visiting)?;
                    rendered.push(parenthesize(text, prec == LIST_PRECEDENCE && !spreads));
                }
                Ok(format!("{}({})", name, rendered.join(",")))
            }
        }
    }

    fn range(&self, values: &[Value], visiting: &mut AHashSet<NodeId>) -> FormulaResult<(String, u8)> {
        match values {
            [] => Err(FormulaError::EmptyOperands("range".to_string())),
            [single] => self.value(single, visiting),
            [first, .., last] => {
                if let Some((start, end)) = self.contiguous_span(values) {
                    let absolute = values.iter().all(Value::is_parameter);
                    let end = CellAddress::new(end.row(), end.col()).with_absolute(absolute);
                    let text = format!("{}:{}", start.render(self.sheet, absolute), end);
                    return Ok((text, ATOM_PRECEDENCE));
                }
                log::trace!(
                    "range {}..{} is not contiguous, rendering as a list",
                    first.id(),
                    last.id()
                );
                let mut parts = Vec::with_capacity(values.len());
                for v in values {
                    parts.push(self.value(v, visiting)?.0);
                }
                Ok((parts.join(","), LIST_PRECEDENCE))
            }
        }
    }

    /// First and last location if the nodes fill one row or column in order
    fn contiguous_span(&self, values: &[Value]) -> Option<(&CellLocation, &CellLocation)> {
        let locations: Vec<&CellLocation> = values
            .iter()
            .map(|v| self.resolver.resolve(v.id()))
            .collect::<Option<_>>()?;
        let first = *locations.first()?;
        let last = *locations.last()?;
        let same_sheet = locations.iter().all(|l| l.sheet == first.sheet);
        let vertical = locations.iter().enumerate().all(|(i, l)| {
            l.col() == first.col() && u64::from(l.row()) == u64::from(first.row()) + i as u64
        });
        let horizontal = locations.iter().enumerate().all(|(i, l)| {
            l.row() == first.row() && u64::from(l.col()) == u64::from(first.col()) + i as u64
        });
        (same_sheet && (vertical || horizontal)).then_some((first, last))
    }
}

fn parenthesize(text: String, wrap: bool) -> String {
    if wrap {
        format!("({})", text)
    } else {
        text
    }
}
