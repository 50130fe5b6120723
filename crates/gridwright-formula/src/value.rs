//! Expression nodes
//!
//! A [`Value`] is a shared handle to one node of the expression graph.
//! Cloning a `Value` clones the handle, not the node: both handles refer to
//! the same cell once the node is placed.

use crate::ast::{Formula, Operand};
use crate::error::{FormulaError, FormulaResult};
use gridwright_core::{CellFormat, Literal, Style};
use std::cell::{OnceCell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric id
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node computes
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A constant
    Literal(Literal),
    /// The same value as another node
    Reference(Value),
    /// An operator or function over other operands
    Formula(Formula),
}

impl From<Literal> for Payload {
    fn from(literal: Literal) -> Self {
        Payload::Literal(literal)
    }
}

impl From<Formula> for Payload {
    fn from(formula: Formula) -> Self {
        Payload::Formula(formula)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Reference(value)
    }
}

impl From<&Value> for Payload {
    fn from(value: &Value) -> Self {
        Payload::Reference(value.clone())
    }
}

#[derive(Debug, Clone, Default)]
struct Meta {
    name: Option<String>,
    unit: Option<String>,
    number_format: Option<String>,
    style: Option<Style>,
    is_parameter: bool,
}

struct Node {
    id: NodeId,
    meta: RefCell<Meta>,
    payload: OnceCell<Payload>,
}

// Long chains would otherwise drop recursively, one stack frame per node.
// Payloads of uniquely owned children are moved onto a worklist first so
// each child drops with an empty payload.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending: Vec<Payload> = self.payload.take().into_iter().collect();
        while let Some(payload) = pending.pop() {
            for mut child in payload_children(payload) {
                if let Some(node) = Rc::get_mut(&mut child.0) {
                    pending.extend(node.payload.take());
                }
            }
        }
    }
}

fn payload_children(payload: Payload) -> Vec<Value> {
    let mut children = Vec::new();
    let mut formulas = match payload {
        Payload::Literal(_) => return children,
        Payload::Reference(target) => return vec![target],
        Payload::Formula(formula) => vec![formula],
    };
    while let Some(formula) = formulas.pop() {
        let operands = match formula {
            Formula::Binary { lhs, rhs, .. } => vec![*lhs, *rhs],
            Formula::Unary { operand, .. } => vec![*operand],
            Formula::Call { args, .. } => args,
        };
        for operand in operands {
            match operand {
                Operand::Literal(_) => {}
                Operand::Value(value) => children.push(value),
                Operand::Formula(nested) => formulas.push(nested),
                Operand::Range(values) => children.extend(values),
            }
        }
    }
    children
}

/// A node of the expression graph.
///
/// Every arithmetic operator applied to a `Value` returns a fresh node that
/// wraps a [`Formula`]; operands are never modified.
///
/// ```rust
/// use gridwright_formula::{Payload, Value};
///
/// let rate = Value::new(0.05).named("Rate").parameter();
/// let doubled = &rate * 2;
///
/// assert!(rate.is_parameter());
/// assert!(matches!(doubled.payload(), Some(Payload::Formula(_))));
/// assert_ne!(rate.id(), doubled.id());
/// ```
#[derive(Clone)]
pub struct Value(Rc<Node>);

impl Value {
    fn with_payload(payload: Option<Payload>) -> Self {
        let cell = OnceCell::new();
        if let Some(payload) = payload {
            let _ = cell.set(payload);
        }
        Value(Rc::new(Node {
            id: NodeId::next(),
            meta: RefCell::new(Meta::default()),
            payload: cell,
        }))
    }

    /// Create a node holding a constant
    pub fn new(literal: impl Into<Literal>) -> Self {
        Self::with_payload(Some(Payload::Literal(literal.into())))
    }

    /// Create a node computing a formula
    pub fn formula(formula: Formula) -> Self {
        Self::with_payload(Some(Payload::Formula(formula)))
    }

    /// Create a node that mirrors another node
    pub fn reference(target: &Value) -> Self {
        Self::with_payload(Some(Payload::Reference(target.clone())))
    }

    /// Create a node whose payload is supplied later with [`Value::define`].
    ///
    /// Deferred nodes allow a formula to refer to a node that is defined
    /// afterwards, which is also the only way to build a cycle.
    ///
    /// Nodes hold their operands through strong handles, so a cycle closed
    /// with [`Value::define`] is never freed, even after writing reports
    /// [`FormulaError::CyclicReference`]. Avoid building cycles in
    /// long-running processes.
    pub fn deferred() -> Self {
        Self::with_payload(None)
    }

    /// Supply the payload of a deferred node
    pub fn define(&self, payload: impl Into<Payload>) -> FormulaResult<()> {
        self.0
            .payload
            .set(payload.into())
            .map_err(|_| FormulaError::AlreadyDefined(self.label()))
    }

    /// Node identity
    pub fn id(&self) -> NodeId {
        self.0.id
    }

    /// The payload, or `None` for a deferred node that was never defined
    pub fn payload(&self) -> Option<&Payload> {
        self.0.payload.get()
    }

    /// Check whether the node has a payload
    pub fn is_defined(&self) -> bool {
        self.0.payload.get().is_some()
    }

    /// Check whether two handles refer to the same node
    pub fn same_node(&self, other: &Value) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    // === Builders ===

    /// Set the display name
    pub fn named(self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    /// Set the unit shown next to the node in parameter tables
    pub fn unit(self, unit: impl Into<String>) -> Self {
        self.set_unit(unit);
        self
    }

    /// Set the number format code
    pub fn number_format(self, format: impl Into<String>) -> Self {
        self.set_number_format(format);
        self
    }

    /// Set the visual style
    pub fn style(self, style: Style) -> Self {
        self.set_style(style);
        self
    }

    /// Mark the node as a parameter, always referenced with absolute addressing
    pub fn parameter(self) -> Self {
        self.set_parameter(true);
        self
    }

    // === Setters ===

    pub fn set_name(&self, name: impl Into<String>) {
        self.0.meta.borrow_mut().name = Some(name.into());
    }

    pub fn set_unit(&self, unit: impl Into<String>) {
        self.0.meta.borrow_mut().unit = Some(unit.into());
    }

    pub fn set_number_format(&self, format: impl Into<String>) {
        self.0.meta.borrow_mut().number_format = Some(format.into());
    }

    pub fn set_style(&self, style: Style) {
        self.0.meta.borrow_mut().style = Some(style);
    }

    pub fn set_parameter(&self, is_parameter: bool) {
        self.0.meta.borrow_mut().is_parameter = is_parameter;
    }

    // === Getters ===

    /// Display name
    pub fn name(&self) -> Option<String> {
        self.0.meta.borrow().name.clone()
    }

    /// Unit
    pub fn unit_label(&self) -> Option<String> {
        self.0.meta.borrow().unit.clone()
    }

    /// Number format code
    pub fn format_code(&self) -> Option<String> {
        self.0.meta.borrow().number_format.clone()
    }

    /// Visual style
    pub fn cell_style(&self) -> Option<Style> {
        self.0.meta.borrow().style.clone()
    }

    /// Whether references to this node are absolute
    pub fn is_parameter(&self) -> bool {
        self.0.meta.borrow().is_parameter
    }

    /// The complete format applied to the node's cell
    pub fn cell_format(&self) -> CellFormat {
        let meta = self.0.meta.borrow();
        CellFormat::new(meta.style.as_ref(), meta.number_format.as_deref())
    }

    /// Human-readable label used in error messages
    pub fn label(&self) -> String {
        match &self.0.meta.borrow().name {
            Some(name) => format!("'{}' ({})", name, self.0.id),
            None => format!("node {}", self.0.id),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.same_node(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Payloads are summarized so cyclic graphs still print.
        let payload = match self.payload() {
            None => "deferred".to_string(),
            Some(Payload::Literal(l)) => format!("{:?}", l),
            Some(Payload::Reference(v)) => format!("-> {}", v.id()),
            Some(Payload::Formula(_)) => "formula".to_string(),
        };
        f.debug_struct("Value")
            .field("id", &self.0.id)
            .field("name", &self.0.meta.borrow().name)
            .field("is_parameter", &self.is_parameter())
            .field("payload", &payload)
            .finish()
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        Value::new(literal)
    }
}

impl From<Formula> for Value {
    fn from(formula: Formula) -> Self {
        Value::formula(formula)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::new(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::new(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::new(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::new(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::new(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::new(s)
    }
}
