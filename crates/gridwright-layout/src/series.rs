//! Keyed sequences of nodes

use crate::error::{LayoutError, LayoutResult};
use ahash::AHashMap;
use gridwright_core::{Literal, Style};
use gridwright_formula::{
    functions, BinaryOperator, Formula, FormulaResult, Operand, Value,
};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Bound, RangeBounds};

/// Key of a series element
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SeriesKey {
    Int(i64),
    Text(String),
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKey::Int(i) => write!(f, "{}", i),
            SeriesKey::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for SeriesKey {
    fn from(i: i64) -> Self {
        SeriesKey::Int(i)
    }
}

impl From<i32> for SeriesKey {
    fn from(i: i32) -> Self {
        SeriesKey::Int(i64::from(i))
    }
}

impl From<u32> for SeriesKey {
    fn from(i: u32) -> Self {
        SeriesKey::Int(i64::from(i))
    }
}

impl From<&str> for SeriesKey {
    fn from(s: &str) -> Self {
        SeriesKey::Text(s.to_string())
    }
}

impl From<String> for SeriesKey {
    fn from(s: String) -> Self {
        SeriesKey::Text(s)
    }
}

/// Something that can be stored in a series: a raw value or a node
#[derive(Debug, Clone)]
pub enum SeriesValue {
    /// Stored as a constant cell
    Raw(Literal),
    /// Stored as a cell mirroring the node
    Node(Value),
}

impl From<Value> for SeriesValue {
    fn from(v: Value) -> Self {
        SeriesValue::Node(v)
    }
}

impl From<&Value> for SeriesValue {
    fn from(v: &Value) -> Self {
        SeriesValue::Node(v.clone())
    }
}

macro_rules! series_value_from_literal {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for SeriesValue {
                fn from(v: $ty) -> Self {
                    SeriesValue::Raw(Literal::from(v))
                }
            }
        )*
    };
}

series_value_from_literal!(Literal, f64, i32, i64, u32, bool, &str, String);

/// An ordered source of raw values, convertible into a [`Series`]
pub trait SeriesSource {
    /// Series name, used as a table header
    fn series_name(&self) -> Option<String> {
        None
    }

    /// Ordered (key, value) pairs
    fn into_entries(self) -> Vec<(SeriesKey, Literal)>;
}

impl<K: Into<SeriesKey>, V: Into<Literal>> SeriesSource for Vec<(K, V)> {
    fn into_entries(self) -> Vec<(SeriesKey, Literal)> {
        self.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
    }
}

impl<K: Into<SeriesKey>, V: Into<Literal>> SeriesSource for BTreeMap<K, V> {
    fn into_entries(self) -> Vec<(SeriesKey, Literal)> {
        self.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
    }
}

macro_rules! positional_source {
    ($($ty:ty),*) => {
        $(
            impl SeriesSource for Vec<$ty> {
                fn into_entries(self) -> Vec<(SeriesKey, Literal)> {
                    self.into_iter()
                        .enumerate()
                        .map(|(i, v)| (SeriesKey::Int(i as i64), Literal::from(v)))
                        .collect()
                }
            }
        )*
    };
}

positional_source!(f64, i64, i32, bool, String);

/// A source paired with a name
#[derive(Debug, Clone)]
pub struct NamedSource<S> {
    pub name: String,
    pub source: S,
}

impl<S> NamedSource<S> {
    pub fn new(name: impl Into<String>, source: S) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }
}

impl<S: SeriesSource> SeriesSource for NamedSource<S> {
    fn series_name(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn into_entries(self) -> Vec<(SeriesKey, Literal)> {
        self.source.into_entries()
    }
}

/// An ordered sequence of uniquely keyed nodes.
///
/// Every element is a node owned by the series: raw values become constant
/// nodes, inserted nodes are mirrored by a reference node. Elements take the
/// series' number format and style.
///
/// Cloning a series shares its element nodes.
///
/// ```rust
/// use gridwright_layout::Series;
///
/// let sales = Series::from_values([120.0, 80.0, 95.5]).named("Sales");
/// assert_eq!(sales.len(), 3);
/// assert!(sales.get(1).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Series {
    name: Option<String>,
    number_format: Option<String>,
    style: Option<Style>,
    entries: Vec<(SeriesKey, Value)>,
    index: AHashMap<SeriesKey, usize>,
}

impl Series {
    /// Create an empty series
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a series keyed 0, 1, 2, ...
    pub fn from_values<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SeriesValue>,
    {
        let mut series = Series::new();
        for (i, v) in values.into_iter().enumerate() {
            series.insert(i as i64, v);
        }
        series
    }

    /// Create a series from a raw-value source
    pub fn from_source<S: SeriesSource>(source: S) -> Self {
        let name = source.series_name();
        let mut series = Series::new();
        series.name = name;
        for (key, literal) in source.into_entries() {
            series.insert(key, literal);
        }
        series
    }

    /// Set the name, used as a table header
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the number format of every element
    pub fn number_format(mut self, format: impl Into<String>) -> Self {
        let format = format.into();
        for (_, v) in &self.entries {
            v.set_number_format(format.clone());
        }
        self.number_format = Some(format);
        self
    }

    /// Set the style of every element
    pub fn style(mut self, style: Style) -> Self {
        for (_, v) in &self.entries {
            v.set_style(style.clone());
        }
        self.style = Some(style);
        self
    }

    /// Series name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Insert or replace an element; returns the element node
    pub fn insert(&mut self, key: impl Into<SeriesKey>, value: impl Into<SeriesValue>) -> &Value {
        let node = match value.into() {
            SeriesValue::Raw(literal) => Value::new(literal),
            SeriesValue::Node(target) => Value::reference(&target),
        };
        self.insert_node(key.into(), node)
    }

    /// Append an element under the next free integer key
    pub fn push(&mut self, value: impl Into<SeriesValue>) -> &Value {
        let next = self
            .entries
            .iter()
            .filter_map(|(k, _)| match k {
                SeriesKey::Int(i) => Some(*i + 1),
                SeriesKey::Text(_) => None,
            })
            .max()
            .unwrap_or(0);
        self.insert(next, value)
    }

    fn insert_node(&mut self, key: SeriesKey, node: Value) -> &Value {
        if let Some(format) = &self.number_format {
            node.set_number_format(format.clone());
        }
        if let Some(style) = &self.style {
            node.set_style(style.clone());
        }
        let pos = match self.index.get(&key) {
            Some(&pos) => {
                self.entries[pos].1 = node;
                pos
            }
            None => {
                self.entries.push((key.clone(), node));
                self.index.insert(key, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &self.entries[pos].1
    }

    /// Element node by key
    pub fn get(&self, key: impl Into<SeriesKey>) -> Option<&Value> {
        self.index
            .get(&key.into())
            .map(|&pos| &self.entries[pos].1)
    }

    /// Element node by position
    pub fn at(&self, pos: usize) -> Option<&Value> {
        self.entries.get(pos).map(|(_, v)| v)
    }

    /// Iterate over (key, node) pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&SeriesKey, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Keys in order
    pub fn keys(&self) -> impl Iterator<Item = &SeriesKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Element nodes in order
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the series has no elements
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Element nodes at the given positions
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Vec<Value> {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.entries.len(),
        }
        .min(self.entries.len());
        if start >= end {
            return Vec::new();
        }
        self.entries[start..end]
            .iter()
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// Range operand over every element
    pub fn as_range(&self) -> Operand {
        Operand::range(self.values())
    }

    /// `SUM` over every element
    pub fn sum(&self) -> FormulaResult<Value> {
        functions::sum([self.as_range()])
    }

    /// Element-wise `self op other`; both series must have the same keys in the same order
    pub fn zip_with(&self, other: &Series, op: BinaryOperator) -> LayoutResult<Series> {
        if self.len() != other.len() || self.keys().ne(other.keys()) {
            return Err(LayoutError::DimensionMismatch(format!(
                "cannot combine series of {} and {} elements with different keys",
                self.len(),
                other.len()
            )));
        }
        let mut out = self.derived(op);
        for ((key, a), (_, b)) in self.entries.iter().zip(&other.entries) {
            out.insert_node(key.clone(), Value::formula(Formula::binary(op, a, b)));
        }
        Ok(out)
    }

    /// Element-wise `element op operand`
    pub fn map_scalar(&self, op: BinaryOperator, operand: impl Into<Operand>) -> Series {
        let operand = operand.into();
        let mut out = self.derived(op);
        for (key, v) in &self.entries {
            out.insert_node(
                key.clone(),
                Value::formula(Formula::binary(op, v, operand.clone())),
            );
        }
        out
    }

    /// Element-wise `operand op element`, e.g. `12 / series`
    pub fn rmap_scalar(&self, op: BinaryOperator, operand: impl Into<Operand>) -> Series {
        let operand = operand.into();
        let mut out = self.derived(op);
        for (key, v) in &self.entries {
            out.insert_node(
                key.clone(),
                Value::formula(Formula::binary(op, operand.clone(), v)),
            );
        }
        out
    }

    /// Empty series with this one's format and style, named `{name}_{op}`
    fn derived(&self, op: BinaryOperator) -> Series {
        Series {
            name: self
                .name
                .as_ref()
                .map(|name| format!("{}_{}", name, operation_name(op))),
            number_format: self.number_format.clone(),
            style: self.style.clone(),
            ..Series::default()
        }
    }
}

fn operation_name(op: BinaryOperator) -> &'static str {
    match op {
        BinaryOperator::Add => "add",
        BinaryOperator::Subtract => "sub",
        BinaryOperator::Multiply => "mul",
        BinaryOperator::Divide => "div",
        BinaryOperator::Power => "pow",
        BinaryOperator::Concat => "concat",
        BinaryOperator::Equal => "eq",
        BinaryOperator::NotEqual => "ne",
        BinaryOperator::LessThan => "lt",
        BinaryOperator::LessEqual => "le",
        BinaryOperator::GreaterThan => "gt",
        BinaryOperator::GreaterEqual => "ge",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridwright_formula::Payload;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut s = Series::new();
        s.insert("a", 1);
        s.insert("b", 2);
        s.insert("a", 10);

        let keys: Vec<String> = s.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(
            s.get("a").and_then(Value::payload),
            Some(&Payload::Literal(Literal::Number(10.0)))
        );
    }

    #[test]
    fn test_nodes_are_mirrored() {
        let rate = Value::new(0.05);
        let s = Series::from_values([&rate]);
        let element = s.at(0).unwrap();
        assert_ne!(element.id(), rate.id());
        assert_eq!(element.payload(), Some(&Payload::Reference(rate.clone())));
    }

    #[test]
    fn test_format_inherited() {
        let s = Series::from_values([1.0, 2.0]).number_format("0.00");
        assert!(s.values().all(|v| v.format_code().as_deref() == Some("0.00")));

        let mut s = s;
        let pushed = s.push(3.0).clone();
        assert_eq!(pushed.format_code().as_deref(), Some("0.00"));
        assert_eq!(s.keys().last(), Some(&SeriesKey::Int(2)));
    }

    #[test]
    fn test_from_source() {
        let mut map = BTreeMap::new();
        map.insert("2024", 3.0);
        map.insert("2023", 2.0);
        let s = Series::from_source(NamedSource::new("Revenue", map));
        assert_eq!(s.name(), Some("Revenue"));
        let keys: Vec<String> = s.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["2023", "2024"]);

        let s = Series::from_source(vec![1.5, 2.5]);
        assert_eq!(s.get(1).and_then(Value::payload), Some(&Payload::Literal(Literal::Number(2.5))));
    }

    #[test]
    fn test_slice() {
        let s = Series::from_values([1, 2, 3, 4, 5]);
        let ids = |vs: Vec<Value>| vs.iter().map(Value::id).collect::<Vec<_>>();
        assert_eq!(ids(s.slice(1..3)), vec![s.at(1).unwrap().id(), s.at(2).unwrap().id()]);
        assert_eq!(s.slice(3..).len(), 2);
        assert_eq!(s.slice(..=0).len(), 1);
        assert!(s.slice(4..2).is_empty());
        assert_eq!(s.slice(..100).len(), 5);
    }

    #[test]
    fn test_zip_with_requires_matching_keys() {
        let a = Series::from_values([1, 2]);
        let b = Series::from_values([3, 4]);
        let c = Series::from_values([5, 6, 7]);

        let product = a.zip_with(&b, BinaryOperator::Multiply).unwrap();
        assert_eq!(product.len(), 2);
        assert!(matches!(
            a.zip_with(&c, BinaryOperator::Add),
            Err(LayoutError::DimensionMismatch(_))
        ));

        let mut d = Series::new();
        d.insert("x", 1);
        d.insert("y", 2);
        assert!(a.zip_with(&d, BinaryOperator::Add).is_err());
    }

    #[test]
    fn test_map_scalar() {
        let a = Series::from_values([1, 2]);
        let scaled = a.map_scalar(BinaryOperator::Divide, 12);
        let expected = Formula::binary(BinaryOperator::Divide, a.at(0).unwrap(), 12);
        assert_eq!(
            scaled.at(0).and_then(Value::payload),
            Some(&Payload::Formula(expected))
        );
    }

    #[test]
    fn test_derived_series_keep_metadata() {
        let bold = Style::new().bold(true);
        let sales = Series::from_values([10.0, 20.0])
            .named("Sales")
            .number_format("#,##0")
            .style(bold.clone());
        let costs = Series::from_values([4.0, 5.0]).named("Costs");

        let margin = sales.zip_with(&costs, BinaryOperator::Subtract).unwrap();
        assert_eq!(margin.name(), Some("Sales_sub"));
        assert!(margin
            .values()
            .all(|v| v.format_code().as_deref() == Some("#,##0")));

        let scaled = sales.map_scalar(BinaryOperator::Multiply, 2);
        assert_eq!(scaled.name(), Some("Sales_mul"));
        assert_eq!(scaled.style, Some(bold));

        let unnamed = Series::from_values([1, 2]).map_scalar(BinaryOperator::Add, 1);
        assert_eq!(unnamed.name(), None);
    }

    #[test]
    fn test_reversed_scalar_operation() {
        let months = Series::from_values([1, 2, 3]).named("Months");
        let per_month = months.rmap_scalar(BinaryOperator::Divide, 12);
        assert_eq!(per_month.name(), Some("Months_div"));
        assert_eq!(per_month.len(), 3);

        let first = months.at(0).unwrap();
        match per_month.at(0).and_then(Value::payload) {
            Some(Payload::Formula(Formula::Binary { op, lhs, rhs })) => {
                assert_eq!(*op, BinaryOperator::Divide);
                assert_eq!(**lhs, Operand::from(12));
                assert_eq!(**rhs, Operand::Value(first.clone()));
            }
            other => panic!("unexpected payload {:?}", other),
        }
    }
}
