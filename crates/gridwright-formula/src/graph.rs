//! Cycle detection over the node graph

use crate::error::{FormulaError, FormulaResult};
use crate::value::{NodeId, Payload, Value};
use ahash::AHashSet;

/// Fail with [`FormulaError::CyclicReference`] if any node reachable from
/// `roots` depends on itself.
///
/// Unlike rendering, this follows references through placed nodes too, so
/// it catches cycles that would become circular cell references.
pub fn check_acyclic<'a>(roots: impl IntoIterator<Item = &'a Value>) -> FormulaResult<()> {
    let mut visited = AHashSet::new();
    let mut in_stack = AHashSet::new();
    for root in roots {
        detect_cycle(root, &mut visited, &mut in_stack)?;
    }
    Ok(())
}

fn dependencies(value: &Value) -> Vec<&Value> {
    match value.payload() {
        None | Some(Payload::Literal(_)) => Vec::new(),
        Some(Payload::Reference(target)) => vec![target],
        Some(Payload::Formula(f)) => f.referenced_values(),
    }
}

/// Depth-first walk from `root` with an explicit stack; each frame holds a
/// node, its dependencies and the index of the next one to visit.
fn detect_cycle<'a>(
    root: &'a Value,
    visited: &mut AHashSet<NodeId>,
    in_stack: &mut AHashSet<NodeId>,
) -> FormulaResult<()> {
    if !visited.insert(root.id()) {
        return Ok(());
    }
    in_stack.insert(root.id());
    let mut stack: Vec<(&'a Value, Vec<&'a Value>, usize)> =
        vec![(root, dependencies(root), 0)];

    while let Some((node, deps, next)) = stack.last_mut() {
        let Some(&dependency) = deps.get(*next) else {
            in_stack.remove(&node.id());
            stack.pop();
            continue;
        };
        *next += 1;

        let id = dependency.id();
        if in_stack.contains(&id) {
            return Err(FormulaError::CyclicReference(dependency.label()));
        }
        if visited.insert(id) {
            in_stack.insert(id);
            stack.push((dependency, dependencies(dependency), 0));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acyclic_diamond() {
        let a = Value::new(1);
        let b = &a + 1;
        let c = &a * 2;
        let d = &b + &c;
        assert!(check_acyclic([&d, &a]).is_ok());
    }

    #[test]
    fn test_two_node_cycle() {
        let x = Value::deferred().named("X");
        let y = &x + 1;
        x.define(&y * 2).unwrap();
        let err = check_acyclic([&y]).unwrap_err();
        assert!(matches!(err, FormulaError::CyclicReference(_)));
    }

    #[test]
    fn test_self_reference() {
        let x = Value::deferred();
        x.define(&x).unwrap();
        assert!(check_acyclic([&x]).is_err());
    }

    #[test]
    fn test_long_chain_from_the_end() {
        let first = Value::new(0);
        let mut chain = vec![first];
        for i in 1..25_000 {
            let next = &chain[i - 1] + 1;
            chain.push(next);
        }
        let roots: Vec<&Value> = chain.iter().rev().collect();
        assert!(check_acyclic(roots).is_ok());
    }

    #[test]
    fn test_cycle_behind_long_chain() {
        let x = Value::deferred().named("X");
        let mut last = &x + 1;
        for _ in 0..25_000 {
            last = &last + 1;
        }
        x.define(&last).unwrap();
        let err = check_acyclic([&last]).unwrap_err();
        assert!(matches!(err, FormulaError::CyclicReference(_)));
    }

    #[test]
    fn test_undefined_is_not_a_cycle() {
        let x = Value::deferred();
        let y = &x + 1;
        assert!(check_acyclic([&y]).is_ok());
    }
}
