//! Vertical and horizontal stacks

use crate::component::{Component, PlannedCell, Size};

/// Direction in which a stack advances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Children below each other
    Vertical,
    /// Children next to each other
    Horizontal,
}

/// Components placed one after another.
///
/// `spacing` empty cells separate consecutive children; `padding` offsets
/// the first child on both axes and is included in the stack's size.
///
/// ```rust
/// use gridwright_layout::{Series, Size, Stack};
///
/// let stack = Stack::vertical()
///     .spacing(2)
///     .child(Series::from_values([1, 2, 3]))
///     .child(Series::from_values([4, 5, 6]));
/// assert_eq!(stack.size(), Size::new(8, 1));
/// ```
#[derive(Debug, Clone)]
pub struct Stack {
    orientation: Orientation,
    children: Vec<Component>,
    spacing: u32,
    padding: u32,
    name: Option<String>,
}

impl Stack {
    /// Create an empty stack (spacing 1, padding 0)
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            children: Vec::new(),
            spacing: 1,
            padding: 0,
            name: None,
        }
    }

    /// Create an empty vertical stack
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    /// Create an empty horizontal stack
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    /// Set the gap between children
    pub fn spacing(mut self, spacing: u32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the leading offset
    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Set a name, used in log output
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder form of [`Stack::push`]
    pub fn child(mut self, component: impl Into<Component>) -> Self {
        self.push(component);
        self
    }

    /// Append a child
    pub fn push(&mut self, component: impl Into<Component>) -> &mut Self {
        self.children.push(component.into());
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn children(&self) -> &[Component] {
        &self.children
    }

    /// Rows and columns occupied, padding included
    pub fn size(&self) -> Size {
        let sizes: Vec<Size> = self.children.iter().map(Component::size).collect();
        let gaps = u64::from(self.spacing) * sizes.len().saturating_sub(1) as u64;
        let (rows, cols) = match self.orientation {
            Orientation::Vertical => (
                sizes.iter().map(|s| s.rows).sum::<u64>() + gaps,
                sizes.iter().map(|s| s.cols).max().unwrap_or(0),
            ),
            Orientation::Horizontal => (
                sizes.iter().map(|s| s.rows).max().unwrap_or(0),
                sizes.iter().map(|s| s.cols).sum::<u64>() + gaps,
            ),
        };
        let padding = u64::from(self.padding);
        Size::new(rows + padding, cols + padding)
    }

    pub(crate) fn place(&self, row: u64, col: u64, out: &mut Vec<PlannedCell>) {
        log::trace!(
            "placing stack {} at ({}, {})",
            self.name.as_deref().unwrap_or("<unnamed>"),
            row,
            col
        );
        let padding = u64::from(self.padding);
        let (mut row, mut col) = (row + padding, col + padding);
        for child in &self.children {
            child.place(row, col, out);
            let size = child.size();
            match self.orientation {
                Orientation::Vertical => row += size.rows + u64::from(self.spacing),
                Orientation::Horizontal => col += size.cols + u64::from(self.spacing),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Series;
    use gridwright_formula::Value;
    use proptest::prelude::*;

    fn column(rows: usize) -> Series {
        Series::from_values(vec![0; rows])
    }

    #[test]
    fn test_vertical_positions() {
        let stack = Stack::vertical()
            .spacing(2)
            .padding(1)
            .child(column(3))
            .child(Value::new(9));
        assert_eq!(stack.size(), Size::new(1 + 3 + 2 + 1, 2));

        let mut cells = Vec::new();
        stack.place(0, 0, &mut cells);
        let coords: Vec<_> = cells.iter().map(|c| (c.row, c.col)).collect();
        assert_eq!(coords, vec![(1, 1), (2, 1), (3, 1), (6, 1)]);
    }

    #[test]
    fn test_horizontal_nested() {
        let inner = Stack::vertical().spacing(0).child(column(2)).child(column(2));
        let stack = Stack::horizontal().child(inner).child(column(1));
        assert_eq!(stack.size(), Size::new(4, 3));

        let mut cells = Vec::new();
        stack.place(0, 0, &mut cells);
        let last = cells.last().map(|c| (c.row, c.col));
        assert_eq!(last, Some((0, 2)));
    }

    #[test]
    fn test_empty_stack_is_padding_only() {
        assert_eq!(Stack::vertical().padding(2).size(), Size::new(2, 2));
    }

    proptest! {
        #[test]
        fn stack_size_is_sum_plus_spacing(
            heights in proptest::collection::vec(1usize..6, 1..6),
            spacing in 0u32..4,
        ) {
            let mut vertical = Stack::vertical().spacing(spacing);
            let mut horizontal = Stack::horizontal().spacing(spacing);
            for &h in &heights {
                vertical.push(column(h));
                horizontal.push(column(h));
            }
            let total: u64 = heights.iter().map(|&h| h as u64).sum();
            let gaps = u64::from(spacing) * (heights.len() as u64 - 1);
            let tallest = heights.iter().copied().max().unwrap_or(0) as u64;

            prop_assert_eq!(vertical.size(), Size::new(total + gaps, 1));
            prop_assert_eq!(
                horizontal.size(),
                Size::new(tallest, heights.len() as u64 + gaps)
            );
        }
    }
}
