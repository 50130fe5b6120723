//! Format cache for deduplication

use super::CellFormat;
use ahash::AHashMap;

/// Deduplicating cache from [`CellFormat`] to a backend format handle.
///
/// Sheets usually share a handful of formats across thousands of cells.
/// The cache makes sure each distinct attribute set is handed to the
/// backend once; the default format never reaches the backend at all.
/// One cache lives for one write of a document.
#[derive(Debug)]
pub struct FormatCache<H> {
    handles: AHashMap<CellFormat, H>,
    created: usize,
}

impl<H: Clone> FormatCache<H> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            handles: AHashMap::with_capacity(16),
            created: 0,
        }
    }

    /// Get the handle for `format`, creating it with `create` on first use.
    ///
    /// Returns `Ok(None)` for the default format.
    pub fn get_or_create<E>(
        &mut self,
        format: &CellFormat,
        create: impl FnOnce(&CellFormat) -> Result<H, E>,
    ) -> Result<Option<H>, E> {
        if format.is_default() {
            return Ok(None);
        }
        if let Some(handle) = self.handles.get(format) {
            return Ok(Some(handle.clone()));
        }

        let handle = create(format)?;
        self.handles.insert(format.clone(), handle.clone());
        self.created += 1;
        Ok(Some(handle))
    }

    /// Number of distinct formats created so far
    pub fn len(&self) -> usize {
        self.created
    }

    /// Check if no format has been created
    pub fn is_empty(&self) -> bool {
        self.created == 0
    }
}

impl<H: Clone> Default for FormatCache<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;
    use std::convert::Infallible;

    #[test]
    fn test_deduplication() {
        let mut cache = FormatCache::new();
        let mut calls = 0u32;
        let mut create = |_: &CellFormat| -> Result<u32, Infallible> {
            calls += 1;
            Ok(calls)
        };

        let bold = CellFormat::from(Style::new().bold(true));
        let pct = CellFormat::new(None, Some("0.0%"));

        let a = cache.get_or_create(&bold, &mut create).unwrap();
        let b = cache.get_or_create(&bold.clone(), &mut create).unwrap();
        let c = cache.get_or_create(&pct, &mut create).unwrap();

        assert_eq!(a, Some(1));
        assert_eq!(a, b);
        assert_eq!(c, Some(2));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_default_format_is_never_created() {
        let mut cache: FormatCache<u32> = FormatCache::new();
        let handle = cache
            .get_or_create(&CellFormat::default(), |_| -> Result<u32, Infallible> {
                panic!("default format must not reach the backend")
            })
            .unwrap();
        assert_eq!(handle, None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_creation_error_is_not_cached() {
        let mut cache: FormatCache<u32> = FormatCache::new();
        let bold = CellFormat::from(Style::new().bold(true));
        assert!(cache.get_or_create(&bold, |_| Err("backend down")).is_err());
        assert_eq!(cache.get_or_create(&bold, |_| Ok::<_, &str>(7)), Ok(Some(7)));
    }
}
