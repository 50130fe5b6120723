//! Sheet name rules: validation and cross-sheet quoting

use crate::error::{Error, Result};
use crate::MAX_SHEET_NAME_LEN;
use std::borrow::Cow;

const FORBIDDEN_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Check that `name` is acceptable as a worksheet name.
///
/// Names must be non-empty, at most 31 characters, free of `[ ] : * ? / \`,
/// must not start or end with an apostrophe, and must not be the reserved
/// name `History`.
pub fn validate_sheet_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_sheet_name(name, "name is empty"));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(Error::invalid_sheet_name(
            name,
            "name is longer than 31 characters",
        ));
    }
    if name.contains(FORBIDDEN_CHARS) {
        return Err(Error::invalid_sheet_name(
            name,
            "name contains one of [ ] : * ? / \\",
        ));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(Error::invalid_sheet_name(
            name,
            "name starts or ends with an apostrophe",
        ));
    }
    if name.eq_ignore_ascii_case("History") {
        return Err(Error::invalid_sheet_name(name, "name is reserved"));
    }
    Ok(())
}

/// Quote a sheet name for use in a cross-sheet reference, if required.
///
/// Plain identifiers stay bare (`Params`); anything with spaces or
/// punctuation, a leading digit, or a name that could be read as a cell
/// reference (`A1`, `R1C1`) is wrapped in single quotes with inner quotes
/// doubled.
pub fn quote_sheet_name(name: &str) -> Cow<'_, str> {
    if is_unquoted_sheet_name(name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("'{}'", name.replace('\'', "''")))
    }
}

fn is_unquoted_sheet_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.') {
        return false;
    }
    !looks_like_cell_reference(name)
}

fn looks_like_cell_reference(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    let letters = upper.trim_end_matches(|c: char| c.is_ascii_digit());
    let a1 = !letters.is_empty()
        && letters.len() < upper.len()
        && letters.len() <= 3
        && letters.chars().all(|c| c.is_ascii_alphabetic());

    // R1C1 style: R, Rn, C, Cn, RnCn
    let r1c1 = {
        let rest = upper.strip_prefix('R').unwrap_or(&upper);
        let rest = rest.trim_start_matches(|c: char| c.is_ascii_digit());
        let rest = rest.strip_prefix('C').unwrap_or(rest);
        let rest = rest.trim_start_matches(|c: char| c.is_ascii_digit());
        rest.is_empty() && (upper.starts_with('R') || upper.starts_with('C'))
    };

    a1 || r1c1
}
