//! Naming helpers for generated code.

/// Convert a snake_case identifier to PascalCase.
///
/// Words are split on `_`, `-`, and `.`; the remainder of each word is
/// lowercased.
///
/// # Examples
/// ```
/// use strata_model::utils::to_pascal_case;
/// assert_eq!(to_pascal_case("value_expr"), "ValueExpr");
/// assert_eq!(to_pascal_case("processes"), "Processes");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut boundary = true;
    for c in s.chars() {
        if matches!(c, '_' | '-' | '.') {
            boundary = true;
        } else if boundary {
            out.push(c.to_ascii_uppercase());
            boundary = false;
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}

/// Convert a PascalCase or camelCase identifier to snake_case.
///
/// Already-snake input passes through unchanged.
///
/// # Examples
/// ```
/// use strata_model::utils::to_snake_case;
/// assert_eq!(to_snake_case("DeltaAt"), "delta_at");
/// assert_eq!(to_snake_case("delta_at"), "delta_at");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else if matches!(c, '-' | '.' | ' ') {
            if !out.ends_with('_') {
                out.push('_');
            }
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c != '_';
        }
    }
    out
}
