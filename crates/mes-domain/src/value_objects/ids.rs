//! Identifier generation helpers

use uuid::Uuid;

/// Prefix used for generated correlation identifiers
pub const CORRELATION_ID_PREFIX: &str = "corr";

/// Return a new random (v4) identifier, optionally prefixed
///
/// # Example
///
/// ```
/// use mes_domain::value_objects::new_id;
///
/// let id = new_id(Some("MAT"));
/// assert!(id.starts_with("MAT-"));
/// assert_eq!(new_id(None).len(), 36);
/// ```
pub fn new_id(prefix: Option<&str>) -> String {
    let value = Uuid::new_v4();
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}-{value}"),
        _ => value.to_string(),
    }
}
