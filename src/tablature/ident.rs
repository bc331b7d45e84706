use uuid::Uuid;

/// Returns a fresh opaque identifier.
///
/// Identifiers are plain strings so that documents imported from JSON
/// keep their original ids verbatim, whatever scheme produced them.
pub fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}
