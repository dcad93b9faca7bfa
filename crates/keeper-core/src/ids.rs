//! # Id Generation
//!
//! Every entity in Keeper is identified by a UUID v4 string. UUIDs are
//! globally unique without coordination, which matters because the vault and
//! the ledger both generate ids offline with no central counter.

use uuid::Uuid;

/// Generates a new unique id.
///
/// Two successive calls always return distinct strings.
///
/// ## Example
/// ```rust
/// use keeper_core::ids::generate_id;
///
/// let a = generate_id();
/// let b = generate_id();
/// assert_ne!(a, b);
/// ```
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_is_unique() {
        let first = generate_id();
        let second = generate_id();
        assert_ne!(first, second);
    }

    #[test]
    fn test_generate_id_is_valid_uuid() {
        let id = generate_id();
        assert!(Uuid::parse_str(&id).is_ok());
    }
}
