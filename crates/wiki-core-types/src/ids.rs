//! Random identifiers for panels and story items
//!
//! Identifiers are two random 32-bit words rendered as unpadded lowercase
//! hex and concatenated, so their length varies between 2 and 16 characters.

use uuid::Uuid;

/// Generate a fresh random identifier
///
/// # Example
///
/// ```
/// use wiki_core_types::random_id;
///
/// let id = random_id();
/// assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
pub fn random_id() -> String {
    let bits = Uuid::new_v4().as_u128();
    let high = (bits >> 96) as u32;
    let low = bits as u32;
    format!("{:x}{:x}", high, low)
}

/// A random 32-bit word from the same source as [`random_id`]
pub fn random_u32() -> u32 {
    (Uuid::new_v4().as_u128() >> 96) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_id_generation() {
        let id1 = random_id();
        let id2 = random_id();

        assert_ne!(id1, id2);
        assert!(!id1.is_empty());
        assert!(id1.len() <= 16);
    }

    #[test]
    fn test_random_id_is_lowercase_hex() {
        for _ in 0..32 {
            let id = random_id();
            assert!(id
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }

    #[test]
    fn test_random_id_serializes_as_plain_string() {
        let id = random_id();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}
