use uuid::Uuid;

/// Source of document ids.
///
/// The store checks each generated id against the target collection and asks
/// again on a collision, so implementations only need to be very likely unique.
pub trait IdGenerator {
    fn generate(&self) -> String;
}

/// Random 128-bit ids rendered as hyphenated UUID v4 text.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_ids_are_distinct() {
        let ids = UuidGenerator;
        let a = ids.generate();
        let b = ids.generate();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
        assert!(Uuid::parse_str(&a).is_ok());
    }
}
