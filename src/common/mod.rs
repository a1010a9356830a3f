// ============================================================================
// Tagged-Result Core
// ============================================================================
//
// Safe access over fixed-arity tagged tuples. Element 0 is the tag, the
// remaining positions are the fields. Nothing here panics: every lookup
// goes through `extract_element`.
//
// ============================================================================

pub mod error;

pub use error::{
    DomainError, DomainResult, ErrorKind, ErrorPayload, INDEX_OUT_OF_RANGE, INVALID_EVENT_TYPE,
    INVALID_TUPLE_ARITY, NOT_AGGREGATE_TYPE, UNKNOWN_DATA_TYPE,
};

/// Position of the tag in every tagged tuple
pub const TAG_INDEX: isize = 0;

/// Position of the structure field in aggregate and event tuples
pub const STRUCTURE_INDEX: isize = 1;

/// Arity of aggregate and event tuples (tag + structure)
pub const TAGGED_ARITY: usize = 2;

/// Return the element at `index`, or an `exception` error when out of range.
pub fn extract_element<T>(tuple: &[T], index: isize) -> DomainResult<&T> {
    let position = usize::try_from(index).map_err(|_| DomainError::out_of_range())?;
    tuple.get(position).ok_or_else(DomainError::out_of_range)
}

pub fn is_length_valid<T>(tuple: &[T], expected: usize) -> bool {
    tuple.len() == expected
}

/// Fail with an `exception` error unless the tuple has exactly `expected` elements.
pub fn ensure_arity<T>(tuple: &[T], expected: usize) -> DomainResult<()> {
    if is_length_valid(tuple, expected) {
        Ok(())
    } else {
        Err(DomainError::invalid_arity())
    }
}

/// True when element 0 exists and equals `key`.
pub fn has_tag<T, K>(tuple: &[T], key: &K) -> bool
where
    T: PartialEq<K>,
    K: ?Sized,
{
    match extract_element(tuple, TAG_INDEX) {
        Ok(head) => <T as PartialEq<K>>::eq(head, key),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_extract_element_in_bounds() {
        let tuple = [10, 20, 30];
        assert_eq!(extract_element(&tuple, 0), Ok(&10));
        assert_eq!(extract_element(&tuple, 2), Ok(&30));
    }

    #[test]
    fn test_extract_element_out_of_bounds() {
        let tuple = [10, 20, 30];
        let err = extract_element(&tuple, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Exception);
        assert_eq!(err.message(), Some(INDEX_OUT_OF_RANGE));
    }

    #[test]
    fn test_extract_element_negative_index() {
        let tuple = ["a"];
        let err = extract_element(&tuple, -1).unwrap_err();
        assert!(err.is_kind(ErrorKind::Exception));
    }

    #[test]
    fn test_extract_element_empty_tuple() {
        let tuple: [u8; 0] = [];
        assert!(extract_element(&tuple, 0).is_err());
    }

    #[test]
    fn test_is_length_valid() {
        assert!(is_length_valid(&[1, 2], 2));
        assert!(!is_length_valid(&[1, 2, 3], 2));
        assert!(is_length_valid::<u8>(&[], 0));
    }

    #[test]
    fn test_ensure_arity() {
        assert!(ensure_arity(&[1, 2], 2).is_ok());

        let err = ensure_arity(&[1, 2, 3], 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Exception);
        assert_eq!(err.message(), Some(INVALID_TUPLE_ARITY));
    }

    #[test]
    fn test_has_tag_matches_first_element() {
        let tuple: Vec<Value> = vec![json!("aggregate"), json!({"name": "cart"})];
        assert!(has_tag(&tuple, "aggregate"));
        assert!(!has_tag(&tuple, "event"));
    }

    #[test]
    fn test_has_tag_only_checks_head() {
        let tuple: Vec<Value> = vec![json!("test"), json!("aggregate")];
        assert!(!has_tag(&tuple, "aggregate"));
    }

    #[test]
    fn test_has_tag_on_empty_tuple_is_false() {
        let tuple: Vec<Value> = Vec::new();
        assert!(!has_tag(&tuple, "aggregate"));
    }

    #[test]
    fn test_has_tag_single_element() {
        let tuple: Vec<Value> = vec![json!("aggregate")];
        assert!(has_tag(&tuple, "aggregate"));
    }
}
