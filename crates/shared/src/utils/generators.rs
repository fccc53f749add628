//! Default-value generators referenced from schema declarations.
//!
//! These are plain functions: the schema stores a [`Generator`] tag and
//! dispatches here whenever a row needs a fresh value.
//!
//! [`Generator`]: crate::schema::Generator

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::random_string::{UPPER_ALPHANUMERIC, generate_random_string};

pub const ORDER_NUMBER_PREFIX: &str = "ORD";
pub const ORDER_NUMBER_LENGTH: usize = 20;
const ORDER_NUMBER_SUFFIX_LENGTH: usize = 7;

/// Fresh random primary key.
pub fn get_uuid() -> Uuid {
    Uuid::new_v4()
}

/// Human-readable order code shaped `ORD-YYYYMMDD-XXXXXXX`, always
/// [`ORDER_NUMBER_LENGTH`] characters.
pub fn generate_order_number() -> String {
    let date = Utc::now().format("%Y%m%d");
    let suffix = generate_random_string(ORDER_NUMBER_SUFFIX_LENGTH, UPPER_ALPHANUMERIC);

    format!("{ORDER_NUMBER_PREFIX}-{date}-{suffix}")
}

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn uuids_do_not_repeat() {
        let sample: HashSet<Uuid> = (0..50_000).map(|_| get_uuid()).collect();
        assert_eq!(sample.len(), 50_000);
    }

    #[test]
    fn uuids_are_version_four() {
        assert_eq!(get_uuid().get_version_num(), 4);
    }

    #[test]
    fn order_number_has_fixed_shape() {
        for _ in 0..1_000 {
            let number = generate_order_number();
            assert_eq!(number.len(), ORDER_NUMBER_LENGTH);

            let parts: Vec<&str> = number.split('-').collect();
            assert_eq!(parts.len(), 3);
            assert_eq!(parts[0], ORDER_NUMBER_PREFIX);
            assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
            assert!(
                parts[2]
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            );
        }
    }

    #[test]
    fn order_numbers_rarely_collide() {
        let sample: HashSet<String> = (0..10_000).map(|_| generate_order_number()).collect();
        assert!(sample.len() > 9_990);
    }
}
