use rand::Rng;

pub const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
pub const UPPER_ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub fn generate_random_string(length: usize, charset: &[u8]) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..charset.len());
            charset[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_length_and_charset() {
        let s = generate_random_string(64, UPPER_ALPHANUMERIC);
        assert_eq!(s.len(), 64);
        assert!(s.bytes().all(|b| UPPER_ALPHANUMERIC.contains(&b)));
    }

    #[test]
    fn zero_length_is_empty() {
        assert!(generate_random_string(0, ALPHANUMERIC).is_empty());
    }
}
