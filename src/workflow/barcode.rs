use chrono::Utc;
use uuid::Uuid;

/// Printed barcodes are fixed-width numeric so any 1D symbology can carry them.
pub const BARCODE_LEN: usize = 12;

/// Generate a candidate barcode: ten digits of creation time, one digit of
/// entropy, one mod-10 check digit. Candidates are not guaranteed unique on
/// their own; the order service re-generates on collision before the first
/// write, which is where uniqueness is actually enforced.
pub fn generate() -> String {
    let seconds = Utc::now().timestamp().rem_euclid(10_000_000_000);
    let entropy = (Uuid::new_v4().as_u128() % 10) as u32;
    let body = format!("{seconds:010}{entropy}");
    let check = check_digit(&body);
    format!("{body}{check}")
}

/// True when `code` is exactly twelve digits ending in a valid check digit.
pub fn verify(code: &str) -> bool {
    if code.len() != BARCODE_LEN || !code.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let (body, check) = code.split_at(BARCODE_LEN - 1);
    check_digit(body).to_string() == check
}

// UPC-style mod-10: weight 3 on the rightmost body digit, alternating leftward.
fn check_digit(body: &str) -> u32 {
    let sum: u32 = body
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 0 { digit * 3 } else { digit }
        })
        .sum();
    (10 - sum % 10) % 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_twelve_digits() {
        let code = generate();
        assert_eq!(code.len(), BARCODE_LEN);
        assert!(code.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn generated_codes_carry_a_valid_check_digit() {
        for _ in 0..32 {
            assert!(verify(&generate()));
        }
    }

    #[test]
    fn known_check_digit_vector() {
        assert_eq!(check_digit("12345678901"), 2);
        assert!(verify("123456789012"));
        assert!(verify("000000000000"));
    }

    #[test]
    fn rejects_malformed_codes() {
        assert!(!verify("123456789013")); // wrong check digit
        assert!(!verify("12345678901")); // too short
        assert!(!verify("1234567890123")); // too long
        assert!(!verify("12345678901a"));
        assert!(!verify(""));
    }
}
