//! Canonical 32-bit hashing for qualifier values.
//!
//! All arithmetic wraps. The functions are public so that external indexes can
//! reproduce the hash of a value without materializing it.

/// Hash of a string: `fold(0, h * 31 + unit)` over its UTF-16 code units.
pub fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

pub fn bool_hash(value: bool) -> i32 {
    if value { 1231 } else { 1237 }
}

/// Folds the high half of a 64-bit value into the low half.
pub fn long_hash(value: i64) -> i32 {
    (value ^ ((value as u64) >> 32) as i64) as i32
}

pub fn char_hash(value: char) -> i32 {
    value as u32 as i32
}

/// Bit pattern used for both equality and hashing of `f32` values.
///
/// Every NaN collapses to a single pattern; `0.0` and `-0.0` stay distinct.
pub fn float_bits(value: f32) -> u32 {
    if value.is_nan() { 0x7fc0_0000 } else { value.to_bits() }
}

/// `f64` counterpart of [`float_bits`].
pub fn double_bits(value: f64) -> u64 {
    if value.is_nan() {
        0x7ff8_0000_0000_0000
    } else {
        value.to_bits()
    }
}

pub fn float_hash(value: f32) -> i32 {
    float_bits(value) as i32
}

pub fn double_hash(value: f64) -> i32 {
    long_hash(double_bits(value) as i64)
}

/// Element-wise combination: `fold(1, r * 31 + h)`.
pub fn array_hash<I>(element_hashes: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    element_hashes
        .into_iter()
        .fold(1i32, |r, h| r.wrapping_mul(31).wrapping_add(h))
}

/// Contribution of one binding attribute: `(127 * name_hash) ^ value_hash`.
pub fn member_hash(name: &str, value_hash: i32) -> i32 {
    127i32.wrapping_mul(string_hash(name)) ^ value_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_hash_matches_reference_values() {
        assert_eq!(string_hash(""), 0);
        assert_eq!(string_hash("a"), 97);
        assert_eq!(string_hash("foo"), 101_574);
        assert_eq!(string_hash("value"), 111_972_721);
    }

    #[test]
    fn string_hash_uses_utf16_units() {
        // U+1F600 encodes as a surrogate pair.
        let expected = 0xD83Di32.wrapping_mul(31).wrapping_add(0xDE00);
        assert_eq!(string_hash("\u{1F600}"), expected);
    }

    #[test]
    fn long_hash_folds_halves() {
        assert_eq!(long_hash(0), 0);
        assert_eq!(long_hash(-1), 0);
        assert_eq!(long_hash(1 << 32), 1);
        assert_eq!(long_hash(42), 42);
    }

    #[test]
    fn nan_collapses_but_signed_zero_does_not() {
        assert_eq!(float_bits(f32::NAN), float_bits(-f32::NAN));
        assert_ne!(float_bits(0.0), float_bits(-0.0));
        assert_eq!(double_bits(f64::NAN), double_bits(-f64::NAN));
        assert_ne!(double_hash(0.0), double_hash(-0.0));
    }

    #[test]
    fn array_hash_of_empty_is_one() {
        assert_eq!(array_hash(core::iter::empty()), 1);
        assert_eq!(array_hash([97]), 31 + 97);
    }

    #[test]
    fn member_hash_of_named_foo() {
        assert_eq!(member_hash("value", string_hash("foo")), 1_335_733_193);
    }
}
