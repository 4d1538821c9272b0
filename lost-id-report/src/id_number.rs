//! South African identity number format checks.

/// Number of digits in an identity number.
pub const ID_NUMBER_LENGTH: usize = 13;

/// A complete identity number: exactly 13 ASCII digits.
pub fn is_valid(id: &str) -> bool {
    id.len() == ID_NUMBER_LENGTH && id.bytes().all(|b| b.is_ascii_digit())
}

/// Whether `input` may stand in the field while the user is still typing:
/// up to 13 ASCII digits, including the empty string.
pub fn accepts_input(input: &str) -> bool {
    input.len() <= ID_NUMBER_LENGTH && input.bytes().all(|b| b.is_ascii_digit())
}
