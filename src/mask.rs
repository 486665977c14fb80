//! Masking of card data for logs and display.
//!
//! Only the last four digits of a card number may be shown. Everything logged
//! by this crate goes through [`mask_number`].

/// Masks a card number, keeping only the last 4 digits.
///
/// Separators in the input are ignored. Inputs with 4 digits or fewer are
/// masked completely.
///
/// # Example
///
/// ```
/// use cardcheck::mask::mask_number;
///
/// assert_eq!(mask_number("4242 4242 4242 4242"), "****-****-****-4242");
/// assert_eq!(mask_number("378282246310005"), "***-****-****-0005");
/// assert_eq!(mask_number("123"), "***");
/// ```
pub fn mask_number(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let len = digits.len();

    if len <= 4 {
        return "*".repeat(len);
    }

    let masked_count = len - 4;
    let mut result = String::with_capacity(len + len / 4);

    // Group from the right so the last four always stand alone.
    let lead = masked_count % 4;
    for i in 0..masked_count {
        if i > 0 && (i + 4 - lead) % 4 == 0 {
            result.push('-');
        }
        result.push('*');
    }
    result.push('-');
    result.extend(&digits[len - 4..]);

    result
}

/// Returns the last 4 digits of a card number, or an empty string if it has
/// fewer than 4.
#[inline]
pub fn last_four(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() >= 4 {
        digits[digits.len() - 4..].iter().collect()
    } else {
        String::new()
    }
}

/// Masks a CVV completely, preserving only its length.
#[inline]
pub fn mask_cvv(input: &str) -> String {
    "*".repeat(input.chars().count())
}
