/// Группирует разряды числа точками
///
/// # Примеры
/// ```text
/// group_thousands(1234567) == "1.234.567"
/// group_thousands(42) == "42"
/// ```
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let head = digits.len() % 3;

    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    result.push_str(&digits[..head]);
    for chunk in digits.as_bytes()[head..].chunks(3) {
        if !result.is_empty() {
            result.push('.');
        }
        // digits are ASCII
        result.extend(chunk.iter().map(|&b| b as char));
    }
    result
}
