use chrono::NaiveDateTime;

/// Значение ячейки в том виде, в каком его отдаёт источник
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Boolean(bool),
    Date(NaiveDateTime),
    Empty,
}

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

impl Cell {
    /// String form used for both header keys and record values
    pub fn to_display_string(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => format_number(*n),
            Cell::Boolean(b) => b.to_string(),
            Cell::Date(dt) => dt.format(DATE_FORMAT).to_string(),
            Cell::Empty => String::new(),
        }
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Cell::Boolean(true))
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    // -0 prints as "-0" otherwise
    if n == 0.0 {
        return "0".to_string();
    }
    let abs = n.abs();
    if !(EXPONENT_BELOW..EXPONENT_FROM).contains(&abs) {
        return format_exponent(n);
    }
    n.to_string()
}

/// Magnitudes outside `[1e-6, 1e21)` print in exponent form, `1e+21`
const EXPONENT_FROM: f64 = 1e21;
const EXPONENT_BELOW: f64 = 1e-6;

fn format_exponent(n: f64) -> String {
    let s = format!("{:e}", n);
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => s,
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Number(n as f64)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Boolean(b)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(dt: NaiveDateTime) -> Self {
        Cell::Date(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_number_display() {
        assert_eq!(Cell::Number(42.0).to_display_string(), "42");
        assert_eq!(Cell::Number(1.5).to_display_string(), "1.5");
        assert_eq!(Cell::Number(-3.25).to_display_string(), "-3.25");
        assert_eq!(Cell::Number(0.1).to_display_string(), "0.1");
        assert_eq!(Cell::Number(-0.0).to_display_string(), "0");
        assert_eq!(Cell::Number(1234567.0).to_display_string(), "1234567");
        assert_eq!(Cell::Number(f64::NAN).to_display_string(), "NaN");
        assert_eq!(
            Cell::Number(1e20).to_display_string(),
            "100000000000000000000"
        );
        assert_eq!(Cell::Number(0.000001).to_display_string(), "0.000001");
        assert_eq!(Cell::Number(f64::INFINITY).to_display_string(), "Infinity");
        assert_eq!(
            Cell::Number(f64::NEG_INFINITY).to_display_string(),
            "-Infinity"
        );
    }

    #[test]
    fn test_number_exponent_form() {
        assert_eq!(Cell::Number(1e21).to_display_string(), "1e+21");
        assert_eq!(Cell::Number(-1.5e25).to_display_string(), "-1.5e+25");
        assert_eq!(Cell::Number(1.5e-7).to_display_string(), "1.5e-7");
        assert_eq!(Cell::Number(-2e-10).to_display_string(), "-2e-10");
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Cell::Boolean(true).to_display_string(), "true");
        assert_eq!(Cell::Boolean(false).to_display_string(), "false");
        assert_eq!(Cell::Empty.to_display_string(), "");
        assert_eq!(Cell::from("  keep spaces ").to_display_string(), "  keep spaces ");
    }

    #[test]
    fn test_date_display() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(Cell::Date(date).to_display_string(), "2024-01-31T00:00:00");

        let with_time = NaiveDate::from_ymd_opt(2023, 12, 5)
            .unwrap()
            .and_hms_opt(17, 4, 9)
            .unwrap();
        assert_eq!(
            Cell::Date(with_time).to_display_string(),
            "2023-12-05T17:04:09"
        );
    }

    #[test]
    fn test_is_true_is_strict() {
        assert!(Cell::Boolean(true).is_true());
        assert!(!Cell::Boolean(false).is_true());
        assert!(!Cell::from("true").is_true());
        assert!(!Cell::from("TRUE").is_true());
        assert!(!Cell::Number(1.0).is_true());
        assert!(!Cell::Empty.is_true());
    }
}
