//! Brazilian Real Formatting Module
//! Formats monetary values using pt-BR conventions (R$ 1.234,50).

/// Format a value as Brazilian currency: `.` for thousands, `,` for decimals.
///
/// `1234.5` becomes `"R$ 1.234,50"`. Values are rounded to whole centavos.
pub fn format_brl(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let reais = cents / 100;
    let centavos = cents % 100;

    let digits = reais.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, grouped, centavos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_decimal_and_thousands_separators() {
        assert_eq!(format_brl(1234.5), "R$ 1.234,50");
        assert_eq!(format_brl(250.75), "R$ 250,75");
        assert_eq!(format_brl(100.0), "R$ 100,00");
    }

    #[test]
    fn formats_zero() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
    }

    #[test]
    fn groups_millions() {
        assert_eq!(format_brl(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_brl(12_345_678.9), "R$ 12.345.678,90");
    }

    #[test]
    fn rounds_to_centavos() {
        assert_eq!(format_brl(0.005), "R$ 0,01");
        assert_eq!(format_brl(99.999), "R$ 100,00");
    }

    #[test]
    fn formats_negative_values() {
        assert_eq!(format_brl(-1234.5), "-R$ 1.234,50");
    }
}
