//! Display formatting for the presentation layer. Nothing here feeds back
//! into the calculations.

/// Formats an amount US-dollar style: `$1,234.50`, `-$12.00`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u128;
    let dollars = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, fraction)
}

pub fn format_months(months: f64) -> String {
    format!("{:.1} mo", months)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(6000.0), "$6,000.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(-1234.5), "-$1,234.50");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn test_format_months() {
        assert_eq!(format_months(6.0), "6.0 mo");
        assert_eq!(format_months(12.3), "12.3 mo");
    }
}
