/// Format a monetary amount in the Brazilian convention: R$ 1.234,56
pub fn format_currency(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, grouped, frac)
}

/// Format a CPF for display as XXX.XXX.XXX-XX.
/// Inputs that are not 11 digits come back unchanged.
pub fn format_cpf(cpf: &str) -> String {
    let digits: String = cpf.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 11 {
        return cpf.to_string();
    }
    format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    )
}

/// Format a phone number for display
/// Handles 10-digit landlines and 11-digit mobile numbers
pub fn format_phone(phone: &str) -> String {
    // Extract just the digits
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        10 => format!("({}) {}-{}", &digits[0..2], &digits[2..6], &digits[6..10]),
        11 => format!("({}) {}-{}", &digits[0..2], &digits[2..7], &digits[7..11]),
        _ => phone.to_string(), // Return original if can't format
    }
}

/// Format an ISO date (or datetime) as DD/MM/YYYY for display.
pub fn format_date(date: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        return dt.format("%d/%m/%Y").to_string();
    }
    let prefix: String = date.chars().take(10).collect();
    if let Ok(d) = chrono::NaiveDate::parse_from_str(&prefix, "%Y-%m-%d") {
        return d.format("%d/%m/%Y").to_string();
    }
    date.to_string()
}

/// Format an ISO datetime as DD/MM/YYYY HH:MM for display.
pub fn format_datetime(date: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        return dt.format("%d/%m/%Y %H:%M").to_string();
    }
    date.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(25.9), "R$ 25,90");
        assert_eq!(format_currency(1234.56), "R$ 1.234,56");
        assert_eq!(format_currency(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(-12.5), "-R$ 12,50");
    }

    #[test]
    fn test_format_cpf() {
        assert_eq!(format_cpf("52998224725"), "529.982.247-25");
        assert_eq!(format_cpf("529.982.247-25"), "529.982.247-25");
        assert_eq!(format_cpf("123"), "123"); // Too short, return as-is
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("1187654321"), "(11) 8765-4321");
        assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
        assert_eq!(format_phone("(11) 98765-4321"), "(11) 98765-4321");
        assert_eq!(format_phone("123"), "123"); // Too short, return as-is
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T18:30:00-03:00"), "15/03/2024");
        assert_eq!(format_date("amanha"), "amanha");
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2024-03-15T18:30:00-03:00"),
            "15/03/2024 18:30"
        );
        assert_eq!(format_datetime("2024-03-15"), "2024-03-15");
    }
}
