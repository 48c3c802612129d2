//! Input validation for the ledger's customer and sale forms.

/// Validate a CPF by its two verification digits.
/// Empty input is accepted: CPF is optional on customer records.
pub fn validate_cpf(cpf: &str) -> bool {
    if cpf.is_empty() {
        return true;
    }

    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 11 {
        return false;
    }
    // Sequences like 111.111.111-11 pass the checksum but are not issued.
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    digits[9] == check_digit(&digits[..9]) && digits[10] == check_digit(&digits[..10])
}

/// Weighted checksum for one CPF verification digit: weights run from
/// `len + 1` down to 2, and remainders of 10 and 11 fold to 0.
fn check_digit(digits: &[u32]) -> u32 {
    let len = digits.len() as u32;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (len + 1 - i as u32))
        .sum();
    let rest = 11 - (sum % 11);
    if rest >= 10 {
        0
    } else {
        rest
    }
}

/// Structural email check: one `@`, a non-empty local part, and a dot
/// inside the domain. Empty input is accepted (email is optional).
pub fn validate_email(email: &str) -> bool {
    if email.is_empty() {
        return true;
    }
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.split_once('.') {
        Some((host, rest)) => !host.is_empty() && !rest.is_empty(),
        None => false,
    }
}

/// Brazilian phone numbers carry 10 digits (landline) or 11 (mobile).
pub fn validate_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    (10..=11).contains(&digits)
}

/// A ledger amount must parse as a strictly positive number. Accepts the
/// Brazilian decimal comma.
pub fn validate_amount(value: &str) -> bool {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .map(|n| n.is_finite() && n > 0.0)
        .unwrap_or(false)
}
