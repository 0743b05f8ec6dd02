//! Display formatting for prices and identifier generation

const BASE36: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Random lowercase base-36 token of `len` characters
pub fn random_token(len: usize) -> String {
    nanoid::nanoid!(len, &BASE36)
}

/// Unique-enough identifier: `{prefix}{unix millis}_{7 random base-36 chars}`
pub fn generate_id(prefix: &str) -> String {
    format!(
        "{}{}_{}",
        prefix,
        chrono::Utc::now().timestamp_millis(),
        random_token(7)
    )
}

/// Format an amount of the secondary currency, e.g. `Bs. 1.234,56`
pub fn format_bs(amount: f64) -> String {
    let (sign, int_part, frac_part) = split_amount(amount);
    format!("{}Bs. {},{}", sign, group_thousands(&int_part, '.'), frac_part)
}

/// Format an amount of the base currency, e.g. `$1,234.56`
pub fn format_usd(amount: f64) -> String {
    let (sign, int_part, frac_part) = split_amount(amount);
    format!("{}${}.{}", sign, group_thousands(&int_part, ','), frac_part)
}

/// Round to 2 decimals and split into sign, integer digits and cents
fn split_amount(amount: f64) -> (&'static str, String, String) {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let sign = if amount.is_sign_negative() && !is_zero {
        "-"
    } else {
        ""
    };
    (sign, int_part.to_string(), frac_part.to_string())
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bs() {
        assert_eq!(format_bs(0.0), "Bs. 0,00");
        assert_eq!(format_bs(12.5), "Bs. 12,50");
        assert_eq!(format_bs(1234.567), "Bs. 1.234,57");
        assert_eq!(format_bs(1_000_000.0), "Bs. 1.000.000,00");
        assert_eq!(format_bs(-800.0), "-Bs. 800,00");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(2.0), "$2.00");
        assert_eq!(format_usd(1234.5), "$1,234.50");
        assert_eq!(format_usd(-0.001), "$0.00");
    }

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id("ord_");
        let rest = id.strip_prefix("ord_").unwrap();
        let (millis, token) = rest.split_once('_').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(token.len(), 7);
        assert!(token.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_tokens_differ() {
        assert_ne!(random_token(12), random_token(12));
    }
}
