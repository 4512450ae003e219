//! Unit formatting and parsing utilities
//!
//! The engine works in decimal feet. Voice prompts and status messages read
//! better in feet and inches, and spoken or typed input arrives in a mix of
//! notations (`10.5`, `10' 6"`, `10 ft 6 in`, `10 feet 6 1/2 inches`).

/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Convert decimal feet to inches
pub fn feet_to_inches(value_ft: f64) -> f64 {
    value_ft * INCHES_PER_FOOT
}

/// Convert inches to decimal feet
pub fn inches_to_feet(value_in: f64) -> f64 {
    value_in / INCHES_PER_FOOT
}

/// Splits a length into whole feet and inches rounded to the nearest inch.
fn split_feet_inches(value_ft: f64) -> (bool, u64, u64) {
    let negative = value_ft < 0.0;
    let total_inches = feet_to_inches(value_ft.abs()).round() as u64;
    (negative, total_inches / 12, total_inches % 12)
}

/// Format a length for speech, e.g. `10 feet 6 inches`.
///
/// Values are rounded to the nearest inch; zero components are dropped
/// unless the whole value is zero.
pub fn format_feet_inches(value_ft: f64) -> String {
    let (negative, feet, inches) = split_feet_inches(value_ft);
    let sign = if negative && (feet > 0 || inches > 0) {
        "minus "
    } else {
        ""
    };

    let feet_part = match feet {
        1 => "1 foot".to_string(),
        n => format!("{} feet", n),
    };
    let inch_part = match inches {
        1 => "1 inch".to_string(),
        n => format!("{} inches", n),
    };

    match (feet, inches) {
        (0, 0) => "0 feet".to_string(),
        (0, _) => format!("{}{}", sign, inch_part),
        (_, 0) => format!("{}{}", sign, feet_part),
        _ => format!("{}{} {}", sign, feet_part, inch_part),
    }
}

/// Format a length in architectural short form, e.g. `10' 6"`.
pub fn format_feet_short(value_ft: f64) -> String {
    let (negative, feet, inches) = split_feet_inches(value_ft);
    let sign = if negative && (feet > 0 || inches > 0) {
        "-"
    } else {
        ""
    };
    format!("{}{}' {}\"", sign, feet, inches)
}

/// Parse a number that may be a simple fraction (`1/2`).
fn parse_number(token: &str) -> Result<f64, String> {
    if let Some((num, den)) = token.split_once('/') {
        let num = num
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("Invalid numerator: {}", num))?;
        let den = den
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("Invalid denominator: {}", den))?;
        if den == 0.0 {
            return Err("Division by zero".to_string());
        }
        Ok(num / den)
    } else {
        token
            .parse::<f64>()
            .map_err(|_| format!("Invalid number: {}", token))
    }
}

/// Parse a length string to decimal feet.
///
/// Bare numbers are feet. Inch values may carry a fraction (`6 1/2"`).
pub fn parse_feet_inches(input: &str) -> Result<f64, String> {
    let normalized = input
        .trim()
        .to_lowercase()
        .replace("feet", "'")
        .replace("foot", "'")
        .replace("ft", "'")
        .replace("inches", "\"")
        .replace("inch", "\"")
        .replace("in", "\"");

    if normalized.is_empty() {
        return Err("Empty length".to_string());
    }

    let (feet_str, inch_str) = match normalized.split_once('\'') {
        Some((feet, rest)) => (feet.trim().to_string(), rest.trim().to_string()),
        None if normalized.contains('"') => (String::new(), normalized.clone()),
        None => (normalized.clone(), String::new()),
    };

    let mut total = 0.0;
    let mut negative = false;

    let feet_str = feet_str.trim();
    if !feet_str.is_empty() {
        let feet = parse_number(feet_str)?;
        negative = feet < 0.0;
        total += feet.abs();
    }

    let inch_str = inch_str.trim_end_matches('"').trim();
    if !inch_str.is_empty() {
        let mut inches = 0.0;
        for token in inch_str.split_whitespace() {
            inches += parse_number(token.trim_end_matches('"'))?;
        }
        if feet_str.is_empty() && inches < 0.0 {
            negative = true;
        }
        total += inches_to_feet(inches.abs());
    }

    Ok(if negative { -total } else { total })
}
