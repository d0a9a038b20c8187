//! Boundary coercion from form text into typed scoring input.
//!
//! Every function here is total: malformed text degrades to zero or to the `Unspecified`
//! variant, so nothing downstream ever has to handle a parse failure.

use super::domain::{EvaluationInput, EvaluationRequest, IpStatus, MarketSize, ProductStage};

const PRODUCT_STAGE_LABELS: &[(&str, ProductStage)] = &[
    ("ایده", ProductStage::Idea),
    ("idea", ProductStage::Idea),
    ("نمونه اولیه", ProductStage::Mvp),
    ("mvp", ProductStage::Mvp),
    ("محصول عرضه شده", ProductStage::Launched),
    ("launched", ProductStage::Launched),
    ("درآمدزا", ProductStage::Revenue),
    ("revenue", ProductStage::Revenue),
];

const IP_STATUS_LABELS: &[(&str, IpStatus)] = &[
    ("ثبت شده", IpStatus::Registered),
    ("registered", IpStatus::Registered),
    ("در حال ثبت", IpStatus::Pending),
    ("pending", IpStatus::Pending),
];

const MARKET_SIZE_LABELS: &[(&str, MarketSize)] = &[
    ("بزرگ", MarketSize::Large),
    ("large", MarketSize::Large),
    ("متوسط", MarketSize::Medium),
    ("medium", MarketSize::Medium),
    ("کوچک", MarketSize::Small),
    ("small", MarketSize::Small),
];

const LARGE_MARKET_KEYWORDS: &[&str] = &["billion", "میلیارد"];
const MEDIUM_MARKET_KEYWORDS: &[&str] = &["million", "میلیون"];

const NO_TRACTION_SENTINELS: &[&str] = &["none", "ندارد", "-", "n/a"];

impl From<&EvaluationRequest> for EvaluationInput {
    fn from(request: &EvaluationRequest) -> Self {
        Self {
            company_name: request.company_name.trim().to_string(),
            team_size: parse_count(&request.team_size),
            technical_team: parse_count(&request.technical_team),
            product_stage: parse_product_stage(&request.product_stage),
            ip_status: parse_ip_status(&request.ip_status),
            market_size: parse_market_size(&request.market_size),
            current_revenue: parse_numeric(&request.current_revenue),
            monthly_users: parse_numeric(&request.monthly_users),
            cac: parse_numeric(&request.cac),
            ltv: parse_numeric(&request.ltv),
            funding_request: parse_numeric(&request.funding_request),
            traction: parse_traction(&request.traction),
        }
    }
}

/// Coerce locale-formatted numeric text into a finite, non-negative number.
///
/// Localized digits are mapped to ASCII, everything except digits and `.` is dropped, and the
/// longest parseable prefix wins (`"1.2.3"` reads as `1.2`). Empty input is `0`.
pub fn parse_numeric(raw: &str) -> f64 {
    let mut cleaned = String::with_capacity(raw.len());
    let mut seen_point = false;

    for ch in raw.chars().filter_map(ascii_numeric_char) {
        if ch == '.' {
            if seen_point {
                break;
            }
            seen_point = true;
        }
        cleaned.push(ch);
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        Ok(_) => f64::MAX,
        Err(_) => 0.0,
    }
}

/// Headcount-style fields: the numeric value truncated toward zero.
pub fn parse_count(raw: &str) -> u32 {
    let value = parse_numeric(raw).trunc();
    if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value as u32
    }
}

fn ascii_numeric_char(ch: char) -> Option<char> {
    match ch {
        '0'..='9' | '.' => Some(ch),
        // Arabic decimal separator
        '\u{066B}' => Some('.'),
        '\u{0660}'..='\u{0669}' => shift_digit(ch, '\u{0660}'),
        '\u{06F0}'..='\u{06F9}' => shift_digit(ch, '\u{06F0}'),
        '\u{FF10}'..='\u{FF19}' => shift_digit(ch, '\u{FF10}'),
        _ => None,
    }
}

fn shift_digit(ch: char, zero: char) -> Option<char> {
    char::from_digit(ch as u32 - zero as u32, 10)
}

/// Trim, fold case, and collapse invisible joiners so label lookups are forgiving.
pub(crate) fn normalize_label(value: &str) -> String {
    let cleaned = value
        .replace(['\u{feff}', '\u{200b}'], "")
        .replace('\u{200c}', " ")
        .replace('ي', "ی")
        .replace('ك', "ک")
        .to_lowercase();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn lookup<T: Copy>(table: &[(&str, T)], label: &str) -> Option<T> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == label)
        .map(|(_, value)| *value)
}

pub fn parse_product_stage(raw: &str) -> ProductStage {
    lookup(PRODUCT_STAGE_LABELS, &normalize_label(raw)).unwrap_or(ProductStage::Unspecified)
}

pub fn parse_ip_status(raw: &str) -> IpStatus {
    lookup(IP_STATUS_LABELS, &normalize_label(raw)).unwrap_or(IpStatus::Unspecified)
}

/// Exact labels first, then magnitude keywords in free text. Large wins when both appear.
pub fn parse_market_size(raw: &str) -> MarketSize {
    let label = normalize_label(raw);
    if let Some(size) = lookup(MARKET_SIZE_LABELS, &label) {
        return size;
    }

    if LARGE_MARKET_KEYWORDS.iter().any(|keyword| label.contains(keyword)) {
        MarketSize::Large
    } else if MEDIUM_MARKET_KEYWORDS
        .iter()
        .any(|keyword| label.contains(keyword))
    {
        MarketSize::Medium
    } else {
        MarketSize::Unspecified
    }
}

pub fn parse_traction(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let label = normalize_label(trimmed);
    if label.is_empty() || NO_TRACTION_SENTINELS.contains(&label.as_str()) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_currency_and_thousands_separators() {
        assert_eq!(parse_numeric("$1,250,000"), 1_250_000.0);
        assert_eq!(parse_numeric("1 250 000 ریال"), 1_250_000.0);
        assert_eq!(parse_numeric("12.5k"), 12.5);
    }

    #[test]
    fn maps_localized_digits() {
        assert_eq!(parse_numeric("۱۲۰۰"), 1200.0);
        assert_eq!(parse_numeric("٣٤٫٥"), 34.5);
        assert_eq!(parse_numeric("１０"), 10.0);
        assert_eq!(parse_numeric("۱٬۰۰۰٬۰۰۰"), 1_000_000.0);
    }

    #[test]
    fn degrades_garbage_to_zero() {
        assert_eq!(parse_numeric(""), 0.0);
        assert_eq!(parse_numeric("n/a"), 0.0);
        assert_eq!(parse_numeric("."), 0.0);
        assert_eq!(parse_numeric("-"), 0.0);
    }

    #[test]
    fn never_returns_negative_or_non_finite_values() {
        assert_eq!(parse_numeric("-500"), 500.0);
        assert_eq!(parse_numeric("1.2.3"), 1.2);
        let huge = "9".repeat(400);
        let value = parse_numeric(&huge);
        assert!(value.is_finite());
        assert_eq!(value, f64::MAX);
    }

    #[test]
    fn counts_truncate_toward_zero() {
        assert_eq!(parse_count("4.9"), 4);
        assert_eq!(parse_count("۸ نفر"), 8);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count(&"9".repeat(30)), u32::MAX);
    }

    #[test]
    fn stage_labels_accept_local_and_english_synonyms() {
        assert_eq!(parse_product_stage("MVP"), ProductStage::Mvp);
        assert_eq!(parse_product_stage(" نمونه\u{200c}اولیه "), ProductStage::Mvp);
        assert_eq!(parse_product_stage("Launched"), ProductStage::Launched);
        assert_eq!(parse_product_stage("درآمدزا"), ProductStage::Revenue);
        assert_eq!(parse_product_stage("scaling"), ProductStage::Unspecified);
        assert_eq!(parse_product_stage(""), ProductStage::Unspecified);
    }

    #[test]
    fn ip_status_labels_are_normalized() {
        assert_eq!(parse_ip_status("ثبت\u{200c}شده"), IpStatus::Registered);
        assert_eq!(parse_ip_status("REGISTERED"), IpStatus::Registered);
        assert_eq!(parse_ip_status("pending"), IpStatus::Pending);
        assert_eq!(parse_ip_status("unknown"), IpStatus::Unspecified);
        assert_eq!(parse_ip_status("در حال ثبت"), IpStatus::Pending);
    }

    #[test]
    fn arabic_letter_variants_fold_into_persian_forms() {
        assert_eq!(parse_product_stage("نمونه اوليه"), ProductStage::Mvp);
        assert_eq!(parse_market_size("كوچك"), MarketSize::Small);
    }

    #[test]
    fn market_size_reads_labels_and_magnitudes() {
        assert_eq!(parse_market_size("Large"), MarketSize::Large);
        assert_eq!(parse_market_size("متوسط"), MarketSize::Medium);
        assert_eq!(parse_market_size("about 3 billion USD"), MarketSize::Large);
        assert_eq!(parse_market_size("۵۰۰ میلیون تومان"), MarketSize::Medium);
        assert_eq!(
            parse_market_size("500 million today, 2 billion by 2030"),
            MarketSize::Large
        );
        assert_eq!(parse_market_size("niche"), MarketSize::Unspecified);
    }

    #[test]
    fn traction_sentinels_count_as_absent() {
        assert_eq!(parse_traction("None"), None);
        assert_eq!(parse_traction("  "), None);
        assert_eq!(parse_traction("ندارد"), None);
        assert_eq!(
            parse_traction(" 3 pilot customers "),
            Some("3 pilot customers".to_string())
        );
    }

    #[test]
    fn builds_input_from_request() {
        let request = EvaluationRequest {
            company_name: "  Acme  ".to_string(),
            team_size: "۵".to_string(),
            monthly_users: "1,500".to_string(),
            traction: "none".to_string(),
            ..EvaluationRequest::default()
        };

        let input = EvaluationInput::from(&request);

        assert_eq!(input.company_name, "Acme");
        assert_eq!(input.team_size, 5);
        assert_eq!(input.technical_team, 0);
        assert_eq!(input.monthly_users, 1500.0);
        assert_eq!(input.product_stage, ProductStage::Unspecified);
        assert_eq!(input.traction, None);
    }
}
