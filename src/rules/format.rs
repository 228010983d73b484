//! String format checks.
//!
//! Numeric kinds bypass every check here and pass; the patterns apply to
//! string values only. Any other kind is unsupported.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rules::helpers::parse_mismatch;
use crate::rules::{Fault, RuleError, RuleFn, RuleRegistry, RuleResult};
use crate::value::{Kind, Value};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w+\-.]+@[a-z\d\-]+(\.[a-z]+)*\.[a-z]+$").expect("email pattern compiles")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^1[3-9]\d{9}$").expect("phone pattern compiles"));

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").expect("number pattern compiles"));

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(http|ftp|https)://[\w\-]+(\.[\w\-]+)+([\w\-.,@?^=%&:/~+#]*[\w\-@?^=%&/~+#])?$")
        .expect("url pattern compiles")
});

// Datetime component patterns, keyed by format letter.
const YEAR_PAT: &str = r"(19|2[0-4])\d{2}";
const MONTH_PAT: &str = r"(10|11|12|0[1-9])";
const DAY_PAT: &str = r"(30|31|0[1-9]|[1-2][0-9])";
const HOUR_PAT: &str = r"(20|21|22|23|[0-1]\d)";
const MINUTE_PAT: &str = r"([0-5]\d)";
const SECOND_PAT: &str = r"([0-5]\d)";

const DEFAULT_DATETIME_FORMAT: &str = "Y-m-d H:i:s";

/// Well-formed email address: `email`
pub const RULE_EMAIL: RuleFn =
    |kind, value, _title, _params| check_string(kind, value, "email", |s| EMAIL_RE.is_match(s));

/// Mobile phone number: `phone`
pub const RULE_PHONE: RuleFn =
    |kind, value, _title, _params| check_string(kind, value, "phone", |s| PHONE_RE.is_match(s));

/// Integer or decimal text: `number`
pub const RULE_NUMBER: RuleFn =
    |kind, value, _title, _params| check_string(kind, value, "number", |s| NUMBER_RE.is_match(s));

/// http, https, or ftp URL: `url`
pub const RULE_URL: RuleFn =
    |kind, value, _title, _params| check_string(kind, value, "url", |s| URL_RE.is_match(s));

/// IP address of either family: `ip`
pub const RULE_IP: RuleFn = |kind, value, _title, _params| {
    check_string(kind, value, "ip", |s| s.parse::<IpAddr>().is_ok())
};

/// Dotted-quad IPv4 address: `ipv4`
pub const RULE_IPV4: RuleFn = |kind, value, _title, _params| {
    check_string(kind, value, "ipv4", |s| s.parse::<Ipv4Addr>().is_ok())
};

/// IPv6 address: `ipv6`
pub const RULE_IPV6: RuleFn = |kind, value, _title, _params| {
    check_string(kind, value, "ipv6", |s| s.parse::<Ipv6Addr>().is_ok())
};

/// Datetime text against a format of `Y m d H i s` letters: `datetime=Y-m-d`
///
/// Format letters map to component patterns (year 1900-2499, month 01-12,
/// day 01-31, hour 00-23, minute and second 00-59); every other character
/// matches itself literally. Defaults to `Y-m-d H:i:s`.
pub const RULE_DATETIME: RuleFn = |kind, value, _title, params| {
    if kind.is_numeric() {
        return Ok(());
    }
    let Value::Str(s) = value else {
        return Err(RuleError::Unsupported(kind));
    };
    let format = params.first().copied().unwrap_or(DEFAULT_DATETIME_FORMAT);
    let Ok(re) = Regex::new(&datetime_pattern(format)) else {
        return Err(parse_mismatch("datetime", format, "datetime format"));
    };
    if re.is_match(s) {
        Ok(())
    } else {
        Err(RuleError::Constraint(
            Fault::new("datetime").arg("format", format),
        ))
    }
};

fn check_string(kind: Kind, value: &Value, key: &str, matches: impl Fn(&str) -> bool) -> RuleResult {
    if kind.is_numeric() {
        return Ok(());
    }
    let Value::Str(s) = value else {
        return Err(RuleError::Unsupported(kind));
    };
    if matches(s) {
        Ok(())
    } else {
        Err(RuleError::Constraint(Fault::new(key)))
    }
}

fn datetime_pattern(format: &str) -> String {
    let mut pattern = String::from("^");
    for ch in format.chars() {
        match ch {
            'Y' => pattern.push_str(YEAR_PAT),
            'm' => pattern.push_str(MONTH_PAT),
            'd' => pattern.push_str(DAY_PAT),
            'H' => pattern.push_str(HOUR_PAT),
            'i' => pattern.push_str(MINUTE_PAT),
            's' => pattern.push_str(SECOND_PAT),
            other => pattern.push_str(&regex::escape(&other.to_string())),
        }
    }
    pattern.push('$');
    pattern
}

pub fn register_format_rules(registry: &mut RuleRegistry) {
    registry.register("email", RULE_EMAIL);
    registry.register("phone", RULE_PHONE);
    registry.register("number", RULE_NUMBER);
    registry.register("url", RULE_URL);
    registry.register("ip", RULE_IP);
    registry.register("ipv4", RULE_IPV4);
    registry.register("ipv6", RULE_IPV6);
    registry.register("datetime", RULE_DATETIME);
}
