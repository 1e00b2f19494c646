//! Request validation and normalization
//!
//! Turns an untrusted JSON payload into a [`TransferAssessmentRequest`] or a
//! list of field-attributed violations. Every field is checked, so a caller
//! sees all problems with a request at once.

use crate::types::TransferAssessmentRequest;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

// ===== Wire field names =====
/// Initiating user id
pub const USER_ID: &str = "userId";
/// Debited account id
pub const FROM_ACCOUNT_ID: &str = "fromAccountId";
/// Credited account id
pub const TO_ACCOUNT_ID: &str = "toAccountId";
/// Transfer amount
pub const AMOUNT: &str = "amount";
/// ISO currency code
pub const CURRENCY: &str = "currency";
/// Request time
pub const TIMESTAMP: &str = "timestamp";
/// Transfers in the trailing 24 hours
pub const LAST_24H_TRANSFER_COUNT: &str = "last24hTransferCount";
/// Amount transferred in the trailing 24 hours
pub const LAST_24H_TRANSFER_TOTAL: &str = "last24hTransferTotal";
/// Pseudo-field used when the payload itself has the wrong shape
pub const BODY: &str = "body";

const OFFSET_TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];
const NAIVE_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];
/// Numeric timestamps above this magnitude are read as milliseconds
const EPOCH_MILLIS_THRESHOLD: f64 = 2e10;

/// How the 24h activity statistics are treated when the caller omits them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatsPolicy {
    /// Absent statistics default to zero
    #[default]
    Lenient,
    /// Absent statistics are rejected as missing
    Strict,
}

/// Why a field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Absent or `null`
    Missing,
    /// Present with the wrong JSON type
    WrongType,
    /// Numeric constraint failed
    OutOfRange,
    /// String could not be parsed
    InvalidFormat,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ViolationKind::Missing => "missing",
            ViolationKind::WrongType => "wrong_type",
            ViolationKind::OutOfRange => "out_of_range",
            ViolationKind::InvalidFormat => "invalid_format",
        };
        f.write_str(s)
    }
}

/// A rejected field and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Wire name of the field
    pub field: &'static str,
    /// Violation kind
    pub reason: ViolationKind,
    /// Human-readable description
    pub message: String,
}

impl FieldViolation {
    fn new(field: &'static str, reason: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field,
            reason,
            message: message.into(),
        }
    }

    fn missing(field: &'static str) -> Self {
        Self::new(field, ViolationKind::Missing, format!("{} is required", field))
    }

    fn wrong_type(field: &'static str, expected: &str) -> Self {
        Self::new(
            field,
            ViolationKind::WrongType,
            format!("{} must be {}", field, expected),
        )
    }

    fn out_of_range(field: &'static str, message: impl Into<String>) -> Self {
        Self::new(field, ViolationKind::OutOfRange, message)
    }

    fn invalid_format(field: &'static str, message: impl Into<String>) -> Self {
        Self::new(field, ViolationKind::InvalidFormat, message)
    }
}

/// All violations found in one payload, in wire field order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    fn push(&mut self, violation: FieldViolation) {
        self.0.push(violation);
    }

    /// No violations recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of violations
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Violations in wire field order
    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    /// Violation reported for `field`, if any
    pub fn get(&self, field: &str) -> Option<&FieldViolation> {
        self.0.iter().find(|v| v.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|v| v.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

type FieldResult<T> = std::result::Result<T, FieldViolation>;

/// Validate and normalize a raw assessment payload.
pub fn validate(
    payload: &Value,
    policy: ActivityStatsPolicy,
) -> Result<TransferAssessmentRequest, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let Some(fields) = payload.as_object() else {
        errors.push(FieldViolation::wrong_type(BODY, "a JSON object"));
        return Err(errors);
    };

    let user_id = collect(&mut errors, identifier(fields, USER_ID));
    let from_account_id = collect(&mut errors, identifier(fields, FROM_ACCOUNT_ID));
    let to_account_id = collect(&mut errors, identifier(fields, TO_ACCOUNT_ID));
    let amount = collect(
        &mut errors,
        required(fields, AMOUNT).and_then(|v| non_negative_decimal(AMOUNT, v)),
    );
    let currency = collect(&mut errors, currency(fields));
    let timestamp = collect(&mut errors, timestamp(fields));
    let last_24h_transfer_count = collect(
        &mut errors,
        activity_stat(fields, LAST_24H_TRANSFER_COUNT, policy, non_negative_count, 0),
    );
    let last_24h_transfer_total = collect(
        &mut errors,
        activity_stat(
            fields,
            LAST_24H_TRANSFER_TOTAL,
            policy,
            non_negative_decimal,
            Decimal::ZERO,
        ),
    );

    match (
        user_id,
        from_account_id,
        to_account_id,
        amount,
        currency,
        timestamp,
        last_24h_transfer_count,
        last_24h_transfer_total,
    ) {
        (
            Some(user_id),
            Some(from_account_id),
            Some(to_account_id),
            Some(amount),
            Some(currency),
            Some(timestamp),
            Some(last_24h_transfer_count),
            Some(last_24h_transfer_total),
        ) => Ok(TransferAssessmentRequest {
            user_id,
            from_account_id,
            to_account_id,
            amount,
            currency,
            timestamp,
            last_24h_transfer_count,
            last_24h_transfer_total,
        }),
        _ => Err(errors),
    }
}

fn collect<T>(errors: &mut ValidationErrors, result: FieldResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(violation) => {
            errors.push(violation);
            None
        }
    }
}

/// Present, non-null field value. JSON `null` counts as absent.
fn field<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    fields.get(name).filter(|v| !v.is_null())
}

fn required<'a>(fields: &'a Map<String, Value>, name: &'static str) -> FieldResult<&'a Value> {
    field(fields, name).ok_or_else(|| FieldViolation::missing(name))
}

fn identifier(fields: &Map<String, Value>, name: &'static str) -> FieldResult<String> {
    required(fields, name)?
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| FieldViolation::wrong_type(name, "a string"))
}

fn activity_stat<T>(
    fields: &Map<String, Value>,
    name: &'static str,
    policy: ActivityStatsPolicy,
    parse: fn(&'static str, &Value) -> FieldResult<T>,
    default: T,
) -> FieldResult<T> {
    match (field(fields, name), policy) {
        (Some(value), _) => parse(name, value),
        (None, ActivityStatsPolicy::Lenient) => Ok(default),
        (None, ActivityStatsPolicy::Strict) => Err(FieldViolation::missing(name)),
    }
}

fn non_negative_decimal(name: &'static str, value: &Value) -> FieldResult<Decimal> {
    let Value::Number(number) = value else {
        return Err(FieldViolation::wrong_type(name, "a number"));
    };

    let approx = number.as_f64().unwrap_or_default();
    if approx < 0.0 {
        return Err(FieldViolation::out_of_range(
            name,
            format!("{} must be >= 0", name),
        ));
    }

    // serde_json renders floats in shortest round-trip form, so 499.99 stays 499.99
    let repr = number.to_string();
    let parsed = match Decimal::from_str(&repr).or_else(|_| Decimal::from_scientific(&repr)) {
        Ok(parsed) => parsed,
        // Finer than 28 decimal places: round rather than reject
        Err(_) if approx < 1.0 => Decimal::from_f64(approx).unwrap_or(Decimal::ZERO),
        Err(_) => {
            return Err(FieldViolation::out_of_range(
                name,
                format!("{} is not a representable amount", name),
            ))
        }
    };

    if parsed.is_zero() {
        Ok(Decimal::ZERO)
    } else {
        Ok(parsed)
    }
}

fn non_negative_count(name: &'static str, value: &Value) -> FieldResult<u32> {
    let Value::Number(number) = value else {
        return Err(FieldViolation::wrong_type(name, "an integer"));
    };

    let too_large = || FieldViolation::out_of_range(name, format!("{} exceeds {}", name, u32::MAX));
    let negative = || FieldViolation::out_of_range(name, format!("{} must be >= 0", name));

    if let Some(n) = number.as_u64() {
        return u32::try_from(n).map_err(|_| too_large());
    }
    if number.as_i64().is_some() {
        return Err(negative());
    }

    // Whole-valued floats such as 5.0 are accepted as integers
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f < 0.0 => Err(negative()),
        Some(f) if f.fract() == 0.0 && f <= u32::MAX as f64 => Ok(f as u32),
        Some(f) if f.fract() == 0.0 => Err(too_large()),
        _ => Err(FieldViolation::wrong_type(name, "an integer")),
    }
}

fn currency(fields: &Map<String, Value>) -> FieldResult<String> {
    let raw = required(fields, CURRENCY)?
        .as_str()
        .ok_or_else(|| FieldViolation::wrong_type(CURRENCY, "a string"))?;

    // Normalize first: " usd " is a valid way to spell USD
    let normalized = raw.trim().to_ascii_uppercase();

    if normalized.len() == 3 && normalized.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(normalized)
    } else {
        Err(FieldViolation::invalid_format(
            CURRENCY,
            "currency must be a 3-letter ISO code (e.g., CAD)",
        ))
    }
}

fn timestamp(fields: &Map<String, Value>) -> FieldResult<DateTime<Utc>> {
    match required(fields, TIMESTAMP)? {
        Value::String(raw) => parse_timestamp(raw.trim()).ok_or_else(|| {
            FieldViolation::invalid_format(
                TIMESTAMP,
                format!("timestamp '{}' is not an ISO-8601 date-time", raw),
            )
        }),
        Value::Number(number) => number
            .as_f64()
            .and_then(epoch_timestamp)
            .ok_or_else(|| {
                FieldViolation::out_of_range(
                    TIMESTAMP,
                    format!("timestamp {} is outside the supported range", number),
                )
            }),
        _ => Err(FieldViolation::wrong_type(
            TIMESTAMP,
            "an ISO-8601 date-time string or a Unix timestamp",
        )),
    }
}

/// RFC 3339, an ISO date-time with a minute-precision offset, an offset-less
/// ISO date-time taken as UTC, or a bare date taken as midnight UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    if let Some(ts) = OFFSET_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(raw, format).ok())
    {
        return Some(ts.with_timezone(&Utc));
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Unix seconds, or milliseconds for large magnitudes.
fn epoch_timestamp(value: f64) -> Option<DateTime<Utc>> {
    if !value.is_finite() {
        return None;
    }

    let seconds = if value.abs() > EPOCH_MILLIS_THRESHOLD {
        value / 1000.0
    } else {
        value
    };
    if seconds.abs() >= i64::MAX as f64 {
        return None;
    }

    let whole = seconds.floor();
    let nanos = (((seconds - whole) * 1e9).round() as u32).min(999_999_999);
    DateTime::<Utc>::from_timestamp(whole as i64, nanos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn base_payload() -> Value {
        json!({
            "userId": "u",
            "fromAccountId": "a1",
            "toAccountId": "a2",
            "amount": 100,
            "currency": "CAD",
            "timestamp": "2025-01-01T00:00:00Z",
            "last24hTransferCount": 0,
            "last24hTransferTotal": 0
        })
    }

    fn with(field: &str, value: Value) -> Value {
        let mut payload = base_payload();
        payload[field] = value;
        payload
    }

    fn without(field: &str) -> Value {
        let mut payload = base_payload();
        payload.as_object_mut().unwrap().remove(field);
        payload
    }

    fn reason_for(payload: &Value, field: &str) -> ViolationKind {
        let errors = validate(payload, ActivityStatsPolicy::Lenient).unwrap_err();
        errors
            .get(field)
            .unwrap_or_else(|| panic!("no violation for {}: {:?}", field, errors))
            .reason
    }

    #[test]
    fn test_valid_payload_is_normalized() {
        let request = validate(&base_payload(), ActivityStatsPolicy::Lenient).unwrap();

        assert_eq!(request.user_id, "u");
        assert_eq!(request.from_account_id, "a1");
        assert_eq!(request.to_account_id, "a2");
        assert_eq!(request.amount, dec!(100));
        assert_eq!(request.currency, "CAD");
        assert_eq!(
            request.timestamp,
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(request.last_24h_transfer_count, 0);
        assert_eq!(request.last_24h_transfer_total, Decimal::ZERO);
    }

    #[test]
    fn test_currency_normalized_before_format_check() {
        for raw in ["usd ", " usd ", "Usd", "\tusd\n"] {
            let request = validate(&with("currency", json!(raw)), ActivityStatsPolicy::Lenient)
                .unwrap_or_else(|e| panic!("{:?} rejected: {}", raw, e));
            assert_eq!(request.currency, "USD");
        }
    }

    #[test]
    fn test_bad_currency_rejected() {
        for raw in ["", "C", "CADX", "12$", "   ", "U S"] {
            assert_eq!(
                reason_for(&with("currency", json!(raw)), CURRENCY),
                ViolationKind::InvalidFormat,
                "currency {:?}",
                raw
            );
        }
        assert_eq!(
            reason_for(&with("currency", json!(840)), CURRENCY),
            ViolationKind::WrongType
        );
    }

    #[test]
    fn test_negative_amount_rejected() {
        for amount in [json!(-0.01), json!(-1), json!(-100)] {
            assert_eq!(
                reason_for(&with("amount", amount), AMOUNT),
                ViolationKind::OutOfRange
            );
        }
    }

    #[test]
    fn test_zero_amount_accepted() {
        let request = validate(&with("amount", json!(0)), ActivityStatsPolicy::Lenient).unwrap();
        assert!(request.amount.is_zero());

        let request = validate(&with("amount", json!(-0.0)), ActivityStatsPolicy::Lenient).unwrap();
        assert_eq!(request.amount, Decimal::ZERO);
        assert!(!request.amount.is_sign_negative());
    }

    #[test]
    fn test_decimal_amounts_are_exact() {
        let request =
            validate(&with("amount", json!(499.99)), ActivityStatsPolicy::Lenient).unwrap();
        assert_eq!(request.amount, dec!(499.99));

        let request =
            validate(&with("amount", json!(500.00)), ActivityStatsPolicy::Lenient).unwrap();
        assert_eq!(request.amount, dec!(500));
    }

    #[test]
    fn test_tiny_amounts_round_instead_of_failing() {
        for amount in [json!(1e-30), json!(1e-29), json!(5e-324)] {
            let request = validate(&with("amount", amount.clone()), ActivityStatsPolicy::Lenient)
                .unwrap_or_else(|e| panic!("{} rejected: {}", amount, e));
            assert!(!request.amount.is_sign_negative(), "amount {}", amount);
            assert!(request.amount < dec!(0.000001), "amount {}", amount);
        }

        let request = validate(
            &with("last24hTransferTotal", json!(1e-30)),
            ActivityStatsPolicy::Lenient,
        )
        .unwrap();
        assert!(request.last_24h_transfer_total < dec!(0.000001));

        assert_eq!(
            reason_for(&with("amount", json!(-1e-30)), AMOUNT),
            ViolationKind::OutOfRange
        );
        assert_eq!(
            reason_for(&with("last24hTransferTotal", json!(-1e-30)), LAST_24H_TRANSFER_TOTAL),
            ViolationKind::OutOfRange
        );
    }

    #[test]
    fn test_amount_wrong_type_and_range() {
        assert_eq!(
            reason_for(&with("amount", json!("600")), AMOUNT),
            ViolationKind::WrongType
        );
        assert_eq!(
            reason_for(&with("amount", json!(true)), AMOUNT),
            ViolationKind::WrongType
        );
        assert_eq!(
            reason_for(&with("amount", json!(1e30)), AMOUNT),
            ViolationKind::OutOfRange
        );
    }

    #[test]
    fn test_missing_required_fields() {
        for name in [USER_ID, FROM_ACCOUNT_ID, TO_ACCOUNT_ID, AMOUNT, CURRENCY, TIMESTAMP] {
            assert_eq!(reason_for(&without(name), name), ViolationKind::Missing);
            assert_eq!(reason_for(&with(name, Value::Null), name), ViolationKind::Missing);
        }
    }

    #[test]
    fn test_identifiers_must_be_strings() {
        assert_eq!(
            reason_for(&with("userId", json!(42)), USER_ID),
            ViolationKind::WrongType
        );
        let request = validate(&with("userId", json!("")), ActivityStatsPolicy::Lenient).unwrap();
        assert_eq!(request.user_id, "");
    }

    #[test]
    fn test_all_violations_reported_in_field_order() {
        let errors = validate(&json!({ "amount": 100 }), ActivityStatsPolicy::Lenient).unwrap_err();
        let fields: Vec<&str> = errors.violations().iter().map(|v| v.field).collect();

        assert_eq!(
            fields,
            vec![USER_ID, FROM_ACCOUNT_ID, TO_ACCOUNT_ID, CURRENCY, TIMESTAMP]
        );
        assert!(errors
            .violations()
            .iter()
            .all(|v| v.reason == ViolationKind::Missing));
    }

    #[test]
    fn test_non_object_body_rejected() {
        for payload in [json!([]), json!("text"), json!(12), Value::Null] {
            let errors = validate(&payload, ActivityStatsPolicy::Lenient).unwrap_err();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.violations()[0].field, BODY);
            assert_eq!(errors.violations()[0].reason, ViolationKind::WrongType);
        }
    }

    #[test]
    fn test_activity_stats_default_when_lenient() {
        let mut payload = without("last24hTransferCount");
        payload.as_object_mut().unwrap().remove("last24hTransferTotal");

        let request = validate(&payload, ActivityStatsPolicy::Lenient).unwrap();
        assert_eq!(request.last_24h_transfer_count, 0);
        assert_eq!(request.last_24h_transfer_total, Decimal::ZERO);

        let errors = validate(&payload, ActivityStatsPolicy::Strict).unwrap_err();
        assert_eq!(
            errors.get(LAST_24H_TRANSFER_COUNT).unwrap().reason,
            ViolationKind::Missing
        );
        assert_eq!(
            errors.get(LAST_24H_TRANSFER_TOTAL).unwrap().reason,
            ViolationKind::Missing
        );
    }

    #[test]
    fn test_activity_stats_constraints() {
        assert_eq!(
            reason_for(&with("last24hTransferCount", json!(-1)), LAST_24H_TRANSFER_COUNT),
            ViolationKind::OutOfRange
        );
        assert_eq!(
            reason_for(&with("last24hTransferCount", json!(5.5)), LAST_24H_TRANSFER_COUNT),
            ViolationKind::WrongType
        );
        assert_eq!(
            reason_for(
                &with("last24hTransferCount", json!(5_000_000_000u64)),
                LAST_24H_TRANSFER_COUNT
            ),
            ViolationKind::OutOfRange
        );
        assert_eq!(
            reason_for(&with("last24hTransferTotal", json!(-0.01)), LAST_24H_TRANSFER_TOTAL),
            ViolationKind::OutOfRange
        );

        let request = validate(
            &with("last24hTransferCount", json!(5.0)),
            ActivityStatsPolicy::Lenient,
        )
        .unwrap();
        assert_eq!(request.last_24h_transfer_count, 5);
    }

    #[test]
    fn test_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        for raw in [
            "2025-01-01T00:00:00Z",
            "2025-01-01T00:00:00+00:00",
            "2025-01-01T02:00:00+02:00",
            "2025-01-01T00:00:00",
            "2025-01-01T00:00:00.000",
            "2025-01-01 00:00:00",
            "2025-01-01T00:00Z",
            "2025-01-01T02:00+02:00",
            "2025-01-01 00:00+00:00",
            "2025-01-01T00:00",
            "2025-01-01 00:00",
            "2025-01-01",
        ] {
            let request = validate(&with("timestamp", json!(raw)), ActivityStatsPolicy::Lenient)
                .unwrap_or_else(|e| panic!("{:?} rejected: {}", raw, e));
            assert_eq!(request.timestamp, expected, "timestamp {:?}", raw);
        }

        // Far future dates are not a validation concern
        assert!(validate(
            &with("timestamp", json!("2999-12-31T23:59:59Z")),
            ActivityStatsPolicy::Lenient
        )
        .is_ok());
    }

    #[test]
    fn test_malformed_timestamp_rejected() {
        assert_eq!(
            reason_for(&with("timestamp", json!("not-a-date")), TIMESTAMP),
            ViolationKind::InvalidFormat
        );
        assert_eq!(
            reason_for(&with("timestamp", json!("2025-13-01T00:00:00Z")), TIMESTAMP),
            ViolationKind::InvalidFormat
        );
        assert_eq!(
            reason_for(&with("timestamp", json!("2025-01-01T25:00Z")), TIMESTAMP),
            ViolationKind::InvalidFormat
        );
        assert_eq!(
            reason_for(&with("timestamp", json!(true)), TIMESTAMP),
            ViolationKind::WrongType
        );
        assert_eq!(
            reason_for(&with("timestamp", json!(1e300)), TIMESTAMP),
            ViolationKind::OutOfRange
        );
    }

    #[test]
    fn test_epoch_timestamps_accepted() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        for raw in [json!(1735689600), json!(1735689600.0), json!(1735689600000u64)] {
            let request = validate(&with("timestamp", raw.clone()), ActivityStatsPolicy::Lenient)
                .unwrap_or_else(|e| panic!("{} rejected: {}", raw, e));
            assert_eq!(request.timestamp, expected, "timestamp {}", raw);
        }

        let request = validate(
            &with("timestamp", json!(1735689600.5)),
            ActivityStatsPolicy::Lenient,
        )
        .unwrap();
        assert_eq!(request.timestamp.timestamp(), 1735689600);
        assert_eq!(request.timestamp.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_display_joins_messages() {
        let errors = validate(
            &with("amount", json!(-1)),
            ActivityStatsPolicy::Lenient,
        )
        .unwrap_err();
        assert_eq!(errors.to_string(), "amount must be >= 0");
    }
}
