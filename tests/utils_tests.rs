// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, Local, NaiveTime, TimeZone, Utc};
use finsight::utils::{
    currency_symbol, fmt_amount, fmt_money, parse_datetime, parse_decimal, parse_range_end,
    percentage_change,
};
use rust_decimal::Decimal;

#[test]
fn plain_dates_are_local_days() {
    let start = parse_datetime("2025-03-01").unwrap();
    let local = start.with_timezone(&Local);
    assert_eq!(local.time(), NaiveTime::MIN);
    assert_eq!(local.format("%Y-%m-%d").to_string(), "2025-03-01");

    let end = parse_range_end("2025-03-01").unwrap();
    assert!(end > start);
    assert!(end - start < Duration::hours(25));
    assert_eq!(
        end.with_timezone(&Local).format("%Y-%m-%d").to_string(),
        "2025-03-01"
    );
}

#[test]
fn rfc3339_is_taken_verbatim() {
    let dt = parse_datetime("2025-03-01T10:30:00+05:30").unwrap();
    assert_eq!(dt, Utc.with_ymd_and_hms(2025, 3, 1, 5, 0, 0).unwrap());
    assert_eq!(parse_range_end("2025-03-01T05:00:00Z").unwrap(), dt);
    assert!(parse_datetime("01/03/2025").is_err());
}

#[test]
fn money_formatting() {
    assert_eq!(currency_symbol("INR"), "₹");
    assert_eq!(currency_symbol("CHF"), "CHF");
    assert_eq!(fmt_money(&Decimal::new(-123_456, 3), "USD"), "$123.46");
    assert_eq!(fmt_amount(1500.0, "EUR"), "€1500.00");
    assert!(parse_decimal(" 12.50 ").is_ok());
    assert!(parse_decimal("twelve").is_err());
}

#[test]
fn percentage_change_handles_zero_base() {
    assert_eq!(percentage_change(150.0, 100.0), 50.0);
    assert_eq!(percentage_change(50.0, 100.0), -50.0);
    assert_eq!(percentage_change(10.0, 0.0), 100.0);
    assert_eq!(percentage_change(0.0, 0.0), 0.0);
}
