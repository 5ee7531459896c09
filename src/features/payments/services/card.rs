use chrono::{DateTime, Datelike, Utc};
use lazy_static::lazy_static;
use regex::Regex;

use crate::core::error::VALIDATION_SEPARATOR;
use crate::features::payments::models::{CardBrand, CardDetails, PaymentError};

lazy_static! {
    static ref EXPIRY_REGEX: Regex = Regex::new(r"^([0-9]{2})/([0-9]{2})$").unwrap();
    static ref CVC_REGEX: Regex = Regex::new(r"^[0-9]{3,4}$").unwrap();
    static ref VISA_REGEX: Regex = Regex::new(r"^4").unwrap();
    static ref MASTERCARD_REGEX: Regex = Regex::new(r"^5[1-5]").unwrap();
    static ref AMEX_REGEX: Regex = Regex::new(r"^3[47]").unwrap();
    static ref DISCOVER_REGEX: Regex = Regex::new(r"^6(?:011|5)").unwrap();
}

/// Strip the spaces and dashes customers type between digit groups
pub fn normalize_card_number(number: &str) -> String {
    number
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

/// Luhn checksum over an all-digit string
pub fn luhn_valid(digits: &str) -> bool {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let sum: u32 = digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

pub fn detect_brand(digits: &str) -> CardBrand {
    if VISA_REGEX.is_match(digits) {
        CardBrand::Visa
    } else if MASTERCARD_REGEX.is_match(digits) {
        CardBrand::Mastercard
    } else if AMEX_REGEX.is_match(digits) {
        CardBrand::Amex
    } else if DISCOVER_REGEX.is_match(digits) {
        CardBrand::Discover
    } else {
        CardBrand::Unknown
    }
}

/// Check a card's number, expiry, CVC and holder name.
///
/// Returns the normalized number and detected brand. A card is accepted up
/// to the end of its expiry month.
pub fn validate_card(
    card: &CardDetails,
    now: DateTime<Utc>,
) -> Result<(String, CardBrand), PaymentError> {
    let digits = normalize_card_number(&card.number);
    let mut errors = Vec::new();

    if !(13..=19).contains(&digits.len()) || !luhn_valid(&digits) {
        errors.push("Valid card number is required");
    }

    match EXPIRY_REGEX.captures(card.expiry.trim()) {
        Some(caps) => {
            let month: u32 = caps[1].parse().unwrap_or(0);
            let year: i32 = 2000 + caps[2].parse::<i32>().unwrap_or(0);
            if !(1..=12).contains(&month) {
                errors.push("Valid expiry date is required (MM/YY)");
            } else if (year, month) < (now.year(), now.month()) {
                errors.push("Card has expired");
            }
        }
        None => errors.push("Valid expiry date is required (MM/YY)"),
    }

    if !CVC_REGEX.is_match(card.cvc.trim()) {
        errors.push("Valid CVC is required");
    }

    if card.holder_name.trim().chars().count() < 2 {
        errors.push("Cardholder name is required");
    }

    if errors.is_empty() {
        let brand = detect_brand(&digits);
        Ok((digits, brand))
    } else {
        Err(PaymentError::InvalidCard(errors.join(VALIDATION_SEPARATOR)))
    }
}
