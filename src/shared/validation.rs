use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for two-letter country codes after normalization
    /// - Valid: "MY", "SG", "US"
    /// - Invalid: "my", "MYS", "M", "M1"
    pub static ref COUNTRY_CODE_REGEX: Regex = Regex::new(r"^[A-Z]{2}$").unwrap();

    /// Regex for shipping zone keys
    /// Must be lowercase alphanumeric words joined by single underscores
    /// - Valid: "local", "asean", "east_malaysia", "zone2"
    /// - Invalid: "_local", "local_", "east__malaysia", "Local", "east-malaysia"
    pub static ref ZONE_KEY_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:_[a-z0-9]+)*$").unwrap();
}

/// Trim and upper-case a country code supplied by a client
pub fn normalize_country_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
