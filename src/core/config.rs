use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::core::middleware::BasicCredentials;
use crate::features::cart::models::OrderPricing;
use crate::shared::constants::LOCAL_COUNTRY;
use crate::shared::validation::{normalize_country_code, COUNTRY_CODE_REGEX};

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub auth: AuthConfig,
    pub swagger: SwaggerConfig,
    pub sheets: SheetsConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Shared HS256 secret used to verify admin access tokens
    pub jwt_secret: String,
    pub jwt_leeway: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Spreadsheet-backed settings API (Google Apps Script web app)
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// Web app base URL. Remote sync is disabled when unset.
    pub base_url: Option<String>,
    pub timeout: Duration,
}

/// Storefront pricing and shipping policy
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub currency: String,
    /// Country the store ships from
    pub origin_country: String,
    pub tax_rate: Decimal,
    pub free_shipping_threshold: Decimal,
    /// Shipping charged when no quote is available for the cart
    pub flat_shipping_rate: Decimal,
    pub max_cart_weight_kg: Decimal,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            sheets: SheetsConfig::from_env()?,
            store: StoreConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AuthConfig {
    const DEFAULT_JWT_LEEWAY_SECS: u64 = 60;

    pub fn from_env() -> Result<Self, String> {
        let jwt_secret = env::var("AUTH_JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "AUTH_JWT_SECRET environment variable is required".to_string())?;

        let jwt_leeway_secs = env::var("AUTH_JWT_LEEWAY")
            .unwrap_or_else(|_| Self::DEFAULT_JWT_LEEWAY_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "AUTH_JWT_LEEWAY must be a valid number".to_string())?;

        Ok(Self {
            jwt_secret,
            jwt_leeway: Duration::from_secs(jwt_leeway_secs),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "GlobalMart API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Freight, cart and checkout API for GlobalMart".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Swagger UI login, if both username and password are set
    pub fn credentials(&self) -> Option<BasicCredentials> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(BasicCredentials::new(user, pass)),
            _ => None,
        }
    }
}

impl SheetsConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 10;

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("SHEETS_API_URL")
            .ok()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty());

        let timeout_secs = env::var("SHEETS_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "SHEETS_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl StoreConfig {
    const DEFAULT_CURRENCY: &'static str = "RM";
    const DEFAULT_TAX_RATE: &'static str = "0.06";
    const DEFAULT_FREE_SHIPPING_THRESHOLD: &'static str = "100";
    const DEFAULT_FLAT_SHIPPING_RATE: &'static str = "10";
    const DEFAULT_MAX_CART_WEIGHT_KG: &'static str = "30";

    pub fn from_env() -> Result<Self, String> {
        let currency =
            env::var("STORE_CURRENCY").unwrap_or_else(|_| Self::DEFAULT_CURRENCY.to_string());

        let origin_country = normalize_country_code(
            &env::var("STORE_ORIGIN_COUNTRY").unwrap_or_else(|_| LOCAL_COUNTRY.to_string()),
        );
        if !COUNTRY_CODE_REGEX.is_match(&origin_country) {
            return Err("STORE_ORIGIN_COUNTRY must be a two-letter country code".to_string());
        }

        let tax_rate = decimal_var("STORE_TAX_RATE", Self::DEFAULT_TAX_RATE)?;
        if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
            return Err("STORE_TAX_RATE must be between 0 and 1".to_string());
        }

        let free_shipping_threshold = decimal_var(
            "STORE_FREE_SHIPPING_THRESHOLD",
            Self::DEFAULT_FREE_SHIPPING_THRESHOLD,
        )?;
        let flat_shipping_rate =
            decimal_var("STORE_FLAT_SHIPPING_RATE", Self::DEFAULT_FLAT_SHIPPING_RATE)?;
        let max_cart_weight_kg =
            decimal_var("STORE_MAX_CART_WEIGHT_KG", Self::DEFAULT_MAX_CART_WEIGHT_KG)?;

        Ok(Self {
            currency,
            origin_country,
            tax_rate,
            free_shipping_threshold,
            flat_shipping_rate,
            max_cart_weight_kg,
        })
    }

    pub fn pricing(&self) -> OrderPricing {
        OrderPricing {
            tax_rate: self.tax_rate,
            free_shipping_threshold: self.free_shipping_threshold,
            flat_shipping_rate: self.flat_shipping_rate,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        let pricing = OrderPricing::default();
        Self {
            currency: Self::DEFAULT_CURRENCY.to_string(),
            origin_country: LOCAL_COUNTRY.to_string(),
            tax_rate: pricing.tax_rate,
            free_shipping_threshold: pricing.free_shipping_threshold,
            flat_shipping_rate: pricing.flat_shipping_rate,
            max_cart_weight_kg: Decimal::from(30),
        }
    }
}

/// Read a non-negative decimal from the environment, falling back to `default`
fn decimal_var(name: &str, default: &str) -> Result<Decimal, String> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    let value = Decimal::from_str(raw.trim())
        .map_err(|_| format!("{} must be a valid decimal number", name))?;
    if value.is_sign_negative() {
        return Err(format!("{} must not be negative", name));
    }
    Ok(value)
}
