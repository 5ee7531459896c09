use rust_decimal::Decimal;

// =============================================================================
// SHIPPING ZONES
// =============================================================================

/// Country code that counts as domestic when both ends of a shipment are in it
pub const LOCAL_COUNTRY: &str = "MY";

/// Destinations billed at the ASEAN zone rate
pub const ASEAN_COUNTRIES: [&str; 10] = ["MY", "SG", "ID", "TH", "PH", "VN", "BN", "MM", "LA", "KH"];

/// Destinations the store does not ship to
pub const RESTRICTED_DESTINATIONS: [&str; 4] = ["CU", "IR", "KP", "SY"];

// =============================================================================
// SHIPMENT DEFAULTS
// =============================================================================

/// Insurance fee as a fraction of the declared value (1%)
pub const INSURANCE_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Weight used when a shipment request carries no usable weight
pub const DEFAULT_SHIPMENT_WEIGHT_KG: Decimal = Decimal::ONE;

/// Declared value used when a shipment request carries none
pub const DEFAULT_DECLARED_VALUE: Decimal = Decimal::ONE_HUNDRED;

/// Estimated weight of a single cart item without its own weight
pub const DEFAULT_ITEM_WEIGHT_KG: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

// =============================================================================
// CART LIMITS
// =============================================================================

/// Largest quantity a single cart line may reach, merges included
pub const MAX_LINE_QUANTITY: u32 = 10_000;

/// Largest accepted unit price
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Largest accepted per-item weight in kg
pub const MAX_ITEM_WEIGHT_KG: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);

// =============================================================================
// SHIPMENTS
// =============================================================================

/// Prefix of every tracking number the store issues
pub const TRACKING_NUMBER_PREFIX: &str = "GM-";

/// Default and maximum page size for the recent shipments list
pub const DEFAULT_RECENT_SHIPMENTS: usize = 20;
pub const MAX_RECENT_SHIPMENTS: usize = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin role - can edit freight rates and export freight data
pub const ROLE_ADMIN: &str = "admin";
