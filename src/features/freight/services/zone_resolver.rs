use crate::features::freight::models::Zone;
use crate::shared::constants::{ASEAN_COUNTRIES, LOCAL_COUNTRY};

/// Map an (origin, destination) country pair to a shipping zone.
///
/// Only a domestic shipment (`MY` to `MY`) is local; any destination in the
/// ASEAN set is otherwise billed as ASEAN, and everything else, including
/// unknown or malformed codes, is international.
pub fn resolve_zone(origin: &str, destination: &str) -> Zone {
    if origin == LOCAL_COUNTRY && destination == LOCAL_COUNTRY {
        Zone::Local
    } else if ASEAN_COUNTRIES.contains(&destination) {
        Zone::Asean
    } else {
        Zone::International
    }
}
