use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::core::config::StoreConfig;
use crate::features::couriers::models::{
    default_couriers, Courier, CourierError, CourierProfile, CourierQuote,
};
use crate::features::freight::models::Zone;

struct Registry {
    couriers: Vec<Courier>,
    next_id: u32,
}

impl Registry {
    fn position(&self, id: u32) -> Result<usize, CourierError> {
        self.couriers
            .iter()
            .position(|c| c.id == id)
            .ok_or(CourierError::NotFound(id))
    }

    fn check_name_free(&self, name: &str, except: Option<u32>) -> Result<(), CourierError> {
        let taken = self
            .couriers
            .iter()
            .any(|c| Some(c.id) != except && c.name().eq_ignore_ascii_case(name));
        if taken {
            return Err(CourierError::Conflict(format!(
                "Courier '{}' already exists",
                name
            )));
        }
        Ok(())
    }
}

/// Price a shipment of `weight_kg` into `zone` with one courier
fn courier_quote(
    courier: &Courier,
    zone: &Zone,
    weight_kg: Decimal,
) -> Result<CourierQuote, CourierError> {
    if !courier.is_active() {
        return Err(CourierError::Validation(format!(
            "Courier '{}' is not active",
            courier.name()
        )));
    }
    if weight_kg < Decimal::ZERO {
        return Err(CourierError::Validation(
            "weightKg must not be negative".to_string(),
        ));
    }

    let rate = courier.rate_for(zone).ok_or_else(|| {
        CourierError::Validation(format!(
            "Courier '{}' does not deliver to the {} zone",
            courier.name(),
            zone
        ))
    })?;

    let too_large = || CourierError::Validation("Shipment is too large to quote".to_string());
    let weight_charge = weight_kg.checked_mul(rate.per_kg).ok_or_else(too_large)?;
    let total = rate.base.checked_add(weight_charge).ok_or_else(too_large)?;

    Ok(CourierQuote {
        courier_id: courier.id,
        courier_name: courier.name().to_string(),
        zone: zone.clone(),
        base_rate: rate.base,
        weight_charge,
        total,
        tracking_url: courier.profile.tracking_url.clone(),
    })
}

/// Registry of courier partners and their per-zone rates.
///
/// Ids are never reused, so a deleted courier's id stays unknown.
pub struct CourierService {
    registry: RwLock<Registry>,
    store: StoreConfig,
}

impl CourierService {
    pub fn new(store: StoreConfig) -> Self {
        let now = Utc::now();
        let couriers: Vec<Courier> = default_couriers()
            .into_iter()
            .zip(1..)
            .map(|(profile, id)| Courier {
                id,
                profile,
                updated_at: now,
                updated_by: None,
            })
            .collect();
        let next_id = couriers.len() as u32 + 1;

        Self {
            registry: RwLock::new(Registry { couriers, next_id }),
            store,
        }
    }

    pub fn store(&self) -> &StoreConfig {
        &self.store
    }

    /// All couriers, by id
    pub async fn list(&self) -> Vec<Courier> {
        self.registry.read().await.couriers.clone()
    }

    pub async fn get(&self, id: u32) -> Result<Courier, CourierError> {
        let registry = self.registry.read().await;
        let index = registry.position(id)?;
        Ok(registry.couriers[index].clone())
    }

    pub async fn create(
        &self,
        profile: CourierProfile,
        created_by: &str,
    ) -> Result<Courier, CourierError> {
        profile.validate()?;

        let mut registry = self.registry.write().await;
        registry.check_name_free(&profile.name, None)?;

        let courier = Courier {
            id: registry.next_id,
            profile,
            updated_at: Utc::now(),
            updated_by: Some(created_by.to_string()),
        };
        registry.next_id += 1;
        registry.couriers.push(courier.clone());

        tracing::info!(
            "Courier '{}' added as {} by {}",
            courier.name(),
            courier.id,
            created_by
        );
        Ok(courier)
    }

    pub async fn update(
        &self,
        id: u32,
        profile: CourierProfile,
        updated_by: &str,
    ) -> Result<Courier, CourierError> {
        profile.validate()?;

        let mut registry = self.registry.write().await;
        let index = registry.position(id)?;
        registry.check_name_free(&profile.name, Some(id))?;

        let courier = &mut registry.couriers[index];
        courier.profile = profile;
        courier.updated_at = Utc::now();
        courier.updated_by = Some(updated_by.to_string());

        tracing::info!("Courier '{}' ({}) updated by {}", courier.name(), id, updated_by);
        Ok(courier.clone())
    }

    pub async fn delete(&self, id: u32, deleted_by: &str) -> Result<Courier, CourierError> {
        let mut registry = self.registry.write().await;
        let index = registry.position(id)?;
        let courier = registry.couriers.remove(index);

        tracing::warn!("Courier '{}' ({}) deleted by {}", courier.name(), id, deleted_by);
        Ok(courier)
    }

    /// Quote one courier for a shipment into `zone`
    pub async fn quote(
        &self,
        id: u32,
        zone: &Zone,
        weight_kg: Decimal,
    ) -> Result<CourierQuote, CourierError> {
        let courier = self.get(id).await?;
        courier_quote(&courier, zone, weight_kg)
    }

    /// Quotes from every active courier that delivers to `zone`, cheapest first
    pub async fn compare(
        &self,
        zone: &Zone,
        weight_kg: Decimal,
    ) -> Result<Vec<CourierQuote>, CourierError> {
        if weight_kg < Decimal::ZERO {
            return Err(CourierError::Validation(
                "weightKg must not be negative".to_string(),
            ));
        }

        let registry = self.registry.read().await;
        let mut quotes = Vec::new();
        for courier in &registry.couriers {
            if !courier.is_active() || courier.rate_for(zone).is_none() {
                continue;
            }
            quotes.push(courier_quote(courier, zone, weight_kg)?);
        }
        quotes.sort_by(|a, b| a.total.cmp(&b.total).then(a.courier_id.cmp(&b.courier_id)));
        Ok(quotes)
    }
}
