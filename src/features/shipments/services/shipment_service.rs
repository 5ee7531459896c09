use std::sync::Arc;

use chrono::{Datelike, Utc};
use tokio::sync::RwLock;

use crate::core::error::Result;
use crate::features::couriers::CourierService;
use crate::features::freight::services::resolve_zone;
use crate::features::freight::FreightService;
use crate::features::shipments::models::{
    format_tracking_number, normalize_tracking_number, NewShipment, Shipment, ShipmentError,
    ShipmentStatus, TrackingEvent,
};
use crate::modules::sheets::SheetsClient;
use crate::shared::constants::{MAX_RECENT_SHIPMENTS, TRACKING_NUMBER_PREFIX};

struct Ledger {
    shipments: Vec<Shipment>,
    next_sequence: u64,
}

impl Ledger {
    fn position(&self, tracking_number: &str) -> Option<usize> {
        self.shipments
            .iter()
            .position(|s| s.tracking_number == tracking_number)
    }
}

#[derive(Debug, Clone)]
pub struct ShipmentCreated {
    pub shipment: Shipment,
    /// Whether the shipment sheet accepted the record
    pub recorded: bool,
}

/// Books parcels with couriers and keeps their tracking history
pub struct ShipmentService {
    ledger: RwLock<Ledger>,
    freight: Arc<FreightService>,
    couriers: Arc<CourierService>,
    sheets: Option<Arc<SheetsClient>>,
}

impl ShipmentService {
    pub fn new(
        freight: Arc<FreightService>,
        couriers: Arc<CourierService>,
        sheets: Option<Arc<SheetsClient>>,
    ) -> Self {
        Self {
            ledger: RwLock::new(Ledger {
                shipments: Vec::new(),
                next_sequence: 1,
            }),
            freight,
            couriers,
            sheets,
        }
    }

    pub fn currency(&self) -> &str {
        &self.freight.store().currency
    }

    /// Price a parcel with the chosen courier and open its tracking history.
    ///
    /// Shipments leave from the store's country. Recording in the shipment
    /// sheet is best-effort and never fails a booked shipment.
    pub async fn create(&self, new: NewShipment, created_by: &str) -> Result<ShipmentCreated> {
        let policy = self.freight.policy();
        policy.check_destination(&new.destination_country)?;
        policy.check_weight(new.weight_kg)?;

        let origin_country = self.freight.store().origin_country.clone();
        let zone = resolve_zone(&origin_country, &new.destination_country);
        let courier = self
            .couriers
            .quote(new.courier_id, &zone, new.weight_kg)
            .await?;
        let delivery_time_label = self.freight.delivery_time(&zone, new.method).await?;

        let created_at = Utc::now();
        let shipment = {
            let mut ledger = self.ledger.write().await;
            let tracking_number = format_tracking_number(created_at.year(), ledger.next_sequence);
            ledger.next_sequence += 1;

            let shipment = Shipment {
                tracking_number,
                order_number: new.order_number,
                courier,
                origin_country,
                destination_country: new.destination_country,
                destination: new.destination,
                weight_kg: new.weight_kg,
                method: new.method,
                delivery_time_label,
                events: vec![TrackingEvent::new(
                    ShipmentStatus::Processing,
                    None,
                    created_at,
                )],
                created_at,
            };
            ledger.shipments.push(shipment.clone());
            shipment
        };

        tracing::info!(
            "Shipment {} booked with {} to {} by {}",
            shipment.tracking_number,
            shipment.courier.courier_name,
            shipment.destination_country,
            created_by
        );

        let recorded = self.record(&shipment).await;
        Ok(ShipmentCreated { shipment, recorded })
    }

    /// Look up a shipment by tracking number, ignoring case and surrounding spaces
    pub async fn track(&self, tracking_number: &str) -> Result<Shipment> {
        let number = normalize_tracking_number(tracking_number);
        if !number.starts_with(TRACKING_NUMBER_PREFIX) {
            return Err(ShipmentError::NotFound(number).into());
        }

        let ledger = self.ledger.read().await;
        let index = ledger
            .position(&number)
            .ok_or_else(|| ShipmentError::NotFound(number.clone()))?;
        Ok(ledger.shipments[index].clone())
    }

    /// Move a shipment forward to `status`.
    ///
    /// Steps may be skipped, but a shipment never goes back or repeats a status.
    pub async fn update_status(
        &self,
        tracking_number: &str,
        status: ShipmentStatus,
        location: Option<String>,
        updated_by: &str,
    ) -> Result<Shipment> {
        let number = normalize_tracking_number(tracking_number);
        let mut ledger = self.ledger.write().await;
        let index = ledger
            .position(&number)
            .ok_or_else(|| ShipmentError::NotFound(number.clone()))?;

        let shipment = &mut ledger.shipments[index];
        let current = shipment.status();
        if status <= current {
            return Err(ShipmentError::Conflict(format!(
                "Shipment {} is already {}",
                number,
                current.as_str()
            ))
            .into());
        }

        let location = location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());
        shipment
            .events
            .push(TrackingEvent::new(status, location, Utc::now()));

        tracing::info!(
            "Shipment {} moved to {} by {}",
            number,
            status.as_str(),
            updated_by
        );
        Ok(shipment.clone())
    }

    /// Newest shipments first
    pub async fn recent(&self, limit: usize) -> Vec<Shipment> {
        let limit = limit.clamp(1, MAX_RECENT_SHIPMENTS);
        let ledger = self.ledger.read().await;
        ledger
            .shipments
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    async fn record(&self, shipment: &Shipment) -> bool {
        let Some(sheets) = &self.sheets else {
            return false;
        };

        match sheets.record_shipment(&shipment.to_record()).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    "Failed to record shipment {}: {}",
                    shipment.tracking_number,
                    e
                );
                false
            }
        }
    }
}
