use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::features::freight::models::{default_rate_table, FreightError, RateEntry, RateRecord, Zone};
use crate::modules::sheets::{
    FreightSettingsPayload, RemoteDeliveryTimesPayload, RemoteRateSettings, SheetsClient,
};

/// Name recorded on entries that came from the settings sheet
const REMOTE_UPDATER: &str = "settings-sheet";

/// Result of an admin rate write
#[derive(Debug, Clone)]
pub struct RateUpdate {
    pub record: RateRecord,
    /// Whether the settings sheet acknowledged the new entry
    pub persisted: bool,
}

/// Outcome of a remote reload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateSource {
    /// Settings sheet answered; number of zones applied
    Remote(usize),
    /// Remote sync is disabled or failed; the live table was kept
    Local,
}

/// Snapshot of the whole table for backup
#[derive(Debug, Clone)]
pub struct RateExport {
    pub shipping_rates: Vec<RateRecord>,
    pub timestamp: DateTime<Utc>,
}

/// Holds the live freight rate table.
///
/// Reads hand out cloned snapshots so a quote is never affected by a write
/// that lands while it is being computed. Writes go through the lock and a
/// version check.
pub struct RateTableService {
    rates: RwLock<HashMap<Zone, RateRecord>>,
    sheets: Option<Arc<SheetsClient>>,
}

impl RateTableService {
    pub fn new(sheets: Option<Arc<SheetsClient>>) -> Self {
        let now = Utc::now();
        let rates = default_rate_table()
            .into_iter()
            .map(|(zone, entry)| {
                let record = RateRecord {
                    zone: zone.clone(),
                    entry,
                    version: 1,
                    updated_at: now,
                    updated_by: None,
                };
                (zone, record)
            })
            .collect();

        Self {
            rates: RwLock::new(rates),
            sheets,
        }
    }

    pub async fn get_rate(&self, zone: &Zone) -> Result<RateEntry, FreightError> {
        self.get_record(zone).await.map(|record| record.entry)
    }

    pub async fn get_record(&self, zone: &Zone) -> Result<RateRecord, FreightError> {
        self.rates
            .read()
            .await
            .get(zone)
            .cloned()
            .ok_or_else(|| FreightError::NotFound(format!("Zone '{}' not found", zone)))
    }

    /// All records, sorted by zone key
    pub async fn list_rates(&self) -> Vec<RateRecord> {
        let mut records: Vec<RateRecord> = self.rates.read().await.values().cloned().collect();
        records.sort_by(|a, b| a.zone.key().cmp(b.zone.key()));
        records
    }

    /// Replace a zone's entry in memory.
    ///
    /// An unknown zone is registered as a new custom zone at version 1. When
    /// `expected_version` is given it must match the stored version.
    pub async fn set_rate(
        &self,
        zone: Zone,
        entry: RateEntry,
        expected_version: Option<u64>,
        updated_by: Option<String>,
    ) -> Result<RateRecord, FreightError> {
        entry.validate()?;

        let mut rates = self.rates.write().await;
        let current_version = rates.get(&zone).map(|r| r.version).unwrap_or(0);

        if let Some(expected) = expected_version {
            if expected != current_version {
                return Err(FreightError::Conflict(format!(
                    "Zone '{}' is at version {}, expected {}",
                    zone, current_version, expected
                )));
            }
        }

        let record = RateRecord {
            zone: zone.clone(),
            entry,
            version: current_version + 1,
            updated_at: Utc::now(),
            updated_by,
        };
        rates.insert(zone, record.clone());

        Ok(record)
    }

    /// Admin write: update in memory, then push to the settings sheet.
    ///
    /// The push is best-effort; a failure is logged and reported through
    /// `persisted` without undoing the in-memory write.
    pub async fn update_rate(
        &self,
        zone: Zone,
        entry: RateEntry,
        expected_version: Option<u64>,
        updated_by: &str,
    ) -> Result<RateUpdate, FreightError> {
        let record = self
            .set_rate(zone, entry, expected_version, Some(updated_by.to_string()))
            .await?;

        tracing::info!(
            "Freight rate for zone '{}' updated to version {} by {}",
            record.zone,
            record.version,
            updated_by
        );

        let persisted = match &self.sheets {
            Some(sheets) => match sheets.save_freight_settings(&payload_for(&record)).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::error!(
                        "Failed to persist freight rate for zone '{}': {}",
                        record.zone,
                        e
                    );
                    false
                }
            },
            None => false,
        };

        Ok(RateUpdate { record, persisted })
    }

    /// Refresh the table from the settings sheet.
    ///
    /// Remote values override the stored ones field by field. Entries with an
    /// unparseable key or invalid values are skipped. If the sheet cannot be
    /// reached the live table is left as it is.
    pub async fn load_from_remote(&self) -> RateSource {
        let Some(sheets) = &self.sheets else {
            tracing::info!("Settings API not configured, using local freight rates");
            return RateSource::Local;
        };

        match sheets.fetch_freight_settings().await {
            Ok(settings) => RateSource::Remote(self.apply_remote(settings).await),
            Err(e) => {
                tracing::warn!("Failed to load freight rates, keeping current table: {}", e);
                RateSource::Local
            }
        }
    }

    async fn apply_remote(&self, settings: HashMap<String, RemoteRateSettings>) -> usize {
        let mut rates = self.rates.write().await;
        let now = Utc::now();
        let mut applied = 0;

        for (key, remote) in settings {
            let zone = match Zone::parse(&key) {
                Ok(zone) => zone,
                Err(e) => {
                    tracing::warn!("Ignoring remote freight settings: {}", e);
                    continue;
                }
            };

            let (entry, version) = match rates.get(&zone) {
                Some(record) => (record.entry.clone(), record.version),
                None => (RateEntry::default_for(&zone), 0),
            };
            let merged = merge_remote(entry, remote);

            if let Err(e) = merged.validate() {
                tracing::warn!("Ignoring remote freight settings for '{}': {}", zone, e);
                continue;
            }

            rates.insert(
                zone.clone(),
                RateRecord {
                    zone,
                    entry: merged,
                    version: version + 1,
                    updated_at: now,
                    updated_by: Some(REMOTE_UPDATER.to_string()),
                },
            );
            applied += 1;
        }

        tracing::info!("Loaded freight rates for {} zone(s) from settings API", applied);
        applied
    }

    pub async fn export(&self) -> RateExport {
        RateExport {
            shipping_rates: self.list_rates().await,
            timestamp: Utc::now(),
        }
    }
}

fn merge_remote(mut entry: RateEntry, remote: RemoteRateSettings) -> RateEntry {
    if let Some(v) = remote.base_rate {
        entry.base_rate = v;
    }
    if let Some(v) = remote.per_kg {
        entry.per_kg = v;
    }
    if let Some(v) = remote.express_multiplier {
        entry.express_multiplier = v;
    }
    if let Some(v) = remote.priority_multiplier {
        entry.priority_multiplier = v;
    }
    if let Some(times) = remote.delivery_time {
        if let Some(label) = times.standard {
            entry.delivery_time.standard = label;
        }
        if let Some(label) = times.express {
            entry.delivery_time.express = label;
        }
        if let Some(label) = times.priority {
            entry.delivery_time.priority = label;
        }
    }
    entry
}

fn payload_for(record: &RateRecord) -> FreightSettingsPayload {
    let entry = &record.entry;
    FreightSettingsPayload {
        zone_type: record.zone.key().to_string(),
        base_rate: entry.base_rate,
        rate_per_kg: entry.per_kg,
        express_multiplier: entry.express_multiplier,
        priority_multiplier: entry.priority_multiplier,
        delivery_time: RemoteDeliveryTimesPayload {
            standard: entry.delivery_time.standard.clone(),
            express: entry.delivery_time.express.clone(),
            priority: entry.delivery_time.priority.clone(),
        },
        updated_at: record.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::dec;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sheets_for(server: &MockServer) -> Option<Arc<SheetsClient>> {
        Some(Arc::new(
            SheetsClient::new(&server.uri(), Duration::from_secs(2)).unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_starts_with_default_table() {
        let service = RateTableService::new(None);

        let records = service.list_rates().await;
        let keys: Vec<&str> = records.iter().map(|r| r.zone.key()).collect();
        assert_eq!(keys, vec!["asean", "international", "local"]);
        assert!(records.iter().all(|r| r.version == 1));

        let local = service.get_rate(&Zone::Local).await.unwrap();
        assert_eq!(local.base_rate, dec("5"));
    }

    #[tokio::test]
    async fn test_get_unknown_zone_is_not_found() {
        let service = RateTableService::new(None);
        let result = service
            .get_rate(&Zone::Custom("east_malaysia".to_string()))
            .await;
        assert!(matches!(result, Err(FreightError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_set_rate_bumps_version_and_rejects_stale_write() {
        let service = RateTableService::new(None);
        let mut entry = RateEntry::default_for(&Zone::Local);
        entry.base_rate = dec("6");

        let record = service
            .set_rate(Zone::Local, entry.clone(), Some(1), Some("ops".to_string()))
            .await
            .unwrap();
        assert_eq!(record.version, 2);
        assert_eq!(record.updated_by.as_deref(), Some("ops"));

        let stale = service
            .set_rate(Zone::Local, entry.clone(), Some(1), None)
            .await;
        assert!(matches!(stale, Err(FreightError::Conflict(_))));

        // Unconditional write still goes through
        let record = service.set_rate(Zone::Local, entry, None, None).await.unwrap();
        assert_eq!(record.version, 3);
    }

    #[tokio::test]
    async fn test_set_rate_validates_entry() {
        let service = RateTableService::new(None);
        let mut entry = RateEntry::default_for(&Zone::Asean);
        entry.priority_multiplier = dec("0.5");

        let result = service.set_rate(Zone::Asean, entry, None, None).await;

        assert!(matches!(result, Err(FreightError::Validation(_))));
        assert_eq!(service.get_record(&Zone::Asean).await.unwrap().version, 1);
    }

    #[tokio::test]
    async fn test_set_rate_registers_custom_zone() {
        let service = RateTableService::new(None);
        let zone = Zone::Custom("east_malaysia".to_string());
        let mut entry = RateEntry::default_for(&zone);
        entry.base_rate = dec("12");

        let record = service
            .set_rate(zone.clone(), entry, Some(0), None)
            .await
            .unwrap();

        assert_eq!(record.version, 1);
        assert_eq!(service.list_rates().await.len(), 4);
        assert_eq!(service.get_rate(&zone).await.unwrap().base_rate, dec("12"));
    }

    #[tokio::test]
    async fn test_snapshot_is_not_affected_by_later_write() {
        let service = RateTableService::new(None);
        let snapshot = service.get_rate(&Zone::Local).await.unwrap();

        let mut entry = snapshot.clone();
        entry.per_kg = dec("9");
        service.set_rate(Zone::Local, entry, None, None).await.unwrap();

        assert_eq!(snapshot.per_kg, dec("2"));
    }

    #[tokio::test]
    async fn test_load_from_remote_overrides_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/getSettings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "local": { "baseRate": 7, "ratePerKg": 3 },
                "intl": { "baseRate": 60 },
                "bad key!": { "baseRate": 1 },
                "asean": { "expressMultiplier": 0.5 }
            })))
            .mount(&server)
            .await;

        let service = RateTableService::new(sheets_for(&server));
        let source = service.load_from_remote().await;

        assert_eq!(source, RateSource::Remote(2));

        let local = service.get_record(&Zone::Local).await.unwrap();
        assert_eq!(local.entry.base_rate, dec("7"));
        assert_eq!(local.entry.per_kg, dec("3"));
        assert_eq!(local.entry.express_multiplier, dec("1.5"));
        assert_eq!(local.version, 2);

        let intl = service.get_rate(&Zone::International).await.unwrap();
        assert_eq!(intl.base_rate, dec("60"));
        assert_eq!(intl.per_kg, dec("10"));

        // Invalid multiplier left the default in place
        let asean = service.get_rate(&Zone::Asean).await.unwrap();
        assert_eq!(asean.express_multiplier, dec("1.8"));
    }

    #[tokio::test]
    async fn test_unreachable_remote_keeps_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let service = RateTableService::new(sheets_for(&server));

        assert_eq!(service.load_from_remote().await, RateSource::Local);
        let local = service.get_record(&Zone::Local).await.unwrap();
        assert_eq!(local.entry, RateEntry::default_for(&Zone::Local));
        assert_eq!(local.version, 1);
    }

    #[tokio::test]
    async fn test_update_rate_reports_persistence() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/saveFreightSettings"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": true })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let service = RateTableService::new(sheets_for(&server));
        let entry = RateEntry::default_for(&Zone::Local);

        let update = service
            .update_rate(Zone::Local, entry, None, "Test Admin")
            .await
            .unwrap();

        assert!(update.persisted);
        assert_eq!(update.record.version, 2);
    }

    #[tokio::test]
    async fn test_update_rate_without_remote_is_not_persisted() {
        let service = RateTableService::new(None);
        let entry = RateEntry::default_for(&Zone::Asean);

        let update = service
            .update_rate(Zone::Asean, entry, Some(1), "Test Admin")
            .await
            .unwrap();

        assert!(!update.persisted);
        assert_eq!(update.record.updated_by.as_deref(), Some("Test Admin"));
    }

    #[tokio::test]
    async fn test_export_contains_every_zone() {
        let service = RateTableService::new(None);
        let export = service.export().await;
        assert_eq!(export.shipping_rates.len(), 3);
    }
}
