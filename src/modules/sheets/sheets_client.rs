use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;

use super::types::{ActionEnvelope, WriteAck};
use super::{FreightSettingsPayload, OrderRecord, RemoteRateSettings, ShipmentRecord};

/// HTTP client for the spreadsheet-backed settings and order API
pub struct SheetsClient {
    client: reqwest::Client,
    base_url: String,
}

impl SheetsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SheetsError> {
        let client = reqwest::Client::builder()
            .user_agent("GlobalMartCore/1.0 (freight-settings)")
            .timeout(timeout)
            .build()
            .map_err(|e| SheetsError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch per-zone freight settings (`GET /getSettings?type=freight`).
    ///
    /// Entries that are not objects with rate fields are skipped, so the sheet
    /// may carry unrelated keys next to the zones.
    pub async fn fetch_freight_settings(
        &self,
    ) -> Result<HashMap<String, RemoteRateSettings>, SheetsError> {
        let url = format!("{}/getSettings", self.base_url);
        tracing::debug!("Fetching freight settings from {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("type", "freight")])
            .send()
            .await
            .map_err(|e| SheetsError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::Status(status.as_u16(), body));
        }

        let raw: HashMap<String, serde_json::Value> = response
            .json()
            .await
            .map_err(|e| SheetsError::Parse(e.to_string()))?;

        let settings = raw
            .into_iter()
            .filter(|(_, value)| value.is_object())
            .filter_map(
                |(key, value)| match serde_json::from_value::<RemoteRateSettings>(value) {
                    Ok(parsed) => Some((key, parsed)),
                    Err(e) => {
                        tracing::warn!("Skipping malformed freight settings for '{}': {}", key, e);
                        None
                    }
                },
            )
            .collect();

        Ok(settings)
    }

    /// Persist one zone's rates (`POST /saveFreightSettings`)
    pub async fn save_freight_settings(
        &self,
        payload: &FreightSettingsPayload,
    ) -> Result<(), SheetsError> {
        let url = format!("{}/saveFreightSettings", self.base_url);
        self.post_and_ack(&url, payload).await
    }

    /// Append an order to the orders sheet (`POST /` with `action: "order"`)
    pub async fn record_order(&self, order: &OrderRecord) -> Result<(), SheetsError> {
        let envelope = ActionEnvelope {
            action: "order",
            data: order,
        };
        self.post_and_ack(&self.base_url, &envelope).await
    }

    /// Append a shipment to the shipments sheet (`POST /` with `action: "shipment"`)
    pub async fn record_shipment(&self, shipment: &ShipmentRecord) -> Result<(), SheetsError> {
        let envelope = ActionEnvelope {
            action: "shipment",
            data: shipment,
        };
        self.post_and_ack(&self.base_url, &envelope).await
    }

    async fn post_and_ack<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<(), SheetsError> {
        tracing::debug!("Posting to settings API {}", url);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| SheetsError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SheetsError::Status(status.as_u16(), body));
        }

        let ack: WriteAck = response
            .json()
            .await
            .map_err(|e| SheetsError::Parse(e.to_string()))?;

        if ack.success {
            Ok(())
        } else {
            Err(SheetsError::Rejected(
                ack.message.unwrap_or_else(|| "no reason given".to_string()),
            ))
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SheetsError {
    #[error("Settings API request failed: {0}")]
    Request(String),

    #[error("Settings API returned HTTP {0}: {1}")]
    Status(u16, String),

    #[error("Failed to parse settings API response: {0}")]
    Parse(String),

    #[error("Settings API rejected the write: {0}")]
    Rejected(String),
}
