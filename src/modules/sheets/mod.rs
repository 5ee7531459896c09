mod sheets_client;
mod types;

pub use sheets_client::SheetsClient;
pub use types::{
    FreightSettingsPayload, OrderRecord, OrderRecordLine, RemoteDeliveryTimesPayload,
    RemoteRateSettings, ShipmentRecord,
};
