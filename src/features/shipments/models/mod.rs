mod shipment;

pub use shipment::{
    format_tracking_number, normalize_tracking_number, NewShipment, Shipment, ShipmentError,
    ShipmentStatus, TrackingEvent,
};
