mod shipment_dto;

pub use shipment_dto::{
    CreateShipmentDto, RecentShipmentsQuery, ShipmentCreatedDto, ShipmentResponseDto,
    TrackingEventDto, UpdateShipmentStatusDto,
};
