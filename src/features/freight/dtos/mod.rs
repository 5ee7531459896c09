mod options_dto;
mod quote_dto;
mod rate_dto;

pub use options_dto::{ShippingOptionsRequestDto, ShippingOptionsResponseDto};
pub use quote_dto::{
    lenient_decimal, QuoteRequestDto, QuoteResponseDto, ShippingOptionDto, ZoneQuery,
    ZoneResponseDto,
};
pub use rate_dto::{
    DeliveryTimesDto, RateEntryDto, RateExportDto, RateReloadResponseDto, RateResponseDto,
    UpdateRateDto, UpdateRateResponseDto,
};
