mod courier_dto;

pub use courier_dto::{
    CourierQuoteDto, CourierQuoteRequestDto, CourierQuotesResponseDto, CourierRateDto,
    CourierRateInputDto, CourierRequestDto, CourierResponseDto,
};
