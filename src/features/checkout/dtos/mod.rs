mod checkout_dto;

pub use checkout_dto::{
    CheckoutRequestDto, CheckoutResponseDto, PaymentReceiptDto, ShippingAddressDto,
};
