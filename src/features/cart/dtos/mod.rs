mod cart_dto;

pub use cart_dto::{
    cart_from_items, CartItemDto, CartTotalsRequestDto, CartTotalsResponseDto, OrderTotalsDto,
    ShippingSelectionDto,
};
