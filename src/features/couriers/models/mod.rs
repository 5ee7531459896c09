mod courier;

pub use courier::{
    default_couriers, Courier, CourierError, CourierProfile, CourierQuote, CourierRate,
    CourierStatus,
};
