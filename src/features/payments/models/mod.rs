mod payment;

pub use payment::{CardBrand, CardDetails, PaymentError, PaymentMethod, PaymentStatus, Receipt};
