mod order_totals;

pub use order_totals::compute_totals;
