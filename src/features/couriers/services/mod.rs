mod courier_service;

pub use courier_service::CourierService;
