pub mod car_service;
mod car_service_test;

pub use car_service::CarService;
