pub mod availability_client;
pub mod booking_client;
pub mod client;
pub mod dtos;
pub mod pet_client;
pub mod status;
