pub mod availability;
pub mod booking;
pub mod calendar;
pub mod notification;
pub mod pet;
pub mod session;
pub mod slot;
