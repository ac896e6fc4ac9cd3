pub mod availability_editor;
pub mod booking_flow;
pub mod booking_form;
pub mod calendar_grid;
pub mod time_slots;
