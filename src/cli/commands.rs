pub mod bookings;
pub mod clients;
pub mod profile;
pub mod revenue;
pub mod schedule;
