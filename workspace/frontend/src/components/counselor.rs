mod badge;
mod bookings;
mod clients;
mod profile;
mod revenue;
mod schedule;
mod view;

pub use view::CounselorDashboard;
