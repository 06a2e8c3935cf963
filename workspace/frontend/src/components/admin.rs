mod view;

pub use view::AdminDashboard;
