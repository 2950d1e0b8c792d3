pub mod attendance;

pub mod attendance_links;

pub mod classes;

pub mod system;

pub use attendance::configure_attendance_routes;
pub use attendance_links::configure_attendance_link_routes;
pub use classes::configure_classes_routes;
pub use system::configure_system_routes;
