pub mod attendance;
pub mod attendance_links;
pub mod classes;
pub mod system;

pub use attendance::AttendanceService;
pub use attendance_links::AttendanceLinkService;
pub use classes::ClassService;
pub use system::SystemService;
