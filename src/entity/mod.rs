pub mod attendance_links;
pub mod attendance_records;
pub mod classes;
