pub mod active_session;
pub mod attendance_record;
pub mod authorized_pickup;
pub mod class_session;
pub mod student;
pub mod user;
