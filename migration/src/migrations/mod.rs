pub mod m202608200001_create_users;
pub mod m202608200002_create_students;
pub mod m202608200003_create_authorized_pickups;
pub mod m202608200004_create_class_sessions;
pub mod m202608200005_create_active_session;
pub mod m202608200006_create_attendance_records;
