pub mod sessions_test;
pub mod students_test;
