pub mod course;
pub mod position;
