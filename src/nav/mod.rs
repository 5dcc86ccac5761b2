pub mod controller;
pub mod fit;
