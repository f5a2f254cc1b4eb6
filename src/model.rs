pub mod b2;
pub mod fs;
