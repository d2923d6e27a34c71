pub mod address;
pub mod root;
