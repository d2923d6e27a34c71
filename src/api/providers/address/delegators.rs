pub mod count;
pub mod root;
