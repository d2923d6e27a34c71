pub mod avatar;
pub mod delegators;
pub mod root;
