pub mod classifier;
pub mod collector;
pub mod host;
pub mod presenter;
pub mod scan_manager;
