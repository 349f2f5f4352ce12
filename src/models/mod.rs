pub mod presentation_types;
pub mod scan_types;
pub mod wire_types;
