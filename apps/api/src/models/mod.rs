pub mod envelope;
pub mod resume;
