// Utility functions
// JSON decoding of billing API responses

pub mod json;

pub use json::decode_json;
