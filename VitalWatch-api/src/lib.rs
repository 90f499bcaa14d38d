// VitalWatch-api lib.rs
//
// HTTP surface for recording vitals and generating health reports.

// Public modules
pub mod api;
pub mod entities;
pub mod openapi;
