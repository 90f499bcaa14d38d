// Public entities for the VitalWatch API
// This module contains data structures that are shared across the application boundary

// Common entities for error handling
pub mod common;

// Readings
pub mod reading;

// Reports
pub mod report;
