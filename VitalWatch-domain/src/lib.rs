// VitalWatch Domain
// This crate contains the vitals analytics and report generation logic

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;

// Environment configuration
pub mod config;

// Testing utilities - only available in tests or with the mock feature
#[cfg(any(test, feature = "mock"))]
pub mod testing;
