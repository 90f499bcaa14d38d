// VitalWatch Data
// This crate handles data access and external service interactions

// Repository implementations for reading providers
pub mod repository;

// Storage and wire models
pub mod models;

// Generative analysis service client
pub mod analysis_client;
