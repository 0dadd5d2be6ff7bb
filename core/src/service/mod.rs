pub mod dto;
pub mod overtime;
pub mod schedule_service;
