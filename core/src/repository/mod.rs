pub mod codec;
pub mod file;
pub mod holidays;
pub mod traits;

// Re-export
pub use file::FileScheduleRepository;
pub use holidays::FileHolidayRepository;
pub use traits::ScheduleRepository;
