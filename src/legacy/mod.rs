// Legacy back ends wrapped by the adapters. Each owns its state behind one mutex.

pub mod attendance;
pub mod grading;
pub mod library;

pub use attendance::AttendanceSystem;
pub use grading::GradingSystem;
pub use library::LibrarySystem;
