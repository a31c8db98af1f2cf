//! Repository trait definitions implemented by the infrastructure layer.

pub mod appointment;
pub mod file;
pub mod summary;

pub use appointment::AppointmentRepository;
pub use file::FileRepository;
pub use summary::SummaryRepository;
