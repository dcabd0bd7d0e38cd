//! Data access, one repository per table.

mod booking_repo;
mod profile_repo;
mod room_repo;
mod training_repo;

pub use booking_repo::BookingRepo;
pub use profile_repo::ProfileRepo;
pub use room_repo::RoomRepo;
pub use training_repo::TrainingRepo;
