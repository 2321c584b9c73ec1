pub mod booking;
pub mod consistency;
pub mod in_memory;
pub mod reception;
pub mod repository;
pub mod slot_finder;
pub mod supabase_store;
pub mod time_window;

pub use booking::VisitBookingService;
pub use consistency::SchedulingLocks;
pub use in_memory::{ClinicSeed, InMemoryClinicStore, SeedError};
pub use reception::Reception;
pub use repository::ClinicRepository;
pub use slot_finder::{top_hours_between, SlotFinder};
pub use supabase_store::SupabaseClinicStore;
pub use time_window::TimeWindow;
