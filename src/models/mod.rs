pub mod class_instance;
pub mod sync;
pub mod yoga_class;

pub use class_instance::ClassInstance;
pub use sync::{ScheduleRequest, SyncPayload, SyncStats};
pub use yoga_class::YogaClass;
