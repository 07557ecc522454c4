//! Business logic layer
//!
//! Services orchestrate operations by coordinating repositories and applying
//! business rules; the pure core (normalization, ranking, hierarchy, state
//! machine) lives alongside them.

pub mod directory;
pub mod hierarchy;
pub mod moderation;
pub mod normalize;
pub mod ranking;
pub mod texting;

pub use directory::DirectoryService;
pub use moderation::ModerationService;
pub use texting::TextingService;
