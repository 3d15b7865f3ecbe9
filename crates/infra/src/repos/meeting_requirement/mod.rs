mod inmemory;
mod postgres;

use bookclub_domain::{MeetingRequirement, ID};
pub use inmemory::InMemoryMeetingRequirementRepo;
pub use postgres::PostgresMeetingRequirementRepo;

/// Requirements are written together with their `Meeting`, see `IMeetingRepo::insert`
#[async_trait::async_trait]
pub trait IMeetingRequirementRepo: Send + Sync {
    /// Ordered by `display_order`
    async fn find_by_meeting(&self, meeting_id: &ID) -> anyhow::Result<Vec<MeetingRequirement>>;
}
