use super::IMeetingRequirementRepo;
use crate::repos::shared::inmemory_repo::*;
use bookclub_domain::{MeetingRequirement, ID};
use std::sync::{Arc, Mutex};

pub struct InMemoryMeetingRequirementRepo {
    requirements: Arc<Mutex<Vec<MeetingRequirement>>>,
}

impl InMemoryMeetingRequirementRepo {
    pub fn new(requirements: Arc<Mutex<Vec<MeetingRequirement>>>) -> Self {
        Self { requirements }
    }
}

#[async_trait::async_trait]
impl IMeetingRequirementRepo for InMemoryMeetingRequirementRepo {
    async fn find_by_meeting(&self, meeting_id: &ID) -> anyhow::Result<Vec<MeetingRequirement>> {
        let mut requirements = find_by(&self.requirements, |r| r.meeting_id == *meeting_id);
        requirements.sort_by_key(|r| r.display_order);
        Ok(requirements)
    }
}
