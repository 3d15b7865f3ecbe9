use super::IMeetingRepo;
use crate::repos::shared::inmemory_repo::*;
use bookclub_domain::{Meeting, MeetingRequirement, ID};
use std::sync::{Arc, Mutex};

pub struct InMemoryMeetingRepo {
    meetings: Mutex<Vec<Meeting>>,
    requirements: Arc<Mutex<Vec<MeetingRequirement>>>,
}

impl InMemoryMeetingRepo {
    pub fn new(requirements: Arc<Mutex<Vec<MeetingRequirement>>>) -> Self {
        Self {
            meetings: Mutex::new(Vec::new()),
            requirements,
        }
    }
}

#[async_trait::async_trait]
impl IMeetingRepo for InMemoryMeetingRepo {
    async fn insert(
        &self,
        meeting: &Meeting,
        requirements: &[MeetingRequirement],
    ) -> anyhow::Result<()> {
        // Both locks are held so that readers never see a partial write
        let mut meetings = self.meetings.lock().unwrap();
        let mut stored_requirements = self.requirements.lock().unwrap();
        meetings.push(meeting.clone());
        stored_requirements.extend(requirements.iter().cloned());
        Ok(())
    }

    async fn find_in_group(
        &self,
        meeting_id: &ID,
        group_id: &ID,
    ) -> anyhow::Result<Option<Meeting>> {
        Ok(find(meeting_id, &self.meetings).filter(|m| m.group_id == *group_id))
    }

    async fn find_by_group(&self, group_id: &ID) -> anyhow::Result<Vec<Meeting>> {
        let mut meetings = find_by(&self.meetings, |m| m.group_id == *group_id);
        meetings.sort_by(|a, b| b.start_ts.cmp(&a.start_ts));
        Ok(meetings)
    }
}
