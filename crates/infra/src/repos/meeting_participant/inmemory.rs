use super::{IMeetingParticipantRepo, ParticipantInsertResult};
use crate::repos::shared::inmemory_repo::*;
use bookclub_domain::{MeetingParticipant, ID};

pub struct InMemoryMeetingParticipantRepo {
    participants: std::sync::Mutex<Vec<MeetingParticipant>>,
}

impl InMemoryMeetingParticipantRepo {
    pub fn new() -> Self {
        Self {
            participants: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IMeetingParticipantRepo for InMemoryMeetingParticipantRepo {
    async fn find(
        &self,
        meeting_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Option<MeetingParticipant>> {
        Ok(find_first_by(&self.participants, |p| {
            p.meeting_id == *meeting_id && p.user_id == *user_id
        }))
    }

    async fn find_registered(&self, meeting_id: &ID) -> anyhow::Result<Vec<MeetingParticipant>> {
        let mut participants = find_by(&self.participants, |p| {
            p.meeting_id == *meeting_id && p.is_registered()
        });
        participants.sort_by_key(|p| p.registered_at);
        Ok(participants)
    }

    async fn count_registered(&self, meeting_id: &ID) -> anyhow::Result<i64> {
        let count = count_by(&self.participants, |p| {
            p.meeting_id == *meeting_id && p.is_registered()
        });
        Ok(count as i64)
    }

    async fn insert_within_capacity(
        &self,
        participant: &MeetingParticipant,
        max_participants: Option<i64>,
    ) -> anyhow::Result<ParticipantInsertResult> {
        // The guard is held across the check and the write
        let mut participants = self.participants.lock().unwrap();

        let exists = participants
            .iter()
            .any(|p| p.meeting_id == participant.meeting_id && p.user_id == participant.user_id);
        if exists {
            return Ok(ParticipantInsertResult::Duplicate);
        }

        if let Some(max) = max_participants {
            let registered = participants
                .iter()
                .filter(|p| p.meeting_id == participant.meeting_id && p.is_registered())
                .count() as i64;
            if registered >= max {
                return Ok(ParticipantInsertResult::CapacityReached);
            }
        }

        participants.push(participant.clone());
        Ok(ParticipantInsertResult::Inserted)
    }
}
