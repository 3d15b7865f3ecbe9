mod inmemory;
mod postgres;

use bookclub_domain::{MeetingParticipant, ID};
pub use inmemory::InMemoryMeetingParticipantRepo;
pub use postgres::PostgresMeetingParticipantRepo;

/// Outcome of `IMeetingParticipantRepo::insert_within_capacity`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantInsertResult {
    Inserted,
    /// A row for the meeting and user already existed, nothing was written
    Duplicate,
    /// The meeting had no free seats left at write time, nothing was written
    CapacityReached,
}

#[async_trait::async_trait]
pub trait IMeetingParticipantRepo: Send + Sync {
    /// Finds the participant row for the meeting and user, whatever its status
    async fn find(&self, meeting_id: &ID, user_id: &ID)
        -> anyhow::Result<Option<MeetingParticipant>>;
    /// Participants with the `registered` status, earliest registration first
    async fn find_registered(&self, meeting_id: &ID) -> anyhow::Result<Vec<MeetingParticipant>>;
    async fn count_registered(&self, meeting_id: &ID) -> anyhow::Result<i64>;
    /// Counts the registered participants and inserts the given participant in
    /// one atomic step, so that concurrent registrations can never exceed
    /// `max_participants`.
    async fn insert_within_capacity(
        &self,
        participant: &MeetingParticipant,
        max_participants: Option<i64>,
    ) -> anyhow::Result<ParticipantInsertResult>;
}

#[cfg(test)]
mod tests {
    use super::ParticipantInsertResult;
    use crate::repos::shared::test_utils::{create_contexts, insert_meeting, insert_user};
    use bookclub_domain::{MeetingParticipant, ParticipantStatus};
    use std::sync::Arc;

    #[tokio::test]
    async fn insert_and_find() {
        for ctx in create_contexts().await {
            let participants = &ctx.repos.meeting_participants;
            let meeting = insert_meeting(&ctx, None).await;
            let user = insert_user(&ctx).await;
            let participant = MeetingParticipant::registered(meeting.id.clone(), user.id, 10);

            let res = participants
                .insert_within_capacity(&participant, None)
                .await
                .unwrap();
            assert_eq!(res, ParticipantInsertResult::Inserted);

            let found = participants
                .find(&meeting.id, &participant.user_id)
                .await
                .unwrap();
            assert_eq!(found, Some(participant.clone()));
            assert_eq!(
                participants.find_registered(&meeting.id).await.unwrap(),
                vec![participant.clone()]
            );

            let res = participants
                .insert_within_capacity(&participant, None)
                .await
                .unwrap();
            assert_eq!(res, ParticipantInsertResult::Duplicate);
            assert_eq!(participants.count_registered(&meeting.id).await.unwrap(), 1);
        }
    }

    #[tokio::test]
    async fn duplicate_wins_over_capacity() {
        for ctx in create_contexts().await {
            let participants = &ctx.repos.meeting_participants;
            let meeting = insert_meeting(&ctx, Some(1)).await;
            let user = insert_user(&ctx).await;
            let participant = MeetingParticipant::registered(meeting.id.clone(), user.id, 10);

            let res = participants
                .insert_within_capacity(&participant, Some(1))
                .await
                .unwrap();
            assert_eq!(res, ParticipantInsertResult::Inserted);
            let res = participants
                .insert_within_capacity(&participant, Some(1))
                .await
                .unwrap();
            assert_eq!(res, ParticipantInsertResult::Duplicate);
        }
    }

    #[tokio::test]
    async fn only_registered_rows_take_seats() {
        for ctx in create_contexts().await {
            let participants = &ctx.repos.meeting_participants;
            let meeting = insert_meeting(&ctx, Some(1)).await;

            let mut cancelled =
                MeetingParticipant::registered(meeting.id.clone(), insert_user(&ctx).await.id, 0);
            cancelled.status = ParticipantStatus::Other("cancelled".into());
            participants
                .insert_within_capacity(&cancelled, None)
                .await
                .unwrap();
            assert_eq!(participants.count_registered(&meeting.id).await.unwrap(), 0);

            let participant =
                MeetingParticipant::registered(meeting.id.clone(), insert_user(&ctx).await.id, 1);
            let res = participants
                .insert_within_capacity(&participant, Some(1))
                .await
                .unwrap();
            assert_eq!(res, ParticipantInsertResult::Inserted);

            let late =
                MeetingParticipant::registered(meeting.id.clone(), insert_user(&ctx).await.id, 2);
            let res = participants
                .insert_within_capacity(&late, Some(1))
                .await
                .unwrap();
            assert_eq!(res, ParticipantInsertResult::CapacityReached);
            assert!(participants
                .find(&meeting.id, &late.user_id)
                .await
                .unwrap()
                .is_none());
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_never_exceed_capacity() {
        for ctx in create_contexts().await {
            let capacity = 3;
            let meeting = insert_meeting(&ctx, Some(capacity)).await;

            let mut handles = Vec::new();
            for i in 0..10 {
                let user = insert_user(&ctx).await;
                let participants = Arc::clone(&ctx.repos.meeting_participants);
                let participant = MeetingParticipant::registered(meeting.id.clone(), user.id, i);
                handles.push(tokio::spawn(async move {
                    participants
                        .insert_within_capacity(&participant, Some(capacity))
                        .await
                        .unwrap()
                }));
            }

            let mut inserted = 0;
            for handle in handles {
                if handle.await.unwrap() == ParticipantInsertResult::Inserted {
                    inserted += 1;
                }
            }
            assert_eq!(inserted, capacity);
            assert_eq!(
                ctx.repos
                    .meeting_participants
                    .count_registered(&meeting.id)
                    .await
                    .unwrap(),
                capacity
            );
        }
    }
}
