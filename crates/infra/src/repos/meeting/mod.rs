mod inmemory;
mod postgres;

use bookclub_domain::{Meeting, MeetingRequirement, ID};
pub use inmemory::InMemoryMeetingRepo;
pub use postgres::PostgresMeetingRepo;

#[async_trait::async_trait]
pub trait IMeetingRepo: Send + Sync {
    /// Stores the `Meeting` together with its requirements. Either everything
    /// is stored or nothing is.
    async fn insert(
        &self,
        meeting: &Meeting,
        requirements: &[MeetingRequirement],
    ) -> anyhow::Result<()>;
    /// Only returns the `Meeting` if it belongs to the given `Group`
    async fn find_in_group(&self, meeting_id: &ID, group_id: &ID)
        -> anyhow::Result<Option<Meeting>>;
    /// Latest starting `Meeting`s first
    async fn find_by_group(&self, group_id: &ID) -> anyhow::Result<Vec<Meeting>>;
}

#[cfg(test)]
mod tests {
    use crate::repos::shared::test_utils::{
        build_meeting, build_meeting_in_group, create_contexts, insert_book, insert_group,
    };
    use bookclub_domain::{MeetingRequirement, ID};

    #[tokio::test]
    async fn insert_with_requirements() {
        for ctx in create_contexts().await {
            let meeting = build_meeting(&ctx, 1000).await;
            let book = insert_book(&ctx).await;
            let requirement = MeetingRequirement::book_review(
                meeting.id.clone(),
                &book,
                meeting.group_id.clone(),
            );

            ctx.repos
                .meetings
                .insert(&meeting, &[requirement.clone()])
                .await
                .expect("To insert meeting");

            let found = ctx
                .repos
                .meetings
                .find_in_group(&meeting.id, &meeting.group_id)
                .await
                .unwrap();
            assert_eq!(found, Some(meeting.clone()));

            let requirements = ctx
                .repos
                .meeting_requirements
                .find_by_meeting(&meeting.id)
                .await
                .unwrap();
            assert_eq!(requirements, vec![requirement]);
        }
    }

    #[tokio::test]
    async fn meeting_is_scoped_to_group() {
        for ctx in create_contexts().await {
            let meeting = build_meeting(&ctx, 1000).await;
            ctx.repos.meetings.insert(&meeting, &[]).await.unwrap();

            assert!(ctx
                .repos
                .meetings
                .find_in_group(&meeting.id, &ID::default())
                .await
                .unwrap()
                .is_none());
        }
    }

    #[tokio::test]
    async fn find_by_group_orders_latest_first() {
        for ctx in create_contexts().await {
            let group = insert_group(&ctx).await;
            let early = build_meeting_in_group(&ctx, &group.id, 1000).await;
            let late = build_meeting_in_group(&ctx, &group.id, 5000).await;
            let other_group = build_meeting(&ctx, 3000).await;
            for m in [&early, &late, &other_group] {
                ctx.repos.meetings.insert(m, &[]).await.unwrap();
            }

            let meetings = ctx.repos.meetings.find_by_group(&group.id).await.unwrap();
            assert_eq!(meetings, vec![late, early]);
        }
    }
}
