use crate::{setup_context, BookclubContext};
use bookclub_domain::{Book, Group, LocationType, Meeting, MeetingLocation, User, ID};

/// Creates an inmemory context, and a postgres context as well when
/// `DATABASE_URL` points to a running database
pub async fn create_contexts() -> Vec<BookclubContext> {
    let mut contexts = vec![BookclubContext::create_inmemory()];
    if std::env::var("DATABASE_URL").is_ok() {
        contexts.push(
            setup_context()
                .await
                .expect("To connect to the postgres database"),
        );
    }
    contexts
}

// Rows are keyed by fresh ids so that tests sharing a database never collide

pub async fn insert_user(ctx: &BookclubContext) -> User {
    let user = User::new(format!("reader-{}", ID::default()), 0);
    ctx.repos.users.insert(&user).await.expect("To insert user");
    user
}

pub async fn insert_group(ctx: &BookclubContext) -> Group {
    let group = Group::new("Readers", 0);
    ctx.repos.groups.insert(&group).await.expect("To insert group");
    group
}

pub async fn insert_book(ctx: &BookclubContext) -> Book {
    let book = Book::new("Dune", "Frank Herbert", 0);
    ctx.repos.books.insert(&book).await.expect("To insert book");
    book
}

/// A `Meeting` in a new `Group`, created by a new `User`. Not stored.
pub async fn build_meeting(ctx: &BookclubContext, start_ts: i64) -> Meeting {
    let group = insert_group(ctx).await;
    build_meeting_in_group(ctx, &group.id, start_ts).await
}

pub async fn build_meeting_in_group(
    ctx: &BookclubContext,
    group_id: &ID,
    start_ts: i64,
) -> Meeting {
    let creator = insert_user(ctx).await;
    Meeting {
        id: Default::default(),
        group_id: group_id.clone(),
        title: "Monthly meetup".into(),
        description: None,
        start_ts,
        end_ts: start_ts + 1000 * 60 * 60,
        location: MeetingLocation::new(LocationType::Physical, Some("Library".into()), None, None),
        max_participants: Some(10),
        created_by: creator.id,
        created: 0,
        updated: 0,
    }
}

/// Stores a `Meeting` without requirements
pub async fn insert_meeting(ctx: &BookclubContext, max_participants: Option<i64>) -> Meeting {
    let mut meeting = build_meeting(ctx, 1000).await;
    meeting.max_participants = max_participants;
    ctx.repos
        .meetings
        .insert(&meeting, &[])
        .await
        .expect("To insert meeting");
    meeting
}
