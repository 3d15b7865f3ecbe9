use bookclub_domain::{
    Book, Group, LocationType, Meeting, MeetingLocation, MeetingRequirement, User,
};
use bookclub_infra::{BookclubContext, ISys};
use std::sync::Arc;

/// Sun Feb 21 2021 00:00:00 GMT+0100
pub const NOW: i64 = 1613862000000;
pub const DAY: i64 = 1000 * 60 * 60 * 24;

pub struct StaticTimeSys {}
impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        NOW
    }
}

pub struct TestContext {
    pub ctx: BookclubContext,
    pub group: Group,
    pub admin: User,
    pub member: User,
    pub outsider: User,
    pub book: Book,
}

pub async fn setup() -> TestContext {
    let mut ctx = BookclubContext::create_inmemory();
    ctx.sys = Arc::new(StaticTimeSys {});

    let group = Group::new("Sci-fi readers", 0);
    ctx.repos.groups.insert(&group).await.unwrap();

    let admin = User::new("admin", 0);
    let member = User::new("member", 0);
    let outsider = User::new("outsider", 0);
    for user in [&admin, &member, &outsider] {
        ctx.repos.users.insert(user).await.unwrap();
    }
    for user in [&admin, &member] {
        ctx.repos
            .groups
            .add_member(&group.id, &user.id, 0)
            .await
            .unwrap();
    }
    ctx.repos
        .groups
        .add_admin(&group.id, &admin.id, 0)
        .await
        .unwrap();

    let book = Book::new("Dune", "Frank Herbert", 0);
    ctx.repos.books.insert(&book).await.unwrap();

    TestContext {
        ctx,
        group,
        admin,
        member,
        outsider,
        book,
    }
}

/// Stores a `Meeting` in the group, with a book review requirement when `book` is given
pub async fn insert_meeting(
    ctx: &TestContext,
    start_ts: i64,
    max_participants: Option<i64>,
    book: Option<&Book>,
) -> Meeting {
    let meeting = Meeting {
        id: Default::default(),
        group_id: ctx.group.id.clone(),
        title: "Monthly meetup".into(),
        description: None,
        start_ts,
        end_ts: start_ts + DAY,
        location: MeetingLocation::new(
            LocationType::Physical,
            Some("Library".into()),
            None,
            None,
        ),
        max_participants,
        created_by: ctx.admin.id.clone(),
        created: 0,
        updated: 0,
    };
    let requirements = book
        .map(|book| {
            vec![MeetingRequirement::book_review(
                meeting.id.clone(),
                book,
                ctx.group.id.clone(),
            )]
        })
        .unwrap_or_default();
    ctx.ctx
        .repos
        .meetings
        .insert(&meeting, &requirements)
        .await
        .unwrap();
    meeting
}
