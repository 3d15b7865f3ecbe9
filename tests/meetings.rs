mod helpers;

use bookclub_sdk::{
    APIErrorVariant, CreateMeetingInput, GetMeetingInput, LocationType, RegisterForMeetingInput,
    ID,
};
use chrono::{Duration, Utc};
use helpers::setup::spawn_app;
use helpers::utils::{create_book, create_group, create_user, write_review};

fn meeting_input(group_id: &ID) -> CreateMeetingInput {
    CreateMeetingInput {
        group_id: group_id.clone(),
        title: "Monthly meetup".into(),
        description: Some("We discuss the first half".into()),
        start_time: Utc::now() + Duration::days(1),
        end_time: Utc::now() + Duration::days(2),
        location_type: LocationType::Physical,
        location_name: Some("Library".into()),
        location_address: Some("Main street 1".into()),
        online_url: None,
        max_participants: None,
        requirement_book_id: None,
    }
}

#[actix_web::main]
#[test]
async fn test_create_meeting_validation() {
    let (app, _) = spawn_app().await;
    let admin = create_user(&app, "admin").await;
    let group = create_group(&app, &admin.user, &[]).await;

    let mut input = meeting_input(&group.id);
    input.end_time = input.start_time;
    let res = admin.sdk.meeting.create(input).await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::BadClientData);

    let mut input = meeting_input(&group.id);
    input.max_participants = Some(0);
    let res = admin.sdk.meeting.create(input).await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::BadClientData);

    let mut input = meeting_input(&group.id);
    input.requirement_book_id = Some(ID::default());
    let res = admin.sdk.meeting.create(input).await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::BadClientData);

    let meetings = admin
        .sdk
        .meeting
        .get_by_group(group.id.clone())
        .await
        .expect("To list meetings");
    assert!(meetings.meetings.is_empty());
}

#[actix_web::main]
#[test]
async fn test_meeting_registration_flow() {
    let (app, _) = spawn_app().await;
    let admin = create_user(&app, "admin").await;
    let member = create_user(&app, "member").await;
    let late_member = create_user(&app, "late_member").await;
    let outsider = create_user(&app, "outsider").await;
    let group = create_group(&app, &admin.user, &[&member.user, &late_member.user]).await;
    let book = create_book(&app, "Dune").await;

    let mut input = meeting_input(&group.id);
    input.max_participants = Some(1);
    input.requirement_book_id = Some(book.id.clone());
    let meeting = admin
        .sdk
        .meeting
        .create(input)
        .await
        .expect("To create meeting")
        .meeting;
    assert_eq!(meeting.group_id, group.id);
    assert_eq!(meeting.max_participants, Some(1));

    let register = || RegisterForMeetingInput {
        group_id: group.id.clone(),
        meeting_id: meeting.id.clone(),
    };

    // Outsiders are rejected before their requirements are looked at
    let res = outsider.sdk.meeting.register(register()).await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::Forbidden);

    let res = member.sdk.meeting.register(register()).await;
    let err = res.unwrap_err();
    assert_eq!(err.variant, APIErrorVariant::BadClientData);
    assert!(err.message.contains("Write a review for \"Dune\" first."));

    write_review(&app, &member.user, &book, &group).await;
    let participant = member
        .sdk
        .meeting
        .register(register())
        .await
        .expect("To register after writing the review")
        .participant;
    assert_eq!(participant.user_id, member.user.id);
    assert_eq!(participant.username, Some("member".to_string()));
    assert_eq!(participant.status, "registered");

    let res = member.sdk.meeting.register(register()).await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::Conflict);

    write_review(&app, &late_member.user, &book, &group).await;
    let res = late_member.sdk.meeting.register(register()).await;
    let err = res.unwrap_err();
    assert_eq!(err.variant, APIErrorVariant::BadClientData);
    assert!(err.message.contains("full"));

    let listing = admin
        .sdk
        .meeting
        .get_by_group(group.id.clone())
        .await
        .expect("To list meetings");
    assert!(listing.is_admin);
    let meetings = listing.meetings;
    assert_eq!(meetings.len(), 1);
    assert_eq!(meetings[0].participant_count, 1);
    assert_eq!(meetings[0].requirements.len(), 1);
    assert_eq!(meetings[0].requirements[0].requirement_type, "book_review");

    let listing = member
        .sdk
        .meeting
        .get_by_group(group.id.clone())
        .await
        .expect("To list meetings");
    assert!(!listing.is_admin);

    let detail = member
        .sdk
        .meeting
        .get(GetMeetingInput {
            group_id: group.id.clone(),
            meeting_id: meeting.id.clone(),
        })
        .await
        .expect("To get meeting");
    assert_eq!(detail.creator_name, Some("admin".to_string()));
    assert!(detail.is_registered);
    assert!(!detail.can_register);
    assert_eq!(detail.participants.len(), 1);
    assert_eq!(detail.requirement_status.len(), 1);
    assert!(detail.requirement_status[0].fulfilled);
    assert!(detail.requirement_status[0].fulfilled_at.is_some());
}

#[actix_web::main]
#[test]
async fn test_unknown_meeting() {
    let (app, _) = spawn_app().await;
    let admin = create_user(&app, "admin").await;
    let group = create_group(&app, &admin.user, &[]).await;

    let res = admin
        .sdk
        .meeting
        .get(GetMeetingInput {
            group_id: group.id.clone(),
            meeting_id: ID::default(),
        })
        .await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::NotFound);

    let res = admin
        .sdk
        .meeting
        .register(RegisterForMeetingInput {
            group_id: group.id.clone(),
            meeting_id: ID::default(),
        })
        .await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::NotFound);
}

#[actix_web::main]
#[test]
async fn test_deleted_group_hides_meetings() {
    let (app, _) = spawn_app().await;
    let admin = create_user(&app, "admin").await;
    let member = create_user(&app, "member").await;
    let group = create_group(&app, &admin.user, &[&member.user]).await;
    let meeting = admin
        .sdk
        .meeting
        .create(meeting_input(&group.id))
        .await
        .expect("To create meeting")
        .meeting;

    app.ctx.repos.groups.delete(&group.id, 0).await.unwrap();

    let res = member
        .sdk
        .meeting
        .register(RegisterForMeetingInput {
            group_id: group.id.clone(),
            meeting_id: meeting.id.clone(),
        })
        .await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::NotFound);

    let res = member
        .sdk
        .meeting
        .get(GetMeetingInput {
            group_id: group.id.clone(),
            meeting_id: meeting.id.clone(),
        })
        .await;
    assert_eq!(res.unwrap_err().variant, APIErrorVariant::NotFound);
}
