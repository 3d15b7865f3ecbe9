use super::setup::TestApp;
use bookclub_domain::{AuthToken, Book, Group, Review, User};
use bookclub_sdk::BookclubSDK;

pub struct TestUser {
    pub user: User,
    pub sdk: BookclubSDK,
}

/// Stores a `User` with a session token and returns an SDK authenticated as that user
pub async fn create_user(app: &TestApp, username: &str) -> TestUser {
    let user = User::new(username, 0);
    app.ctx.repos.users.insert(&user).await.unwrap();
    let token = format!("token-{}", user.id);
    app.ctx
        .repos
        .users
        .insert_auth_token(&AuthToken {
            token: token.clone(),
            user_id: user.id.clone(),
            created: 0,
            expires_at: None,
        })
        .await
        .unwrap();

    TestUser {
        sdk: app.sdk(&token),
        user,
    }
}

pub async fn create_group(app: &TestApp, admin: &User, members: &[&User]) -> Group {
    let group = Group::new("Sci-fi readers", 0);
    app.ctx.repos.groups.insert(&group).await.unwrap();
    app.ctx
        .repos
        .groups
        .add_admin(&group.id, &admin.id, 0)
        .await
        .unwrap();
    for user in std::iter::once(admin).chain(members.iter().copied()) {
        app.ctx
            .repos
            .groups
            .add_member(&group.id, &user.id, 0)
            .await
            .unwrap();
    }
    group
}

pub async fn create_book(app: &TestApp, title: &str) -> Book {
    let book = Book::new(title, "Frank Herbert", 0);
    app.ctx.repos.books.insert(&book).await.unwrap();
    book
}

pub async fn write_review(app: &TestApp, user: &User, book: &Book, group: &Group) {
    let review = Review::new(book.id.clone(), user.id.clone(), Some(group.id.clone()), 0);
    app.ctx.repos.reviews.insert(&review).await.unwrap();
}
