use crate::error::BookclubError;
use actix_web::HttpRequest;
use bookclub_domain::User;
use bookclub_infra::BookclubContext;
use tracing::error;

/// Name of the cookie holding the session token
pub const AUTH_TOKEN_COOKIE: &str = "auth_token";

/// Finds the `User` making the request. Rejects requests without a valid
/// session token.
pub async fn protect_route(
    req: &HttpRequest,
    ctx: &BookclubContext,
) -> Result<User, BookclubError> {
    let token = match req.cookie(AUTH_TOKEN_COOKIE) {
        Some(cookie) => cookie.value().to_string(),
        None => {
            return Err(BookclubError::Unauthenticated(format!(
                "Missing the `{}` cookie",
                AUTH_TOKEN_COOKIE
            )))
        }
    };

    let now = ctx.sys.get_timestamp_millis();
    match ctx.repos.users.find_by_auth_token(&token, now).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(BookclubError::Unauthenticated(
            "Unable to find user from credentials".into(),
        )),
        Err(e) => {
            error!("Unable to look up auth token. Error: {:?}", e);
            Err(BookclubError::InternalError)
        }
    }
}
