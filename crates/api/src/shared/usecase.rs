use super::auth::{AccessGuard, GroupAccess};
use crate::error::BookclubError;
use bookclub_infra::BookclubContext;
use std::fmt::Debug;
use tracing::error;

#[async_trait::async_trait(?Send)]
pub trait UseCase: Debug {
    type Response;
    type Error;

    const NAME: &'static str;

    async fn execute(&mut self, ctx: &BookclubContext) -> Result<Self::Response, Self::Error>;
}

/// Restrict which role in a `Group` the `User` needs to have
/// to be able to execute the `UseCase`
pub trait GroupAccessBoundary: UseCase {
    fn group_access(&self) -> GroupAccess;
}

#[derive(Debug)]
pub enum UseCaseErrorContainer<T: Debug> {
    Forbidden(String),
    StorageError,
    UseCase(T),
}

impl<T> From<UseCaseErrorContainer<T>> for BookclubError
where
    T: Debug + Into<BookclubError>,
{
    fn from(e: UseCaseErrorContainer<T>) -> Self {
        match e {
            UseCaseErrorContainer::Forbidden(e) => Self::Forbidden(e),
            UseCaseErrorContainer::StorageError => Self::InternalError,
            UseCaseErrorContainer::UseCase(e) => e.into(),
        }
    }
}

/// Checks the `GroupAccess` of the `UseCase` before executing it, so that
/// a `User` without access never gets further than this
#[tracing::instrument(name = "Executing usecase with access guard", skip(usecase, ctx))]
pub async fn execute_with_access_guard<U>(
    usecase: U,
    ctx: &BookclubContext,
) -> Result<U::Response, UseCaseErrorContainer<U::Error>>
where
    U: GroupAccessBoundary,
    U::Error: Debug,
{
    let access = usecase.group_access();
    match AccessGuard::authorize(&access, ctx).await {
        Ok(true) => (),
        Ok(false) => {
            return Err(UseCaseErrorContainer::Forbidden(format!(
                "User: {} is not allowed to perform {} in group: {}",
                access.user_id,
                U::NAME,
                access.group_id
            )))
        }
        Err(e) => {
            error!("Unable to check group access: {:?}. Error: {:?}", access, e);
            return Err(UseCaseErrorContainer::StorageError);
        }
    }

    execute(usecase, ctx)
        .await
        .map_err(UseCaseErrorContainer::UseCase)
}

#[tracing::instrument(name = "Executing usecase", skip(usecase, ctx))]
pub async fn execute<U>(mut usecase: U, ctx: &BookclubContext) -> Result<U::Response, U::Error>
where
    U: UseCase,
    U::Error: Debug,
{
    let res = usecase.execute(ctx).await;

    if let Err(e) = &res {
        error!("Use case {} error: {:?}", U::NAME, e);
    }

    res
}

/// Logs the repository error a `UseCase` is about to replace with its
/// `StorageError` variant
pub fn log_storage_error(e: &anyhow::Error) {
    error!("Storage error: {:?}", e);
}
