use bookclub_domain::ID;
use bookclub_infra::BookclubContext;

/// Role a `User` can have in a `Group`. Admins are members as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRole {
    Member,
    Admin,
}

/// The role a `User` needs in a `Group`
#[derive(Debug, Clone)]
pub struct GroupAccess {
    pub user_id: ID,
    pub group_id: ID,
    pub role: GroupRole,
}

impl GroupAccess {
    pub fn member(user_id: ID, group_id: ID) -> Self {
        Self {
            user_id,
            group_id,
            role: GroupRole::Member,
        }
    }

    pub fn admin(user_id: ID, group_id: ID) -> Self {
        Self {
            user_id,
            group_id,
            role: GroupRole::Admin,
        }
    }
}

pub struct AccessGuard {}

impl AccessGuard {
    pub async fn check_membership(
        user_id: &ID,
        group_id: &ID,
        ctx: &BookclubContext,
    ) -> anyhow::Result<bool> {
        if ctx.repos.groups.is_member(group_id, user_id).await? {
            return Ok(true);
        }
        ctx.repos.groups.is_admin(group_id, user_id).await
    }

    pub async fn check_admin(
        user_id: &ID,
        group_id: &ID,
        ctx: &BookclubContext,
    ) -> anyhow::Result<bool> {
        ctx.repos.groups.is_admin(group_id, user_id).await
    }

    pub async fn authorize(access: &GroupAccess, ctx: &BookclubContext) -> anyhow::Result<bool> {
        match access.role {
            GroupRole::Member => {
                Self::check_membership(&access.user_id, &access.group_id, ctx).await
            }
            GroupRole::Admin => Self::check_admin(&access.user_id, &access.group_id, ctx).await,
        }
    }
}
