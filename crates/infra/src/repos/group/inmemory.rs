use super::IGroupRepo;
use crate::repos::shared::inmemory_repo::*;
use bookclub_domain::{Group, ID};
use std::sync::Mutex;

#[derive(Clone)]
struct GroupRelation {
    group_id: ID,
    user_id: ID,
}

pub struct InMemoryGroupRepo {
    groups: Mutex<Vec<Group>>,
    members: Mutex<Vec<GroupRelation>>,
    admins: Mutex<Vec<GroupRelation>>,
}

impl InMemoryGroupRepo {
    pub fn new() -> Self {
        Self {
            groups: Mutex::new(Vec::new()),
            members: Mutex::new(Vec::new()),
            admins: Mutex::new(Vec::new()),
        }
    }
}

fn add_relation(group_id: &ID, user_id: &ID, relations: &Mutex<Vec<GroupRelation>>) {
    let mut relations = relations.lock().unwrap();
    if !relations
        .iter()
        .any(|r| r.group_id == *group_id && r.user_id == *user_id)
    {
        relations.push(GroupRelation {
            group_id: group_id.clone(),
            user_id: user_id.clone(),
        });
    }
}

fn has_relation(group_id: &ID, user_id: &ID, relations: &Mutex<Vec<GroupRelation>>) -> bool {
    count_by(relations, |r| r.group_id == *group_id && r.user_id == *user_id) > 0
}

#[async_trait::async_trait]
impl IGroupRepo for InMemoryGroupRepo {
    async fn insert(&self, group: &Group) -> anyhow::Result<()> {
        insert(group, &self.groups);
        Ok(())
    }

    async fn find(&self, group_id: &ID) -> anyhow::Result<Option<Group>> {
        Ok(find(group_id, &self.groups).filter(|g| !g.is_deleted()))
    }

    async fn delete(&self, group_id: &ID, timestamp: i64) -> anyhow::Result<()> {
        update_many(
            &self.groups,
            |g| g.id == *group_id && !g.is_deleted(),
            |g| g.deleted_at = Some(timestamp),
        );
        Ok(())
    }

    async fn add_member(&self, group_id: &ID, user_id: &ID, _timestamp: i64) -> anyhow::Result<()> {
        add_relation(group_id, user_id, &self.members);
        Ok(())
    }

    async fn add_admin(&self, group_id: &ID, user_id: &ID, _timestamp: i64) -> anyhow::Result<()> {
        add_relation(group_id, user_id, &self.admins);
        Ok(())
    }

    async fn is_member(&self, group_id: &ID, user_id: &ID) -> anyhow::Result<bool> {
        Ok(has_relation(group_id, user_id, &self.members))
    }

    async fn is_admin(&self, group_id: &ID, user_id: &ID) -> anyhow::Result<bool> {
        Ok(has_relation(group_id, user_id, &self.admins))
    }
}
