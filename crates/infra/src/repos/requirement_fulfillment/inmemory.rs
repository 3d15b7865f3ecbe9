use super::IRequirementFulfillmentRepo;
use crate::repos::shared::inmemory_repo::*;
use bookclub_domain::{RequirementFulfillment, ID};

pub struct InMemoryRequirementFulfillmentRepo {
    fulfillments: std::sync::Mutex<Vec<RequirementFulfillment>>,
}

impl InMemoryRequirementFulfillmentRepo {
    pub fn new() -> Self {
        Self {
            fulfillments: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IRequirementFulfillmentRepo for InMemoryRequirementFulfillmentRepo {
    async fn insert(&self, fulfillment: &RequirementFulfillment) -> anyhow::Result<bool> {
        let mut fulfillments = self.fulfillments.lock().unwrap();
        let exists = fulfillments.iter().any(|f| {
            f.meeting_id == fulfillment.meeting_id
                && f.user_id == fulfillment.user_id
                && f.requirement_id == fulfillment.requirement_id
        });
        if exists {
            return Ok(false);
        }
        fulfillments.push(fulfillment.clone());
        Ok(true)
    }

    async fn find(
        &self,
        requirement_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Option<RequirementFulfillment>> {
        Ok(find_first_by(&self.fulfillments, |f| {
            f.requirement_id == *requirement_id && f.user_id == *user_id
        }))
    }

    async fn find_by_meeting_and_user(
        &self,
        meeting_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Vec<RequirementFulfillment>> {
        Ok(find_by(&self.fulfillments, |f| {
            f.meeting_id == *meeting_id && f.user_id == *user_id
        }))
    }
}
