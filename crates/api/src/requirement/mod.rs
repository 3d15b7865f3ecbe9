mod book_review;

use bookclub_domain::{
    MeetingRequirement, RequirementFulfillment, UnmetRequirement, BOOK_REVIEW_REQUIREMENT, ID,
};
use bookclub_infra::BookclubContext;
pub use book_review::BookReviewEvaluator;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{info, warn};

/// Outcome of a `RequirementEvaluator`
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// The requirement is satisfied, with the evidence to store on the fulfillment
    Fulfilled(Value),
    Unmet,
}

/// Decides whether a `User` satisfies one kind of `MeetingRequirement`
#[async_trait::async_trait]
pub trait RequirementEvaluator: Send + Sync {
    async fn evaluate(
        &self,
        requirement: &MeetingRequirement,
        user_id: &ID,
        ctx: &BookclubContext,
    ) -> anyhow::Result<Evaluation>;
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequirementsCheck {
    pub unmet: Vec<UnmetRequirement>,
}

impl RequirementsCheck {
    pub fn satisfied(&self) -> bool {
        self.unmet.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.unmet.iter().map(|u| u.message()).collect()
    }

    pub fn find_unmet(&self, requirement_id: &ID) -> Option<&UnmetRequirement> {
        self.unmet.iter().find(|u| u.requirement_id == *requirement_id)
    }
}

/// Checks the requirements of a `Meeting` for a `User` by dispatching each
/// requirement to the evaluator registered for its type. Requirement types
/// without an evaluator are never met.
///
/// Evaluating is not read only: when an evaluator finds evidence the
/// fulfillment is stored, so the next evaluation is answered from storage.
pub struct RequirementEngine {
    evaluators: HashMap<String, Box<dyn RequirementEvaluator>>,
}

impl Default for RequirementEngine {
    fn default() -> Self {
        let mut engine = Self::empty();
        engine.register(BOOK_REVIEW_REQUIREMENT, Box::new(BookReviewEvaluator {}));
        engine
    }
}

impl RequirementEngine {
    pub fn empty() -> Self {
        Self {
            evaluators: HashMap::new(),
        }
    }

    pub fn register(&mut self, requirement_type: &str, evaluator: Box<dyn RequirementEvaluator>) {
        self.evaluators.insert(requirement_type.to_string(), evaluator);
    }

    pub async fn evaluate(
        &self,
        meeting_id: &ID,
        user_id: &ID,
        ctx: &BookclubContext,
    ) -> anyhow::Result<RequirementsCheck> {
        let requirements = ctx
            .repos
            .meeting_requirements
            .find_by_meeting(meeting_id)
            .await?;
        self.evaluate_requirements(&requirements, user_id, ctx).await
    }

    /// Same as `evaluate` for requirements that are already loaded
    pub async fn evaluate_requirements(
        &self,
        requirements: &[MeetingRequirement],
        user_id: &ID,
        ctx: &BookclubContext,
    ) -> anyhow::Result<RequirementsCheck> {
        let mut check = RequirementsCheck::default();

        for requirement in requirements {
            if ctx
                .repos
                .requirement_fulfillments
                .find(&requirement.id, user_id)
                .await?
                .is_some()
            {
                continue;
            }

            let evaluator = match self.evaluators.get(requirement.requirement_type()) {
                Some(evaluator) => evaluator,
                None => {
                    warn!(
                        "No evaluator registered for requirement type: {}",
                        requirement.requirement_type()
                    );
                    check.unmet.push(UnmetRequirement::new(requirement));
                    continue;
                }
            };

            match evaluator.evaluate(requirement, user_id, ctx).await? {
                Evaluation::Fulfilled(evidence) => {
                    let fulfillment = RequirementFulfillment::new(
                        requirement,
                        user_id.clone(),
                        ctx.sys.get_timestamp_millis(),
                        evidence,
                    );
                    if ctx
                        .repos
                        .requirement_fulfillments
                        .insert(&fulfillment)
                        .await?
                    {
                        info!(
                            "Requirement: {} fulfilled by user: {}",
                            requirement.id, user_id
                        );
                    }
                }
                Evaluation::Unmet => check.unmet.push(UnmetRequirement::new(requirement)),
            }
        }

        Ok(check)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use bookclub_domain::{
        Book, Group, LocationType, Meeting, MeetingLocation, RequirementData, Review, User,
    };
    use serde_json::json;

    struct TestContext {
        ctx: BookclubContext,
        user: User,
        group: Group,
        book: Book,
        meeting: Meeting,
    }

    async fn setup(
        requirements: impl FnOnce(&Meeting, &Book, &Group) -> Vec<MeetingRequirement>,
    ) -> TestContext {
        let ctx = BookclubContext::create_inmemory();
        let user = User::new("reader", 0);
        ctx.repos.users.insert(&user).await.unwrap();
        let group = Group::new("Readers", 0);
        ctx.repos.groups.insert(&group).await.unwrap();
        let book = Book::new("Dune", "Frank Herbert", 0);
        ctx.repos.books.insert(&book).await.unwrap();
        let meeting = Meeting {
            id: Default::default(),
            group_id: group.id.clone(),
            title: "Dune night".into(),
            description: None,
            start_ts: 1000,
            end_ts: 2000,
            location: MeetingLocation::new(LocationType::Online, None, None, None),
            max_participants: None,
            created_by: Default::default(),
            created: 0,
            updated: 0,
        };
        let requirements = requirements(&meeting, &book, &group);
        ctx.repos
            .meetings
            .insert(&meeting, &requirements)
            .await
            .unwrap();

        TestContext {
            ctx,
            user,
            group,
            book,
            meeting,
        }
    }

    fn book_review(meeting: &Meeting, book: &Book, group: &Group) -> Vec<MeetingRequirement> {
        vec![MeetingRequirement::book_review(
            meeting.id.clone(),
            book,
            group.id.clone(),
        )]
    }

    #[actix_web::main]
    #[test]
    async fn no_requirements_is_satisfied() {
        let TestContext {
            ctx, user, meeting, ..
        } = setup(|_, _, _| vec![]).await;

        let check = RequirementEngine::default()
            .evaluate(&meeting.id, &user.id, &ctx)
            .await
            .unwrap();
        assert!(check.satisfied());
    }

    #[actix_web::main]
    #[test]
    async fn missing_review_is_unmet() {
        let TestContext {
            ctx, user, meeting, ..
        } = setup(book_review).await;

        let check = RequirementEngine::default()
            .evaluate(&meeting.id, &user.id, &ctx)
            .await
            .unwrap();
        assert!(!check.satisfied());
        assert_eq!(check.messages(), vec!["Write a review for \"Dune\" first."]);
        assert!(ctx
            .repos
            .requirement_fulfillments
            .find_by_meeting_and_user(&meeting.id, &user.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn review_in_other_group_does_not_count() {
        let TestContext {
            ctx,
            user,
            book,
            meeting,
            ..
        } = setup(book_review).await;
        let review = Review::new(book.id.clone(), user.id.clone(), Some(ID::default()), 0);
        ctx.repos.reviews.insert(&review).await.unwrap();

        let check = RequirementEngine::default()
            .evaluate(&meeting.id, &user.id, &ctx)
            .await
            .unwrap();
        assert!(!check.satisfied());
    }

    #[actix_web::main]
    #[test]
    async fn review_fulfills_requirement_once() {
        let TestContext {
            ctx,
            user,
            group,
            book,
            meeting,
        } = setup(book_review).await;
        let review = Review::new(book.id.clone(), user.id.clone(), Some(group.id.clone()), 0);
        ctx.repos.reviews.insert(&review).await.unwrap();

        let engine = RequirementEngine::default();
        for _ in 0..2 {
            let check = engine.evaluate(&meeting.id, &user.id, &ctx).await.unwrap();
            assert!(check.satisfied());
        }

        let fulfillments = ctx
            .repos
            .requirement_fulfillments
            .find_by_meeting_and_user(&meeting.id, &user.id)
            .await
            .unwrap();
        assert_eq!(fulfillments.len(), 1);
        assert_eq!(
            fulfillments[0].data,
            json!({ "review_id": review.id.to_string() })
        );
    }

    #[actix_web::main]
    #[test]
    async fn unknown_requirement_type_fails_closed() {
        let TestContext {
            ctx, user, meeting, ..
        } = setup(|meeting, _, _| {
            vec![MeetingRequirement {
                id: Default::default(),
                meeting_id: meeting.id.clone(),
                data: RequirementData::from_raw("attendance".into(), json!({})),
                display_order: 0,
            }]
        })
        .await;

        let check = RequirementEngine::default()
            .evaluate(&meeting.id, &user.id, &ctx)
            .await
            .unwrap();
        assert!(!check.satisfied());
        assert_eq!(
            check.messages(),
            vec!["Requirement \"attendance\" is not met."]
        );
    }

    #[actix_web::main]
    #[test]
    async fn stored_fulfillment_is_trusted() {
        let TestContext {
            ctx, user, meeting, ..
        } = setup(|meeting, _, _| {
            vec![MeetingRequirement {
                id: Default::default(),
                meeting_id: meeting.id.clone(),
                data: RequirementData::from_raw("attendance".into(), json!({})),
                display_order: 0,
            }]
        })
        .await;
        let requirements = ctx
            .repos
            .meeting_requirements
            .find_by_meeting(&meeting.id)
            .await
            .unwrap();
        let fulfillment =
            RequirementFulfillment::new(&requirements[0], user.id.clone(), 0, json!({}));
        ctx.repos
            .requirement_fulfillments
            .insert(&fulfillment)
            .await
            .unwrap();

        let check = RequirementEngine::empty()
            .evaluate(&meeting.id, &user.id, &ctx)
            .await
            .unwrap();
        assert!(check.satisfied());
    }
}
