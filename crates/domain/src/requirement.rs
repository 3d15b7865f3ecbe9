use crate::{
    book::Book,
    shared::entity::{Entity, ID},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const BOOK_REVIEW_REQUIREMENT: &str = "book_review";

/// Payload of a `book_review` requirement. Book title and author are
/// copied in at creation so that evaluating the requirement never needs
/// to look up the `Book`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookReviewRequirement {
    pub book_id: ID,
    pub book_title: String,
    pub book_author: String,
    /// The `Group` the review has to be written in
    pub group_id: ID,
}

/// The shape of the data is decided by the requirement type.
#[derive(Debug, Clone, PartialEq)]
pub enum RequirementData {
    BookReview(BookReviewRequirement),
    /// Requirement types without known semantics are carried through as is
    Other {
        requirement_type: String,
        data: Value,
    },
}

impl RequirementData {
    /// Parses the stored `requirement_type` and `requirement_data` pair.
    /// A `book_review` payload that does not have the expected shape is kept
    /// as `Other` so that it can never be treated as fulfilled.
    pub fn from_raw(requirement_type: String, data: Value) -> Self {
        if requirement_type == BOOK_REVIEW_REQUIREMENT {
            if let Ok(book_review) = serde_json::from_value(data.clone()) {
                return Self::BookReview(book_review);
            }
        }
        Self::Other {
            requirement_type,
            data,
        }
    }

    pub fn requirement_type(&self) -> &str {
        match self {
            Self::BookReview(_) => BOOK_REVIEW_REQUIREMENT,
            Self::Other {
                requirement_type, ..
            } => requirement_type,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::BookReview(book_review) => {
                serde_json::to_value(book_review).unwrap_or(Value::Null)
            }
            Self::Other { data, .. } => data.clone(),
        }
    }
}

/// A precondition a `User` has to satisfy before registering for a `Meeting`
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingRequirement {
    pub id: ID,
    pub meeting_id: ID,
    pub data: RequirementData,
    pub display_order: i32,
}

impl MeetingRequirement {
    pub fn book_review(meeting_id: ID, book: &Book, group_id: ID) -> Self {
        Self {
            id: Default::default(),
            meeting_id,
            data: RequirementData::BookReview(BookReviewRequirement {
                book_id: book.id.clone(),
                book_title: book.title.clone(),
                book_author: book.author.clone(),
                group_id,
            }),
            display_order: 0,
        }
    }

    pub fn requirement_type(&self) -> &str {
        self.data.requirement_type()
    }
}

impl Entity for MeetingRequirement {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Proof that a `User` satisfied a `MeetingRequirement`. There is at most
/// one per meeting, user and requirement and it is never removed.
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementFulfillment {
    pub id: ID,
    pub meeting_id: ID,
    pub user_id: ID,
    pub requirement_id: ID,
    pub fulfilled_at: i64,
    /// Evidence for the fulfillment, e.g. `{"review_id": ".."}`
    pub data: Value,
}

impl RequirementFulfillment {
    pub fn new(
        requirement: &MeetingRequirement,
        user_id: ID,
        fulfilled_at: i64,
        data: Value,
    ) -> Self {
        Self {
            id: Default::default(),
            meeting_id: requirement.meeting_id.clone(),
            user_id,
            requirement_id: requirement.id.clone(),
            fulfilled_at,
            data,
        }
    }
}

impl Entity for RequirementFulfillment {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnmetRequirement {
    pub requirement_id: ID,
    pub data: RequirementData,
}

impl UnmetRequirement {
    pub fn new(requirement: &MeetingRequirement) -> Self {
        Self {
            requirement_id: requirement.id.clone(),
            data: requirement.data.clone(),
        }
    }

    /// Human readable description of what is missing
    pub fn message(&self) -> String {
        match &self.data {
            RequirementData::BookReview(book_review) => {
                format!("Write a review for \"{}\" first.", book_review.book_title)
            }
            RequirementData::Other {
                requirement_type, ..
            } => format!("Requirement \"{}\" is not met.", requirement_type),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_book_review_data() {
        let book_id = ID::default();
        let group_id = ID::default();
        let data = json!({
            "book_id": book_id.to_string(),
            "book_title": "Dune",
            "book_author": "Frank Herbert",
            "group_id": group_id.to_string(),
        });
        let parsed = RequirementData::from_raw(BOOK_REVIEW_REQUIREMENT.into(), data.clone());
        match &parsed {
            RequirementData::BookReview(r) => {
                assert_eq!(r.book_id, book_id);
                assert_eq!(r.group_id, group_id);
                assert_eq!(r.book_title, "Dune");
            }
            _ => panic!("Expected book review requirement"),
        }
        assert_eq!(parsed.requirement_type(), BOOK_REVIEW_REQUIREMENT);
        assert_eq!(parsed.to_value(), data);
    }

    #[test]
    fn malformed_book_review_data_is_not_trusted() {
        let parsed =
            RequirementData::from_raw(BOOK_REVIEW_REQUIREMENT.into(), json!({ "book_id": 3 }));
        assert!(matches!(parsed, RequirementData::Other { .. }));
        assert_eq!(parsed.requirement_type(), BOOK_REVIEW_REQUIREMENT);
    }

    #[test]
    fn unknown_types_pass_through() {
        let data = json!({ "pages": 100 });
        let parsed = RequirementData::from_raw("reading_progress".into(), data.clone());
        assert_eq!(parsed.requirement_type(), "reading_progress");
        assert_eq!(parsed.to_value(), data);
    }

    #[test]
    fn unmet_messages() {
        let book = Book::new("Dune", "Frank Herbert", 0);
        let requirement = MeetingRequirement::book_review(ID::default(), &book, ID::default());
        let unmet = UnmetRequirement::new(&requirement);
        assert_eq!(unmet.message(), "Write a review for \"Dune\" first.");

        let requirement = MeetingRequirement {
            id: Default::default(),
            meeting_id: Default::default(),
            data: RequirementData::from_raw("attendance".into(), Value::Null),
            display_order: 1,
        };
        let unmet = UnmetRequirement::new(&requirement);
        assert_eq!(unmet.message(), "Requirement \"attendance\" is not met.");
    }
}
