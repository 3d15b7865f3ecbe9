mod book;
mod group;
mod meeting;
mod participant;
mod requirement;
mod review;
mod shared;
mod user;

pub use book::Book;
pub use group::Group;
pub use meeting::{LocationType, Meeting, MeetingLocation};
pub use participant::{MeetingParticipant, ParticipantStatus};
pub use requirement::{
    BookReviewRequirement, MeetingRequirement, RequirementData, RequirementFulfillment,
    UnmetRequirement, BOOK_REVIEW_REQUIREMENT,
};
pub use review::Review;
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use user::{AuthToken, User};
