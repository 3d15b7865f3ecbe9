mod meeting;
mod status;

pub mod dtos {
    pub use crate::meeting::dtos::*;
}

pub use crate::meeting::api::*;
pub use crate::status::api::*;
