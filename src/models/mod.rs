// Re-export the canonical and external-facing types
pub use response::{Outcome, RecommendationResponse, RecommendedSong, TagRef};
pub use song::Song;
pub use user::User;

mod raw;
mod response;
mod song;
mod user;
