//! Response view models.

mod errors;
mod monitors;
mod startups;
mod users;

pub use errors::ErrorResponse;
pub use monitors::MonitorStatus;
pub use startups::{AuthorSummary, StartupCard, StartupDetail, StartupList, StartupViews};
pub use users::UserProfile;
