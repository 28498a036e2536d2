pub mod babysitter;
pub mod request;
pub mod user;

pub use babysitter::{Babysitter, BabysitterInput};
pub use request::{Request, RequestAction, RequestStatus, TimeRange};
pub use user::User;
