pub mod meeting;

pub use meeting::{AttendeeInfo, MeetingCredentials, MeetingInfo};
