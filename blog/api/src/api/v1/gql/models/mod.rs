pub mod date;
pub mod post;
pub mod ulid;
pub mod user;
