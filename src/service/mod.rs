pub mod account;

pub use account::{Account, ContactPointUsage, Gender, ProfileEdit, normalize_phone_number};
