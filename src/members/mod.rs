pub mod storage;
pub mod types;

pub use storage::{load_member, load_member_sources, load_members};
pub use types::{AddressRecord, DateOfBirth, MemberRecord};
pub(crate) use types::non_empty;
