//! Organizations and their member lists.

pub mod model;

pub use model::{Member, MemberOrganization, MemberRole, Organization};
