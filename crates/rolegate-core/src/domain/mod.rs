//! 도메인 모델.

mod account;
mod role;

pub use account::{Account, NewAccount};
pub use role::Role;
