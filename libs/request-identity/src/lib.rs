#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod constants;
pub mod context;
pub mod service_account;

pub use context::{UserInfo, UserInfoBuilder, current_user};
pub use service_account::{ServiceAccountName, ServiceAccountNameError};
