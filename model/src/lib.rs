pub mod actor;
pub mod auto_fire;
pub mod check;
pub mod config;
pub mod damage;
pub mod error;
pub mod fortune;
pub mod pool;
pub mod presentation;
pub mod resolver;
pub mod roll;
pub mod suppression;

#[cfg(feature = "test-util")]
pub mod test_util;
