pub mod categorize;
pub mod dispatch;
pub mod seed;
pub mod serve;
