pub mod activity;
pub mod broadcast;
pub mod distribution;
pub mod overview;
