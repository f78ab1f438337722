pub mod attachment;
pub mod submission;
