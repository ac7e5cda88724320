pub mod dashboard;
pub mod pages;
pub mod submission;
