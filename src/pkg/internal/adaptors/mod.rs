pub mod companies;
pub mod jobs;
pub mod update;
