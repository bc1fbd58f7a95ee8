pub mod mapper;
pub mod sample;

pub use mapper::map_profile_to_draft;
pub use sample::sample_resume;
