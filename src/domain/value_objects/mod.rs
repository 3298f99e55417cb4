mod landmark_category;
mod landmark_set;

pub use landmark_category::LandmarkCategory;
pub use landmark_set::LandmarkSet;
