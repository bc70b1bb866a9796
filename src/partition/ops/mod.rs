mod flip;

pub use flip::{flip, Flip};
