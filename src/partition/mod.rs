mod configuration;
mod contiguity;
mod error;
mod index_set;
mod ops;
mod region_set;

pub use configuration::{Configuration, UnitView};
pub use contiguity::is_contiguous;
pub use error::FlipError;
pub use ops::{flip, Flip};

pub(crate) use configuration::RegionList;
pub(self) use index_set::IndexSet;
pub(self) use region_set::RegionSet;
