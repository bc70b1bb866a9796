mod input;
mod reference;
mod unit;

pub use input::{InputDocument, InputUnit};
pub use reference::{parse_county_list, ReferenceTable, RegionReference};
pub use unit::{AdjacencyList, AdjacencySource, UnitRecord};
