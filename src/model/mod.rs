mod fixture;
mod match_item;
mod status;

pub use fixture::*;
pub use match_item::*;
pub use status::*;
