//! Small utilities without a better home.

pub mod in_range_option;

pub use in_range_option::InRangeOption;
