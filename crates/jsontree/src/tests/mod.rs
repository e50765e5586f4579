mod arbitrary;
mod deep_nesting;
mod property_partition;
mod utils;
