pub mod extractor;
pub mod identity;
pub mod test_utils;
