pub mod inmemory_repo;
#[cfg(test)]
pub mod test_utils;
