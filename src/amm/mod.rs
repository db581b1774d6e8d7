pub mod contracts;
pub mod models;
pub mod networks;
pub mod providers;
pub mod routing;
pub mod swap;
pub mod wallet;

#[cfg(test)]
pub(crate) mod testing;
