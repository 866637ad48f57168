pub mod attributes;
pub mod client;
pub mod simulator;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;
