#![allow(
    clippy::len_zero,
    clippy::needless_lifetimes,
    clippy::enum_variant_names,
    clippy::type_complexity,
    clippy::new_without_default
)]

#[macro_use]
mod macros;
#[cfg(test)]
#[macro_use]
mod it;

pub mod client;
pub mod config;
pub mod display;
pub mod ifs;
pub mod object;
pub mod utils;
pub mod wire;
