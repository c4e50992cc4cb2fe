pub mod clock;
pub mod configuration;
pub mod timezone;
pub mod web_api;

#[cfg(test)]
#[macro_use]
extern crate assert_approx_eq;
