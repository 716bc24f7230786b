#[macro_use]
mod util;

mod latex;
mod metrics;
mod properties;
