pub mod adversarial_search;
pub mod evaluate;
pub mod prelude;
