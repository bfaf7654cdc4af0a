pub mod check;
pub mod closure;
pub mod input;
pub mod order;
pub mod plan;
