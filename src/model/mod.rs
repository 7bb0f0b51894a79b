// Model module: MILP representation and the workforce formulation

pub mod milp;
pub mod shift_model;

pub use milp::*;
pub use shift_model::*;
