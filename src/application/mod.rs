// Application module: collaborator-side input assembly and output rendering

pub mod assembly;
pub mod render;

pub use assembly::{Horizon, ProblemBuilder};
pub use render::{render_grid, render_summary};
