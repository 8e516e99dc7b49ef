pub mod camera;
pub mod cli;
pub mod config;
pub mod frame;
pub mod math;
pub mod mesh;
pub mod noise;
pub mod palette;
pub mod renderer;
pub mod scroll;
pub mod types;

pub use mesh::{icosphere, OrbMesh, Vertex};
pub use noise::{elevation, snoise};
pub use scroll::{ScrollState, ScrollTrigger, Scrubber, Timeline};
