pub mod orbit_paint;

pub use orbit_paint::{draw_order, hit_test, OrbitPainter};
