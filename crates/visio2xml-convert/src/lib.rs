//! visio2xml conversion capabilities
//!
//! The two seams of the pipeline: [`DocumentParser`] turns raw Visio bytes
//! into a [`VisioDocument`] structural model, and [`XmlRenderer`] turns that
//! model into the normalized XML artifact. Both are trait objects so a deeper
//! format implementation (or a failing test double) can replace the bundled
//! ones without touching the orchestration.

pub mod error;
pub mod model;
pub mod parser;
pub mod renderer;

pub use error::{ParseError, RenderError};
pub use model::{DocumentFormat, Geometry, Page, Shape, VisioDocument};
pub use parser::{DocumentParser, VisioParser};
pub use renderer::{VisioXmlRenderer, XmlRenderer};
