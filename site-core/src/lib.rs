//! Runtime core for the BlackBird Capital site
//!
//! This crate holds the behaviour behind the site's progressive
//! enhancements as plain Rust state machines, with no DOM access:
//!
//! 1. **Carousel** – the universal carousel engine. [`metrics`] reads the
//!    live layout through a probe trait, [`carousel`] owns the position
//!    and produces render frames, [`gesture`] turns touch and mouse drags
//!    into swipes and [`timing`] collapses resize bursts.
//! 2. **Collaborators** – header scroll and menu rules, anchor scrolling,
//!    counter easing, the FAQ accordion, overlay dialogs, newsletter
//!    feedback and lazy image loading.
//! 3. **Context and configuration** – the explicit application context
//!    handed to every component and the serde-backed site configuration.
//!
//! The `wasm-site` crate binds all of this to the page. The optional
//! `wasm` feature additionally exposes the pure carousel engine to
//! JavaScript hosts that do their own DOM work.

pub mod accordion;
pub mod carousel;
pub mod config;
pub mod context;
pub mod counter;
pub mod dialog;
pub mod error;
pub mod forms;
pub mod gesture;
pub mod header;
pub mod metrics;
pub mod timing;

#[cfg(feature = "wasm")]
pub mod wasm_bindings;

pub use carousel::{
    Carousel, CarouselMode, CarouselSlot, RenderFrame, StaticLayoutPolicy, Transform,
};
pub use config::{CarouselConfig, SiteConfig};
pub use context::AppContext;
pub use error::{Result, SiteError};
pub use metrics::{LayoutProbe, LayoutSnapshot, Metrics};
