//! Analog clock face for `embedded-graphics` surfaces.
//!
//! [`ClockWidget`] ties a [`ClockFace`] to a [`RepaintLoop`] so a host only has
//! to forward size changes and draw requests; the face takes care of ticks,
//! needles, numerals and the center hub, and the loop asks for a repaint one
//! second after every frame until the widget is detached.

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod config;
pub mod display;
pub mod face;
pub mod geometry;
pub mod repaint;
pub mod theme;
pub mod widget;

pub use clock::{ClockState, TimeOfDay, WallClock};
pub use config::{FaceConfig, NeedleConfig};
pub use face::{ClockFace, Hand, Needle, Numeral};
pub use repaint::{RepaintLoop, RepaintTimer, REPAINT_INTERVAL};
pub use theme::{Blend, Monochrome, Stroke, Theme};
pub use widget::{ClockWidget, WidgetError};
