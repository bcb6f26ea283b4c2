//! Minimal terminal runtime: a stack of screens driven by terminal events.

pub use self::{
    runtime::run,
    screen::{Screen, ScreenStack, ScreenTransition},
};

mod runtime;
mod screen;
