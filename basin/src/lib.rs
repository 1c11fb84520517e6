//! Sink abstractions: where drained items go.
//!
//! A [`Sink`] receives items one at a time and is told, exactly once, when
//! the feeding side has stopped. The stock implementations cover the common
//! endpoints: collect into a `Vec`, discard, or hand each item to a closure.

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]

extern crate alloc;

mod impls;
mod traits;


pub use impls::{CollectSink, DropSink, FnSink};
pub use traits::Sink;
