//! Core data model shared by all trailforge constraint encoders.
//!
//! This crate owns the pieces every backend must agree on:
//!
//! - the [`Component`] description of a node in a cipher's data-flow graph
//!   (identity, input wiring, output width, operation descriptor);
//! - the variable [`naming`] scheme that keeps auxiliary symbols collision-free
//!   across the whole graph;
//! - the [`bits`] ordering convention (index 0 is the most significant bit);
//! - a small GF(2) polynomial ring ([`algebra`]) used by the algebraic backend.

#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// This is an implementation of `std::assert_matches::assert_matches`
/// so it can be removed when that feature stabilizes upstream
#[macro_export]
macro_rules! assert_matches {
    ($left:expr, $(|)? $( $pattern:pat_param )|+ $( if $guard: expr )? $(,)?) => {
        match $left {
            $( $pattern )|+ $( if $guard )? => {}
            ref left_val => {
                panic!(r#"
assertion failed: `(left matches right)`
    left: `{:?}`,
    right: `{}`"#, left_val, stringify!($($pattern)|+ $(if $guard)?));
            }
        }
    };

    ($left:expr, $(|)? $( $pattern:pat_param )|+ $( if $guard: expr )?, $msg:literal $(,)?) => {
        match $left {
            $( $pattern )|+ $( if $guard )? => {}
            ref left_val => {
                panic!(concat!(r#"
assertion failed: `(left matches right)`
    left: `{:?}`,
    right: `{}`
"#, $msg), left_val, stringify!($($pattern)|+ $(if $guard)?));
            }
        }
    };
}

pub mod algebra;
pub mod bits;
pub mod naming;

mod component;
pub use component::{Component, ComponentDescription, OperationKind};

mod errors;
pub use errors::EncodeError;
