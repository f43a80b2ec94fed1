// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code (fail-fast construction asserts are the
// one sanctioned exception, carrying targeted allows at the call site)
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Float comparison: interpolation math compares against 0.0, 1.0, etc.,
// and the terminal-frame guarantees are exact by construction
#![allow(clippy::float_cmp)]
// Casts between color channels and floats are intentional and bounded
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
// Pedantic / nursery allowances
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::use_self)]
#![allow(clippy::redundant_pub_crate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::items_after_statements)]

//! Procedural animation engine: tweens, composites, and a cooperative
//! per-element scheduler.
//!
//! Animations interpolate named element properties over wall-clock time.
//! The engine owns no clock and no event loop; the embedder calls
//! [`scheduler::AnimationScheduler::tick`] from its per-frame rendering
//! callback and stops calling once every animation has finished.
//!
//! # Key entry points
//!
//! - [`animation::ProceduralAnimation`] - a playable tween, sequence, or
//!   set, with repeat/reverse policy and lifecycle notifications
//! - [`scheduler::AnimationScheduler`] - per-element controllers, ticked
//!   by the embedder
//! - [`sink::PropertySink`] - the seam through which property values are
//!   read and written
//! - [`easing::Easing`] - interpolation curves (quadratic, back, bounce,
//!   elastic) in ease-in/out/in-out modes
//! - [`effects`] - directional, interruptible transitions built on the
//!   engine
//!
//! # Time model
//!
//! Progress is computed from elapsed wall-clock time, never from frame
//! counts, so animations complete on schedule under uneven frame pacing.
//! A tick carries one timestamp shared by every animation it advances.

pub mod animation;
pub mod easing;
pub mod effects;
pub mod scheduler;
pub mod sink;
pub mod value;
