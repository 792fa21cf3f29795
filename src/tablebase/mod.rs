//! A chess endgame tablebase built by retrograde analysis.
//!
//! Building proceeds in layers (see [`fixedpoint`]): layer zero is every
//! checkmate reachable with a given piece inventory (see [`checkmate`] and
//! [`inventory`]), and each subsequent layer is discovered by walking
//! backwards from the previous one (see [`retrograde`]). Positions are keyed
//! by a compact text encoding (see [`codec`]) for storage (see
//! [`persistence`]) and lookup (see [`probe`]).

use std::collections::HashSet;

pub mod checkmate;
pub mod codec;
pub mod error;
pub mod fixedpoint;
pub mod inventory;
pub mod persistence;
pub mod probe;
pub mod retrograde;

pub use error::{Result, TablebaseError};

/// A built tablebase: `layers[depth]` holds every position (tablebase key)
/// from which mate is forced in exactly `depth` more half-moves. `layers[0]`
/// is every checkmate.
pub type Tablebase = Vec<HashSet<codec::Key>>;
