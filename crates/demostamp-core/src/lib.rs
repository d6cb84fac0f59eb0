//! demostamp: backfill coherent timestamps into demo conversation fixtures
//!
//! A fixture is a document of the shape
//!
//! ```text
//! { "projects": [ { "conversations": [ item, ... ], ... }, ... ],
//!   "singles":  [ item, ... ],
//!   ... }
//! ```
//!
//! Every item with an `id` gets `href`, `createTime`, `updateTime` and
//! `pinnedTime`. Times are derived from the id and a fixed anchor instant, so
//! rerunning over the same fixture always yields the same output.
//!
//! The stages run strictly forward:
//! `demostamp_loose::load_any` -> [`walk::walk_document`] ->
//! [`patch::patch_item`] (per item, via [`synth`]) -> [`output::to_pretty_json`].

pub mod anchor;
pub mod output;
pub mod patch;
pub mod pipeline;
pub mod synth;
pub mod walk;

pub use anchor::{resolve_anchor, AnchorError, DEFAULT_NOW};
pub use patch::{patch_item, ItemPatch, PatchError};
pub use pipeline::{stamp_file, stamp_text, StampError, StampOptions};
pub use synth::{compute_times_for_id, stable_code_to_weeks, IdShape, ItemTimes, SynthError};
pub use walk::{walk_document, PatchStats};
