pub mod config;
pub mod debounce;
pub mod error;
pub mod event;
pub mod indexer;
pub mod navigation;
pub mod panel;
pub mod pattern_set;
pub mod presentation;
pub mod session;
pub mod traits;
pub mod types;

pub use crate::config::{BoxOptions, ColorPair, DefaultMode, HighlightConfig};
pub use crate::debounce::{DebounceScheduler, RefreshScope};
pub use crate::error::HighlightError;
pub use crate::event::{Action, Event};
pub use crate::indexer::{MatchIndex, MatchIndexer, Overlays};
pub use crate::pattern_set::{InsertMode, LiteralOutcome, PatternSet, REMOVE_ALL_LABEL};
pub use crate::presentation::{Palette, PresentationMapper};
pub use crate::session::{Session, SessionBuilder, SessionSnapshot};
pub use crate::traits::Workspace;
pub use crate::types::{
    Command, CursorState, HighlightSpec, MatchFlags, MatchRange, Position, Range, Selection,
    ViewId,
};
