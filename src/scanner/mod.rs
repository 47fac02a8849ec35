pub mod accumulator;
pub mod file_walker;
pub mod progress;

pub use accumulator::{byte_ones, count_ones, BitAccumulator};
pub use file_walker::{EntryKind, FsOpener, Scanner, StreamOpener, TreeWalker, WalkEvent, WalkdirTree};
pub use progress::ProgressLines;
