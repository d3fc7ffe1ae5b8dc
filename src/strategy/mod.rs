mod document;
mod load;
mod parse;
mod warnings;

pub use document::{
    Axis, MoveDirection, Node, ReferenceIssue, Ring, StrategyDocument, next_sequence,
    renumber_axis, sequence_order,
};
pub use load::load_document;
pub use warnings::{SequenceWarning, sequence_warnings};
