//! Geometry and interaction for the radial map. Everything here is pure and
//! driven by host-supplied positions and frame times.

pub mod animator;
pub mod contour;
pub mod edit;
pub mod pointer;
pub mod polar;
pub mod radius;
pub mod snap;

pub use animator::{ContourAnimator, FrameTask, ease_in_out_cubic};
pub use contour::{
    ContourPath, ContourRadii, PathSegment, contour_points, contour_radii, decode_anchors,
    smooth_closed_path,
};
pub use edit::{EditFinish, InlineEdit};
pub use pointer::{
    ActivationTracker, DragDisc, PointerId, PointerPhase, PointerSession, PressOutcome,
    ReleaseOutcome,
};
pub use polar::{RingFrame, RingRole, Viewport, axis_angle, polar_to_point, ring_base_radius};
pub use radius::{RadiusParams, resolve_axis_radii, resolve_document_radii};
pub use snap::{
    DropCommit, DropTarget, RevealRequest, commit_drop, resolve_drop, reveal_on_click,
};
