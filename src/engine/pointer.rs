use eframe::egui::Pos2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

impl PointerId {
    pub const MOUSE: Self = Self(0);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragDisc {
    pub center: Pos2,
    pub radius: f32,
}

impl DragDisc {
    pub fn clamp(&self, point: Pos2) -> Pos2 {
        let offset = point - self.center;
        let distance = offset.length();
        if distance <= self.radius || distance <= f32::EPSILON {
            return point;
        }
        self.center + offset * (self.radius / distance)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActivationTracker {
    window_secs: f64,
    last: Option<(String, f64)>,
}

impl ActivationTracker {
    pub fn new(window_secs: f64) -> Self {
        Self {
            window_secs,
            last: None,
        }
    }

    /// Records a press and reports whether it completes a double activation.
    /// A completed pair is forgotten so a third press starts over.
    pub fn register(&mut self, node_id: &str, now: f64) -> bool {
        let double = self.last.as_ref().is_some_and(|(last_id, at)| {
            last_id == node_id && now >= *at && now - at <= self.window_secs
        });

        self.last = if double {
            None
        } else {
            Some((node_id.to_owned(), now))
        };
        double
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PointerPhase {
    Idle,
    Pressed {
        node_id: String,
        pointer: PointerId,
        start: Pos2,
    },
    Dragging {
        node_id: String,
        pointer: PointerId,
        start: Pos2,
        current: Pos2,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum PressOutcome {
    Ignored,
    Engaged { selection: Option<String> },
    EditRequested { node_id: String },
}

#[derive(Clone, Debug, PartialEq)]
pub enum ReleaseOutcome {
    Ignored,
    Clicked {
        node_id: String,
        still_selected: bool,
    },
    Dropped {
        node_id: String,
        position: Pos2,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointerSession {
    phase: PointerPhase,
    activation: ActivationTracker,
    drag_threshold: f32,
}

impl PointerSession {
    pub fn new(drag_threshold: f32, double_activation_secs: f64) -> Self {
        Self {
            phase: PointerPhase::Idle,
            activation: ActivationTracker::new(double_activation_secs),
            drag_threshold,
        }
    }

    pub fn phase(&self) -> &PointerPhase {
        &self.phase
    }

    pub fn captured_pointer(&self) -> Option<PointerId> {
        match &self.phase {
            PointerPhase::Idle => None,
            PointerPhase::Pressed { pointer, .. } | PointerPhase::Dragging { pointer, .. } => {
                Some(*pointer)
            }
        }
    }

    pub fn drag_preview(&self) -> Option<(&str, Pos2)> {
        match &self.phase {
            PointerPhase::Dragging {
                node_id, current, ..
            } => Some((node_id.as_str(), *current)),
            _ => None,
        }
    }

    pub fn pointer_down(
        &mut self,
        node_id: &str,
        pointer: PointerId,
        position: Pos2,
        now: f64,
        selection: Option<&str>,
    ) -> PressOutcome {
        if self.captured_pointer().is_some_and(|held| held != pointer) {
            return PressOutcome::Ignored;
        }

        if self.activation.register(node_id, now) {
            self.phase = PointerPhase::Idle;
            return PressOutcome::EditRequested {
                node_id: node_id.to_owned(),
            };
        }

        self.phase = PointerPhase::Pressed {
            node_id: node_id.to_owned(),
            pointer,
            start: position,
        };

        let selection = if selection == Some(node_id) {
            None
        } else {
            Some(node_id.to_owned())
        };
        PressOutcome::Engaged { selection }
    }

    pub fn pointer_move(&mut self, pointer: PointerId, position: Pos2, disc: DragDisc) -> Option<Pos2> {
        if self.captured_pointer() != Some(pointer) {
            return None;
        }

        let threshold = self.drag_threshold;
        match &mut self.phase {
            PointerPhase::Idle => None,
            PointerPhase::Pressed {
                node_id, start, ..
            } => {
                if start.distance(position) <= threshold {
                    return None;
                }
                let current = disc.clamp(position);
                self.phase = PointerPhase::Dragging {
                    node_id: std::mem::take(node_id),
                    pointer,
                    start: *start,
                    current,
                };
                Some(current)
            }
            PointerPhase::Dragging { current, .. } => {
                *current = disc.clamp(position);
                Some(*current)
            }
        }
    }

    pub fn pointer_up(
        &mut self,
        pointer: PointerId,
        position: Pos2,
        disc: DragDisc,
        selection: Option<&str>,
    ) -> ReleaseOutcome {
        if self.captured_pointer() != Some(pointer) {
            return ReleaseOutcome::Ignored;
        }

        match std::mem::replace(&mut self.phase, PointerPhase::Idle) {
            PointerPhase::Idle => ReleaseOutcome::Ignored,
            PointerPhase::Pressed { node_id, .. } => {
                let still_selected = selection == Some(node_id.as_str());
                ReleaseOutcome::Clicked {
                    node_id,
                    still_selected,
                }
            }
            PointerPhase::Dragging { node_id, .. } => ReleaseOutcome::Dropped {
                node_id,
                position: disc.clamp(position),
            },
        }
    }

    pub fn pointer_cancel(&mut self, pointer: PointerId) {
        if self.captured_pointer() == Some(pointer) {
            self.phase = PointerPhase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;

    const WINDOW: f64 = 0.32;

    fn disc() -> DragDisc {
        DragDisc {
            center: pos2(500.0, 500.0),
            radius: 390.0,
        }
    }

    fn session() -> PointerSession {
        PointerSession::new(5.0, WINDOW)
    }

    #[test]
    fn press_toggles_selection() {
        let mut session = session();
        assert_eq!(
            session.pointer_down("a", PointerId::MOUSE, pos2(0.0, 0.0), 0.0, None),
            PressOutcome::Engaged {
                selection: Some("a".to_owned())
            }
        );
        session.pointer_cancel(PointerId::MOUSE);

        assert_eq!(
            session.pointer_down("a", PointerId::MOUSE, pos2(0.0, 0.0), 5.0, Some("a")),
            PressOutcome::Engaged { selection: None }
        );
        session.pointer_cancel(PointerId::MOUSE);

        assert_eq!(
            session.pointer_down("b", PointerId::MOUSE, pos2(0.0, 0.0), 10.0, Some("a")),
            PressOutcome::Engaged {
                selection: Some("b".to_owned())
            }
        );
    }

    #[test]
    fn small_moves_stay_a_click() {
        let mut session = session();
        session.pointer_down("a", PointerId::MOUSE, pos2(500.0, 300.0), 0.0, None);

        assert_eq!(session.pointer_move(PointerId::MOUSE, pos2(503.0, 304.0), disc()), None);
        assert_eq!(session.drag_preview(), None);

        let outcome = session.pointer_up(PointerId::MOUSE, pos2(503.0, 304.0), disc(), Some("a"));
        assert_eq!(
            outcome,
            ReleaseOutcome::Clicked {
                node_id: "a".to_owned(),
                still_selected: true
            }
        );
        assert_eq!(session.phase(), &PointerPhase::Idle);
    }

    #[test]
    fn crossing_threshold_starts_drag_and_clamps_to_disc() {
        let mut session = session();
        session.pointer_down("a", PointerId::MOUSE, pos2(500.0, 300.0), 0.0, None);

        let moved = session.pointer_move(PointerId::MOUSE, pos2(506.0, 300.0), disc());
        assert_eq!(moved, Some(pos2(506.0, 300.0)));

        let far = session
            .pointer_move(PointerId::MOUSE, pos2(500.0, -400.0), disc())
            .expect("dragging");
        assert!((far.distance(disc().center) - 390.0).abs() < 1e-3);
        assert_eq!(session.drag_preview(), Some(("a", far)));

        let outcome = session.pointer_up(PointerId::MOUSE, pos2(500.0, -400.0), disc(), None);
        let ReleaseOutcome::Dropped { node_id, position } = outcome else {
            panic!("expected a drop");
        };
        assert_eq!(node_id, "a");
        assert!((position.y - 110.0).abs() < 1e-3);
    }

    #[test]
    fn other_pointers_are_ignored_while_captured() {
        let mut session = session();
        session.pointer_down("a", PointerId::MOUSE, pos2(0.0, 0.0), 0.0, None);

        let touch = PointerId(7);
        assert_eq!(
            session.pointer_down("b", touch, pos2(0.0, 0.0), 0.1, None),
            PressOutcome::Ignored
        );
        assert_eq!(session.pointer_move(touch, pos2(90.0, 90.0), disc()), None);
        assert_eq!(
            session.pointer_up(touch, pos2(90.0, 90.0), disc(), None),
            ReleaseOutcome::Ignored
        );
        session.pointer_cancel(touch);
        assert_eq!(session.captured_pointer(), Some(PointerId::MOUSE));
    }

    #[test]
    fn cancel_discards_drag() {
        let mut session = session();
        session.pointer_down("a", PointerId::MOUSE, pos2(500.0, 300.0), 0.0, None);
        session.pointer_move(PointerId::MOUSE, pos2(560.0, 300.0), disc());
        session.pointer_cancel(PointerId::MOUSE);

        assert_eq!(session.phase(), &PointerPhase::Idle);
        assert_eq!(
            session.pointer_up(PointerId::MOUSE, pos2(560.0, 300.0), disc(), None),
            ReleaseOutcome::Ignored
        );
    }

    #[test]
    fn second_press_inside_window_requests_edit() {
        let mut session = session();
        session.pointer_down("a", PointerId::MOUSE, pos2(0.0, 0.0), 1.0, None);
        session.pointer_up(PointerId::MOUSE, pos2(0.0, 0.0), disc(), Some("a"));

        assert_eq!(
            session.pointer_down("a", PointerId::MOUSE, pos2(0.0, 0.0), 1.2, Some("a")),
            PressOutcome::EditRequested {
                node_id: "a".to_owned()
            }
        );
        assert_eq!(session.phase(), &PointerPhase::Idle);
    }

    #[test]
    fn double_activation_cancels_pending_drag() {
        let mut session = session();
        session.pointer_down("a", PointerId::MOUSE, pos2(500.0, 300.0), 1.0, None);
        session.pointer_move(PointerId::MOUSE, pos2(540.0, 300.0), disc());

        let outcome = session.pointer_down("a", PointerId::MOUSE, pos2(540.0, 300.0), 1.1, Some("a"));
        assert!(matches!(outcome, PressOutcome::EditRequested { .. }));
        assert_eq!(session.drag_preview(), None);
    }

    #[test]
    fn slow_or_different_second_press_is_not_double() {
        let mut tracker = ActivationTracker::new(WINDOW);
        assert!(!tracker.register("a", 0.0));
        assert!(!tracker.register("a", 0.5));
        assert!(!tracker.register("b", 0.6));
        assert!(tracker.register("b", 0.9));
        assert!(!tracker.register("b", 1.0));
    }
}
