pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTask {
    started_at: Option<f64>,
    duration_secs: f64,
}

impl FrameTask {
    pub fn new(duration_secs: f64) -> Self {
        Self {
            started_at: None,
            duration_secs: duration_secs.max(0.0),
        }
    }

    pub fn start(&mut self, now: f64) {
        self.started_at = Some(now);
    }

    pub fn tick(&self, now: f64) -> Option<f32> {
        let started_at = self.started_at?;
        if self.duration_secs <= f64::EPSILON {
            return Some(1.0);
        }
        Some(((now - started_at) / self.duration_secs).clamp(0.0, 1.0) as f32)
    }

    pub fn cancel(&mut self) {
        self.started_at = None;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct ContourAnimator {
    from: Vec<Vec<f32>>,
    current: Vec<Vec<f32>>,
    target: Vec<Vec<f32>>,
    task: FrameTask,
}

impl ContourAnimator {
    pub fn new(duration_secs: f64) -> Self {
        Self {
            from: Vec::new(),
            current: Vec::new(),
            target: Vec::new(),
            task: FrameTask::new(duration_secs),
        }
    }

    pub fn current(&self) -> &[Vec<f32>] {
        &self.current
    }

    pub fn is_animating(&self) -> bool {
        self.task.is_running()
    }

    /// Starts a transition towards `target` from wherever the shape is at
    /// `now`. Returns `false` when `target` is already the destination.
    pub fn retarget(&mut self, target: Vec<Vec<f32>>, now: f64) -> bool {
        if target == self.target {
            return false;
        }

        self.advance(now);
        self.task.cancel();

        let from = reshape_like(&self.current, &target);
        self.current = from.clone();
        self.from = from;
        self.target = target;
        self.task.start(now);
        true
    }

    pub fn advance(&mut self, now: f64) -> bool {
        let Some(progress) = self.task.tick(now) else {
            return false;
        };

        if progress >= 1.0 {
            self.current = self.target.clone();
            self.task.cancel();
            return false;
        }

        let eased = ease_in_out_cubic(progress);
        for ((current, from), target) in self
            .current
            .iter_mut()
            .zip(&self.from)
            .zip(&self.target)
        {
            for ((value, start), end) in current.iter_mut().zip(from).zip(target) {
                *value = start + (end - start) * eased;
            }
        }
        true
    }
}

fn reshape_like(source: &[Vec<f32>], target: &[Vec<f32>]) -> Vec<Vec<f32>> {
    target
        .iter()
        .enumerate()
        .map(|(rank, row)| {
            let previous = source.get(rank);
            (0..row.len())
                .map(|axis| {
                    previous
                        .and_then(|values| values.get(axis))
                        .copied()
                        .unwrap_or(0.0)
                })
                .collect()
        })
        .collect()
}
