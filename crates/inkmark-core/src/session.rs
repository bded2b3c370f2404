//! Gesture handling for one annotation canvas.
//!
//! A [`DrawingSession`] owns the committed strokes, the undo history and the
//! stroke being drawn. The host forwards touch events in delivery order and
//! repaints from [`DrawingSession::render_model`] afterwards.

use crate::canvas::StrokeCollection;
use crate::config::EngineConfig;
use crate::geometry::{density_threshold, distance, velocity};
use crate::history::HistoryLog;
use crate::input::{InputClassifier, TouchKind, TouchSample};
use crate::smoothing::smooth;
use crate::stroke::{InkPoint, Stroke, StrokeId};
use crate::tools::{ToolKind, ToolPalette};
use kurbo::{Circle, Point, Rect};

/// Per-gesture state.
#[derive(Debug, Clone, Default)]
pub enum GestureState {
    /// Waiting for a touch.
    #[default]
    Idle,
    /// Capturing a stroke.
    Drawing {
        /// Raw points accepted so far (never empty).
        points: Vec<InkPoint>,
    },
    /// Erasing; changes are applied as the touch moves.
    Erasing {
        /// Last erase position.
        cursor: Point,
    },
}

/// What a touch event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchOutcome {
    /// Nothing happened (read-only mode, rejected touch, no active gesture).
    Ignored,
    /// A new stroke was started.
    Started,
    /// A point was appended to the stroke being drawn.
    Extended,
    /// The point was too close to the previous one and was dropped.
    Filtered,
    /// An erase pass ran; carries the number of points removed.
    Erased { removed_points: usize },
    /// The gesture produced a new stroke.
    Committed(StrokeId),
    /// The gesture finished without producing a stroke.
    Ended,
    /// The gesture was abandoned.
    Cancelled,
}

/// Read-only snapshot for painting.
#[derive(Debug, Clone)]
pub struct RenderModel {
    /// Committed strokes, back to front.
    pub committed: StrokeCollection,
    /// Stroke currently being drawn.
    pub in_progress: Vec<InkPoint>,
    /// Eraser footprint while an erase gesture is active.
    pub eraser: Option<Circle>,
    /// Selected tool.
    pub tool: ToolKind,
}

/// Drawing state machine for one canvas.
#[derive(Debug, Clone)]
pub struct DrawingSession {
    bounds: Rect,
    config: EngineConfig,
    tool: ToolKind,
    toolbar_visible: bool,
    classifier: InputClassifier,
    strokes: StrokeCollection,
    history: HistoryLog,
    state: GestureState,
}

impl DrawingSession {
    /// Create a session over a canvas occupying `bounds` (pixel space).
    pub fn new(bounds: Rect, config: EngineConfig) -> Self {
        Self {
            bounds: bounds.abs(),
            tool: config.initial_tool,
            toolbar_visible: config.start_in_write_mode,
            classifier: InputClassifier::new(config.classifier),
            strokes: StrokeCollection::new(),
            history: HistoryLog::new(config.history_limit),
            state: GestureState::Idle,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn palette(&self) -> &ToolPalette {
        &self.config.palette
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Follow a layout change of the underlying document.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds.abs();
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Select a tool. Ignored in read-only mode; returns whether it applied.
    ///
    /// A gesture already in progress keeps the tool it started with.
    pub fn set_tool(&mut self, tool: ToolKind) -> bool {
        if !self.toolbar_visible {
            log::debug!("Read-only mode, ignoring tool change to {}", tool.name());
            return false;
        }
        self.tool = tool;
        true
    }

    pub fn is_toolbar_visible(&self) -> bool {
        self.toolbar_visible
    }

    /// Switch between write mode (toolbar shown) and read-only viewing.
    pub fn set_toolbar_visible(&mut self, visible: bool) {
        if !visible {
            self.on_touch_cancel();
        }
        self.toolbar_visible = visible;
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, GestureState::Idle)
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn strokes(&self) -> &StrokeCollection {
        &self.strokes
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Handle a touch-start.
    pub fn on_touch_start(&mut self, position: Point, sample: &TouchSample) -> TouchOutcome {
        if !self.toolbar_visible {
            log::debug!("Read-only mode, ignoring touch");
            return TouchOutcome::Ignored;
        }
        if self.is_active() {
            log::debug!("Touch-start during an active gesture, ignoring");
            return TouchOutcome::Ignored;
        }
        if !contains_inclusive(self.bounds, position) {
            log::debug!("Touch at {:?} is outside the canvas", position);
            return TouchOutcome::Ignored;
        }
        if self.classifier.classify(sample) == TouchKind::Finger {
            return TouchOutcome::Ignored;
        }

        if self.tool.is_erase() {
            self.state = GestureState::Erasing { cursor: position };
            let removed_points = self.erase(position);
            return TouchOutcome::Erased { removed_points };
        }

        let pressure = sample.detected_pressure().unwrap_or(1.0);
        let point = InkPoint::new(position, self.tool, sample.timestamp_ms, pressure);
        self.state = GestureState::Drawing { points: vec![point] };
        log::debug!("Started {} stroke at {:?}", self.tool.name(), position);
        TouchOutcome::Started
    }

    /// Handle a touch-move. No-op without an active gesture.
    pub fn on_touch_move(&mut self, position: Point, sample: &TouchSample) -> TouchOutcome {
        let position = clamp_to(self.bounds, position);

        if matches!(self.state, GestureState::Erasing { .. }) {
            self.state = GestureState::Erasing { cursor: position };
            let removed_points = self.erase(position);
            return TouchOutcome::Erased { removed_points };
        }

        if let GestureState::Drawing { points } = &mut self.state {
            return append_point(points, position, sample);
        }

        TouchOutcome::Ignored
    }

    /// Handle a touch-end, committing the stroke being drawn.
    pub fn on_touch_end(&mut self, position: Point, sample: &TouchSample) -> TouchOutcome {
        match std::mem::take(&mut self.state) {
            GestureState::Idle => TouchOutcome::Ignored,
            GestureState::Erasing { .. } => TouchOutcome::Ended,
            GestureState::Drawing { mut points } => {
                append_point(&mut points, clamp_to(self.bounds, position), sample);
                self.commit(&points)
            }
        }
    }

    /// Abandon the current gesture without committing anything.
    pub fn on_touch_cancel(&mut self) -> TouchOutcome {
        match std::mem::take(&mut self.state) {
            GestureState::Idle => TouchOutcome::Ignored,
            _ => {
                log::debug!("Gesture cancelled");
                TouchOutcome::Cancelled
            }
        }
    }

    /// Restore the previous snapshot. Ignored in read-only mode.
    pub fn undo(&mut self) -> bool {
        if !self.toolbar_visible {
            log::debug!("Read-only mode, ignoring undo");
            return false;
        }
        match self.history.undo() {
            Some(snapshot) => {
                self.strokes = snapshot.clone();
                true
            }
            None => false,
        }
    }

    /// Re-apply the next snapshot. Ignored in read-only mode.
    pub fn redo(&mut self) -> bool {
        if !self.toolbar_visible {
            log::debug!("Read-only mode, ignoring redo");
            return false;
        }
        match self.history.redo() {
            Some(snapshot) => {
                self.strokes = snapshot.clone();
                true
            }
            None => false,
        }
    }

    /// Remove every stroke. Returns false when there was nothing to clear.
    pub fn clear_all(&mut self) -> bool {
        self.state = GestureState::Idle;
        if self.strokes.is_empty() {
            return false;
        }

        log::info!("Clearing {} strokes", self.strokes.len());
        self.strokes = StrokeCollection::new();
        self.history.record(self.strokes.clone());
        true
    }

    /// Snapshot of everything the host needs to paint.
    pub fn render_model(&self) -> RenderModel {
        let (in_progress, eraser) = match &self.state {
            GestureState::Idle => (Vec::new(), None),
            GestureState::Drawing { points } => (points.clone(), None),
            GestureState::Erasing { cursor } => {
                (Vec::new(), Some(Circle::new(*cursor, self.config.erase_radius)))
            }
        };

        RenderModel {
            committed: self.strokes.clone(),
            in_progress,
            eraser,
            tool: self.tool,
        }
    }

    /// Apply one erase pass and record it.
    fn erase(&mut self, position: Point) -> usize {
        let before = self.strokes.point_count();
        self.strokes = self.strokes.erase_at(position, self.config.erase_radius);
        self.history.record(self.strokes.clone());

        let removed = before - self.strokes.point_count();
        log::trace!("Erased {} points at {:?}", removed, position);
        removed
    }

    fn commit(&mut self, points: &[InkPoint]) -> TouchOutcome {
        let raw_len = points.len();
        let Some(stroke) = Stroke::new(smooth(points)) else {
            return TouchOutcome::Ended;
        };

        let id = stroke.id();
        log::debug!("Committed stroke {} ({} raw points, {} smoothed)", id, raw_len, stroke.len());
        self.strokes.push(stroke);
        self.history.record(self.strokes.clone());
        TouchOutcome::Committed(id)
    }
}

/// Append a captured point if it moved far enough from the last one.
fn append_point(points: &mut Vec<InkPoint>, position: Point, sample: &TouchSample) -> TouchOutcome {
    let Some(last) = points.last().copied() else {
        return TouchOutcome::Ignored;
    };

    let pressure = sample.detected_pressure().unwrap_or(last.pressure);
    let candidate = InkPoint::new(position, last.tool, sample.timestamp_ms, pressure);
    let speed = velocity(&last, &candidate);
    let candidate = candidate.with_velocity(speed);

    if distance(&last, &candidate) > density_threshold(speed, pressure) {
        log::trace!("Captured point {:?} (v={:.3}, p={:.3})", position, speed, pressure);
        points.push(candidate);
        TouchOutcome::Extended
    } else {
        TouchOutcome::Filtered
    }
}

fn contains_inclusive(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

fn clamp_to(rect: Rect, point: Point) -> Point {
    Point::new(point.x.max(rect.x0).min(rect.x1), point.y.max(rect.y0).min(rect.y1))
}
