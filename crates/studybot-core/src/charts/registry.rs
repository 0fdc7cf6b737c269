use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use super::{Canvas, ChartSpec};

/// Identifies one chart instance for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ChartHandle(u64);

#[derive(Debug, Clone)]
pub struct ChartInstance {
    pub handle: ChartHandle,
    pub spec: ChartSpec,
}

/// Owns the live chart of every canvas.
///
/// Drawing onto a canvas that already holds a chart disposes of the old
/// instance first, so repeated polls never accumulate charts.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    charts: HashMap<Canvas, ChartInstance>,
    next_handle: u64,
    disposed: u64,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a new chart to `canvas`, replacing any previous one
    pub fn draw(&mut self, canvas: Canvas, spec: ChartSpec) -> ChartHandle {
        if let Some(previous) = self.charts.remove(&canvas) {
            self.dispose(canvas, previous);
        }

        self.next_handle += 1;
        let handle = ChartHandle(self.next_handle);
        debug!(canvas = canvas.element_id(), ?handle, kind = ?spec.kind, "Chart drawn");
        self.charts.insert(canvas, ChartInstance { handle, spec });
        handle
    }

    fn dispose(&mut self, canvas: Canvas, instance: ChartInstance) {
        debug!(canvas = canvas.element_id(), handle = ?instance.handle, "Chart disposed");
        self.disposed += 1;
    }

    pub fn get(&self, canvas: Canvas) -> Option<&ChartInstance> {
        self.charts.get(&canvas)
    }

    pub fn spec(&self, canvas: Canvas) -> Option<&ChartSpec> {
        self.get(canvas).map(|c| &c.spec)
    }

    /// Number of charts currently alive (never more than one per canvas)
    pub fn live_count(&self) -> usize {
        self.charts.len()
    }

    /// Number of charts replaced so far
    pub fn disposed_count(&self) -> u64 {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::task_completion_chart;
    use crate::locale::Locale;
    use crate::models::Achievements;

    fn spec() -> ChartSpec {
        task_completion_chart(&Achievements::default(), Locale::English)
    }

    #[test]
    fn test_redraw_replaces_previous_instance() {
        let mut registry = ChartRegistry::new();

        let first = registry.draw(Canvas::TasksCompletion, spec());
        let second = registry.draw(Canvas::TasksCompletion, spec());

        assert_ne!(first, second);
        assert_eq!(registry.live_count(), 1);
        assert_eq!(registry.disposed_count(), 1);
        assert_eq!(
            registry.get(Canvas::TasksCompletion).map(|c| c.handle),
            Some(second)
        );
    }

    #[test]
    fn test_one_chart_per_canvas_under_repeated_polls() {
        let mut registry = ChartRegistry::new();
        for _ in 0..10 {
            for canvas in Canvas::ALL {
                registry.draw(canvas, spec());
            }
        }
        assert_eq!(registry.live_count(), 3);
        assert_eq!(registry.disposed_count(), 27);
    }
}
