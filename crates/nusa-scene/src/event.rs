use std::collections::{BTreeMap, VecDeque};

use nusa_geom::Ray;
use nusa_regions::RegionId;

pub enum Event {
    // Pointer
    PointerMoved { ray: Ray },
    Clicked,
    OrbitDragged { dx: f32, dy: f32, viewport_height: f32 },
    Wheel { delta: f32 },

    // Capture
    CaptureReleased,

    // Commands
    ExitRequested,
    ResetViewRequested,
    ZoomToRegion { id: RegionId },
    LabelsToggled,
    MuteToggled,
}

impl Event {
    /// Short name for logs and stats.
    pub fn name(&self) -> &'static str {
        match self {
            Event::PointerMoved { .. } => "PointerMoved",
            Event::Clicked => "Clicked",
            Event::OrbitDragged { .. } => "OrbitDragged",
            Event::Wheel { .. } => "Wheel",
            Event::CaptureReleased => "CaptureReleased",
            Event::ExitRequested => "ExitRequested",
            Event::ResetViewRequested => "ResetViewRequested",
            Event::ZoomToRegion { .. } => "ZoomToRegion",
            Event::LabelsToggled => "LabelsToggled",
            Event::MuteToggled => "MuteToggled",
        }
    }
}

pub struct EventEnvelope {
    pub id: u64,
    pub tick: u64,
    pub kind: Event,
}

pub struct EventQueue {
    // tick -> FIFO of events due on that tick
    by_tick: BTreeMap<u64, VecDeque<EventEnvelope>>,
    pub now: u64,
    next_id: u64,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self {
            by_tick: BTreeMap::new(),
            now: 0,
            next_id: 1,
        }
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    pub fn emit_now(&mut self, kind: Event) -> u64 {
        self.emit_at(self.now, kind)
    }

    pub fn emit_at(&mut self, tick: u64, kind: Event) -> u64 {
        let id = self.alloc_id();
        let tick = tick.max(self.now);
        self.by_tick
            .entry(tick)
            .or_default()
            .push_back(EventEnvelope { id, tick, kind });
        id
    }

    pub fn emit_after(&mut self, delta: u64, kind: Event) -> u64 {
        self.emit_at(self.now.saturating_add(delta), kind)
    }

    /// Next event due on the current tick, oldest first.
    pub fn pop_ready(&mut self) -> Option<EventEnvelope> {
        let q = self.by_tick.get_mut(&self.now)?;
        let env = q.pop_front();
        if q.is_empty() {
            self.by_tick.remove(&self.now);
        }
        env
    }

    pub fn advance_tick(&mut self) {
        self.now = self.now.wrapping_add(1);
    }

    /// Events waiting on any tick.
    pub fn len(&self) -> usize {
        self.by_tick.values().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tick.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_within_a_tick() {
        let mut q = EventQueue::new();
        q.emit_now(Event::Clicked);
        q.emit_now(Event::LabelsToggled);
        assert_eq!(q.pop_ready().map(|e| e.kind.name()), Some("Clicked"));
        assert_eq!(q.pop_ready().map(|e| e.kind.name()), Some("LabelsToggled"));
        assert!(q.pop_ready().is_none());
        assert!(q.is_empty());
    }

    #[test]
    fn delayed_events_wait_for_their_tick() {
        let mut q = EventQueue::new();
        q.emit_after(2, Event::ExitRequested);
        assert!(q.pop_ready().is_none());
        q.advance_tick();
        assert!(q.pop_ready().is_none());
        q.advance_tick();
        let env = q.pop_ready().expect("due");
        assert_eq!(env.tick, 2);
        assert_eq!(env.kind.name(), "ExitRequested");
    }

    #[test]
    fn past_ticks_land_on_now() {
        let mut q = EventQueue::new();
        q.advance_tick();
        q.emit_at(0, Event::Clicked);
        assert_eq!(q.len(), 1);
        assert!(q.pop_ready().is_some());
    }
}
