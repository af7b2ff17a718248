use crate::animation::{FlashState, FlipState, FrameClock};
use crate::audio::CueSink;
use crate::error::DialError;
use crate::geometry::{DialGeometry, Layout, Point, Size, angle_from_center};
use crate::hit::{self, Region};
use crate::item::Item;
use crate::machine::{self, DialMode, Effect, Input, Phase};
use crate::momentum::Momentum;
use crate::render::Frame;
use crate::tuning::Tuning;
use std::time::Duration;

/// Pointer input in dial coordinates. A `Tap` is a press and release that did
/// not turn into a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
    Tap(Point),
}

/// Observable state of the dial for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub mode: DialMode,
    pub rotation: f64,
    pub velocity: f64,
    pub flip_progress: f64,
    pub flash_alpha: f64,
    pub dragging: bool,
    pub geometry: DialGeometry,
}

/// All mutable dial state, owned in one place and driven by pointer events and
/// frame ticks.
#[derive(Debug, Clone)]
pub struct DialSession {
    items: Vec<Item>,
    layout: Layout,
    tuning: Tuning,
    geometry: DialGeometry,
    phase: Phase,
    momentum: Momentum,
    flip: FlipState,
    flash: FlashState,
    clock: FrameClock,
}

impl DialSession {
    pub fn new(
        items: Vec<Item>,
        layout: Layout,
        tuning: Tuning,
        viewport: Size,
    ) -> Result<Self, DialError> {
        tuning.validate()?;
        let geometry = DialGeometry::for_viewport(viewport, &layout)?;
        log::debug!(
            "Dial with {} items, {} steps, center {:?}",
            items.len(),
            tuning.step_mode,
            geometry.center
        );

        Ok(Self {
            items,
            momentum: Momentum::new(&tuning),
            flip: FlipState::new(tuning.flip_target),
            flash: FlashState::default(),
            clock: FrameClock::default(),
            phase: Phase::default(),
            layout,
            tuning,
            geometry,
        })
    }

    pub fn resize(&mut self, viewport: Size) -> Result<(), DialError> {
        self.geometry = DialGeometry::for_viewport(viewport, &self.layout)?;
        Ok(())
    }

    pub fn geometry(&self) -> &DialGeometry {
        &self.geometry
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn snapshot(&self) -> Snapshot {
        let rotation = self.momentum.state();
        Snapshot {
            mode: self.phase.mode(),
            rotation: rotation.angle,
            velocity: rotation.velocity,
            flip_progress: self.flip.progress(),
            flash_alpha: self.flash.alpha().max(0.0),
            dragging: self.phase.drag().is_some(),
            geometry: self.geometry,
        }
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            snapshot: self.snapshot(),
            items: &self.items,
            layout: &self.layout,
        }
    }

    pub fn handle_pointer<S: CueSink>(&mut self, event: PointerEvent, cues: &mut S) {
        let input = match event {
            PointerEvent::Down(p) => Input::Press(self.classify(p), self.pointer_angle(p)),
            PointerEvent::Move(p) => Input::DragTo(self.pointer_angle(p)),
            PointerEvent::Up => Input::Release,
            PointerEvent::Tap(p) => Input::Tap(self.classify(p)),
        };
        self.dispatch(input, cues);
    }

    /// Advances one frame. `now` is a monotonic timestamp from the host's
    /// frame clock.
    pub fn tick<S: CueSink>(&mut self, now: Duration, cues: &mut S) {
        let elapsed = self.clock.advance(now);
        let frames = self.tuning.frames(elapsed);

        if self.phase.is_coasting() {
            self.momentum.tick(frames);
        }

        if self.flip.advance(self.tuning.flip_step * frames) {
            self.dispatch(Input::FlipComplete, cues);
        }

        if self.flash.is_visible() {
            self.flash.fade(self.tuning.flash_step * frames);
        }
    }

    fn classify(&self, p: Point) -> Region {
        hit::classify(p, &self.geometry)
    }

    fn pointer_angle(&self, p: Point) -> f64 {
        angle_from_center(p, self.geometry.center)
    }

    fn dispatch<S: CueSink>(&mut self, input: Input, cues: &mut S) {
        let step = machine::step(self.phase, input);
        if step.phase != self.phase && !matches!(input, Input::DragTo(_)) {
            log::debug!("Dial {} -> {} on {:?}", self.phase, step.phase, input);
        }
        self.phase = step.phase;

        for effect in step.effects {
            self.apply(effect, cues);
        }
    }

    fn apply<S: CueSink>(&mut self, effect: Effect, cues: &mut S) {
        match effect {
            Effect::Play(cue) => cues.play(cue),
            Effect::Silence(cue) => cues.silence(cue),
            Effect::Flash => self.flash.trigger(),
            Effect::StartFlip => self.flip.start(),
            Effect::ResetFlip => self.flip.reset(),
            Effect::HaltSpin => self.momentum.halt(),
            Effect::Rotate(angle) => {
                if let Phase::Dragging(drag) = &mut self.phase {
                    self.momentum.apply_drag(drag, angle);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Cue;
    use crate::item::ItemId;

    #[derive(Debug, Default)]
    struct Recorded {
        played: Vec<Cue>,
        silenced: Vec<Cue>,
    }

    impl CueSink for Recorded {
        fn play(&mut self, cue: Cue) {
            self.played.push(cue);
        }

        fn silence(&mut self, cue: Cue) {
            self.silenced.push(cue);
        }
    }

    const CENTER: Point = Point { x: 500.0, y: 500.0 };
    const RING_EAST: Point = Point { x: 850.0, y: 500.0 };
    const RING_SOUTH: Point = Point { x: 500.0, y: 850.0 };

    fn session() -> DialSession {
        let items = (0..8)
            .map(|i| Item::new(ItemId::new(format!("item-{}", i)), format!("{}.png", i)))
            .collect();
        DialSession::new(
            items,
            Layout::default(),
            Tuning::default(),
            Size::new(1000.0, 1000.0),
        )
        .unwrap()
    }

    fn frame_time(n: u64) -> Duration {
        Duration::from_micros(n * 16_667)
    }

    fn spin(s: &mut DialSession, cues: &mut Recorded) {
        s.handle_pointer(PointerEvent::Down(RING_EAST), cues);
        s.handle_pointer(PointerEvent::Move(Point::new(846.0, 550.0)), cues);
        s.handle_pointer(PointerEvent::Up, cues);
    }

    #[test]
    fn test_rejects_invalid_configuration() {
        let layout = Layout {
            inner_radius: 400.0,
            ..Layout::default()
        };
        let err = DialSession::new(Vec::new(), layout, Tuning::default(), Size::new(800.0, 800.0));
        assert!(matches!(err, Err(DialError::DegenerateGeometry { .. })));

        let err = DialSession::new(
            Vec::new(),
            Layout::default(),
            Tuning::default(),
            Size::new(0.0, 0.0),
        );
        assert!(matches!(err, Err(DialError::EmptyViewport { .. })));
    }

    #[test]
    fn test_center_tap_expands_without_rotating() {
        let mut s = session();
        let mut cues = Recorded::default();
        s.handle_pointer(PointerEvent::Tap(CENTER), &mut cues);
        spin(&mut s, &mut cues);
        s.handle_pointer(PointerEvent::Tap(CENTER), &mut cues);
        assert_eq!(s.snapshot().mode, DialMode::Collapsed);

        let before = s.snapshot().rotation;
        s.handle_pointer(PointerEvent::Tap(CENTER), &mut cues);
        let after = s.snapshot();
        assert_eq!(after.mode, DialMode::Expanded);
        assert_eq!(after.rotation, before);
        assert_eq!(cues.played, [Cue::Open, Cue::Pending, Cue::Open]);
    }

    #[test]
    fn test_drag_then_coast_to_rest() {
        let mut s = session();
        let mut cues = Recorded::default();
        s.handle_pointer(PointerEvent::Tap(CENTER), &mut cues);

        s.handle_pointer(PointerEvent::Down(RING_EAST), &mut cues);
        assert!(s.snapshot().dragging);
        s.handle_pointer(PointerEvent::Move(Point::new(846.0, 550.0)), &mut cues);
        let dragged = s.snapshot();
        assert!(dragged.rotation > 0.0);
        assert!(dragged.velocity > 0.0);

        // held pointer: no coasting
        s.tick(frame_time(0), &mut cues);
        assert_eq!(s.snapshot().rotation, dragged.rotation);

        s.handle_pointer(PointerEvent::Up, &mut cues);
        assert!(!s.snapshot().dragging);

        let mut previous = s.snapshot().velocity;
        let mut n = 1;
        while s.snapshot().velocity != 0.0 {
            s.tick(frame_time(n), &mut cues);
            let v = s.snapshot().velocity;
            assert!(v <= previous && v >= 0.0);
            previous = v;
            n += 1;
            assert!(n < 1_000);
        }

        let resting = s.snapshot();
        s.tick(frame_time(n), &mut cues);
        assert_eq!(s.snapshot(), resting);
    }

    #[test]
    fn test_down_outside_ring_does_not_stop_spin() {
        let mut s = session();
        let mut cues = Recorded::default();
        s.handle_pointer(PointerEvent::Tap(CENTER), &mut cues);
        spin(&mut s, &mut cues);
        let v = s.snapshot().velocity;

        s.handle_pointer(PointerEvent::Down(Point::new(500.0, 620.0)), &mut cues);
        assert!(!s.snapshot().dragging);
        assert_eq!(s.snapshot().velocity, v);

        s.handle_pointer(PointerEvent::Down(RING_SOUTH), &mut cues);
        assert_eq!(s.snapshot().velocity, 0.0);
    }

    #[test]
    fn test_collapsed_ring_freezes_rotation() {
        let mut s = session();
        let mut cues = Recorded::default();
        s.handle_pointer(PointerEvent::Tap(CENTER), &mut cues);
        spin(&mut s, &mut cues);
        s.handle_pointer(PointerEvent::Tap(CENTER), &mut cues);

        let frozen = s.snapshot();
        for n in 0..20 {
            s.tick(frame_time(n), &mut cues);
        }
        assert_eq!(s.snapshot().rotation, frozen.rotation);
        assert_eq!(s.snapshot().velocity, frozen.velocity);

        // reopening resumes the carried velocity
        s.handle_pointer(PointerEvent::Tap(CENTER), &mut cues);
        s.tick(frame_time(21), &mut cues);
        assert!(s.snapshot().rotation > frozen.rotation);
    }

    #[test]
    fn test_select_flip_and_confirm() {
        let mut s = session();
        let mut cues = Recorded::default();
        s.handle_pointer(PointerEvent::Tap(CENTER), &mut cues);
        s.handle_pointer(PointerEvent::Tap(RING_SOUTH), &mut cues);

        let flipping = s.snapshot();
        assert_eq!(s.phase(), Phase::Flipping);
        assert_eq!(flipping.mode, DialMode::Collapsed);
        assert_eq!(cues.played, [Cue::Open, Cue::Pending]);

        // taps are ignored mid-flip
        s.handle_pointer(PointerEvent::Tap(CENTER), &mut cues);
        assert_eq!(s.phase(), Phase::Flipping);

        for n in 0..8 {
            s.tick(frame_time(n), &mut cues);
            assert_eq!(s.phase(), Phase::Flipping);
        }
        s.tick(frame_time(8), &mut cues);
        assert_eq!(s.snapshot().flip_progress, 90.0);
        assert_eq!(s.snapshot().mode, DialMode::ActivatedButton);

        s.tick(frame_time(9), &mut cues);
        assert_eq!(s.snapshot().flip_progress, 90.0);

        s.handle_pointer(PointerEvent::Tap(CENTER), &mut cues);
        let confirmed = s.snapshot();
        assert_eq!(confirmed.mode, DialMode::Collapsed);
        assert_eq!(confirmed.flip_progress, 0.0);
        assert_eq!(confirmed.flash_alpha, 1.0);
        assert_eq!(cues.silenced, [Cue::Pending]);
        assert_eq!(cues.played.last(), Some(&Cue::Confirm));

        for n in 10..59 {
            s.tick(frame_time(n), &mut cues);
            assert!(s.snapshot().flash_alpha > 0.0);
        }
        s.tick(frame_time(59), &mut cues);
        assert_eq!(s.snapshot().flash_alpha, 0.0);
    }

    #[test]
    fn test_pointer_and_tick_share_one_sink() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let session = Rc::new(RefCell::new(session()));
        let cues = Rc::new(RefCell::new(Recorded::default()));

        let press = |event| {
            session
                .borrow_mut()
                .handle_pointer(event, &mut *cues.borrow_mut())
        };
        let tick = |n| session.borrow_mut().tick(frame_time(n), &mut *cues.borrow_mut());

        press(PointerEvent::Tap(CENTER));
        press(PointerEvent::Tap(RING_EAST));
        for n in 0..9 {
            tick(n);
        }
        assert_eq!(session.borrow().phase(), Phase::Activated);
        press(PointerEvent::Tap(CENTER));
        tick(9);

        let cues = cues.borrow();
        assert_eq!(cues.played, [Cue::Open, Cue::Pending, Cue::Confirm]);
        assert_eq!(cues.silenced, [Cue::Pending]);
    }

    #[test]
    fn test_idle_tick_is_pure_redraw() {
        let mut s = session();
        let mut cues = Recorded::default();
        let before = s.snapshot();
        for n in 0..5 {
            s.tick(frame_time(n), &mut cues);
        }
        assert_eq!(s.snapshot(), before);
        assert!(cues.played.is_empty());
    }

    #[test]
    fn test_outside_tap_is_noop() {
        let mut s = session();
        let mut cues = Recorded::default();
        s.handle_pointer(PointerEvent::Tap(Point::new(10.0, 10.0)), &mut cues);
        s.handle_pointer(PointerEvent::Tap(CENTER), &mut cues);
        s.handle_pointer(PointerEvent::Tap(Point::new(500.0, 650.0)), &mut cues);
        assert_eq!(s.snapshot().mode, DialMode::Expanded);
        assert_eq!(cues.played, [Cue::Open]);
    }

    #[test]
    fn test_scaled_steps_follow_elapsed_time() {
        let tuning = Tuning {
            step_mode: crate::tuning::StepMode::Scaled,
            ..Tuning::default()
        };
        let mut s = DialSession::new(Vec::new(), Layout::default(), tuning, Size::new(1000.0, 1000.0))
            .unwrap();
        let mut cues = Recorded::default();
        s.handle_pointer(PointerEvent::Tap(CENTER), &mut cues);
        s.handle_pointer(PointerEvent::Tap(RING_SOUTH), &mut cues);

        // baseline frame contributes nothing
        s.tick(Duration::from_secs(1), &mut cues);
        assert_eq!(s.snapshot().flip_progress, 0.0);

        // half a reference second covers the whole flip
        s.tick(Duration::from_millis(1_500), &mut cues);
        assert_eq!(s.snapshot().flip_progress, 90.0);
        assert_eq!(s.snapshot().mode, DialMode::ActivatedButton);
    }

    #[test]
    fn test_resize_keeps_state() {
        let mut s = session();
        let mut cues = Recorded::default();
        s.handle_pointer(PointerEvent::Tap(CENTER), &mut cues);
        s.resize(Size::new(1200.0, 900.0)).unwrap();
        assert_eq!(s.geometry().center, Point::new(600.0, 450.0));
        assert_eq!(s.snapshot().mode, DialMode::Expanded);
        assert!(s.resize(Size::new(-1.0, 900.0)).is_err());
        assert_eq!(s.geometry().center, Point::new(600.0, 450.0));
    }
}
