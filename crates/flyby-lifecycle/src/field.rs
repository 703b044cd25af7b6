//! The chaos field: two bounded pools, their spawn timers and the suppression switch.
//!
//! Time never advances on its own. The host passes its clock (ms) to
//! [`ChaosField::advance`] once per frame; timers fire at their scheduled time
//! and flights are updated to `now`.

use std::fmt;

use flyby_core::{
    ElementContent, FlybyRng, Glyph, RandomSource, SocialKind, Viewport, ViewportProvider,
};
use flyby_motion::{Flight, FlightEvent};
use log::{debug, trace};

use crate::config::FieldConfig;
use crate::error::ConfigError;
use crate::id::{ElementId, IdAllocator};
use crate::pool::{Element, Member, Pool, PoolKind};
use crate::render::{DisplaySurface, Sprite};
use crate::switch::{ModeChange, SuppressionSwitch};
use crate::timeline::Timeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpawnReason {
    Wave(usize),
    Replacement,
}

/// Payload of a pending spawn timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SpawnJob {
    pool: PoolKind,
    count: usize,
    /// Epoch the job was scheduled in; jobs from an earlier epoch never spawn.
    epoch: u32,
    reason: SpawnReason,
}

/// Two pools of flying elements driven by a host clock.
pub struct ChaosField<R: RandomSource = FlybyRng> {
    config: FieldConfig,
    social: Pool,
    emoji: Pool,
    timeline: Timeline<SpawnJob>,
    ids: IdAllocator,
    switch: SuppressionSwitch,
    rng: R,
    viewport: Box<dyn ViewportProvider>,
    now: f64,
    started: bool,
}

impl ChaosField<FlybyRng> {
    /// Creates a field seeded from system entropy.
    pub fn new(config: FieldConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, FlybyRng::from_entropy())
    }

    /// Creates a reproducible field.
    pub fn seeded(config: FieldConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, FlybyRng::new(seed))
    }
}

impl<R: RandomSource> ChaosField<R> {
    /// Creates a field drawing randomness from `rng`.
    ///
    /// The viewport defaults to [`Viewport::default`]; see [`Self::with_viewport`].
    pub fn with_rng(config: FieldConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            social: Pool::new(PoolKind::Social, config.social.capacity),
            emoji: Pool::new(PoolKind::Emoji, config.emoji.capacity),
            timeline: Timeline::new(),
            ids: IdAllocator::new(),
            switch: SuppressionSwitch::new(config.start_suppressed),
            rng,
            viewport: Box::new(Viewport::default()),
            now: 0.0,
            started: false,
            config,
        })
    }

    /// Sets the viewport source, queried once per spawn.
    pub fn with_viewport(mut self, provider: impl ViewportProvider + 'static) -> Self {
        self.viewport = Box::new(provider);
        self
    }

    /// Starts the field at host time `now`. Later calls do nothing.
    ///
    /// Unless suppressed, schedules the initial waves and spawns the first one.
    pub fn start(&mut self, now: f64) {
        if self.started {
            return;
        }
        self.started = true;
        self.now = now;
        if !self.switch.is_suppressed() {
            self.initialize(now);
            self.advance_timers(now);
        }
    }

    /// Enters or leaves suppression mode.
    ///
    /// Suppressing evicts every element, cancels every pending timer and
    /// starts a new id epoch. Resuming a started field refills it from scratch.
    pub fn set_suppressed(&mut self, suppressed: bool, now: f64) -> ModeChange {
        let change = self.switch.set(suppressed);
        match change {
            ModeChange::Suppressed => {
                let evicted = self.social.clear() + self.emoji.clear();
                let cancelled = self.timeline.clear();
                self.ids.reset();
                debug!(
                    "suppressed at {now}: evicted {evicted} elements, cancelled {cancelled} timers"
                );
            }
            ModeChange::Resumed => {
                debug!("resumed at {now}");
                if self.started && self.social.is_empty() && self.emoji.is_empty() {
                    self.initialize(now);
                    self.advance_timers(now);
                }
            }
            ModeChange::Unchanged => {}
        }
        change
    }

    /// Flips suppression mode.
    pub fn toggle(&mut self, now: f64) -> ModeChange {
        let suppressed = !self.switch.is_suppressed();
        self.set_suppressed(suppressed, now)
    }

    /// Fires every timer due at or before `now`, earliest first.
    pub fn advance_timers(&mut self, now: f64) {
        while let Some(due) = self.timeline.pop_due(now) {
            self.fire(due.at, due.payload);
        }
        self.now = self.now.max(now);
    }

    /// Updates every live flight to `now` and removes the ones that completed.
    ///
    /// Returns the ids completed during this call.
    pub fn tick(&mut self, now: f64) -> Vec<ElementId> {
        let mut completed = Vec::new();
        for kind in PoolKind::ALL {
            let pool = match kind {
                PoolKind::Social => &mut self.social,
                PoolKind::Emoji => &mut self.emoji,
            };
            for member in pool.members_mut() {
                if member.flight.tick(now, &mut self.rng) == FlightEvent::Completed {
                    completed.push(member.element.id);
                }
            }
        }
        self.now = self.now.max(now);
        for &id in &completed {
            self.complete(id, now);
        }
        completed
    }

    /// Fires due timers, then ticks. Call once per host frame.
    pub fn advance(&mut self, now: f64) -> Vec<ElementId> {
        self.advance_timers(now);
        self.tick(now)
    }

    /// Removes a completed element and schedules its replacement.
    ///
    /// Returns false, doing nothing, if no live element has `id`.
    pub fn complete(&mut self, id: ElementId, now: f64) -> bool {
        let Some(kind) = PoolKind::ALL
            .into_iter()
            .find(|&kind| self.pool(kind).contains(id))
        else {
            trace!("completion for unknown element {id} ignored");
            return false;
        };
        self.pool_mut(kind).remove(id);
        debug!("{kind} element {id} completed at {now}");

        if !self.switch.is_suppressed() && !self.pool(kind).is_full() {
            let delay = self
                .config
                .pool(kind)
                .replacement_delay
                .sample(&mut self.rng);
            let at = now + f64::from(delay);
            self.timeline.schedule(
                at,
                SpawnJob {
                    pool: kind,
                    count: 1,
                    epoch: self.ids.epoch(),
                    reason: SpawnReason::Replacement,
                },
            );
            trace!("{kind} replacement scheduled for {at}");
        }
        true
    }

    /// Returns a pool.
    pub fn pool(&self, kind: PoolKind) -> &Pool {
        match kind {
            PoolKind::Social => &self.social,
            PoolKind::Emoji => &self.emoji,
        }
    }

    fn pool_mut(&mut self, kind: PoolKind) -> &mut Pool {
        match kind {
            PoolKind::Social => &mut self.social,
            PoolKind::Emoji => &mut self.emoji,
        }
    }

    /// Looks up a live element.
    pub fn member(&self, id: ElementId) -> Option<&Member> {
        PoolKind::ALL
            .into_iter()
            .find_map(|kind| self.pool(kind).get(id))
    }

    /// Every live element, social first, in spawn order.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.social.iter().chain(self.emoji.iter())
    }

    /// Number of live elements across both pools.
    pub fn len(&self) -> usize {
        self.social.len() + self.emoji.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_suppressed(&self) -> bool {
        self.switch.is_suppressed()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Number of spawn timers still pending.
    pub fn pending_timers(&self) -> usize {
        self.timeline.len()
    }

    /// Deadline of the next spawn timer.
    pub fn next_timer(&self) -> Option<f64> {
        self.timeline.next_deadline()
    }

    /// Latest host time seen.
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Current viewport as reported by the provider.
    pub fn viewport(&self) -> Viewport {
        self.viewport.viewport()
    }

    /// Sprites of every live element, back to front.
    pub fn frame(&self) -> Vec<Sprite> {
        let mut sprites: Vec<Sprite> = self.members().map(Sprite::of).collect();
        sprites.sort_by(|a, b| a.depth.total_cmp(&b.depth).then(a.id.cmp(&b.id)));
        sprites
    }

    /// Draws the current frame onto `surface`.
    pub fn render(&self, surface: &mut impl DisplaySurface) {
        surface.begin_frame(self.viewport());
        for sprite in self.frame() {
            surface.draw(&sprite);
        }
        surface.end_frame();
    }

    fn initialize(&mut self, now: f64) {
        let epoch = self.ids.epoch();
        for kind in PoolKind::ALL {
            let sizes = self.config.wave_sizes(self.pool(kind).capacity());
            for (index, (wave, count)) in self.config.waves.iter().zip(sizes).enumerate() {
                if count == 0 {
                    continue;
                }
                self.timeline.schedule(
                    now + f64::from(wave.offset),
                    SpawnJob {
                        pool: kind,
                        count,
                        epoch,
                        reason: SpawnReason::Wave(index),
                    },
                );
            }
        }
        debug!(
            "initialized at {now}: {} spawn timers over {} waves",
            self.timeline.len(),
            self.config.waves.len()
        );
    }

    fn fire(&mut self, at: f64, job: SpawnJob) {
        if job.epoch != self.ids.epoch() {
            trace!("skipping {:?} spawn from epoch {}", job.reason, job.epoch);
            return;
        }
        if self.switch.is_suppressed() {
            trace!("skipping {:?} spawn while suppressed", job.reason);
            return;
        }
        let vacancies = self.pool(job.pool).vacancies();
        if vacancies < job.count {
            trace!(
                "{} pool has {vacancies} free slots, dropping {} of {:?} spawn",
                job.pool,
                job.count - vacancies,
                job.reason
            );
        }
        for _ in 0..job.count.min(vacancies) {
            self.spawn(job.pool, at);
        }
    }

    fn spawn(&mut self, kind: PoolKind, at: f64) {
        let viewport = self.viewport.viewport();
        let id = self.ids.allocate();
        let content = match kind {
            PoolKind::Social => ElementContent::Social(SocialKind::random(&mut self.rng)),
            PoolKind::Emoji => ElementContent::Emoji(Glyph::random(&mut self.rng)),
        };
        let flight = Flight::spawn(&self.config.pool(kind).preset, viewport, at, &mut self.rng);
        let member = Member {
            element: Element { id, content },
            flight,
        };
        match self.pool_mut(kind).insert(member) {
            Ok(()) => debug!("spawned {kind} element {id} ({content}) at {at}"),
            Err(rejected) => trace!("{kind} element {id} not inserted: {rejected:?}"),
        }
    }
}

impl<R: RandomSource> fmt::Debug for ChaosField<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChaosField")
            .field("social", &self.social.len())
            .field("emoji", &self.emoji.len())
            .field("timeline", &self.timeline)
            .field("epoch", &self.ids.epoch())
            .field("suppressed", &self.switch.is_suppressed())
            .field("now", &self.now)
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}
