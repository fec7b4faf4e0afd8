//! The masonry engine handle.
//!
//! [`Masonry`] owns its host, its configuration and a virtual-clock timer
//! queue. Every deferred step (initial layout, relayout after hiding,
//! staggered reveals, debounced resize) is a typed task on that queue; the
//! caller drives time with [`Masonry::advance`].

use crate::config::MasonryConfig;
use crate::filter::{Filter, Partition};
use crate::host::{ItemStyles, MasonryHost};
use animation::TransitionAnimator;
use common::geometry::Point;
use common::MosaicResult;
use dom::style::{StyleProperty, StyleValue};
use layout::{BreakpointResolver, ColumnBalancer, MasonryLayout};
use scheduler::{Debouncer, FiredTimer, TimerQueue};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info, trace};

/// Where the filter sequence currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum FilterPhase {
    #[default]
    Idle,
    /// Unmatched items are fading out; relayout is pending.
    Hiding,
    Relayout,
    Revealing,
}

/// Visibility of a single item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Visibility {
    Visible,
    Hidden,
    /// Matched by the current filter, waiting for its reveal.
    Transitioning,
}

/// Engine-side record of one item.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemState<I> {
    pub item: I,
    /// Assigned column, if the item was placed by the last pass.
    pub column: Option<usize>,
    pub position: Option<Point>,
    pub visibility: Visibility,
}

impl<I> ItemState<I> {
    fn new(item: I) -> Self {
        Self {
            item,
            column: None,
            position: None,
            visibility: Visibility::Visible,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EngineTask {
    InitialLayout,
    Relayout { generation: u64 },
    Reveal { generation: u64, item: usize },
    ResizeRelayout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    /// No container was found. Every operation is a no-op.
    Inert,
    Active,
    Destroyed,
}

/// A masonry grid bound to one container.
pub struct Masonry<H: MasonryHost> {
    host: H,
    config: MasonryConfig,
    resolver: BreakpointResolver,
    animator: TransitionAnimator,
    timers: TimerQueue<EngineTask>,
    resize: Debouncer,
    lifecycle: Lifecycle,
    items: Vec<ItemState<H::Item>>,
    filter: Filter,
    /// Indices into `items` matched by `filter`, in registration order.
    matched: Vec<usize>,
    phase: FilterPhase,
    generation: u64,
    last_layout: Option<MasonryLayout>,
    layout_passes: u64,
}

impl<H: MasonryHost> Masonry<H> {
    /// Bind to the host's container and schedule the first layout.
    ///
    /// An invalid configuration is an error. A missing container is not:
    /// it is logged and the returned engine is inert.
    pub fn new(host: H, config: MasonryConfig) -> MosaicResult<Self> {
        config.validate()?;

        let resolver = BreakpointResolver::new(config.gutter, config.column_width);
        let animator = TransitionAnimator::new(
            config.transition_duration,
            config.hidden_style.clone(),
            config.visible_style.clone(),
        );
        let resize = Debouncer::new(config.resize_debounce);

        let mut engine = Self {
            host,
            config,
            resolver,
            animator,
            timers: TimerQueue::new(),
            resize,
            lifecycle: Lifecycle::Inert,
            items: Vec::new(),
            filter: Filter::All,
            matched: Vec::new(),
            phase: FilterPhase::Idle,
            generation: 0,
            last_layout: None,
            layout_passes: 0,
        };

        if !engine.host.has_container() {
            error!("masonry container not found, engine is inert");
            return Ok(engine);
        }
        engine.lifecycle = Lifecycle::Active;

        engine
            .host
            .set_container_style(StyleProperty::Position, StyleValue::Keyword("relative"));
        let transition = engine.animator.container_transition();
        engine
            .host
            .set_container_style(StyleProperty::Transition, transition);

        engine.discover();
        engine
            .timers
            .schedule(engine.config.initial_layout_delay, EngineTask::InitialLayout);

        info!(
            items = engine.items.len(),
            selector = %engine.config.item_selector,
            "masonry initialized"
        );
        Ok(engine)
    }

    fn discover(&mut self) {
        let found = self.host.discover_items(&self.config.item_selector);
        self.items = found.into_iter().map(ItemState::new).collect();

        let mut styles = ItemStyles(&mut self.host);
        for state in &self.items {
            self.animator.apply_base(&mut styles, &state.item);
        }
        self.repartition();
    }

    fn repartition(&mut self) -> Partition {
        let host = &self.host;
        let items = &self.items;
        let partition = Partition::split(items, &self.filter, |state, tag| {
            host.has_tag(&state.item, tag)
        });
        self.matched = partition.matched.clone();
        partition
    }

    /// Run one layout pass over the matched items.
    ///
    /// Widths are written before each measurement, positions and the
    /// container height after the pass. Returns `None` when inert.
    pub fn layout(&mut self) -> Option<&MasonryLayout> {
        if !self.is_active() {
            return None;
        }

        let host = &mut self.host;
        let geometry = self.resolver.resolve_with(|| host.container_width());
        let balancer = ColumnBalancer::new(geometry, self.resolver.gutter());

        let items = &self.items;
        let result = balancer.balance(&self.matched, |&index, width| {
            let item = &items[index].item;
            host.set_item_style(item, StyleProperty::Width, StyleValue::Px(width));
            host.measure_height(item, width)
        });

        for state in &mut self.items {
            state.column = None;
            state.position = None;
        }
        for placement in &result.placements {
            let state = &mut self.items[self.matched[placement.index]];
            let position = placement.position();
            self.host
                .set_item_style(&state.item, StyleProperty::Left, StyleValue::Px(position.x));
            self.host
                .set_item_style(&state.item, StyleProperty::Top, StyleValue::Px(position.y));
            state.column = Some(placement.column);
            state.position = Some(position);
        }
        self.host.set_container_style(
            StyleProperty::Height,
            StyleValue::Px(result.container_height),
        );

        self.layout_passes += 1;
        debug!(
            pass = self.layout_passes,
            matched = self.matched.len(),
            columns = geometry.columns,
            height = result.container_height,
            "layout applied"
        );
        self.last_layout = Some(result);
        self.last_layout.as_ref()
    }

    /// Switch to `filter`.
    ///
    /// Unmatched items are hidden at once. Relayout runs after half the
    /// transition duration, then matched items are revealed one by one.
    /// Calling this again before the sequence finishes starts it over; the
    /// steps still pending from the earlier call are dropped.
    pub fn arrange(&mut self, filter: impl Into<Filter>) {
        if !self.is_active() {
            return;
        }
        self.filter = filter.into();
        self.generation += 1;

        let partition = self.repartition();
        let mut styles = ItemStyles(&mut self.host);
        for &index in &partition.unmatched {
            let state = &mut self.items[index];
            self.animator.apply_hidden(&mut styles, &state.item);
            state.visibility = Visibility::Hidden;
        }
        for &index in &partition.matched {
            self.items[index].visibility = Visibility::Transitioning;
        }

        self.phase = FilterPhase::Hiding;
        self.timers.schedule(
            self.animator.hide_delay(),
            EngineTask::Relayout {
                generation: self.generation,
            },
        );
        debug!(
            filter = %self.filter,
            generation = self.generation,
            matched = partition.matched.len(),
            hidden = partition.unmatched.len(),
            "arrange"
        );
    }

    /// Re-enumerate items and rerun the current filter.
    pub fn reload_items(&mut self) {
        if !self.is_active() {
            return;
        }
        self.discover();
        debug!(items = self.items.len(), "items reloaded");
        self.arrange(self.filter.clone());
    }

    /// Tell the engine the container may have changed size.
    ///
    /// Bursts collapse: layout runs once, a quiet period after the last call.
    pub fn notify_resize(&mut self) {
        if !self.is_active() {
            return;
        }
        self.resize.signal(&mut self.timers, EngineTask::ResizeRelayout);
    }

    /// Remove every style the engine applied, cancel pending work and go
    /// inert. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.lifecycle == Lifecycle::Destroyed {
            return;
        }
        let cancelled = self.timers.cancel_all();
        self.resize.cancel(&mut self.timers);

        let mut styles = ItemStyles(&mut self.host);
        for state in &self.items {
            self.animator.clear(&mut styles, &state.item);
        }
        if self.lifecycle == Lifecycle::Active {
            for property in [
                StyleProperty::Height,
                StyleProperty::Position,
                StyleProperty::Transition,
            ] {
                self.host.clear_container_style(property);
            }
        }

        self.items.clear();
        self.matched.clear();
        self.phase = FilterPhase::Idle;
        self.last_layout = None;
        self.lifecycle = Lifecycle::Destroyed;
        info!(cancelled, "masonry destroyed");
    }

    /// Advance the clock by `elapsed`, running every task that comes due.
    ///
    /// Tasks scheduled while running are honoured in the same call when
    /// they fall inside the window.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.timers.now().saturating_add(elapsed);
        while let Some(fired) = self.timers.pop_due(until) {
            self.dispatch(fired);
        }
        self.timers.advance_clock(until);
    }

    /// Run until no timers remain. Returns the virtual time that passed.
    pub fn run_until_idle(&mut self) -> Duration {
        let start = self.timers.now();
        while let Some(deadline) = self.timers.next_deadline() {
            let step = deadline.saturating_sub(self.timers.now());
            self.advance(step);
        }
        self.timers.now() - start
    }

    fn dispatch(&mut self, fired: FiredTimer<EngineTask>) {
        trace!(task = ?fired.payload, at_ms = fired.deadline.as_millis() as u64, "task due");
        match fired.payload {
            EngineTask::InitialLayout => {
                self.layout();
            }
            EngineTask::ResizeRelayout => {
                if self.resize.settle(fired.id) {
                    self.layout();
                }
            }
            EngineTask::Relayout { generation } => {
                if generation != self.generation {
                    debug!(generation, current = self.generation, "stale relayout dropped");
                    return;
                }
                self.phase = FilterPhase::Relayout;
                self.layout();

                self.phase = FilterPhase::Revealing;
                let matched = &self.matched;
                self.animator.schedule_reveal(
                    &mut self.timers,
                    matched.len(),
                    self.config.reveal_stagger,
                    |index| EngineTask::Reveal {
                        generation,
                        item: matched[index],
                    },
                );
                debug!(generation, reveals = self.matched.len(), "reveals scheduled");
                self.phase = FilterPhase::Idle;
            }
            EngineTask::Reveal { generation, item } => {
                if generation != self.generation {
                    debug!(generation, item, "stale reveal dropped");
                    return;
                }
                let mut styles = ItemStyles(&mut self.host);
                if let Some(state) = self.items.get_mut(item) {
                    self.animator.apply_visible(&mut styles, &state.item);
                    state.visibility = Visibility::Visible;
                }
            }
        }
    }

    /// Items matched by the current filter, in registration order.
    pub fn filtered_items(&self) -> Vec<H::Item> {
        self.matched
            .iter()
            .map(|&index| self.items[index].item.clone())
            .collect()
    }

    pub fn current_filter(&self) -> &Filter {
        &self.filter
    }

    pub fn phase(&self) -> FilterPhase {
        self.phase
    }

    pub fn items(&self) -> &[ItemState<H::Item>] {
        &self.items
    }

    pub fn item_state(&self, index: usize) -> Option<&ItemState<H::Item>> {
        self.items.get(index)
    }

    pub fn last_layout(&self) -> Option<&MasonryLayout> {
        self.last_layout.as_ref()
    }

    /// Number of layout passes applied so far.
    pub fn layout_passes(&self) -> u64 {
        self.layout_passes
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// No filter sequence running and nothing scheduled.
    pub fn is_quiescent(&self) -> bool {
        self.phase == FilterPhase::Idle && self.timers.is_empty()
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    pub fn config(&self) -> &MasonryConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
