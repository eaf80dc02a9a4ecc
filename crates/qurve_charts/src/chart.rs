//! The chart instance every producer registers with.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use qurve_core::{event_types, Disposer, Event, EventData, FrameRequester};
use qurve_paint::{Color, DrawContext, Point, Rect};
use rustc_hash::FxHashMap;

use crate::data::{finite_values, CacheId, DataKey, Dataset};
use crate::draw::TickFormatter;
use crate::error::{ChartError, Result};
use crate::interaction::{InteractionRouter, TooltipItem};
use crate::layout::{Layout, Margin};
use crate::project::{project_points, ProjectedPoint};
use crate::render::{FlushStats, RenderScheduler};
use crate::scale::{auto_index_domain, auto_value_domain, LinearScale, DEFAULT_DOMAIN};

/// Surface configuration for a new chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartProps {
    pub width: f32,
    pub height: f32,
    pub margin: Margin,
    pub dpr: f32,
    pub background: Color,
}

impl Default for ChartProps {
    fn default() -> Self {
        let layout = Layout::default();
        Self {
            width: layout.width,
            height: layout.height,
            margin: layout.margin,
            dpr: layout.dpr,
            background: layout.background,
        }
    }
}

impl ChartProps {
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_dpr(mut self, dpr: f32) -> Self {
        self.dpr = dpr;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }
}

/// Where an axis takes its domain from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AxisDomain {
    /// Derived from the data.
    #[default]
    Auto,
    Fixed(f64, f64),
}

/// Scale configuration for the x or y role.
#[derive(Clone)]
pub struct AxisConfig {
    pub data_key: Option<DataKey>,
    pub domain: AxisDomain,
    pub reversed: bool,
    pub tick_count: usize,
    pub tick_formatter: Option<TickFormatter>,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            data_key: None,
            domain: AxisDomain::Auto,
            reversed: false,
            tick_count: 5,
            tick_formatter: None,
        }
    }
}

impl AxisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_key(mut self, key: impl Into<DataKey>) -> Self {
        self.data_key = Some(key.into());
        self
    }

    pub fn with_domain(mut self, min: f64, max: f64) -> Self {
        self.domain = AxisDomain::Fixed(min, max);
        self
    }

    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    pub fn with_tick_formatter<F>(mut self, f: F) -> Self
    where
        F: Fn(f64) -> String + 'static,
    {
        self.tick_formatter = Some(Rc::new(f));
        self
    }
}

impl fmt::Debug for AxisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisConfig")
            .field("data_key", &self.data_key)
            .field("domain", &self.domain)
            .field("reversed", &self.reversed)
            .field("tick_count", &self.tick_count)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisRole {
    X,
    Y,
}

#[derive(Default)]
struct AxisSlot {
    config: Option<AxisConfig>,
    generation: u64,
}

// Scales derived for one revision of the chart inputs.
#[derive(Default)]
struct ScaleCache {
    revision: u64,
    x: Option<LinearScale>,
    y: FxHashMap<Option<CacheId>, LinearScale>,
}

struct ChartInner {
    layout: Cell<Layout>,
    data: RefCell<Dataset>,
    x_axis: RefCell<AxisSlot>,
    y_axis: RefCell<AxisSlot>,
    axis_generation: Cell<u64>,
    revision: Cell<u64>,
    cache: RefCell<ScaleCache>,
    scheduler: Rc<RenderScheduler>,
    router: Rc<InteractionRouter>,
    mounted: Cell<bool>,
}

/// One chart: a drawing surface plus the registries its producers use.
///
/// Cheap to clone; clones share the same chart. Producers keep a
/// [`WeakChart`] so they never keep a chart alive on their own.
#[derive(Clone)]
pub struct Chart {
    inner: Rc<ChartInner>,
}

/// Non-owning chart handle.
#[derive(Clone)]
pub struct WeakChart {
    inner: Weak<ChartInner>,
}

impl WeakChart {
    pub fn upgrade(&self) -> Option<Chart> {
        self.inner.upgrade().map(|inner| Chart { inner })
    }
}

fn validate_size(width: f32, height: f32) -> Result<()> {
    if width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidSize { width, height })
    }
}

fn sanitize_dpr(dpr: f32) -> f32 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr
    } else {
        tracing::warn!(dpr, "invalid device pixel ratio, using 1.0");
        1.0
    }
}

impl Chart {
    /// Create a chart. `frames` is how the chart asks the host for a flush.
    pub fn new(
        data: impl Into<Dataset>,
        props: ChartProps,
        frames: Rc<dyn FrameRequester>,
    ) -> Result<Self> {
        validate_size(props.width, props.height)?;
        let layout = Layout {
            width: props.width,
            height: props.height,
            dpr: sanitize_dpr(props.dpr),
            margin: props.margin,
            background: props.background,
        };
        Ok(Self {
            inner: Rc::new(ChartInner {
                layout: Cell::new(layout),
                data: RefCell::new(data.into()),
                x_axis: RefCell::new(AxisSlot::default()),
                y_axis: RefCell::new(AxisSlot::default()),
                axis_generation: Cell::new(0),
                revision: Cell::new(0),
                cache: RefCell::new(ScaleCache::default()),
                scheduler: RenderScheduler::new(frames),
                router: InteractionRouter::new(),
                mounted: Cell::new(true),
            }),
        })
    }

    pub fn downgrade(&self) -> WeakChart {
        WeakChart {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.get()
    }

    fn ensure_mounted(&self) -> Result<()> {
        if self.is_mounted() {
            Ok(())
        } else {
            Err(ChartError::NotMounted)
        }
    }

    /// Detach the chart: drop every renderer, subscriber and resolver and
    /// cancel any pending repaint. Later registrations fail.
    pub fn unmount(&self) {
        if !self.inner.mounted.replace(false) {
            return;
        }
        self.inner.scheduler.clear();
        self.inner.scheduler.cancel();
        self.inner.router.clear();
        self.inner.cache.replace(ScaleCache::default());
        tracing::debug!("chart unmounted");
    }

    // ---- inputs -------------------------------------------------------

    /// Counter bumped whenever data, axes, margins, size or DPR change.
    /// Anything derived from an older revision is stale.
    pub fn revision(&self) -> u64 {
        self.inner.revision.get()
    }

    fn invalidate(&self) {
        self.inner.revision.set(self.inner.revision.get() + 1);
        self.request_repaint();
    }

    pub fn layout(&self) -> Layout {
        self.inner.layout.get()
    }

    pub fn width(&self) -> f32 {
        self.layout().width
    }

    pub fn height(&self) -> f32 {
        self.layout().height
    }

    pub fn dpr(&self) -> f32 {
        self.layout().dpr
    }

    pub fn margin(&self) -> Margin {
        self.layout().margin
    }

    pub fn inner_width(&self) -> f32 {
        self.layout().inner_width()
    }

    pub fn inner_height(&self) -> f32 {
        self.layout().inner_height()
    }

    pub fn inner_rect(&self) -> Rect {
        self.layout().inner_rect()
    }

    fn update_layout(&self, f: impl FnOnce(&mut Layout)) {
        let before = self.inner.layout.get();
        let mut after = before;
        f(&mut after);
        if after != before {
            self.inner.layout.set(after);
            self.invalidate();
        }
    }

    pub fn set_size(&self, width: f32, height: f32) -> Result<()> {
        validate_size(width, height)?;
        self.update_layout(|l| {
            l.width = width;
            l.height = height;
        });
        Ok(())
    }

    pub fn set_dpr(&self, dpr: f32) {
        let dpr = sanitize_dpr(dpr);
        self.update_layout(|l| l.dpr = dpr);
    }

    pub fn set_margin(&self, margin: Margin) {
        self.update_layout(|l| l.margin = margin);
    }

    pub fn set_background(&self, background: Color) {
        self.update_layout(|l| l.background = background);
    }

    pub fn data(&self) -> Dataset {
        self.inner.data.borrow().clone()
    }

    /// Replace the dataset. Passing the same dataset again is a no-op.
    pub fn set_data(&self, data: impl Into<Dataset>) {
        let data = data.into();
        if self.inner.data.borrow().ptr_eq(&data) {
            return;
        }
        let empty = data.is_empty();
        *self.inner.data.borrow_mut() = data;
        if empty {
            self.inner.router.set_hovered(None);
        }
        self.invalidate();
    }

    // ---- axes and scales ---------------------------------------------

    fn axis_slot(&self, role: AxisRole) -> &RefCell<AxisSlot> {
        match role {
            AxisRole::X => &self.inner.x_axis,
            AxisRole::Y => &self.inner.y_axis,
        }
    }

    /// Install (or with `None`, clear) the configuration for `role`. The last
    /// registration wins.
    ///
    /// Returns a generation number for [`Chart::release_axis`].
    pub fn set_axis(&self, role: AxisRole, config: Option<AxisConfig>) -> Result<u64> {
        self.ensure_mounted()?;
        let generation = self.inner.axis_generation.get() + 1;
        self.inner.axis_generation.set(generation);
        let replaced = {
            let mut slot = self.axis_slot(role).borrow_mut();
            let replaced = slot.config.is_some();
            slot.config = config;
            slot.generation = generation;
            replaced
        };
        tracing::debug!(?role, replaced, generation, "axis configured");
        self.invalidate();
        Ok(generation)
    }

    pub fn set_x_axis(&self, config: Option<AxisConfig>) -> Result<u64> {
        self.set_axis(AxisRole::X, config)
    }

    pub fn set_y_axis(&self, config: Option<AxisConfig>) -> Result<u64> {
        self.set_axis(AxisRole::Y, config)
    }

    /// Clear `role` back to defaults, but only if the configuration installed
    /// under `generation` is still the active one.
    pub fn release_axis(&self, role: AxisRole, generation: u64) {
        let released = {
            let mut slot = self.axis_slot(role).borrow_mut();
            if slot.generation == generation && slot.config.is_some() {
                slot.config = None;
                true
            } else {
                false
            }
        };
        if released {
            tracing::debug!(?role, generation, "axis released");
            self.invalidate();
        }
    }

    pub fn axis(&self, role: AxisRole) -> Option<AxisConfig> {
        self.axis_slot(role).borrow().config.clone()
    }

    pub fn x_axis(&self) -> Option<AxisConfig> {
        self.axis(AxisRole::X)
    }

    pub fn y_axis(&self) -> Option<AxisConfig> {
        self.axis(AxisRole::Y)
    }

    fn with_cache<R>(&self, f: impl FnOnce(&mut ScaleCache) -> R) -> R {
        let mut cache = self.inner.cache.borrow_mut();
        let revision = self.revision();
        if cache.revision != revision {
            *cache = ScaleCache {
                revision,
                ..ScaleCache::default()
            };
        }
        f(&mut cache)
    }

    /// Horizontal scale onto `[0, inner_width]`.
    ///
    /// Domain: the axis' fixed domain, else the extent of its accessor's
    /// values, else `[0, len - 1]`.
    pub fn x_scale(&self) -> LinearScale {
        if let Some(s) = self.with_cache(|c| c.x) {
            return s;
        }
        let axis = self.x_axis().unwrap_or_default();
        let data = self.data();
        let (d0, d1) = match (axis.domain, axis.data_key.as_ref()) {
            (AxisDomain::Fixed(min, max), _) => (min, max),
            (AxisDomain::Auto, Some(key)) => {
                auto_index_domain(finite_values(&data, Some(key))).unwrap_or((0.0, index_max(&data)))
            }
            (AxisDomain::Auto, None) => (0.0, index_max(&data)),
        };
        let w = self.inner_width() as f64;
        let (r0, r1) = if axis.reversed { (w, 0.0) } else { (0.0, w) };
        let scale = LinearScale::new(d0, d1, r0, r1);
        self.with_cache(|c| c.x = Some(scale));
        scale
    }

    /// Vertical scale onto `[inner_height, 0]` (larger values higher up).
    ///
    /// `key` selects the series whose values size an automatic domain; it
    /// falls back to the y axis' accessor, then to each record's first
    /// numeric field. A fixed y axis domain applies to every series.
    pub fn y_scale(&self, key: Option<&DataKey>) -> LinearScale {
        let axis = self.y_axis().unwrap_or_default();
        let key = key.cloned().or(axis.data_key.clone());
        let cache_key = key.as_ref().map(DataKey::cache_id);
        if let Some(s) = self.with_cache(|c| c.y.get(&cache_key).copied()) {
            return s;
        }

        let data = self.data();
        let (d0, d1) = match axis.domain {
            AxisDomain::Fixed(min, max) => (min, max),
            AxisDomain::Auto if data.is_empty() => DEFAULT_DOMAIN,
            AxisDomain::Auto => auto_value_domain(finite_values(&data, key.as_ref())),
        };
        let h = self.inner_height() as f64;
        let (r0, r1) = if axis.reversed { (0.0, h) } else { (h, 0.0) };
        let scale = LinearScale::new(d0, d1, r0, r1);
        self.with_cache(|c| {
            c.y.insert(cache_key, scale);
        });
        scale
    }

    /// Project the dataset for a series whose y values come from `y_key`,
    /// using the current x axis.
    pub fn project(&self, y_key: Option<&DataKey>) -> Vec<ProjectedPoint> {
        let x_axis = self.x_axis();
        let x_key = x_axis.as_ref().and_then(|a| a.data_key.as_ref());
        project_points(
            &self.data(),
            self.layout().origin(),
            x_key,
            y_key,
            &self.x_scale(),
            &self.y_scale(y_key),
        )
    }

    // ---- rendering ----------------------------------------------------

    /// Register a draw callback on top of the existing ones.
    pub fn register_render<F>(&self, label: &str, render: F) -> Result<Disposer>
    where
        F: FnMut(&mut dyn DrawContext) -> anyhow::Result<()> + 'static,
    {
        self.ensure_mounted()?;
        Ok(self.inner.scheduler.register(label, render))
    }

    pub fn request_repaint(&self) {
        if self.is_mounted() {
            self.inner.scheduler.request_repaint();
        }
    }

    pub fn is_repaint_pending(&self) -> bool {
        self.inner.scheduler.is_pending()
    }

    pub fn renderer_count(&self) -> usize {
        self.inner.scheduler.len()
    }

    pub fn flush_count(&self) -> u64 {
        self.inner.scheduler.flush_count()
    }

    /// Run one frame: clear the surface and run every renderer. Called by
    /// the host on the display tick it was asked for.
    pub fn flush(&self, ctx: &mut dyn DrawContext) -> FlushStats {
        if !self.is_mounted() {
            return FlushStats::default();
        }
        self.inner.scheduler.flush(ctx, &self.layout())
    }

    // ---- interaction --------------------------------------------------

    pub fn subscribe_pointer_move<F>(&self, label: &str, f: F) -> Result<Disposer>
    where
        F: FnMut(f32, f32) -> anyhow::Result<()> + 'static,
    {
        self.ensure_mounted()?;
        Ok(self.inner.router.subscribe_pointer_move(label, f))
    }

    pub fn subscribe_pointer_leave<F>(&self, label: &str, f: F) -> Result<Disposer>
    where
        F: FnMut() -> anyhow::Result<()> + 'static,
    {
        self.ensure_mounted()?;
        Ok(self.inner.router.subscribe_pointer_leave(label, f))
    }

    pub fn register_tooltip_resolver<F>(&self, label: &str, f: F) -> Result<Disposer>
    where
        F: Fn(usize) -> anyhow::Result<Option<TooltipItem>> + 'static,
    {
        self.ensure_mounted()?;
        Ok(self.inner.router.register_tooltip_resolver(label, f))
    }

    pub fn tooltip_payload(&self, index: usize) -> Vec<TooltipItem> {
        self.inner.router.tooltip_payload(index)
    }

    pub fn current_tooltip_payload(&self) -> Vec<TooltipItem> {
        self.inner.router.current_payload()
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.inner.router.hovered()
    }

    /// Set the active data index; repaints when it changes.
    pub fn set_hovered_index(&self, index: Option<usize>) {
        if self.inner.router.set_hovered(index) {
            self.request_repaint();
        }
    }

    /// Last surface-local pointer position.
    pub fn pointer(&self) -> Option<Point> {
        self.inner.router.pointer()
    }

    /// Client-space position of the surface's top-left corner, used to turn
    /// client pointer coordinates into surface coordinates.
    pub fn set_surface_origin(&self, x: f32, y: f32) {
        self.inner.router.set_surface_origin(Point::new(x, y));
    }

    /// Returns the number of subscribers that failed.
    pub fn pointer_move(&self, client_x: f32, client_y: f32) -> usize {
        if !self.is_mounted() {
            return 0;
        }
        self.inner.router.pointer_move(client_x, client_y)
    }

    /// Returns the number of subscribers that failed.
    pub fn pointer_leave(&self) -> usize {
        if !self.is_mounted() {
            return 0;
        }
        let failed = self.inner.router.pointer_leave();
        self.request_repaint();
        failed
    }

    /// Feed a host event to the chart.
    pub fn handle_event(&self, event: &Event) -> Result<()> {
        match (event.event_type, &event.data) {
            (event_types::POINTER_MOVE, EventData::Pointer { x, y, .. }) => {
                self.pointer_move(*x, *y);
            }
            (event_types::POINTER_LEAVE, _) => {
                self.pointer_leave();
            }
            (event_types::RESIZE, EventData::Resize { width, height }) => {
                self.set_size(*width, *height)?;
            }
            (event_types::SCALE_FACTOR, EventData::ScaleFactor(dpr)) => {
                self.set_dpr(*dpr);
            }
            _ => {}
        }
        Ok(())
    }
}

fn index_max(data: &Dataset) -> f64 {
    data.len().saturating_sub(1) as f64
}

impl fmt::Debug for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chart")
            .field("layout", &self.layout())
            .field("data", &*self.inner.data.borrow())
            .field("revision", &self.revision())
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record;
    use qurve_core::ManualFrames;

    fn chart(records: Vec<crate::Record>) -> (Rc<ManualFrames>, Chart) {
        let frames = ManualFrames::new();
        let chart = Chart::new(records, ChartProps::default(), frames.clone()).unwrap();
        (frames, chart)
    }

    fn xy(points: &[(f64, f64)]) -> Vec<crate::Record> {
        points.iter().map(|&(x, y)| record([("x", x), ("y", y)])).collect()
    }

    #[test]
    fn rejects_invalid_size() {
        let frames = ManualFrames::new();
        let err = Chart::new(
            Dataset::default(),
            ChartProps::default().with_size(f32::NAN, 10.0),
            frames,
        )
        .unwrap_err();
        assert!(matches!(err, ChartError::InvalidSize { .. }));
    }

    #[test]
    fn invalid_dpr_falls_back_to_one() {
        let (_f, chart) = chart(Vec::new());
        chart.set_dpr(0.0);
        assert_eq!(chart.dpr(), 1.0);
        chart.set_dpr(2.0);
        assert_eq!(chart.dpr(), 2.0);
    }

    #[test]
    fn x_scale_defaults_to_index_domain() {
        let (_f, chart) = chart(xy(&[(0.0, 1.0), (5.0, 2.0), (9.0, 3.0)]));
        assert_eq!(chart.x_scale().domain(), (0.0, 2.0));
        assert_eq!(chart.x_scale().range(), (0.0, 600.0));
    }

    #[test]
    fn x_scale_uses_accessor_extent_and_reversal() {
        let (_f, chart) = chart(xy(&[(3.0, 1.0), (3.0, 2.0)]));
        chart
            .set_x_axis(Some(AxisConfig::new().with_data_key("x").with_reversed(true)))
            .unwrap();
        let s = chart.x_scale();
        assert_eq!(s.domain(), (2.0, 4.0));
        assert_eq!(s.range(), (600.0, 0.0));
    }

    #[test]
    fn y_scale_pads_auto_domain() {
        let (_f, chart) = chart(xy(&[(0.0, 10.0), (1.0, 20.0)]));
        let s = chart.y_scale(Some(&DataKey::field("y")));
        assert_eq!(s.domain(), (9.0, 21.0));
        assert_eq!(s.range(), (300.0, 0.0));
    }

    #[test]
    fn y_scale_empty_data_uses_default_domain() {
        let (_f, chart) = chart(Vec::new());
        assert_eq!(chart.y_scale(None).domain(), DEFAULT_DOMAIN);
    }

    #[test]
    fn fixed_y_domain_applies_to_every_series() {
        let (_f, chart) = chart(xy(&[(0.0, 10.0), (1.0, 20.0)]));
        chart
            .set_y_axis(Some(AxisConfig::new().with_domain(0.0, 50.0)))
            .unwrap();
        assert_eq!(chart.y_scale(Some(&DataKey::field("y"))).domain(), (0.0, 50.0));
        assert_eq!(chart.y_scale(Some(&DataKey::field("x"))).domain(), (0.0, 50.0));
    }

    #[test]
    fn scales_are_recomputed_after_changes() {
        let (_f, chart) = chart(xy(&[(0.0, 1.0), (1.0, 2.0)]));
        let before = chart.x_scale();
        chart.set_margin(Margin::new(0.0, 100.0, 0.0, 0.0));
        assert_ne!(chart.x_scale(), before);
        assert_eq!(chart.x_scale().range(), (0.0, 500.0));
        chart.set_data(xy(&[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]));
        assert_eq!(chart.x_scale().domain(), (0.0, 2.0));
    }

    #[test]
    fn last_axis_registration_wins_and_stale_release_is_ignored() {
        let (_f, chart) = chart(xy(&[(0.0, 1.0)]));
        let first = chart
            .set_x_axis(Some(AxisConfig::new().with_domain(0.0, 1.0)))
            .unwrap();
        let second = chart
            .set_x_axis(Some(AxisConfig::new().with_domain(0.0, 2.0)))
            .unwrap();
        chart.release_axis(AxisRole::X, first);
        assert_eq!(chart.x_scale().domain(), (0.0, 2.0));
        chart.release_axis(AxisRole::X, second);
        assert!(chart.x_axis().is_none());
    }

    #[test]
    fn changes_request_a_single_frame_until_flushed() {
        let (frames, chart) = chart(Vec::new());
        chart.set_size(100.0, 100.0).unwrap();
        chart.set_margin(Margin::uniform(5.0));
        chart.set_dpr(2.0);
        assert_eq!(frames.requests(), 1);
        chart.flush(&mut qurve_paint::PaintContext::new());
        chart.set_size(200.0, 100.0).unwrap();
        assert_eq!(frames.requests(), 2);
    }

    #[test]
    fn unmounted_chart_rejects_registration() {
        let (frames, chart) = chart(Vec::new());
        let _r = chart.register_render("r", |_| Ok(())).unwrap();
        chart.unmount();
        assert!(!chart.is_repaint_pending());
        assert_eq!(chart.renderer_count(), 0);
        assert_eq!(
            chart.register_render("late", |_| Ok(())).err(),
            Some(ChartError::NotMounted)
        );
        assert_eq!(chart.set_x_axis(None).err(), Some(ChartError::NotMounted));
        chart.request_repaint();
        assert_eq!(frames.requests(), 1);
    }

    #[test]
    fn resize_event_validates() {
        let (_f, chart) = chart(Vec::new());
        chart.handle_event(&Event::resize(320.0, 200.0)).unwrap();
        assert_eq!((chart.width(), chart.height()), (320.0, 200.0));
        assert!(chart.handle_event(&Event::resize(-1.0, 200.0)).is_err());
    }
}
