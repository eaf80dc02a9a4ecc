//! Pointer routing, hover state and tooltip resolvers.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use qurve_core::{Disposer, Registry};
use qurve_paint::{Color, Point};

use crate::project::ProjectedPoint;

/// One row of tooltip content contributed by a series.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipItem {
    /// Data key the value came from.
    pub key: String,
    /// Display name.
    pub label: String,
    pub value: Option<f64>,
    pub color: Option<Color>,
}

pub type PointerMoveFn = dyn FnMut(f32, f32) -> anyhow::Result<()>;
pub type PointerLeaveFn = dyn FnMut() -> anyhow::Result<()>;
pub type TooltipResolverFn = dyn Fn(usize) -> anyhow::Result<Option<TooltipItem>>;

/// Fans pointer input out to subscribers and owns the hover state.
pub struct InteractionRouter {
    move_subscribers: RefCell<Registry<Rc<RefCell<PointerMoveFn>>>>,
    leave_subscribers: RefCell<Registry<Rc<RefCell<PointerLeaveFn>>>>,
    resolvers: RefCell<Registry<Rc<TooltipResolverFn>>>,
    hovered: Cell<Option<usize>>,
    pointer: Cell<Option<Point>>,
    surface_origin: Cell<Point>,
}

impl InteractionRouter {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            move_subscribers: RefCell::new(Registry::new()),
            leave_subscribers: RefCell::new(Registry::new()),
            resolvers: RefCell::new(Registry::new()),
            hovered: Cell::new(None),
            pointer: Cell::new(None),
            surface_origin: Cell::new(Point::ZERO),
        })
    }

    /// Client-space position of the surface's top-left corner.
    pub fn set_surface_origin(&self, origin: Point) {
        self.surface_origin.set(origin);
    }

    pub fn surface_origin(&self) -> Point {
        self.surface_origin.get()
    }

    /// Last local pointer position, `None` once the pointer has left.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer.get()
    }

    pub fn subscribe_pointer_move<F>(self: &Rc<Self>, label: &str, f: F) -> Disposer
    where
        F: FnMut(f32, f32) -> anyhow::Result<()> + 'static,
    {
        let f: Rc<RefCell<PointerMoveFn>> = Rc::new(RefCell::new(f));
        let id = self.move_subscribers.borrow_mut().insert(label, f);
        let weak: Weak<Self> = Rc::downgrade(self);
        Disposer::new(move || {
            if let Some(router) = weak.upgrade() {
                router.move_subscribers.borrow_mut().remove(id);
            }
        })
    }

    pub fn subscribe_pointer_leave<F>(self: &Rc<Self>, label: &str, f: F) -> Disposer
    where
        F: FnMut() -> anyhow::Result<()> + 'static,
    {
        let f: Rc<RefCell<PointerLeaveFn>> = Rc::new(RefCell::new(f));
        let id = self.leave_subscribers.borrow_mut().insert(label, f);
        let weak: Weak<Self> = Rc::downgrade(self);
        Disposer::new(move || {
            if let Some(router) = weak.upgrade() {
                router.leave_subscribers.borrow_mut().remove(id);
            }
        })
    }

    pub fn register_tooltip_resolver<F>(self: &Rc<Self>, label: &str, f: F) -> Disposer
    where
        F: Fn(usize) -> anyhow::Result<Option<TooltipItem>> + 'static,
    {
        let f: Rc<TooltipResolverFn> = Rc::new(f);
        let id = self.resolvers.borrow_mut().insert(label, f);
        let weak: Weak<Self> = Rc::downgrade(self);
        Disposer::new(move || {
            if let Some(router) = weak.upgrade() {
                router.resolvers.borrow_mut().remove(id);
            }
        })
    }

    /// Convert a client-space position to surface-local coordinates and
    /// notify every move subscriber in subscription order.
    ///
    /// Returns the number of subscribers that failed.
    pub fn pointer_move(&self, client_x: f32, client_y: f32) -> usize {
        let origin = self.surface_origin.get();
        let (x, y) = (client_x - origin.x, client_y - origin.y);
        self.pointer.set(Some(Point::new(x, y)));

        let subscribers = self.move_subscribers.borrow().snapshot();
        let mut failed = 0;
        for (_, label, sub) in subscribers.iter() {
            let result = match sub.try_borrow_mut() {
                Ok(mut sub) => (&mut *sub)(x, y),
                Err(_) => Err(anyhow::anyhow!("pointer subscriber re-entered")),
            };
            if let Err(err) = result {
                failed += 1;
                tracing::error!(subscriber = %label, "pointer subscriber failed: {err:#}");
            }
        }
        failed
    }

    /// Pointer left the surface: clear hover state and notify leave
    /// subscribers. Returns the number of subscribers that failed.
    pub fn pointer_leave(&self) -> usize {
        self.pointer.set(None);
        self.set_hovered(None);

        let subscribers = self.leave_subscribers.borrow().snapshot();
        let mut failed = 0;
        for (_, label, sub) in subscribers.iter() {
            let result = match sub.try_borrow_mut() {
                Ok(mut sub) => (&mut *sub)(),
                Err(_) => Err(anyhow::anyhow!("pointer subscriber re-entered")),
            };
            if let Err(err) = result {
                failed += 1;
                tracing::error!(subscriber = %label, "pointer leave subscriber failed: {err:#}");
            }
        }
        failed
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered.get()
    }

    /// Returns whether the hovered index changed.
    pub fn set_hovered(&self, index: Option<usize>) -> bool {
        let prev = self.hovered.replace(index);
        if prev != index {
            tracing::trace!(?prev, ?index, "hover changed");
            true
        } else {
            false
        }
    }

    /// Ask every resolver for `index`, in registration order.
    ///
    /// Resolvers answering `None` are left out. A resolver that errors is
    /// logged and skipped without affecting the others.
    pub fn tooltip_payload(&self, index: usize) -> Vec<TooltipItem> {
        let resolvers = self.resolvers.borrow().snapshot();
        resolvers
            .iter()
            .filter_map(|(_, label, resolve)| match resolve(index) {
                Ok(item) => item,
                Err(err) => {
                    tracing::error!(resolver = %label, index, "tooltip resolver failed: {err:#}");
                    None
                }
            })
            .collect()
    }

    /// Payload for the hovered index; empty when nothing is hovered.
    pub fn current_payload(&self) -> Vec<TooltipItem> {
        self.hovered
            .get()
            .map(|i| self.tooltip_payload(i))
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        let moves = std::mem::take(&mut *self.move_subscribers.borrow_mut());
        let leaves = std::mem::take(&mut *self.leave_subscribers.borrow_mut());
        let resolvers = std::mem::take(&mut *self.resolvers.borrow_mut());
        drop((moves, leaves, resolvers));
        self.hovered.set(None);
        self.pointer.set(None);
    }
}

/// Point whose `x` is nearest to `x`.
///
/// `points` must be ascending by `x`. Queries outside the covered span clamp
/// to the first/last point. On an exact tie the left point wins.
pub fn find_closest_point_by_x(points: &[ProjectedPoint], x: f32) -> Option<&ProjectedPoint> {
    let first = points.first()?;
    let last = points.last()?;
    if points.len() == 1 || x <= first.x {
        return Some(first);
    }
    if x >= last.x {
        return Some(last);
    }

    let i = lower_bound_x(points, x);
    if i == 0 {
        return Some(first);
    }
    if i >= points.len() {
        return Some(last);
    }
    let (a, b) = (&points[i - 1], &points[i]);
    let da = (a.x - x).abs();
    let db = (b.x - x).abs();
    Some(if db < da { b } else { a })
}

fn lower_bound_x(points: &[ProjectedPoint], x: f32) -> usize {
    let mut lo = 0usize;
    let mut hi = points.len();
    while lo < hi {
        let mid = (lo + hi) / 2;
        if points[mid].x < x {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}
