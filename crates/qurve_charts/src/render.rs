//! Render scheduler: the registry of draw callbacks sharing one surface and
//! the coalescing of repaint requests into single flushes.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use qurve_core::{Disposer, FrameRequester, Registry};
use qurve_paint::DrawContext;

use crate::layout::Layout;

/// A producer's draw procedure. Runs inside its own save/restore scope.
pub type RenderFn = dyn FnMut(&mut dyn DrawContext) -> anyhow::Result<()>;

type SharedRenderFn = Rc<RefCell<RenderFn>>;

/// Outcome of one flush.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlushStats {
    pub renderers: usize,
    pub failed: usize,
}

pub struct RenderScheduler {
    renderers: RefCell<Registry<SharedRenderFn>>,
    pending: Cell<bool>,
    frames: Rc<dyn FrameRequester>,
    flushes: Cell<u64>,
}

impl RenderScheduler {
    pub fn new(frames: Rc<dyn FrameRequester>) -> Rc<Self> {
        Rc::new(Self {
            renderers: RefCell::new(Registry::new()),
            pending: Cell::new(false),
            frames,
            flushes: Cell::new(0),
        })
    }

    /// Add a renderer on top of those already registered and request a
    /// repaint. The returned handle removes it (and requests another).
    pub fn register<F>(self: &Rc<Self>, label: &str, render: F) -> Disposer
    where
        F: FnMut(&mut dyn DrawContext) -> anyhow::Result<()> + 'static,
    {
        let render: SharedRenderFn = Rc::new(RefCell::new(render));
        let id = self.renderers.borrow_mut().insert(label, render);
        self.request_repaint();

        let weak: Weak<Self> = Rc::downgrade(self);
        Disposer::new(move || {
            if let Some(scheduler) = weak.upgrade() {
                let removed = scheduler.renderers.borrow_mut().remove(id);
                if removed.is_some() {
                    scheduler.request_repaint();
                }
            }
        })
    }

    /// Ask for a repaint. Requests made while one is already pending are
    /// folded into it.
    pub fn request_repaint(&self) {
        if self.pending.replace(true) {
            tracing::trace!("repaint already pending, coalesced");
            return;
        }
        self.frames.request_frame();
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Drop the pending flag without flushing.
    pub fn cancel(&self) {
        self.pending.set(false);
    }

    pub fn len(&self) -> usize {
        self.renderers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.borrow().is_empty()
    }

    /// Number of flushes executed so far.
    pub fn flush_count(&self) -> u64 {
        self.flushes.get()
    }

    pub fn clear(&self) {
        // Drop outside the borrow; a renderer's captures may dispose into us.
        let old = std::mem::take(&mut *self.renderers.borrow_mut());
        drop(old);
    }

    /// Repaint the whole surface: clear and fill via `layout`, then run every
    /// renderer registered at this point, in registration order.
    ///
    /// A renderer that errors is logged and skipped; its drawing-state scope
    /// is unwound either way.
    pub fn flush(&self, ctx: &mut dyn DrawContext, layout: &Layout) -> FlushStats {
        self.pending.set(false);
        self.flushes.set(self.flushes.get() + 1);

        // Changes made by renderers during this flush apply to the next one.
        let renderers = self.renderers.borrow().snapshot();

        let frame_depth = layout.begin_frame(ctx);
        let mut stats = FlushStats {
            renderers: renderers.len(),
            failed: 0,
        };
        for (_, label, render) in renderers.iter() {
            let depth = ctx.save_depth();
            ctx.save();
            let result = match render.try_borrow_mut() {
                Ok(mut render) => (&mut *render)(&mut *ctx),
                Err(_) => Err(anyhow::anyhow!("renderer re-entered during flush")),
            };
            let mut failed = false;
            if let Err(err) = result {
                failed = true;
                tracing::error!(renderer = %label, "renderer failed: {err:#}");
            }
            let after = ctx.save_depth();
            if after <= depth {
                // Restored past its own scope: later renderers need a fresh
                // frame scope with the DPR scale.
                failed = true;
                tracing::warn!(renderer = %label, "renderer restored past its scope");
                ctx.restore_to_depth(frame_depth);
                layout.enter_scaled_scope(ctx);
            } else {
                let leaked = after - (depth + 1);
                if leaked > 0 {
                    tracing::warn!(renderer = %label, leaked, "renderer left unbalanced save()");
                }
                ctx.restore_to_depth(depth);
            }
            if failed {
                stats.failed += 1;
            }
        }
        layout.end_frame(ctx, frame_depth);

        let (pw, ph) = layout.physical_size();
        tracing::debug!(
            renderers = stats.renderers,
            failed = stats.failed,
            width = pw,
            height = ph,
            "flushed"
        );
        stats
    }
}
