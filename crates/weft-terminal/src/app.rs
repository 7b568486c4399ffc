//! The application driver.
//!
//! [`App`] wires the pieces into the toolkit's control flow: producer
//! threads (input reader, timer hub, color engine) append events into the
//! runtime context's queue; the owning thread drains the queue, each
//! event mutates the tree or requests a repaint; dirty subtrees re-solve;
//! widgets paint into the back canvas; the screen pair diffs; only the
//! diff reaches the terminal.

use weft_canvas::{Glyph, ScreenBuffers};
use weft_core::{Area, Point, Rect, Result};
use weft_timers::{DynamicColorEngine, TimerHub};
use weft_widgets::{paint_tree, Event, RuntimeContext, Widget, WidgetId};

use crate::backend::{Backend, CrosstermBackend};
use crate::input::InputReader;
use crate::writer::FrameWriter;

use std::time::Duration;

/// Default tick rate of the dynamic-color engine.
const COLOR_TICK: Duration = Duration::from_millis(150);

/// A terminal application: context, screen pair, writer, and the
/// producer threads.
///
/// # Examples
///
/// ```no_run
/// use weft_terminal::App;
/// use weft_widgets::NullWidget;
///
/// fn main() -> weft_core::Result<()> {
///     let mut app = App::new()?;
///     app.set_root(Box::new(NullWidget));
///     app.run()
/// }
/// ```
pub struct App<B: Backend = CrosstermBackend> {
    ctx: RuntimeContext,
    screen: ScreenBuffers,
    writer: FrameWriter<B>,
    timers: TimerHub,
    colors: DynamicColorEngine,
    input: Option<InputReader>,
}

impl App<CrosstermBackend> {
    /// Creates an application over stdout.
    pub fn new() -> Result<Self> {
        Self::with_backend(CrosstermBackend::new())
    }
}

impl<B: Backend> App<B> {
    /// Creates an application over the given backend.
    pub fn with_backend(backend: B) -> Result<Self> {
        let area = backend.size()?;
        let mut ctx = RuntimeContext::new();

        let timers = TimerHub::new(ctx.sender());
        let colors = DynamicColorEngine::new(ctx.sender(), COLOR_TICK);
        // Destroyed widgets drop out of both producer registries.
        ctx.add_teardown_observer(timers.observer());
        ctx.add_teardown_observer(colors.observer());

        Ok(Self {
            ctx,
            screen: ScreenBuffers::new(area),
            writer: FrameWriter::new(backend),
            timers,
            colors,
            input: None,
        })
    }

    /// Returns the runtime context.
    pub fn context(&self) -> &RuntimeContext {
        &self.ctx
    }

    /// Returns the runtime context mutably.
    pub fn context_mut(&mut self) -> &mut RuntimeContext {
        &mut self.ctx
    }

    /// Returns the timer hub.
    pub fn timers(&self) -> &TimerHub {
        &self.timers
    }

    /// Returns the dynamic-color engine mutably (to start or stop it).
    pub fn colors_mut(&mut self) -> &mut DynamicColorEngine {
        &mut self.colors
    }

    /// Returns the frame writer.
    pub fn writer_mut(&mut self) -> &mut FrameWriter<B> {
        &mut self.writer
    }

    /// Returns the current screen size.
    pub fn screen_area(&self) -> Area {
        self.screen.area()
    }

    /// Inserts the root widget, sized to the screen.
    pub fn set_root(&mut self, behavior: Box<dyn Widget>) -> WidgetId {
        let root = self.ctx.add_root(behavior);
        let area = self.screen.area();
        if let Some(node) = self.ctx.tree.node_mut(root) {
            node.set_geometry(Rect::from_area(area));
        }
        root
    }

    /// Requests a graceful exit; the event loop finishes its backlog and
    /// returns.
    pub fn quit(&self) {
        self.ctx.queue().quit();
    }

    /// Swaps the ambient background color without repainting widgets.
    ///
    /// Cells whose brush defaults to the ambient background are restyled
    /// through a color diff; everything else keeps its explicit brush.
    /// Clearing the ambient color falls back to a full redraw on the next
    /// frame.
    pub fn set_ambient_background(&mut self, color: Option<weft_core::Color>) -> Result<()> {
        self.writer.set_ambient_background(color);
        match color {
            Some(color) => {
                let diff = self.screen.generate_color_diff(color);
                self.writer.apply(&diff)
            }
            None => {
                self.screen.force_full_redraw();
                Ok(())
            }
        }
    }

    /// Runs the event loop until [`quit`](Self::quit).
    ///
    /// Sets the terminal up, spawns the input reader, and always restores
    /// the terminal on the way out — also when the loop errors.
    pub fn run(&mut self) -> Result<()> {
        let Some(root) = self.ctx.tree.root() else {
            return Ok(());
        };

        self.setup()?;
        self.input = Some(InputReader::spawn(self.ctx.sender(), root));

        let result = self.event_loop();
        let teardown = self.teardown();

        result?;
        teardown
    }

    fn setup(&mut self) -> Result<()> {
        let backend = self.writer.backend_mut();
        backend.enter_raw_mode()?;
        backend.enter_alternate_screen()?;
        backend.enable_mouse_capture()?;
        backend.hide_cursor()?;
        backend.clear()?;
        backend.flush()?;
        self.screen.force_full_redraw();
        Ok(())
    }

    fn event_loop(&mut self) -> Result<()> {
        // First frame before any input arrives.
        self.render()?;

        while self.ctx.queue().wait() {
            self.pump();
            if self.ctx.flush_layout() {
                self.render()?;
            }
        }
        Ok(())
    }

    /// Drains one batch, intercepting terminal resizes for the screen
    /// pair.
    pub fn pump(&mut self) {
        for event in self.ctx.queue().take_batch() {
            match event {
                Event::Resize { widget, new, .. } if Some(widget) == self.ctx.tree.root() => {
                    self.handle_root_resize(new);
                }
                other => self.ctx.dispatch(other),
            }
        }
    }

    fn handle_root_resize(&mut self, new: Area) {
        let Some(root) = self.ctx.tree.root() else {
            return;
        };
        tracing::debug!(width = new.width, height = new.height, "terminal resized");

        // Resize drops the terminal's ground truth: full re-solve, full
        // diff on the next frame.
        self.screen.resize(new);

        let old = self
            .ctx
            .tree
            .node(root)
            .map_or(Area::ZERO, |n| n.geometry().area());
        if let Some(node) = self.ctx.tree.node_mut(root) {
            node.set_geometry(Rect::from_area(new));
        }
        self.ctx.dispatch(Event::Resize {
            widget: root,
            old,
            new,
        });
    }

    /// Solves pending layout, paints the tree, and writes the diff.
    pub fn render(&mut self) -> Result<()> {
        self.ctx.flush_layout();

        self.screen.next_mut().fill(Glyph::BLANK);
        paint_tree(&mut self.ctx.tree, self.screen.next_mut());

        let diff = self.screen.merge_and_diff();
        self.writer.apply(&diff)?;

        let cursor = self.focused_cursor();
        self.writer.place_cursor(cursor)
    }

    /// Returns the global position of the focused widget's cursor, when
    /// enabled and visible.
    fn focused_cursor(&self) -> Option<Point> {
        let id = self.ctx.focus.current()?;
        let node = self.ctx.tree.node(id)?;
        let cursor = node.cursor();
        if !cursor.enabled || !node.is_paintable() {
            return None;
        }
        let origin = self.ctx.tree.global_position(id)?;
        Some(origin + node.inner_local().position() + cursor.position)
    }

    fn teardown(&mut self) -> Result<()> {
        self.ctx.queue().quit();
        if let Some(mut input) = self.input.take() {
            input.shutdown();
        }
        self.timers.shutdown();
        self.colors.shutdown();

        let backend = self.writer.backend_mut();
        backend.show_cursor()?;
        backend.disable_mouse_capture()?;
        backend.leave_alternate_screen()?;
        backend.exit_raw_mode()?;
        backend.flush()
    }
}
