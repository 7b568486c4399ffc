//! The widget arena.
//!
//! Widgets live in a flat [`SlotMap`]; children hold ids into it and the
//! parent back-link is just another id. Removing a subtree invalidates its
//! keys, so a stale [`WidgetId`] simply fails the lookup — there is no
//! dangling pointer to chase.
//!
//! Structural state (geometry, policies, border, enablement) lives on
//! [`WidgetNode`]; behavior lives in the node's boxed
//! [`Widget`](crate::widget::Widget) and is temporarily taken out during
//! dispatch so handlers can borrow the tree.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::sync::atomic::{AtomicU64, Ordering};

use weft_canvas::Glyph;
use weft_core::{Point, Rect};
use weft_layout::{positions, solve, solve_cross, SizePolicy, SolveOutcome};

use crate::border::Border;
use crate::cursor::Cursor;
use crate::event::Event;
use crate::focus::FocusPolicy;
use crate::queue::EventSender;
use crate::widget::Widget;

new_key_type! {
    /// A stable handle to a widget in the arena.
    pub struct WidgetId;
}

/// Main axis of a box container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Children run left to right; the solver works on widths.
    Horizontal,
    /// Children run top to bottom; the solver works on heights.
    Vertical,
}

static NEXT_SERIAL: AtomicU64 = AtomicU64::new(1);

/// One widget: structural state plus its boxed behavior.
pub struct WidgetNode {
    /// Behavior hooks. `None` only while taken out for dispatch.
    behavior: Option<Box<dyn Widget>>,
    parent: Option<WidgetId>,
    children: SmallVec<[WidgetId; 8]>,
    /// Outer geometry; the position is relative to the parent's outer
    /// top-left corner.
    geometry: Rect,
    h_policy: SizePolicy,
    v_policy: SizePolicy,
    border: Option<Border>,
    enabled: bool,
    focus_policy: FocusPolicy,
    cursor: Cursor,
    wallpaper: Glyph,
    layout: Option<Orientation>,
    undersized: bool,
    serial: u64,
}

impl WidgetNode {
    fn new(behavior: Box<dyn Widget>) -> Self {
        Self {
            behavior: Some(behavior),
            parent: None,
            children: SmallVec::new(),
            geometry: Rect::ZERO,
            h_policy: SizePolicy::default(),
            v_policy: SizePolicy::default(),
            border: None,
            enabled: true,
            focus_policy: FocusPolicy::NONE,
            cursor: Cursor::HIDDEN,
            wallpaper: Glyph::BLANK,
            layout: None,
            undersized: false,
            serial: NEXT_SERIAL.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Returns the parent id, if any.
    #[inline]
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    /// Returns the children in document order.
    #[inline]
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    /// Returns the outer geometry (position relative to the parent).
    #[inline]
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Sets the outer geometry without emitting events.
    #[inline]
    pub fn set_geometry(&mut self, geometry: Rect) {
        self.geometry = geometry;
    }

    /// Returns the horizontal size policy.
    #[inline]
    pub fn h_policy(&self) -> SizePolicy {
        self.h_policy
    }

    /// Returns the vertical size policy.
    #[inline]
    pub fn v_policy(&self) -> SizePolicy {
        self.v_policy
    }

    /// Sets both size policies.
    #[inline]
    pub fn set_size_policies(&mut self, horizontal: SizePolicy, vertical: SizePolicy) {
        self.h_policy = horizontal;
        self.v_policy = vertical;
    }

    /// Returns the border, if any.
    #[inline]
    pub fn border(&self) -> Option<&Border> {
        self.border.as_ref()
    }

    /// Sets or clears the border.
    #[inline]
    pub fn set_border(&mut self, border: Option<Border>) {
        self.border = border;
    }

    /// Returns whether the widget is enabled.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Sets the enabled flag without emitting events.
    #[inline]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns the focus policy.
    #[inline]
    pub fn focus_policy(&self) -> FocusPolicy {
        self.focus_policy
    }

    /// Sets the focus policy.
    #[inline]
    pub fn set_focus_policy(&mut self, policy: FocusPolicy) {
        self.focus_policy = policy;
    }

    /// Returns the cursor state.
    #[inline]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Sets the cursor state.
    #[inline]
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    /// Returns the wallpaper glyph used for uncovered background cells.
    #[inline]
    pub fn wallpaper(&self) -> Glyph {
        self.wallpaper
    }

    /// Sets the wallpaper glyph.
    #[inline]
    pub fn set_wallpaper(&mut self, wallpaper: Glyph) {
        self.wallpaper = wallpaper;
    }

    /// Returns the box-layout orientation when this widget sizes its
    /// children.
    #[inline]
    pub fn box_layout(&self) -> Option<Orientation> {
        self.layout
    }

    /// Makes this widget a box container (or a plain widget again).
    #[inline]
    pub fn set_box_layout(&mut self, orientation: Option<Orientation>) {
        self.layout = orientation;
    }

    /// Returns whether the last solve could not fit the children.
    #[inline]
    pub fn is_undersized(&self) -> bool {
        self.undersized
    }

    /// Returns the process-unique diagnostic serial.
    #[inline]
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Returns the (left, top, right, bottom) border thickness.
    #[inline]
    pub fn insets(&self) -> (u16, u16, u16, u16) {
        match &self.border {
            Some(border) => border.insets(),
            None => (0, 0, 0, 0),
        }
    }

    /// Returns the inner rectangle in coordinates local to the outer
    /// geometry: the outer size minus the border thickness.
    pub fn inner_local(&self) -> Rect {
        let (left, top, right, bottom) = self.insets();
        Rect::new(0, 0, self.geometry.width, self.geometry.height)
            .inset_sides(left, top, right, bottom)
    }

    /// Returns whether the widget takes part in painting: enabled and
    /// with a non-degenerate outer size.
    #[inline]
    pub fn is_paintable(&self) -> bool {
        self.enabled && self.geometry.width != 0 && self.geometry.height != 0
    }

    /// Immutable access to the behavior, when not taken for dispatch.
    #[inline]
    pub fn behavior(&self) -> Option<&dyn Widget> {
        self.behavior.as_deref()
    }
}

/// The flat store of all widgets plus the root handle.
#[derive(Default)]
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, WidgetNode>,
    root: Option<WidgetId>,
}

impl WidgetTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
        }
    }

    /// Returns the number of live widgets.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds no widgets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns whether `id` refers to a live widget.
    #[inline]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Returns the root widget, if one was inserted.
    #[inline]
    pub fn root(&self) -> Option<WidgetId> {
        self.root
    }

    /// Inserts the root widget.
    ///
    /// # Panics
    ///
    /// Panics if the tree already has a root.
    pub fn insert_root(&mut self, behavior: Box<dyn Widget>) -> WidgetId {
        assert!(self.root.is_none(), "widget tree already has a root");
        let id = self.nodes.insert(WidgetNode::new(behavior));
        self.root = Some(id);
        id
    }

    /// Inserts a widget as the last child of `parent`.
    ///
    /// Returns `None` when the parent is not alive.
    pub fn insert(&mut self, parent: WidgetId, behavior: Box<dyn Widget>) -> Option<WidgetId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let id = self.nodes.insert(WidgetNode::new(behavior));
        self.nodes[id].parent = Some(parent);
        self.nodes[parent].children.push(id);
        Some(id)
    }

    /// Returns the node for `id`.
    #[inline]
    pub fn node(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.nodes.get(id)
    }

    /// Returns the node for `id` mutably.
    #[inline]
    pub fn node_mut(&mut self, id: WidgetId) -> Option<&mut WidgetNode> {
        self.nodes.get_mut(id)
    }

    /// Returns the parent of `id`.
    #[inline]
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Returns the children of `id` in document order.
    #[inline]
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Takes the behavior out of a node for dispatch.
    pub(crate) fn take_behavior(&mut self, id: WidgetId) -> Option<Box<dyn Widget>> {
        self.nodes.get_mut(id).and_then(|n| n.behavior.take())
    }

    /// Puts a behavior back after dispatch. Dropped if the node died in
    /// the meantime.
    pub(crate) fn put_behavior(&mut self, id: WidgetId, behavior: Box<dyn Widget>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.behavior = Some(behavior);
        }
    }

    /// Unlinks `id` from its parent (or from the root slot).
    ///
    /// The subtree stays stored until
    /// [`release_subtree`](Self::release_subtree); this is the first half
    /// of the delete protocol.
    pub fn detach(&mut self, id: WidgetId) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        let parent = node.parent.take();

        match parent {
            Some(parent_id) => {
                if let Some(parent_node) = self.nodes.get_mut(parent_id) {
                    parent_node.children.retain(|child| *child != id);
                }
            }
            None => {
                if self.root == Some(id) {
                    self.root = None;
                }
            }
        }
        true
    }

    /// Removes a detached subtree's storage. Returns the number of
    /// released widgets.
    ///
    /// Callers must have notified the subtree first; after this, all of
    /// its ids are stale.
    pub fn release_subtree(&mut self, id: WidgetId) -> usize {
        let ids = self.descendants(id);
        let mut released = 0;
        for widget in ids {
            if self.nodes.remove(widget).is_some() {
                released += 1;
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }
        released
    }

    /// Returns `id` and all its descendants in pre-order.
    pub fn descendants(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        self.collect_pre_order(id, &mut out);
        out
    }

    /// Returns every widget reachable from the root in pre-order
    /// (document order).
    pub fn pre_order(&self) -> Vec<WidgetId> {
        match self.root {
            Some(root) => self.descendants(root),
            None => Vec::new(),
        }
    }

    fn collect_pre_order(&self, id: WidgetId, out: &mut Vec<WidgetId>) {
        if let Some(node) = self.nodes.get(id) {
            out.push(id);
            for &child in &node.children {
                self.collect_pre_order(child, out);
            }
        }
    }

    /// Returns the global (screen) position of a widget's outer top-left
    /// corner, summing ancestor offsets.
    pub fn global_position(&self, id: WidgetId) -> Option<Point> {
        let mut node = self.nodes.get(id)?;
        let mut position = node.geometry.position();
        while let Some(parent) = node.parent {
            node = self.nodes.get(parent)?;
            position += node.geometry.position();
        }
        Some(position)
    }

    /// Returns the global outer rectangle of a widget.
    pub fn global_rect(&self, id: WidgetId) -> Option<Rect> {
        let position = self.global_position(id)?;
        let node = self.nodes.get(id)?;
        Some(node.geometry.with_position(position))
    }

    /// Returns the deepest enabled widget whose outer rectangle contains
    /// the given global point. Later siblings win, matching paint order.
    pub fn widget_at(&self, point: Point) -> Option<WidgetId> {
        let root = self.root?;
        self.hit(root, Point::ZERO, point)
    }

    fn hit(&self, id: WidgetId, parent_origin: Point, point: Point) -> Option<WidgetId> {
        let node = self.nodes.get(id)?;
        if !node.enabled {
            return None;
        }
        let global = node
            .geometry
            .with_position(parent_origin + node.geometry.position());
        if !global.contains_point(point) {
            return None;
        }
        for &child in node.children.iter().rev() {
            if let Some(hit) = self.hit(child, global.position(), point) {
                return Some(hit);
            }
        }
        Some(id)
    }

    /// Re-solves geometry for `id`'s subtree.
    ///
    /// Box containers run the solver along their orientation and place
    /// children at cumulative offsets inside their inner area; children
    /// whose geometry changed get `Move`/`Resize` events through `sender`.
    /// Plain widgets keep their manually placed children, but nested
    /// containers anywhere below are still re-solved.
    pub fn relayout(&mut self, id: WidgetId, sender: Option<&EventSender>) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let children: Vec<WidgetId> = node.children.iter().copied().collect();

        if let Some(orientation) = node.layout {
            self.solve_box(id, orientation, &children, sender);
        }

        for child in children {
            self.relayout(child, sender);
        }
    }

    fn solve_box(
        &mut self,
        id: WidgetId,
        orientation: Orientation,
        children: &[WidgetId],
        sender: Option<&EventSender>,
    ) {
        let inner = self.nodes[id].inner_local();

        let main_policies: Vec<SizePolicy> = children
            .iter()
            .map(|&child| {
                let node = &self.nodes[child];
                match orientation {
                    Orientation::Horizontal => node.h_policy,
                    Orientation::Vertical => node.v_policy,
                }
            })
            .collect();

        let (available_main, available_cross) = match orientation {
            Orientation::Horizontal => (inner.width, inner.height),
            Orientation::Vertical => (inner.height, inner.width),
        };

        let extents = match solve(&main_policies, available_main) {
            SolveOutcome::Fit(extents) => {
                self.nodes[id].undersized = false;
                extents
            }
            SolveOutcome::Undersized => {
                tracing::debug!(serial = self.nodes[id].serial, "box layout undersized");
                self.nodes[id].undersized = true;
                return;
            }
        };
        let offsets = positions(&extents);

        for ((&child, &extent), &offset) in children.iter().zip(&extents).zip(&offsets) {
            let node = &self.nodes[child];
            let cross_policy = match orientation {
                Orientation::Horizontal => node.v_policy,
                Orientation::Vertical => node.h_policy,
            };
            let cross = solve_cross(&cross_policy, available_cross);

            let new = match orientation {
                Orientation::Horizontal => Rect::new(
                    inner.x + offset as i32,
                    inner.y,
                    extent,
                    cross,
                ),
                Orientation::Vertical => Rect::new(
                    inner.x,
                    inner.y + offset as i32,
                    cross,
                    extent,
                ),
            };

            let old = self.nodes[child].geometry;
            if old == new {
                continue;
            }
            self.nodes[child].geometry = new;

            if let Some(sender) = sender {
                if old.position() != new.position() {
                    sender.send(Event::Move {
                        widget: child,
                        old: old.position(),
                        new: new.position(),
                    });
                }
                if old.area() != new.area() {
                    sender.send(Event::Resize {
                        widget: child,
                        old: old.area(),
                        new: new.area(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::NullWidget;
    use pretty_assertions::assert_eq;
    use weft_core::Area;

    fn null() -> Box<dyn Widget> {
        Box::new(NullWidget)
    }

    fn tree_with_root() -> (WidgetTree, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(null());
        (tree, root)
    }

    #[test]
    fn test_insert_and_document_order() {
        let (mut tree, root) = tree_with_root();
        let a = tree.insert(root, null()).unwrap();
        let b = tree.insert(root, null()).unwrap();
        let a1 = tree.insert(a, null()).unwrap();

        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.pre_order(), vec![root, a, a1, b]);
        assert_eq!(tree.parent(a1), Some(a));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_insert_under_dead_parent_fails() {
        let (mut tree, root) = tree_with_root();
        let a = tree.insert(root, null()).unwrap();
        tree.detach(a);
        tree.release_subtree(a);

        assert!(tree.insert(a, null()).is_none());
    }

    #[test]
    fn test_serials_are_unique() {
        let (mut tree, root) = tree_with_root();
        let a = tree.insert(root, null()).unwrap();
        let sa = tree.node(a).unwrap().serial();
        let sr = tree.node(root).unwrap().serial();
        assert_ne!(sa, sr);
    }

    #[test]
    fn test_detach_then_release() {
        let (mut tree, root) = tree_with_root();
        let a = tree.insert(root, null()).unwrap();
        let a1 = tree.insert(a, null()).unwrap();
        let a2 = tree.insert(a, null()).unwrap();

        assert!(tree.detach(a));
        // Detached but still stored: the delete protocol owns it now.
        assert!(tree.contains(a));
        assert!(tree.contains(a1));
        assert_eq!(tree.children(root), &[] as &[WidgetId]);
        assert_eq!(tree.parent(a), None);

        assert_eq!(tree.release_subtree(a), 3);
        assert!(!tree.contains(a));
        assert!(!tree.contains(a1));
        assert!(!tree.contains(a2));

        // Stale ids just miss.
        assert!(tree.node(a).is_none());
        assert!(tree.children(a).is_empty());
    }

    #[test]
    fn test_global_position_sums_ancestors() {
        let (mut tree, root) = tree_with_root();
        tree.node_mut(root)
            .unwrap()
            .set_geometry(Rect::new(2, 1, 40, 20));
        let a = tree.insert(root, null()).unwrap();
        tree.node_mut(a).unwrap().set_geometry(Rect::new(5, 3, 10, 5));
        let a1 = tree.insert(a, null()).unwrap();
        tree.node_mut(a1).unwrap().set_geometry(Rect::new(1, 1, 3, 2));

        assert_eq!(tree.global_position(a1), Some(Point::new(8, 5)));
        assert_eq!(tree.global_rect(a1), Some(Rect::new(8, 5, 3, 2)));
    }

    #[test]
    fn test_widget_at_prefers_later_siblings() {
        let (mut tree, root) = tree_with_root();
        tree.node_mut(root)
            .unwrap()
            .set_geometry(Rect::new(0, 0, 20, 10));
        let under = tree.insert(root, null()).unwrap();
        tree.node_mut(under)
            .unwrap()
            .set_geometry(Rect::new(0, 0, 10, 10));
        let over = tree.insert(root, null()).unwrap();
        tree.node_mut(over)
            .unwrap()
            .set_geometry(Rect::new(5, 0, 10, 10));

        assert_eq!(tree.widget_at(Point::new(7, 5)), Some(over));
        assert_eq!(tree.widget_at(Point::new(2, 5)), Some(under));
        assert_eq!(tree.widget_at(Point::new(17, 5)), Some(root));
        assert_eq!(tree.widget_at(Point::new(30, 5)), None);
    }

    #[test]
    fn test_widget_at_skips_disabled() {
        let (mut tree, root) = tree_with_root();
        tree.node_mut(root)
            .unwrap()
            .set_geometry(Rect::new(0, 0, 20, 10));
        let child = tree.insert(root, null()).unwrap();
        let child_node = tree.node_mut(child).unwrap();
        child_node.set_geometry(Rect::new(0, 0, 20, 10));
        child_node.set_enabled(false);

        assert_eq!(tree.widget_at(Point::new(5, 5)), Some(root));
    }

    #[test]
    fn test_relayout_horizontal_box() {
        let (mut tree, root) = tree_with_root();
        let root_node = tree.node_mut(root).unwrap();
        root_node.set_geometry(Rect::new(0, 0, 10, 4));
        root_node.set_box_layout(Some(Orientation::Horizontal));

        let fixed = tree.insert(root, null()).unwrap();
        tree.node_mut(fixed)
            .unwrap()
            .set_size_policies(SizePolicy::fixed(3), SizePolicy::expanding(1));
        let grow = tree.insert(root, null()).unwrap();
        tree.node_mut(grow)
            .unwrap()
            .set_size_policies(SizePolicy::expanding(2), SizePolicy::expanding(1));

        tree.relayout(root, None);

        assert_eq!(tree.node(fixed).unwrap().geometry(), Rect::new(0, 0, 3, 4));
        assert_eq!(tree.node(grow).unwrap().geometry(), Rect::new(3, 0, 7, 4));
        assert!(!tree.node(root).unwrap().is_undersized());
    }

    #[test]
    fn test_relayout_vertical_box_with_border() {
        let (mut tree, root) = tree_with_root();
        let root_node = tree.node_mut(root).unwrap();
        root_node.set_geometry(Rect::new(0, 0, 12, 10));
        root_node.set_border(Some(Border::line()));
        root_node.set_box_layout(Some(Orientation::Vertical));

        let top = tree.insert(root, null()).unwrap();
        tree.node_mut(top)
            .unwrap()
            .set_size_policies(SizePolicy::expanding(1), SizePolicy::fixed(2));
        let rest = tree.insert(root, null()).unwrap();
        tree.node_mut(rest)
            .unwrap()
            .set_size_policies(SizePolicy::expanding(1), SizePolicy::expanding(1));

        tree.relayout(root, None);

        // Inner area is 10x8 starting at (1, 1).
        assert_eq!(tree.node(top).unwrap().geometry(), Rect::new(1, 1, 10, 2));
        assert_eq!(tree.node(rest).unwrap().geometry(), Rect::new(1, 3, 10, 6));
    }

    #[test]
    fn test_relayout_marks_undersized() {
        let (mut tree, root) = tree_with_root();
        let root_node = tree.node_mut(root).unwrap();
        root_node.set_geometry(Rect::new(0, 0, 4, 2));
        root_node.set_box_layout(Some(Orientation::Horizontal));

        for _ in 0..2 {
            let child = tree.insert(root, null()).unwrap();
            tree.node_mut(child)
                .unwrap()
                .set_size_policies(SizePolicy::fixed(3), SizePolicy::expanding(1));
        }

        tree.relayout(root, None);
        assert!(tree.node(root).unwrap().is_undersized());

        // Growing the container recovers.
        tree.node_mut(root)
            .unwrap()
            .set_geometry(Rect::new(0, 0, 6, 2));
        tree.relayout(root, None);
        assert!(!tree.node(root).unwrap().is_undersized());
    }

    #[test]
    fn test_relayout_emits_geometry_events() {
        use crate::queue::EventQueue;

        let (mut tree, root) = tree_with_root();
        let root_node = tree.node_mut(root).unwrap();
        root_node.set_geometry(Rect::new(0, 0, 10, 3));
        root_node.set_box_layout(Some(Orientation::Horizontal));

        let child = tree.insert(root, null()).unwrap();
        tree.node_mut(child)
            .unwrap()
            .set_size_policies(SizePolicy::expanding(1), SizePolicy::expanding(1));

        let queue = EventQueue::new();
        let sender = queue.sender();
        tree.relayout(root, Some(&sender));

        let batch = queue.take_batch();
        assert!(batch
            .iter()
            .any(|e| matches!(e, Event::Resize { widget, new, .. }
                if *widget == child && *new == Area::new(10, 3))));
    }

    #[test]
    fn test_inner_local_without_border() {
        let (mut tree, root) = tree_with_root();
        tree.node_mut(root)
            .unwrap()
            .set_geometry(Rect::new(5, 5, 8, 6));
        assert_eq!(tree.node(root).unwrap().inner_local(), Rect::new(0, 0, 8, 6));
    }

    #[test]
    fn test_paintable() {
        let (mut tree, root) = tree_with_root();
        assert!(!tree.node(root).unwrap().is_paintable()); // zero-sized

        tree.node_mut(root)
            .unwrap()
            .set_geometry(Rect::new(0, 0, 5, 5));
        assert!(tree.node(root).unwrap().is_paintable());

        tree.node_mut(root).unwrap().set_enabled(false);
        assert!(!tree.node(root).unwrap().is_paintable());
    }
}
