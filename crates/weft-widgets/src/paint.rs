//! The paint pass: borders, wallpaper, widget content, children.
//!
//! Widgets paint through a [`Painter`] clipped to their inner area and
//! addressed in local coordinates, so a widget never learns where it sits
//! on the screen. The pass itself walks the tree: border first, then
//! wallpaper for every inner cell not owned by a child (found via a screen
//! mask, so siblings never overwrite each other), then the widget's own
//! content, then the children.

use weft_canvas::{Canvas, Glyph};
use weft_core::{Area, Brush, Error, Point, Rect, Result};

use crate::tree::{WidgetId, WidgetTree};

/// Text shown by a container whose children no longer fit.
const UNDERSIZED_INDICATOR: &str = "<too small>";

/// A clipped, translated view into the frame canvas.
///
/// Local (0, 0) is the top-left of the widget's inner area. Writes outside
/// the region are a contract violation and fail; writes inside the region
/// but off the canvas (a partially visible widget) are clipped silently.
pub struct Painter<'a> {
    canvas: &'a mut Canvas,
    /// The widget's inner area in canvas coordinates.
    region: Rect,
}

impl<'a> Painter<'a> {
    /// Creates a painter over `region` of `canvas`.
    pub fn new(canvas: &'a mut Canvas, region: Rect) -> Self {
        Self { canvas, region }
    }

    /// Returns the size of the paintable region.
    #[inline]
    pub const fn area(&self) -> Area {
        self.region.area()
    }

    /// Writes a glyph at a local point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CellOutOfBounds`] when the point lies outside the
    /// widget's region.
    pub fn set(&mut self, point: Point, glyph: Glyph) -> Result<()> {
        if !Rect::from_area(self.area()).contains_point(point) {
            return Err(Error::CellOutOfBounds {
                x: point.x,
                y: point.y,
                width: self.region.width,
                height: self.region.height,
            });
        }
        let global = self.region.to_absolute(point);
        if self.canvas.bounds().contains_point(global) {
            self.canvas.set(global, glyph)?;
        }
        Ok(())
    }

    /// Fills the whole region with a glyph.
    pub fn fill(&mut self, glyph: Glyph) {
        self.fill_rect(Rect::from_area(self.area()), glyph);
    }

    /// Fills a local rectangle, clipped to the region.
    pub fn fill_rect(&mut self, rect: Rect, glyph: Glyph) {
        let Some(local) = rect.intersection(Rect::from_area(self.area())) else {
            return;
        };
        let global = local.translate(self.region.x, self.region.y);
        self.canvas.fill_rect(global, glyph);
    }

    /// Writes text left-to-right from a local point, clipped to the
    /// region. Returns the number of cells written.
    pub fn put_text(&mut self, point: Point, text: &str, brush: Brush) -> u16 {
        if point.y < 0 || point.y >= self.region.height as i32 {
            return 0;
        }
        let mut x = point.x;
        let mut written = 0u16;
        for symbol in text.chars() {
            if x >= self.region.width as i32 {
                break;
            }
            if x >= 0 {
                let global = self.region.to_absolute(Point::new(x, point.y));
                if self.canvas.bounds().contains_point(global) {
                    // In canvas bounds by the check above.
                    let _ = self.canvas.set(global, Glyph::styled(symbol, brush));
                    written += 1;
                }
            }
            x += 1;
        }
        written
    }
}

/// Paints the whole tree into a canvas.
///
/// Geometry must already be solved; this pass only renders.
pub fn paint_tree(tree: &mut WidgetTree, canvas: &mut Canvas) {
    if let Some(root) = tree.root() {
        paint_widget(tree, root, canvas, Point::ZERO);
    }
}

fn paint_widget(tree: &mut WidgetTree, id: WidgetId, canvas: &mut Canvas, parent_origin: Point) {
    let Some(node) = tree.node(id) else {
        return;
    };
    if !node.is_paintable() {
        return;
    }

    let outer = node
        .geometry()
        .with_position(parent_origin + node.geometry().position());
    let border = node.border().copied();
    let inner_local = node.inner_local();
    let inner = inner_local.translate(outer.x, outer.y);
    let wallpaper = node.wallpaper();
    let undersized = node.is_undersized();
    let children: Vec<WidgetId> = node.children().to_vec();

    if let Some(border) = border {
        border.paint(canvas, outer);
    }

    if undersized {
        // Children do not fit: a one-line indicator replaces them until
        // the container is resized large enough.
        let mut painter = Painter::new(canvas, inner);
        painter.fill(wallpaper);
        painter.put_text(Point::ZERO, UNDERSIZED_INDICATOR, Brush::new());
        return;
    }

    fill_uncovered(tree, &children, canvas, inner_local, inner, wallpaper);

    if let Some(mut behavior) = tree.take_behavior(id) {
        let mut painter = Painter::new(canvas, inner);
        behavior.paint(&mut painter);
        tree.put_behavior(id, behavior);
    }

    for child in children {
        paint_widget(tree, child, canvas, outer.position());
    }
}

/// Wallpaper-fills every inner cell not owned by an enabled, visible
/// child.
fn fill_uncovered(
    tree: &WidgetTree,
    children: &[WidgetId],
    canvas: &mut Canvas,
    inner_local: Rect,
    inner: Rect,
    wallpaper: Glyph,
) {
    if inner.is_empty() {
        return;
    }
    let area = inner.area();
    let width = area.width as usize;

    // The screen mask: true for cells a child will paint.
    let mut mask = vec![false; area.cells()];
    for &child in children {
        let Some(node) = tree.node(child) else {
            continue;
        };
        if !node.is_paintable() {
            continue;
        }
        // Child geometry is relative to the parent's outer corner; shift
        // it into inner-area coordinates.
        let local = node
            .geometry()
            .translate(-inner_local.x, -inner_local.y);
        let Some(covered) = local.intersection(Rect::from_area(area)) else {
            continue;
        };
        for y in covered.top()..covered.bottom() {
            let row = y as usize * width;
            for x in covered.left()..covered.right() {
                mask[row + x as usize] = true;
            }
        }
    }

    for y in 0..area.height {
        let row = y as usize * width;
        for x in 0..area.width {
            if !mask[row + x as usize] {
                let _ = canvas.set(
                    inner.to_absolute(Point::new(x as i32, y as i32)),
                    wallpaper,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::border::Border;
    use crate::tree::Orientation;
    use crate::widget::{NullWidget, Widget};
    use std::any::Any;
    use weft_layout::SizePolicy;

    /// Test behavior that floods its region with one symbol.
    struct FloodWidget(char);

    impl Widget for FloodWidget {
        fn type_name(&self) -> &'static str {
            "flood"
        }

        fn paint(&mut self, painter: &mut Painter<'_>) {
            painter.fill(Glyph::new(self.0));
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn symbol_at(canvas: &Canvas, x: i32, y: i32) -> char {
        canvas.get(Point::new(x, y)).unwrap().symbol
    }

    #[test]
    fn test_wallpaper_fills_only_uncovered_cells() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Box::new(NullWidget));
        let root_node = tree.node_mut(root).unwrap();
        root_node.set_geometry(Rect::new(0, 0, 10, 3));
        root_node.set_wallpaper(Glyph::new('.'));

        // A child with no paint behavior covering the left half.
        let child = tree.insert(root, Box::new(NullWidget)).unwrap();
        tree.node_mut(child)
            .unwrap()
            .set_geometry(Rect::new(0, 0, 5, 3));

        let mut canvas = Canvas::new(Area::new(10, 3));
        paint_tree(&mut tree, &mut canvas);

        // The masked child cells stay untouched; the rest get wallpaper.
        assert_eq!(symbol_at(&canvas, 2, 1), ' ');
        assert_eq!(symbol_at(&canvas, 7, 1), '.');
    }

    #[test]
    fn test_disabled_child_does_not_mask() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Box::new(NullWidget));
        let root_node = tree.node_mut(root).unwrap();
        root_node.set_geometry(Rect::new(0, 0, 6, 2));
        root_node.set_wallpaper(Glyph::new('.'));

        let child = tree.insert(root, Box::new(FloodWidget('X'))).unwrap();
        let child_node = tree.node_mut(child).unwrap();
        child_node.set_geometry(Rect::new(0, 0, 3, 2));
        child_node.set_enabled(false);

        let mut canvas = Canvas::new(Area::new(6, 2));
        paint_tree(&mut tree, &mut canvas);

        // The disabled child neither masks nor paints.
        assert_eq!(symbol_at(&canvas, 1, 0), '.');
        assert_eq!(symbol_at(&canvas, 4, 0), '.');
    }

    #[test]
    fn test_border_and_inner_content() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Box::new(FloodWidget('#')));
        let root_node = tree.node_mut(root).unwrap();
        root_node.set_geometry(Rect::new(0, 0, 6, 4));
        root_node.set_border(Some(Border::line()));

        let mut canvas = Canvas::new(Area::new(6, 4));
        paint_tree(&mut tree, &mut canvas);

        assert_eq!(symbol_at(&canvas, 0, 0), '┌');
        assert_eq!(symbol_at(&canvas, 5, 3), '┘');
        assert_eq!(symbol_at(&canvas, 2, 0), '─');
        // Content stays inside the border.
        assert_eq!(symbol_at(&canvas, 1, 1), '#');
        assert_eq!(symbol_at(&canvas, 4, 2), '#');
    }

    #[test]
    fn test_children_paint_in_their_own_regions() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Box::new(NullWidget));
        let root_node = tree.node_mut(root).unwrap();
        root_node.set_geometry(Rect::new(0, 0, 10, 2));
        root_node.set_box_layout(Some(Orientation::Horizontal));

        let left = tree.insert(root, Box::new(FloodWidget('L'))).unwrap();
        tree.node_mut(left)
            .unwrap()
            .set_size_policies(SizePolicy::fixed(4), SizePolicy::expanding(1));
        let right = tree.insert(root, Box::new(FloodWidget('R'))).unwrap();
        tree.node_mut(right)
            .unwrap()
            .set_size_policies(SizePolicy::expanding(1), SizePolicy::expanding(1));

        tree.relayout(root, None);
        let mut canvas = Canvas::new(Area::new(10, 2));
        paint_tree(&mut tree, &mut canvas);

        assert_eq!(symbol_at(&canvas, 0, 0), 'L');
        assert_eq!(symbol_at(&canvas, 3, 1), 'L');
        assert_eq!(symbol_at(&canvas, 4, 0), 'R');
        assert_eq!(symbol_at(&canvas, 9, 1), 'R');
    }

    #[test]
    fn test_undersized_container_paints_indicator_and_no_children() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Box::new(NullWidget));
        let root_node = tree.node_mut(root).unwrap();
        root_node.set_geometry(Rect::new(0, 0, 4, 1));
        root_node.set_box_layout(Some(Orientation::Horizontal));

        let child = tree.insert(root, Box::new(FloodWidget('X'))).unwrap();
        tree.node_mut(child)
            .unwrap()
            .set_size_policies(SizePolicy::fixed(9), SizePolicy::fixed(1));

        tree.relayout(root, None);
        assert!(tree.node(root).unwrap().is_undersized());

        let mut canvas = Canvas::new(Area::new(4, 1));
        paint_tree(&mut tree, &mut canvas);

        assert_eq!(symbol_at(&canvas, 0, 0), '<');
        assert_eq!(symbol_at(&canvas, 1, 0), 't');
        // No child content anywhere.
        assert!(canvas.glyphs().iter().all(|g| g.symbol != 'X'));
    }

    #[test]
    fn test_disabled_widget_is_not_painted() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Box::new(FloodWidget('X')));
        let root_node = tree.node_mut(root).unwrap();
        root_node.set_geometry(Rect::new(0, 0, 4, 2));
        root_node.set_enabled(false);

        let mut canvas = Canvas::new(Area::new(4, 2));
        paint_tree(&mut tree, &mut canvas);
        assert!(canvas.glyphs().iter().all(Glyph::is_blank));
    }

    #[test]
    fn test_painter_rejects_out_of_region_writes() {
        let mut canvas = Canvas::new(Area::new(10, 10));
        let mut painter = Painter::new(&mut canvas, Rect::new(2, 2, 4, 3));

        assert!(painter.set(Point::new(0, 0), Glyph::new('a')).is_ok());
        assert!(painter.set(Point::new(3, 2), Glyph::new('b')).is_ok());
        assert!(painter.set(Point::new(4, 0), Glyph::new('c')).is_err());
        assert!(painter.set(Point::new(-1, 0), Glyph::new('d')).is_err());

        // Local writes land at the region offset.
        assert_eq!(canvas.get(Point::new(2, 2)).unwrap().symbol, 'a');
        assert_eq!(canvas.get(Point::new(5, 4)).unwrap().symbol, 'b');
    }

    #[test]
    fn test_painter_clips_offscreen_region_silently() {
        let mut canvas = Canvas::new(Area::new(5, 5));
        // Region hangs off the right edge of the canvas.
        let mut painter = Painter::new(&mut canvas, Rect::new(3, 0, 4, 1));

        // In-region but off-canvas: accepted, clipped.
        assert!(painter.set(Point::new(3, 0), Glyph::new('x')).is_ok());
        assert_eq!(painter.put_text(Point::ZERO, "abcd", Brush::new()), 2);

        assert_eq!(canvas.get(Point::new(3, 0)).unwrap().symbol, 'a');
        assert_eq!(canvas.get(Point::new(4, 0)).unwrap().symbol, 'b');
    }
}
