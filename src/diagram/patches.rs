//! Sliding-window patch iterator.

use crate::geometry::volt_rect;
use crate::grid::ValueGrid;

use super::{axis_value, Diagram};

/// Lazy, finite iterator over sliding-window patches of one diagram.
///
/// Created by [`Diagram::get_patches`]; yields `(values, label)` pairs in
/// row-major window order. The iterator knows its exact length up front, so
/// `len()` counts the remaining patches without extracting any of them.
#[derive(Debug)]
pub struct Patches<'a> {
    diagram: &'a Diagram,
    /// Extracted window size, X including the EWMA margin.
    extract_w: usize,
    patch_h: usize,
    step_x: usize,
    step_y: usize,
    offset_x: usize,
    offset_y: usize,
    /// Low-X pixels excluded from the label rectangle.
    ewma_margin: usize,
    /// Window counts per axis.
    count_x: usize,
    count_y: usize,
    next_idx: usize,
}

impl<'a> Patches<'a> {
    pub(super) fn new(
        diagram: &'a Diagram,
        patch_size: (usize, usize),
        overlap: (usize, usize),
        label_offset: (usize, usize),
    ) -> Self {
        let (patch_w, patch_h) = patch_size;
        let (overlap_x, overlap_y) = overlap;
        let (offset_x, offset_y) = label_offset;
        let (grid_h, grid_w) = diagram.values.shape();

        let ewma_margin = diagram.settings.ewma_margin();
        let extract_w = patch_w + ewma_margin;

        let step_x = patch_w.saturating_sub(overlap_x);
        let step_y = patch_h.saturating_sub(overlap_y);

        // A zero step cannot advance; treat it as producing nothing rather
        // than looping forever.
        let count = |grid: usize, window: usize, step: usize| {
            if step == 0 || window == 0 || grid < window {
                0
            } else {
                (grid - window) / step + 1
            }
        };
        let count_x = count(grid_w, extract_w, step_x);
        let count_y = count(grid_h, patch_h, step_y);

        Self {
            diagram,
            extract_w,
            patch_h,
            step_x,
            step_y,
            offset_x,
            offset_y,
            ewma_margin,
            count_x,
            count_y,
            next_idx: 0,
        }
    }

    fn total(&self) -> usize {
        self.count_x * self.count_y
    }
}

impl Iterator for Patches<'_> {
    type Item = (ValueGrid, bool);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_idx >= self.total() {
            return None;
        }
        let ix = self.next_idx % self.count_x;
        let iy = self.next_idx / self.count_x;
        self.next_idx += 1;

        let start_x = ix * self.step_x;
        let start_y = iy * self.step_y;

        let patch = self
            .diagram
            .values
            .slice(start_x, start_y, self.extract_w, self.patch_h);

        // The label rectangle excludes the EWMA margin and shrinks inward by
        // the label offset on each edge.
        let rect = volt_rect(
            axis_value(
                &self.diagram.x_axis,
                start_x + self.ewma_margin + self.offset_x,
            ),
            axis_value(&self.diagram.y_axis, start_y + self.offset_y),
            axis_value(
                &self.diagram.x_axis,
                (start_x + self.extract_w).saturating_sub(self.offset_x),
            ),
            axis_value(
                &self.diagram.y_axis,
                (start_y + self.patch_h).saturating_sub(self.offset_y),
            ),
        );
        let label = self.diagram.any_line_intersects(&rect);

        Some((patch, label))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total() - self.next_idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Patches<'_> {}

#[cfg(test)]
mod tests {
    use crate::diagram::Diagram;
    use crate::geometry::TransitionLine;
    use crate::grid::ValueGrid;
    use crate::settings::Settings;

    fn axis(len: usize) -> Vec<f64> {
        (0..len).map(|i| i as f64).collect()
    }

    fn diagram(
        width: usize,
        height: usize,
        lines: Vec<TransitionLine>,
        settings: Settings,
    ) -> Diagram {
        let rows = (0..height)
            .map(|y| (0..width).map(|x| (y * width + x) as f64).collect())
            .collect();
        Diagram::new(
            "patches",
            axis(width),
            axis(height),
            ValueGrid::from_rows(rows),
            Some(lines),
            None,
            settings,
        )
    }

    #[test]
    fn test_exact_tiling_yields_all_full_patches() {
        let d = diagram(20, 20, vec![], Settings::default());
        let patches: Vec<_> = d.get_patches((10, 10), (0, 0), (0, 0)).collect();
        assert_eq!(patches.len(), 4);
        for (patch, label) in &patches {
            assert_eq!(patch.shape(), (10, 10));
            assert!(!label);
        }
    }

    #[test]
    fn test_partial_windows_dropped() {
        // 25 pixels leave a trailing 5-wide strip that never fits.
        let d = diagram(25, 20, vec![], Settings::default());
        let patches = d.get_patches((10, 10), (0, 0), (0, 0));
        assert_eq!(patches.len(), 4);
    }

    #[test]
    fn test_count_without_materializing() {
        let d = diagram(20, 20, vec![], Settings::default());
        let patches = d.get_patches((10, 10), (5, 5), (0, 0));
        // Steps of 5 per axis: positions {0, 5, 10} squared.
        assert_eq!(patches.len(), 9);
        assert_eq!(patches.size_hint(), (9, Some(9)));
        assert_eq!(patches.count(), 9);
    }

    #[test]
    fn test_restartable_per_call() {
        let d = diagram(20, 20, vec![], Settings::default());
        let first: usize = d.get_patches((10, 10), (0, 0), (0, 0)).count();
        let second: usize = d.get_patches((10, 10), (0, 0), (0, 0)).count();
        assert_eq!(first, second);
    }

    #[test]
    fn test_label_only_on_intersected_patch() {
        // Line through the center of the top-left patch only.
        let line = TransitionLine::new(vec![(4.0, 4.0), (6.0, 6.0)]);
        let d = diagram(20, 20, vec![line], Settings::default());

        let labels: Vec<bool> = d
            .get_patches((10, 10), (0, 0), (0, 0))
            .map(|(_, label)| label)
            .collect();
        assert_eq!(labels, vec![true, false, false, false]);
    }

    #[test]
    fn test_label_offset_shrinks_rectangle() {
        // Line close to the patch border; a 3-pixel offset excludes it.
        let line = TransitionLine::new(vec![(1.0, 1.0), (1.5, 1.5)]);
        let d = diagram(10, 10, vec![line], Settings::default());

        let plain: Vec<bool> = d
            .get_patches((10, 10), (0, 0), (0, 0))
            .map(|(_, l)| l)
            .collect();
        let shrunk: Vec<bool> = d
            .get_patches((10, 10), (0, 0), (3, 3))
            .map(|(_, l)| l)
            .collect();
        assert_eq!(plain, vec![true]);
        assert_eq!(shrunk, vec![false]);
    }

    #[test]
    fn test_ewma_widens_extraction_not_label() {
        let settings = Settings::default().with_ewma(true);
        // Vertical line inside the 3-pixel margin of the first window.
        let margin_line = TransitionLine::new(vec![(1.5, 0.0), (1.5, 9.0)]);
        let d = diagram(23, 10, vec![margin_line], settings.clone());

        let patches: Vec<_> = d.get_patches((10, 10), (0, 0), (0, 0)).collect();
        // Extraction width 13 over 23 columns: windows at x = 0 and x = 10.
        assert_eq!(patches.len(), 2);
        assert_eq!(patches[0].0.shape(), (10, 13));
        // The margin columns carry data but never drive the label.
        assert!(!patches[0].1);

        // The same line past the margin does label the patch.
        let center_line = TransitionLine::new(vec![(5.0, 0.0), (5.0, 9.0)]);
        let d = diagram(23, 10, vec![center_line], settings);
        let labels: Vec<bool> = d.get_patches((10, 10), (0, 0), (0, 0)).map(|(_, l)| l).collect();
        assert_eq!(labels, vec![true, false]);
    }

    #[test]
    fn test_patch_too_large_for_grid() {
        let d = diagram(8, 8, vec![], Settings::default());
        assert_eq!(d.get_patches((10, 10), (0, 0), (0, 0)).len(), 0);
    }

    #[test]
    fn test_zero_step_yields_nothing() {
        let d = diagram(20, 20, vec![], Settings::default());
        assert_eq!(d.get_patches((10, 10), (10, 10), (0, 0)).len(), 0);
    }

    #[test]
    fn test_patch_values_match_window() {
        let d = diagram(20, 20, vec![], Settings::default());
        let patches: Vec<_> = d.get_patches((10, 10), (0, 0), (0, 0)).collect();
        // Second patch starts at x = 10, y = 0.
        assert_eq!(patches[1].0.get(0, 0), Some(10.0));
        // Third patch starts at x = 0, y = 10.
        assert_eq!(patches[2].0.get(0, 0), Some(200.0));
    }
}
