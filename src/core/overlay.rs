//! Region-of-interest overlays on the expanded axis
//!
//! Overlay regions are stored in genomic coordinates; the viewport is in
//! expanded coordinates. Projection converts each region and culls those
//! outside the viewport. Painting is left to the renderer.

use crate::core::coords::CoordinateSpace;

/// A genomic region to highlight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionOfInterest {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
}

impl RegionOfInterest {
    pub fn new(chrom: impl Into<String>, start: u64, end: u64) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
        }
    }
}

/// Visible window on the expanded axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Expanded position at the left edge
    pub start: u64,
    /// Bases per pixel
    pub bp_per_pixel: f64,
    /// Width in pixels
    pub pixel_width: u32,
}

impl Viewport {
    pub fn new(start: u64, bp_per_pixel: f64, pixel_width: u32) -> Self {
        Self {
            start,
            bp_per_pixel,
            pixel_width,
        }
    }

    /// Expanded position just past the right edge (one base of slack)
    pub fn end(&self) -> u64 {
        let span = (self.pixel_width as f64 * self.bp_per_pixel).max(0.0);
        self.start.saturating_add(span.floor() as u64).saturating_add(1)
    }
}

/// A region converted to expanded coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedRegion {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
}

/// Project regions (sorted by start) into the viewport's expanded axis
///
/// Regions ending left of the viewport are skipped; the scan stops at the
/// first region starting right of it.
pub fn project_regions(
    space: &CoordinateSpace,
    regions: &[RegionOfInterest],
    viewport: &Viewport,
) -> Vec<ProjectedRegion> {
    let view_end = viewport.end();
    let mut projected = Vec::new();

    for region in regions {
        let (start, end) = space.genomic_range_to_expanded(&region.chrom, region.start, region.end);
        if end < viewport.start {
            continue;
        }
        if start > view_end {
            break;
        }
        projected.push(ProjectedRegion {
            chrom: region.chrom.clone(),
            start,
            end,
        });
    }

    log::trace!(
        "Projected {} of {} regions into {}-{}",
        projected.len(),
        regions.len(),
        viewport.start,
        view_end
    );
    projected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_end() {
        let vp = Viewport::new(1000, 2.5, 100);
        assert_eq!(vp.end(), 1251);
    }

    #[test]
    fn test_viewport_end_saturates() {
        assert_eq!(Viewport::new(1000, f64::INFINITY, 100).end(), u64::MAX);
        assert_eq!(Viewport::new(u64::MAX - 10, 1e30, 1).end(), u64::MAX);
        assert_eq!(Viewport::new(u64::MAX, 1.0, 0).end(), u64::MAX);
        assert_eq!(Viewport::new(10, f64::NAN, 100).end(), 11);
    }

    #[test]
    fn test_projection_without_insertions() {
        let space = CoordinateSpace::new();
        let regions = vec![
            RegionOfInterest::new("chr1", 10, 20),
            RegionOfInterest::new("chr1", 100, 150),
            RegionOfInterest::new("chr1", 500, 600),
        ];
        let vp = Viewport::new(50, 1.0, 200);
        let projected = project_regions(&space, &regions, &vp);
        assert_eq!(projected.len(), 1);
        assert_eq!((projected[0].start, projected[0].end), (100, 150));
    }

    #[test]
    fn test_projection_shifts_downstream_regions() {
        let mut space = CoordinateSpace::new();
        space.add_insertion("chr1", 50, "AAAAAAAAAA");
        let regions = vec![
            RegionOfInterest::new("chr1", 40, 60),
            RegionOfInterest::new("chr1", 100, 110),
        ];
        let vp = Viewport::new(0, 1.0, 1000);
        let projected = project_regions(&space, &regions, &vp);
        assert_eq!(projected.len(), 2);
        // Region spanning the insertion widens, later region shifts
        assert_eq!((projected[0].start, projected[0].end), (40, 70));
        assert_eq!((projected[1].start, projected[1].end), (110, 120));
    }

    #[test]
    fn test_projection_stops_past_viewport() {
        let mut space = CoordinateSpace::new();
        space.add_insertion("chr1", 5, "AAAAAAAAAAAAAAAAAAAA");
        let regions = vec![
            RegionOfInterest::new("chr1", 0, 4),
            RegionOfInterest::new("chr1", 15, 16),
        ];
        // Genomic 15 lands at expanded 35, past the 31 end
        let vp = Viewport::new(0, 1.0, 30);
        let projected = project_regions(&space, &regions, &vp);
        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].end, 4);
    }
}
