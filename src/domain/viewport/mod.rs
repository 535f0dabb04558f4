// SPDX-License-Identifier: MPL-2.0
//! Viewport transform snapshots and overlay placement math.
//!
//! The rendering engine owns the base image and applies, in compositing
//! order, a uniform scale, a translation, and optional horizontal/vertical
//! mirrors about the image's top-left origin. The overlay must be placed with
//! the exact same composition or it drifts under flip+zoom combinations.

/// Smallest scale accepted from the engine; guards against a degenerate
/// transform collapsing the overlay to a point.
const MIN_SCALE: f32 = 1e-4;

/// The base image's current scale, translation, and flip state.
///
/// An ephemeral snapshot: recomputed on every render notification and never
/// persisted. Alignment is always derived from the latest snapshot, not from
/// dimensions recorded when an inference ran.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    scale: f32,
    translation: (f32, f32),
    hflip: bool,
    vflip: bool,
}

impl ViewportTransform {
    /// Creates a snapshot, clamping the scale to a positive value.
    #[must_use]
    pub fn new(scale: f32, translation: (f32, f32), hflip: bool, vflip: bool) -> Self {
        Self {
            scale: scale.max(MIN_SCALE),
            translation,
            hflip,
            vflip,
        }
    }

    /// The identity transform (scale 1, no pan, no flip).
    #[must_use]
    pub fn identity() -> Self {
        Self::new(1.0, (0.0, 0.0), false, false)
    }

    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[must_use]
    pub fn translation(&self) -> (f32, f32) {
        self.translation
    }

    #[must_use]
    pub fn hflip(&self) -> bool {
        self.hflip
    }

    #[must_use]
    pub fn vflip(&self) -> bool {
        self.vflip
    }

    /// Composes the overlay placement matrix: scale, then translation, then
    /// mirrors, all about the overlay's top-left origin.
    #[must_use]
    pub fn placement_matrix(&self) -> PlacementMatrix {
        let s = self.scale;
        let (tx, ty) = self.translation;
        let fx = if self.hflip { -1.0 } else { 1.0 };
        let fy = if self.vflip { -1.0 } else { 1.0 };

        // (Scale · Translate) · Mirror, row-major affine
        PlacementMatrix {
            a: s * fx,
            b: 0.0,
            c: 0.0,
            d: s * fy,
            tx: s * tx,
            ty: s * ty,
        }
    }
}

/// 2D affine matrix in the `matrix(a, b, c, d, tx, ty)` convention:
/// `x' = a·x + c·y + tx`, `y' = b·x + d·y + ty`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementMatrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl PlacementMatrix {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Maps a point through the matrix.
    #[must_use]
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.tx,
            self.b * x + self.d * y + self.ty,
        )
    }
}

/// Where and how large the overlay element must be drawn.
///
/// The overlay's natural-size bounding box sits at the image origin with the
/// base image's own width and height; the matrix then carries it into screen
/// space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPlacement {
    pub width: f32,
    pub height: f32,
    pub matrix: PlacementMatrix,
}

/// What the rendering engine reports for the active viewport: the current
/// transform plus the base image's natural size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSnapshot {
    pub transform: ViewportTransform,
    pub image_width: u32,
    pub image_height: u32,
}

impl ViewportSnapshot {
    /// Computes the overlay placement for this snapshot.
    #[must_use]
    pub fn placement(&self) -> OverlayPlacement {
        OverlayPlacement {
            width: self.image_width as f32,
            height: self.image_height as f32,
            matrix: self.transform.placement_matrix(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn matrix(hflip: bool, vflip: bool) -> PlacementMatrix {
        ViewportTransform::new(2.0, (10.0, -5.0), hflip, vflip).placement_matrix()
    }

    #[test]
    fn placement_without_flip() {
        let m = matrix(false, false);
        assert_abs_diff_eq!(m.a, 2.0);
        assert_abs_diff_eq!(m.d, 2.0);
        assert_abs_diff_eq!(m.tx, 20.0);
        assert_abs_diff_eq!(m.ty, -10.0);
        assert_abs_diff_eq!(m.b, 0.0);
        assert_abs_diff_eq!(m.c, 0.0);
    }

    #[test]
    fn placement_with_horizontal_flip() {
        let m = matrix(true, false);
        assert_abs_diff_eq!(m.a, -2.0);
        assert_abs_diff_eq!(m.d, 2.0);
        assert_abs_diff_eq!(m.tx, 20.0);
        assert_abs_diff_eq!(m.ty, -10.0);
    }

    #[test]
    fn placement_with_vertical_flip() {
        let m = matrix(false, true);
        assert_abs_diff_eq!(m.a, 2.0);
        assert_abs_diff_eq!(m.d, -2.0);
        assert_abs_diff_eq!(m.tx, 20.0);
        assert_abs_diff_eq!(m.ty, -10.0);
    }

    #[test]
    fn placement_with_both_flips() {
        let m = matrix(true, true);
        assert_abs_diff_eq!(m.a, -2.0);
        assert_abs_diff_eq!(m.d, -2.0);
        assert_abs_diff_eq!(m.tx, 20.0);
        assert_abs_diff_eq!(m.ty, -10.0);
    }

    #[test]
    fn matrix_maps_origin_to_scaled_translation() {
        let m = matrix(true, false);
        let (x, y) = m.apply(0.0, 0.0);
        assert_abs_diff_eq!(x, 20.0);
        assert_abs_diff_eq!(y, -10.0);
    }

    #[test]
    fn matrix_mirrors_far_corner_across_origin() {
        // A 100-wide overlay under hflip: the right edge lands left of the
        // translated origin.
        let m = matrix(true, false);
        let (x, y) = m.apply(100.0, 0.0);
        assert_abs_diff_eq!(x, -180.0);
        assert_abs_diff_eq!(y, -10.0);
    }

    #[test]
    fn identity_matrix_leaves_points_unchanged() {
        let (x, y) = PlacementMatrix::IDENTITY.apply(42.0, -7.0);
        assert_abs_diff_eq!(x, 42.0);
        assert_abs_diff_eq!(y, -7.0);
    }

    #[test]
    fn new_clamps_non_positive_scale() {
        let t = ViewportTransform::new(0.0, (0.0, 0.0), false, false);
        assert!(t.scale() > 0.0);
        let t = ViewportTransform::new(-3.0, (0.0, 0.0), false, false);
        assert!(t.scale() > 0.0);
    }

    #[test]
    fn snapshot_placement_uses_image_natural_size() {
        let snapshot = ViewportSnapshot {
            transform: ViewportTransform::identity(),
            image_width: 512,
            image_height: 512,
        };
        let placement = snapshot.placement();
        assert_abs_diff_eq!(placement.width, 512.0);
        assert_abs_diff_eq!(placement.height, 512.0);
        assert_eq!(placement.matrix, PlacementMatrix::IDENTITY);
    }
}
