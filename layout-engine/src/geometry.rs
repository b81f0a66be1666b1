//! FILENAME: layout-engine/src/geometry.rs
//! Page geometry resolution - one physical unit (points) for everything.
//!
//! Page dimensions always come from the fixed lookup table below, never
//! from measuring rendered content. Margins are authored in millimeters
//! and converted here; downstream code only ever sees points.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Millimeters to points.
pub const MM_TO_PT: f64 = 2.83465;

/// Margin value forced on all four sides while auto-adjust is on.
pub const AUTO_MARGIN_MM: f64 = 10.0;

// ============================================================================
// PAGE SIZE / ORIENTATION
// ============================================================================

/// Supported physical page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageSizeId {
    A4,
    Letter,
    Legal,
}

impl PageSizeId {
    /// Portrait (width, height) in points. Fixed table; reproduced exactly.
    pub fn dimensions_pt(&self) -> (f64, f64) {
        match self {
            PageSizeId::A4 => (595.28, 841.89),
            PageSizeId::Letter => (612.0, 792.0),
            PageSizeId::Legal => (612.0, 1008.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

// ============================================================================
// MARGINS
// ============================================================================

/// Page margins in millimeters, as authored in the export dialog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginsMm {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl MarginsMm {
    pub fn uniform(mm: f64) -> Self {
        MarginsMm {
            top: mm,
            right: mm,
            bottom: mm,
            left: mm,
        }
    }
}

impl Default for MarginsMm {
    fn default() -> Self {
        MarginsMm::uniform(AUTO_MARGIN_MM)
    }
}

/// Margin source: manual values or the fixed auto-adjust preset.
///
/// The mode is an explicit variant, not closure state: turning auto off
/// restores the last manual margins verbatim (last write wins, nothing is
/// recomputed).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode")]
pub enum MarginMode {
    Manual,
    Auto,
}

/// Tracks the margin mode toggle together with the retained manual state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginController {
    mode: MarginMode,
    last_manual: MarginsMm,
}

impl MarginController {
    pub fn new(initial: MarginsMm) -> Self {
        MarginController {
            mode: MarginMode::Manual,
            last_manual: initial,
        }
    }

    pub fn mode(&self) -> MarginMode {
        self.mode
    }

    /// Stores new manual margins. While auto mode is on, the write is
    /// remembered for the eventual restore but does not take effect.
    pub fn set_manual(&mut self, margins: MarginsMm) {
        self.last_manual = margins;
    }

    pub fn set_auto(&mut self, enabled: bool) {
        self.mode = if enabled {
            MarginMode::Auto
        } else {
            MarginMode::Manual
        };
    }

    /// The margins in effect under the current mode.
    pub fn effective(&self) -> MarginsMm {
        match self.mode {
            MarginMode::Auto => MarginsMm::uniform(AUTO_MARGIN_MM),
            MarginMode::Manual => self.last_manual,
        }
    }
}

impl Default for MarginController {
    fn default() -> Self {
        MarginController::new(MarginsMm::default())
    }
}

// ============================================================================
// GEOMETRY RESOLUTION
// ============================================================================

/// Export page configuration as held by the export dialog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    pub page_size: PageSizeId,
    pub orientation: Orientation,
    pub margins_mm: MarginsMm,
    /// Content scale factor applied when staging markup, not to the page box.
    pub scale: f64,
}

impl PageGeometry {
    pub fn new(page_size: PageSizeId, orientation: Orientation) -> Self {
        PageGeometry {
            page_size,
            orientation,
            margins_mm: MarginsMm::default(),
            scale: 1.0,
        }
    }
}

/// The printable area after margins, in points, origin at top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Absolute page box in points with its derived content box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBox {
    pub width_pt: f64,
    pub height_pt: f64,
    pub content: ContentBox,
}

/// Resolves the configured geometry into absolute point coordinates.
///
/// Landscape swaps the looked-up width and height. Fails when the margins
/// leave no printable area.
pub fn resolve_page_box(geometry: &PageGeometry) -> Result<PageBox, LayoutError> {
    if geometry.scale <= 0.0 {
        return Err(LayoutError::NonPositiveScale(geometry.scale));
    }

    let (w, h) = geometry.page_size.dimensions_pt();
    let (width_pt, height_pt) = match geometry.orientation {
        Orientation::Portrait => (w, h),
        Orientation::Landscape => (h, w),
    };

    let m = geometry.margins_mm;
    let (top, right, bottom, left) = (
        m.top * MM_TO_PT,
        m.right * MM_TO_PT,
        m.bottom * MM_TO_PT,
        m.left * MM_TO_PT,
    );

    let content = ContentBox {
        x: left,
        y: top,
        width: width_pt - left - right,
        height: height_pt - top - bottom,
    };

    if content.width <= 0.0 || content.height <= 0.0 {
        return Err(LayoutError::DegenerateContentBox {
            width_pt: content.width,
            height_pt: content.height,
        });
    }

    Ok(PageBox {
        width_pt,
        height_pt,
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(size: PageSizeId, orientation: Orientation, margin_mm: f64) -> PageGeometry {
        PageGeometry {
            page_size: size,
            orientation,
            margins_mm: MarginsMm::uniform(margin_mm),
            scale: 1.0,
        }
    }

    #[test]
    fn letter_portrait_round_trip() {
        let b = resolve_page_box(&geometry(PageSizeId::Letter, Orientation::Portrait, 0.0)).unwrap();
        assert_eq!(b.width_pt, 612.0);
        assert_eq!(b.height_pt, 792.0);
        assert_eq!(b.content.width, 612.0);
        assert_eq!(b.content.height, 792.0);
    }

    #[test]
    fn landscape_swaps_dimensions() {
        let b =
            resolve_page_box(&geometry(PageSizeId::Letter, Orientation::Landscape, 0.0)).unwrap();
        assert_eq!(b.width_pt, 792.0);
        assert_eq!(b.height_pt, 612.0);
    }

    #[test]
    fn margins_convert_mm_to_pt() {
        let b = resolve_page_box(&geometry(PageSizeId::A4, Orientation::Portrait, 10.0)).unwrap();
        let margin_pt = 10.0 * MM_TO_PT;
        assert!((b.content.x - margin_pt).abs() < 1e-9);
        assert!((b.content.width - (595.28 - 2.0 * margin_pt)).abs() < 1e-9);
        assert!((b.content.height - (841.89 - 2.0 * margin_pt)).abs() < 1e-9);
    }

    #[test]
    fn oversized_margins_are_rejected() {
        let result = resolve_page_box(&geometry(PageSizeId::A4, Orientation::Portrait, 120.0));
        assert!(matches!(
            result,
            Err(LayoutError::DegenerateContentBox { .. })
        ));
    }

    #[test]
    fn auto_mode_forces_fixed_margins_and_restores_manual_verbatim() {
        let manual = MarginsMm {
            top: 25.0,
            right: 12.5,
            bottom: 18.0,
            left: 7.0,
        };
        let mut ctl = MarginController::new(manual);
        ctl.set_auto(true);
        assert_eq!(ctl.effective(), MarginsMm::uniform(AUTO_MARGIN_MM));
        ctl.set_auto(false);
        assert_eq!(ctl.effective(), manual);
    }

    #[test]
    fn geometry_serializes_camel_case() {
        let g = PageGeometry::new(PageSizeId::A4, Orientation::Landscape);
        let json = serde_json::to_value(&g).unwrap();
        assert_eq!(json["orientation"], "landscape");
        assert_eq!(json["pageSize"], "A4");
        assert_eq!(json["marginsMm"]["top"], 10.0);
    }

    #[test]
    fn manual_write_during_auto_mode_wins_on_restore() {
        let mut ctl = MarginController::new(MarginsMm::uniform(20.0));
        ctl.set_auto(true);
        let updated = MarginsMm::uniform(5.0);
        ctl.set_manual(updated);
        ctl.set_auto(false);
        assert_eq!(ctl.effective(), updated);
    }
}
