//! Prostate diagram annotation planning
//!
//! Maps the six categorical site findings onto a declarative overlay
//! plan for the external renderer: benign sites get no overlay, each
//! malignant grade selects a distinct per-grade asset, mirrored and
//! flipped according to anatomical position and side. The placement
//! table replaces the per-grade branching of procedural renderers with
//! a single lookup keyed by `(side, position)`.

use crate::models::{BiopsySubmission, LobeSide, SiteFinding, SitePosition};

/// Asset id of the blank diagram everything composites onto
pub const BASE_DIAGRAM_ASSET: &str = "Prostate diagram";

/// Label fill colour handed to the renderer
pub const LABEL_FILL: &str = "black";

/// Label font size in pixels
pub const LABEL_SIZE_PX: u32 = 50;

/// Per-grade overlay asset family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetFamily {
    /// Corner-shaped overlays used at base and apex
    Corner,
    /// Mid-lobe overlays
    Mid,
}

impl AssetFamily {
    const fn stem(self) -> &'static str {
        match self {
            Self::Corner => "Corner",
            Self::Mid => "Mid",
        }
    }
}

/// Orientation transform applied to the overlay asset before pasting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Use the asset as drawn
    AsDrawn,
    /// Flip vertically
    Flip,
    /// Mirror horizontally
    Mirror,
    /// Flip vertically then mirror horizontally
    FlipMirror,
}

/// Static placement of one site slot on the diagram
#[derive(Debug, Clone, Copy)]
pub struct SitePlacement {
    pub side: LobeSide,
    pub position: SitePosition,
    pub asset_family: AssetFamily,
    pub orientation: Orientation,
    /// Top-left paste coordinates for the overlay
    pub overlay_at: (u32, u32),
    /// Anchor coordinates for the centered text label
    pub label_at: (u32, u32),
}

/// The six site slots and their diagram geometry.
///
/// Base overlays reuse the apex corner assets flipped vertically; the
/// right side mirrors the left horizontally.
pub const SITE_PLACEMENTS: [SitePlacement; 6] = [
    SitePlacement {
        side: LobeSide::Left,
        position: SitePosition::Base,
        asset_family: AssetFamily::Corner,
        orientation: Orientation::Flip,
        overlay_at: (145, 958),
        label_at: (525, 1110),
    },
    SitePlacement {
        side: LobeSide::Left,
        position: SitePosition::Mid,
        asset_family: AssetFamily::Mid,
        orientation: Orientation::AsDrawn,
        overlay_at: (145, 606),
        label_at: (205, 690),
    },
    SitePlacement {
        side: LobeSide::Left,
        position: SitePosition::Apex,
        asset_family: AssetFamily::Corner,
        orientation: Orientation::AsDrawn,
        overlay_at: (145, 130),
        label_at: (525, 275),
    },
    SitePlacement {
        side: LobeSide::Right,
        position: SitePosition::Base,
        asset_family: AssetFamily::Corner,
        orientation: Orientation::FlipMirror,
        overlay_at: (1104, 958),
        label_at: (1300, 1110),
    },
    SitePlacement {
        side: LobeSide::Right,
        position: SitePosition::Mid,
        asset_family: AssetFamily::Mid,
        orientation: Orientation::AsDrawn,
        overlay_at: (1542, 606),
        label_at: (1590, 690),
    },
    SitePlacement {
        side: LobeSide::Right,
        position: SitePosition::Apex,
        asset_family: AssetFamily::Corner,
        orientation: Orientation::Mirror,
        overlay_at: (1104, 130),
        label_at: (1300, 275),
    },
];

/// Look up the placement for one site slot.
#[must_use]
pub const fn placement(side: LobeSide, position: SitePosition) -> &'static SitePlacement {
    let index = match (side, position) {
        (LobeSide::Left, SitePosition::Base) => 0,
        (LobeSide::Left, SitePosition::Mid) => 1,
        (LobeSide::Left, SitePosition::Apex) => 2,
        (LobeSide::Right, SitePosition::Base) => 3,
        (LobeSide::Right, SitePosition::Mid) => 4,
        (LobeSide::Right, SitePosition::Apex) => 5,
    };
    &SITE_PLACEMENTS[index]
}

/// One overlay for the renderer to paste
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySpec {
    /// Per-grade asset id, e.g. `"Corner 3"`
    pub asset_id: String,
    pub orientation: Orientation,
    pub paste_at: (u32, u32),
}

/// One text label for the renderer to draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLabel {
    pub text: String,
    pub anchor: (u32, u32),
    pub fill: &'static str,
    pub size_px: u32,
}

/// Annotation of one site slot: an optional overlay plus its label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteAnnotation {
    pub side: LobeSide,
    pub position: SitePosition,
    /// `None` for benign findings
    pub overlay: Option<OverlaySpec>,
    pub label: TextLabel,
}

/// Complete annotation plan for one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramPlan {
    pub base_asset: &'static str,
    /// All six site annotations, left base/mid/apex then right
    pub annotations: Vec<SiteAnnotation>,
}

/// Involvement rendered for labels: whole values keep one decimal
/// place (`0.0`, `45.0`), fractional values print as entered.
fn involvement_text(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn annotate_site(side: LobeSide, position: SitePosition, finding: SiteFinding) -> SiteAnnotation {
    let slot = placement(side, position);
    let overlay = finding.grade.is_malignant().then(|| OverlaySpec {
        asset_id: format!("{} {}", slot.asset_family.stem(), finding.grade.as_ordinal()),
        orientation: slot.orientation,
        paste_at: slot.overlay_at,
    });
    SiteAnnotation {
        side,
        position,
        overlay,
        label: TextLabel {
            text: format!(
                "{}\n% core inv: {}",
                finding.grade.label(),
                involvement_text(finding.involvement_pct)
            ),
            anchor: slot.label_at,
            fill: LABEL_FILL,
            size_px: LABEL_SIZE_PX,
        },
    }
}

/// Build the full diagram plan for a submission.
///
/// Runs off the raw categorical inputs only; it needs no model and is
/// independent of scoring.
#[must_use]
pub fn plan_diagram(submission: &BiopsySubmission) -> DiagramPlan {
    let annotations = LobeSide::ALL
        .iter()
        .flat_map(|&side| {
            SitePosition::ALL.map(|position| {
                annotate_site(side, position, submission.lobe(side).site(position))
            })
        })
        .collect();
    DiagramPlan {
        base_asset: BASE_DIAGRAM_ASSET,
        annotations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GradeGroup, SiteFinding};

    #[test]
    fn placement_table_covers_all_six_slots() {
        for side in LobeSide::ALL {
            for position in SitePosition::ALL {
                let slot = placement(side, position);
                assert_eq!(slot.side, side);
                assert_eq!(slot.position, position);
            }
        }
    }

    #[test]
    fn benign_site_gets_label_but_no_overlay() {
        let annotation =
            annotate_site(LobeSide::Left, SitePosition::Apex, SiteFinding::benign());
        assert!(annotation.overlay.is_none());
        assert!(annotation.label.text.starts_with("Benign"));
    }

    #[test]
    fn right_base_flips_and_mirrors_the_corner_asset() {
        let annotation = annotate_site(
            LobeSide::Right,
            SitePosition::Base,
            SiteFinding::new(GradeGroup::Isup5, 45.0),
        );
        let overlay = annotation.overlay.unwrap();
        assert_eq!(overlay.asset_id, "Corner 5");
        assert_eq!(overlay.orientation, Orientation::FlipMirror);
        assert_eq!(overlay.paste_at, (1104, 958));
        assert_eq!(annotation.label.anchor, (1300, 1110));
    }

    #[test]
    fn mid_sites_use_mid_assets_unrotated() {
        let annotation = annotate_site(
            LobeSide::Right,
            SitePosition::Mid,
            SiteFinding::new(GradeGroup::Isup4, 45.0),
        );
        let overlay = annotation.overlay.unwrap();
        assert_eq!(overlay.asset_id, "Mid 4");
        assert_eq!(overlay.orientation, Orientation::AsDrawn);
        assert_eq!(overlay.paste_at, (1542, 606));
    }

    #[test]
    fn label_carries_grade_label_and_involvement() {
        let annotation = annotate_site(
            LobeSide::Left,
            SitePosition::Base,
            SiteFinding::new(GradeGroup::Isup3, 7.5),
        );
        assert_eq!(
            annotation.label.text,
            "ISUP Grade 3 (Gleason 4+3)\n% core inv: 7.5"
        );
    }

    #[test]
    fn whole_number_involvements_keep_the_decimal_in_labels() {
        let benign =
            annotate_site(LobeSide::Left, SitePosition::Apex, SiteFinding::benign());
        assert_eq!(benign.label.text, "Benign\n% core inv: 0.0");

        let whole = annotate_site(
            LobeSide::Right,
            SitePosition::Base,
            SiteFinding::new(GradeGroup::Isup5, 45.0),
        );
        assert!(whole.label.text.ends_with("% core inv: 45.0"));
    }
}
