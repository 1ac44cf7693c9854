//! Zone layout generation.
//!
//! Turns a note source (chromatic run or named preset scale) and a display
//! area into an ordered grid of note zones. Notes spread over a fixed
//! number of rows: row sizes come from round-robin counting, rows fill in
//! note order, and each row divides its width evenly among its zones.

pub mod zone;

pub use zone::{ClaimState, NoteZone, ZoneRect};

use log::warn;

use crate::notes::scale::{builtin_presets, resolve_notes, ScalePreset};
use crate::notes::parse_note;

/// Everything zone generation needs, decoupled from the config file shape.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSettings {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub rows: usize,
    pub starting_note: String,
    pub num_octaves: u32,
    pub active_scale: Option<String>,
    pub preset_scales: Vec<ScalePreset>,
    pub zone_labels: bool,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            padding: 10.0,
            rows: 2,
            starting_note: "C4".to_string(),
            num_octaves: 2,
            active_scale: None,
            preset_scales: builtin_presets(),
            zone_labels: true,
        }
    }
}

/// Owns the zone list and rebuilds it from its settings on demand.
///
/// Regeneration replaces every zone, so callers holding claims into the
/// old list must release them first (the engine's `release_all` exists
/// for exactly that hand-off).
#[derive(Debug)]
pub struct ZoneLayout {
    settings: LayoutSettings,
    zones: Vec<NoteZone>,
}

impl ZoneLayout {
    pub fn new(settings: LayoutSettings) -> Self {
        let mut layout = Self {
            settings,
            zones: Vec::new(),
        };
        layout.regenerate();
        layout
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut LayoutSettings {
        &mut self.settings
    }

    pub fn zones(&self) -> &[NoteZone] {
        &self.zones
    }

    pub fn zones_mut(&mut self) -> &mut [NoteZone] {
        &mut self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Swap the active scale and rebuild.
    pub fn set_scale(&mut self, scale: Option<String>) {
        self.settings.active_scale = scale;
        self.regenerate();
    }

    /// Rebuild the zone list from current settings, discarding the old
    /// zones and their claim states.
    pub fn regenerate(&mut self) {
        let start = match parse_note(&self.settings.starting_note) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "invalid starting_note '{}' ({}), using C4",
                    self.settings.starting_note, err
                );
                60
            }
        };
        let notes = resolve_notes(
            self.settings.active_scale.as_deref(),
            &self.settings.preset_scales,
            start,
            self.settings.num_octaves,
        );
        if notes.is_empty() {
            warn!("no notes generated for the layout");
        }
        self.zones = build_zones(&notes, &self.settings);
    }
}

fn build_zones(notes: &[(String, u8)], settings: &LayoutSettings) -> Vec<NoteZone> {
    if notes.is_empty() {
        return Vec::new();
    }

    let rows = settings.rows.max(1);
    let mut row_counts = vec![0usize; rows];
    for i in 0..notes.len() {
        row_counts[i % rows] += 1;
    }

    let area_width = settings.width - 2.0 * settings.padding;
    let area_height = settings.height - 2.0 * settings.padding;
    let row_height = area_height / rows as f32;

    let mut zones = Vec::with_capacity(notes.len());
    let mut next = 0;
    for (row, &count) in row_counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let zone_width = area_width / count as f32;
        for col in 0..count {
            let (name, value) = &notes[next];
            next += 1;
            let rect = ZoneRect::new(
                settings.padding + col as f32 * zone_width,
                settings.padding + row as f32 * row_height,
                zone_width,
                row_height,
            );
            let label = settings.zone_labels.then(|| name.clone());
            zones.push(NoteZone::new(rect, *value, name.clone(), label));
        }
    }
    zones
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn chromatic_layout_tiles_two_rows() {
        let layout = ZoneLayout::new(LayoutSettings {
            width: 800.0,
            height: 300.0,
            num_octaves: 1,
            ..LayoutSettings::default()
        });
        let zones = layout.zones();

        assert_eq!(zones.len(), 12); // C4 to B4
        assert_eq!(zones[0].name(), "C4");
        assert_eq!(zones[0].note(), 60);
        assert_eq!(zones[11].name(), "B4");
        assert_eq!(zones[11].note(), 71);

        // Area 780x280 inset by the 10px padding: 6 zones per row,
        // each 130x140.
        let rect = zones[0].rect();
        assert!(close(rect.x, 10.0));
        assert!(close(rect.y, 10.0));
        assert!(close(rect.width, 130.0));
        assert!(close(rect.height, 140.0));
        assert_eq!(zones[0].label(), Some("C4"));
    }

    #[test]
    fn preset_layout_uses_the_scale_notes() {
        let layout = ZoneLayout::new(LayoutSettings {
            width: 1000.0,
            height: 400.0,
            padding: 20.0,
            starting_note: "C3".to_string(), // ignored while a preset is active
            active_scale: Some("Major Pentatonic".to_string()),
            zone_labels: false,
            ..LayoutSettings::default()
        });
        let zones = layout.zones();

        assert_eq!(zones.len(), 10);
        assert_eq!(zones[0].note(), 60);
        assert_eq!(zones[9].note(), 81); // A5

        // Area 960x360: 5 zones per row, each 192x180.
        let rect = zones[0].rect();
        assert!(close(rect.x, 20.0));
        assert!(close(rect.width, 192.0));
        assert!(close(rect.height, 180.0));
        assert_eq!(zones[0].label(), None);
    }

    #[test]
    fn unknown_scale_defaults_to_chromatic() {
        let layout = ZoneLayout::new(LayoutSettings {
            width: 800.0,
            height: 300.0,
            padding: 0.0,
            starting_note: "A3".to_string(),
            num_octaves: 1,
            active_scale: Some("Unknown Scale".to_string()),
            ..LayoutSettings::default()
        });
        let zones = layout.zones();

        assert_eq!(zones.len(), 12); // A3 to G#4
        assert_eq!(zones[0].note(), 57);
        assert_eq!(zones[11].note(), 68);
        let rect = zones[0].rect();
        assert!(close(rect.x, 0.0));
        assert!(close(rect.width, 800.0 / 6.0));
        assert!(close(rect.height, 150.0));
    }

    #[test]
    fn zero_octaves_yields_an_empty_layout() {
        let layout = ZoneLayout::new(LayoutSettings {
            num_octaves: 0,
            ..LayoutSettings::default()
        });
        assert!(layout.is_empty());
    }

    #[test]
    fn invalid_starting_note_falls_back_to_middle_c() {
        let layout = ZoneLayout::new(LayoutSettings {
            starting_note: "nope".to_string(),
            num_octaves: 1,
            ..LayoutSettings::default()
        });
        assert_eq!(layout.zones()[0].note(), 60);
    }

    #[test]
    fn odd_counts_put_the_extra_zone_in_the_first_row() {
        let layout = ZoneLayout::new(LayoutSettings {
            width: 620.0,
            height: 220.0,
            padding: 10.0,
            active_scale: Some("Five".to_string()),
            preset_scales: vec![ScalePreset::new(
                "Five",
                &["C4", "D4", "E4", "F4", "G4"],
            )],
            ..LayoutSettings::default()
        });
        let zones = layout.zones();
        assert_eq!(zones.len(), 5);

        // Rows fill in note order: 3 zones up top, 2 below, widths per row.
        let row_height = 100.0;
        for zone in &zones[..3] {
            assert!(close(zone.rect().y, 10.0));
            assert!(close(zone.rect().width, 200.0));
        }
        for zone in &zones[3..] {
            assert!(close(zone.rect().y, 10.0 + row_height));
            assert!(close(zone.rect().width, 300.0));
        }
        assert_eq!(zones[3].name(), "F4");
    }

    #[test]
    fn regenerate_discards_claims_and_zones() {
        use crate::tracking::{Finger, FingerId, HandId};

        let mut layout = ZoneLayout::new(LayoutSettings {
            num_octaves: 1,
            ..LayoutSettings::default()
        });
        let finger = FingerId::new(HandId::Left, Finger::Index);
        assert!(layout.zones_mut()[0].claim(finger));

        layout.set_scale(Some("Blues".to_string()));
        assert_eq!(layout.len(), 7);
        assert!(layout.zones().iter().all(|z| z.is_free()));
    }
}
