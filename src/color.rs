use std::collections::BTreeMap;
use std::fmt::Display;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Outcome;

// ---------------------------------------------------------------------------
// Channel palettes
// ---------------------------------------------------------------------------

/// HSL parameters for one categorical channel. Channels drawn next to each
/// other use different hue offsets so their colours do not coincide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub hue_offset: f32,
    pub saturation: f32,
    pub lightness: f32,
}

/// Scatter markers: saturated, mid lightness.
pub const BOOSTER_TONE: Tone = Tone {
    hue_offset: 200.0,
    saturation: 0.75,
    lightness: 0.55,
};

/// Pie slices: softer, so the percentage labels stay readable on top.
pub const SITE_TONE: Tone = Tone {
    hue_offset: 30.0,
    saturation: 0.6,
    lightness: 0.62,
};

/// `n` colours with hues evenly spread around the wheel, starting at the
/// tone's offset.
pub fn channel_palette(n: usize, tone: Tone) -> Vec<Color32> {
    let step = 360.0 / n.max(1) as f32;
    (0..n)
        .map(|i| {
            let hue = (tone.hue_offset + i as f32 * step) % 360.0;
            let rgb: Srgb = Hsl::new(hue, tone.saturation, tone.lightness).into_color();
            let (r, g, b) = rgb.into_format::<u8>().into_components();
            Color32::from_rgb(r, g, b)
        })
        .collect()
}

/// Fixed colours for the two launch outcomes.
pub fn outcome_color(outcome: Outcome) -> Color32 {
    match outcome {
        Outcome::Success => Color32::from_rgb(0x3f, 0xb6, 0x8b),
        Outcome::Failure => Color32::from_rgb(0xf0, 0x63, 0x5c),
    }
}

// ---------------------------------------------------------------------------
// Color mapping: categorical value → Color32
// ---------------------------------------------------------------------------

/// Maps the categories of one channel (booster version, launch site) to
/// distinct colours. Assignment depends only on the category set, so a
/// category keeps its colour while the selection changes.
#[derive(Debug, Clone)]
pub struct ColorMap<K: Ord> {
    mapping: BTreeMap<K, Color32>,
    default_color: Color32,
}

impl<K: Ord + Clone + Display> ColorMap<K> {
    /// Build a colour map from the channel's categories.
    pub fn new<'a, I>(categories: I, tone: Tone) -> Self
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        let mut keys: Vec<K> = categories.into_iter().cloned().collect();
        keys.sort();
        keys.dedup();
        let palette = channel_palette(keys.len(), tone);
        let mapping: BTreeMap<K, Color32> = keys.into_iter().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category.
    pub fn color_for<Q>(&self, key: &Q) -> Color32
    where
        K: std::borrow::Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.mapping
            .get(key)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (category label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(k, c)| (k.to_string(), *c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaunchSite;

    #[test]
    fn palette_has_requested_number_of_distinct_colours() {
        assert!(channel_palette(0, BOOSTER_TONE).is_empty());
        let p = channel_palette(5, BOOSTER_TONE);
        assert_eq!(p.len(), 5);
        for (i, a) in p.iter().enumerate() {
            for b in &p[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn tones_shift_the_first_hue() {
        let booster = channel_palette(4, BOOSTER_TONE);
        let site = channel_palette(4, SITE_TONE);
        assert_ne!(booster[0], site[0]);
        // Hue 200 is a blue: blue channel dominates red.
        assert!(booster[0].b() > booster[0].r());
    }

    #[test]
    fn unknown_category_falls_back_to_gray() {
        let cats = vec!["FT".to_string(), "B5".to_string(), "FT".to_string()];
        let cm = ColorMap::new(&cats, BOOSTER_TONE);
        assert_eq!(cm.legend_entries().len(), 2);
        assert_ne!(cm.color_for("FT"), cm.color_for("B5"));
        assert_eq!(cm.color_for("v9"), Color32::GRAY);
    }

    #[test]
    fn colour_assignment_ignores_input_order() {
        let a = ColorMap::new(&[LaunchSite::KscLc39a, LaunchSite::CcafsLc40], SITE_TONE);
        let b = ColorMap::new(&[LaunchSite::CcafsLc40, LaunchSite::KscLc39a], SITE_TONE);
        assert_eq!(
            a.color_for(&LaunchSite::KscLc39a),
            b.color_for(&LaunchSite::KscLc39a)
        );
    }
}
