// src/occlusion_lib/hide_registry.rs

use std::collections::HashSet;
use log::debug;

/// Capability tag a drawable declares about itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderTag(pub &'static str);

pub const PHYSICAL_OBJECT: RenderTag = RenderTag("physical-object");
pub const CREATURE_GRAPHICS: RenderTag = RenderTag("creature-graphics");
pub const PARTICLE: RenderTag = RenderTag("particle");
pub const AMBIENT_LIFE: RenderTag = RenderTag("ambient-life");
pub const SHORTCUT_SPRITE: RenderTag = RenderTag("shortcut-sprite");
pub const HUD: RenderTag = RenderTag("hud");

pub const OCCLUSION_LAYER: RenderTag = RenderTag("occlusion-layer");
pub const PLAYER_GRAPHICS: RenderTag = RenderTag("player-graphics");
pub const OVERSEER_GRAPHICS: RenderTag = RenderTag("overseer-graphics");
pub const MIMIC_GRAPHICS: RenderTag = RenderTag("mimic-graphics");

/// Something the presenter can hide while it renders the out-of-view pass.
pub trait Hideable {
    fn tags(&self) -> &[RenderTag];

    /// The object a light or effect is attached to; its tags count too.
    fn attached_to(&self) -> Option<&dyn Hideable> {
        None
    }

    fn is_visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);
}

/// Which tagged drawables get hidden during the out-of-view pass.
#[derive(Clone, Debug, Default)]
pub struct HideRegistry {
    hidden: HashSet<RenderTag>,
    exempt: HashSet<RenderTag>,
}

impl HideRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The stock rules: world objects and effects hide, viewers and the occlusion layer stay.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        for tag in [PHYSICAL_OBJECT, CREATURE_GRAPHICS, PARTICLE, AMBIENT_LIFE, SHORTCUT_SPRITE, HUD] {
            registry.hide(tag);
        }
        for tag in [OCCLUSION_LAYER, PLAYER_GRAPHICS, OVERSEER_GRAPHICS, MIMIC_GRAPHICS] {
            registry.exempt(tag);
        }
        registry
    }

    pub fn hide(&mut self, tag: RenderTag) {
        self.hidden.insert(tag);
    }

    pub fn unhide(&mut self, tag: RenderTag) {
        self.hidden.remove(&tag);
    }

    pub fn exempt(&mut self, tag: RenderTag) {
        self.exempt.insert(tag);
    }

    pub fn unexempt(&mut self, tag: RenderTag) {
        self.exempt.remove(&tag);
    }

    pub fn should_hide(&self, item: &dyn Hideable) -> bool {
        if item.tags().iter().any(|t| self.exempt.contains(t)) {
            return false;
        }
        item.tags().iter().any(|t| self.hidden.contains(t))
            || item.attached_to().map_or(false, |anchor| self.should_hide(anchor))
    }

    /// Hides every visible matching item and remembers which ones it touched.
    pub fn begin_pass<H: Hideable>(&self, items: &mut [H]) -> HidePass {
        let mut hidden = Vec::new();
        for (index, item) in items.iter_mut().enumerate() {
            if item.is_visible() && self.should_hide(&*item) {
                item.set_visible(false);
                hidden.push(index);
            }
        }
        debug!("hid {} of {} drawables", hidden.len(), items.len());
        HidePass { hidden }
    }
}

/// Items hidden by one pass, by index into the slice it ran over.
#[derive(Debug, Default)]
#[must_use = "restore the pass or the hidden items stay invisible"]
pub struct HidePass {
    hidden: Vec<usize>,
}

impl HidePass {
    pub fn hidden(&self) -> &[usize] {
        &self.hidden
    }

    pub fn restore<H: Hideable>(self, items: &mut [H]) {
        for index in self.hidden {
            if let Some(item) = items.get_mut(index) {
                item.set_visible(true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sprite {
        tags: Vec<RenderTag>,
        visible: bool,
    }

    impl Sprite {
        fn new(tags: &[RenderTag]) -> Self {
            Self { tags: tags.to_vec(), visible: true }
        }
    }

    impl Hideable for Sprite {
        fn tags(&self) -> &[RenderTag] {
            &self.tags
        }
        fn is_visible(&self) -> bool {
            self.visible
        }
        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
        }
    }

    struct Light<'a> {
        anchor: &'a Sprite,
        visible: bool,
    }

    impl Hideable for Light<'_> {
        fn tags(&self) -> &[RenderTag] {
            &[]
        }
        fn attached_to(&self) -> Option<&dyn Hideable> {
            Some(self.anchor)
        }
        fn is_visible(&self) -> bool {
            self.visible
        }
        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
        }
    }

    #[test]
    fn exemption_beats_hiding() {
        let registry = HideRegistry::with_defaults();
        let player = Sprite::new(&[CREATURE_GRAPHICS, PLAYER_GRAPHICS]);
        let lizard = Sprite::new(&[CREATURE_GRAPHICS]);
        assert!(!registry.should_hide(&player));
        assert!(registry.should_hide(&lizard));
    }

    #[test]
    fn lights_follow_their_anchor() {
        let registry = HideRegistry::with_defaults();
        let rock = Sprite::new(&[PHYSICAL_OBJECT]);
        let light = Light { anchor: &rock, visible: true };
        assert!(registry.should_hide(&light));
    }

    #[test]
    fn lights_on_exempt_anchors_stay_visible() {
        let registry = HideRegistry::with_defaults();
        let player = Sprite::new(&[CREATURE_GRAPHICS, PLAYER_GRAPHICS]);
        let light = Light { anchor: &player, visible: true };
        assert!(!registry.should_hide(&player));
        assert!(!registry.should_hide(&light));
    }

    #[test]
    fn pass_restores_only_what_it_hid() {
        let registry = HideRegistry::with_defaults();
        let mut sprites = vec![
            Sprite::new(&[PARTICLE]),
            Sprite::new(&[]),
            Sprite::new(&[HUD]),
        ];
        sprites[2].visible = false;

        let pass = registry.begin_pass(&mut sprites);
        assert_eq!(pass.hidden(), &[0]);
        assert!(!sprites[0].visible);
        pass.restore(&mut sprites);
        assert!(sprites[0].visible);
        assert!(!sprites[2].visible);
    }

    #[test]
    fn rules_can_change_at_runtime() {
        let mut registry = HideRegistry::with_defaults();
        let bubble = Sprite::new(&[PARTICLE]);
        registry.unhide(PARTICLE);
        assert!(!registry.should_hide(&bubble));
        registry.hide(PARTICLE);
        registry.exempt(PARTICLE);
        assert!(!registry.should_hide(&bubble));
        registry.unexempt(PARTICLE);
        assert!(registry.should_hide(&bubble));
    }
}
