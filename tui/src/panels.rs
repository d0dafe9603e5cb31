//! Static Panels
//!
//! The tabbed panels under the pet detail and the rules popover. None of this
//! has server-backed content; the only state is which tab is selected and
//! whether the rules are showing.

/// A tab under the pet detail
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelTab {
    /// Inventory (sample items only)
    Items,
    /// Skills
    Skills,
    /// Shop
    Shop,
    /// Skins
    Skins,
    /// Achievements
    Achievements,
}

impl PanelTab {
    /// Tab title
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Items => "Items",
            Self::Skills => "Skills",
            Self::Shop => "Shop",
            Self::Skins => "Skins",
            Self::Achievements => "Achievements",
        }
    }

    /// Placeholder text for tabs without content
    #[must_use]
    pub fn coming_soon(self) -> &'static str {
        match self {
            Self::Items => "",
            Self::Skills => "Skills are coming soon, stay tuned!",
            Self::Shop => "The shop opens soon, stay tuned!",
            Self::Skins => "Skins are coming soon, stay tuned!",
            Self::Achievements => "Achievements are coming soon, stay tuned!",
        }
    }
}

/// Tabs shown for the caller's own pet
pub const OWN_TABS: [PanelTab; 5] = [
    PanelTab::Items,
    PanelTab::Skills,
    PanelTab::Shop,
    PanelTab::Skins,
    PanelTab::Achievements,
];

/// Tabs shown for another account's pet
pub const OTHER_TABS: [PanelTab; 3] = [PanelTab::Skills, PanelTab::Skins, PanelTab::Achievements];

/// An inventory sample; the use button is always disabled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleItem {
    /// Icon
    pub icon: &'static str,
    /// Name
    pub name: &'static str,
    /// How many
    pub count: u32,
    /// Effect description
    pub effect: &'static str,
}

/// The inventory samples
pub const SAMPLE_ITEMS: [SampleItem; 2] = [
    SampleItem {
        icon: "🍞",
        name: "Fish bait",
        count: 5,
        effect: "Restores 20 hunger",
    },
    SampleItem {
        icon: "🎾",
        name: "Toy ball",
        count: 3,
        effect: "Raises mood by 15",
    },
];

/// Label of the disabled item button
pub const ITEM_USE_LABEL: &str = "Coming soon";

/// Rules popover, as (heading, lines)
pub const RULES: [(&str, &[&str]); 3] = [
    (
        "Experience and levels",
        &[
            "Your pet gains 1 exp every hour",
            "Every 100 exp raises one level",
            "No exp while hunger and mood are both 0",
        ],
    ),
    (
        "Interactions",
        &[
            "Feed: +20 hunger and +5 mood, costs 5 points",
            "Pat: +15 mood, costs 3 points",
            "Interactions have a 1 minute cooldown",
        ],
    ),
    (
        "Points",
        &[
            "Your pet produces points daily, equal to its level",
            "At most 10 points a day",
            "No points while hunger and mood are both 0",
        ],
    ),
];

/// Hint beside the mood gauge
pub const MOOD_HINT: &str = "Mood affects points and exp gain";

/// Hint beside the hunger gauge
pub const HUNGER_HINT: &str = "Hunger affects points and exp gain";

/// Hint beside the exp gauge
pub const EXP_HINT: &str = "Every 100 exp is one level";

/// Points one feed costs
pub const FEED_COST: u32 = 5;

/// Points one pat costs
pub const PAT_COST: u32 = 3;

/// Selected tab and rules visibility
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanelState {
    selected: usize,
    show_rules: bool,
}

impl PanelState {
    /// Default tab, rules hidden
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tabs for this viewer
    #[must_use]
    pub fn tabs(is_own: bool) -> &'static [PanelTab] {
        if is_own {
            &OWN_TABS
        } else {
            &OTHER_TABS
        }
    }

    /// Index of the selected tab
    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The selected tab
    ///
    /// Own pets default to items, other pets to skills.
    #[must_use]
    pub fn selected_tab(&self, is_own: bool) -> PanelTab {
        let tabs = Self::tabs(is_own);
        tabs[self.selected.min(tabs.len() - 1)]
    }

    /// Move to the next tab, wrapping
    pub fn next(&mut self, is_own: bool) {
        let len = Self::tabs(is_own).len();
        self.selected = (self.selected + 1) % len;
    }

    /// Move to the previous tab, wrapping
    pub fn prev(&mut self, is_own: bool) {
        let len = Self::tabs(is_own).len();
        self.selected = (self.selected + len - 1) % len;
    }

    /// Are the rules showing?
    #[must_use]
    pub fn show_rules(&self) -> bool {
        self.show_rules
    }

    /// Show or hide the rules
    pub fn toggle_rules(&mut self) {
        self.show_rules = !self.show_rules;
    }

    /// Back to the default tab with the rules hidden
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
