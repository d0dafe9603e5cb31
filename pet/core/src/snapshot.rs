//! Pet Snapshot
//!
//! The client-held copy of a pet resource, exactly as the pet service last
//! returned it. Nothing here is computed locally except display helpers
//! (gauge percentages, level label); experience, hunger and mood are owned
//! by the server.
//!
//! # Wire Format
//!
//! The service encodes the identifier as `petId` (string or integer) and the
//! avatar as `petUrl`; every other field is camelCase. Missing maxima default
//! to 100 and a missing level defaults to 1.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Conventional maximum for every gauge (exp, hunger, mood)
pub const DEFAULT_GAUGE_MAX: u32 = 100;

fn default_gauge_max() -> u32 {
    DEFAULT_GAUGE_MAX
}

fn default_level() -> u32 {
    1
}

/// Opaque pet identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PetId(pub String);

impl PetId {
    /// Create an identifier from anything string-like
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        })
    }
}

/// A pet skill (declared by the service, not yet populated)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetSkill {
    /// Skill identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
    /// Skill level
    pub level: u32,
    /// Icon reference
    pub icon: String,
}

/// Category of an inventory item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Restores hunger
    Food,
    /// Raises mood
    Toy,
    /// Anything else
    Special,
}

/// An inventory item (declared by the service, not yet populated)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetItem {
    /// Item identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
    /// How many the owner holds
    pub count: u32,
    /// Icon reference
    pub icon: String,
    /// Item category
    #[serde(rename = "type")]
    pub kind: ItemKind,
}

/// An achievement (declared by the service, not yet populated)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetAchievement {
    /// Achievement identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
    /// Whether it has been earned
    pub completed: bool,
    /// Icon reference
    pub icon: String,
    /// Current progress
    pub progress: u32,
    /// Progress needed to complete
    pub max_progress: u32,
}

/// Snapshot of a pet resource at the time of the last fetch or mutation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetSnapshot {
    /// Identifier, present once the pet exists
    #[serde(rename = "petId", default)]
    pub id: Option<PetId>,
    /// Free-text name, only changed through rename
    #[serde(default)]
    pub name: String,
    /// Level, computed by the server from experience
    #[serde(default = "default_level")]
    pub level: u32,
    /// Experience toward the next level
    #[serde(default)]
    pub exp: u32,
    /// Experience needed for the next level
    #[serde(default = "default_gauge_max")]
    pub max_exp: u32,
    /// Hunger gauge
    #[serde(default)]
    pub hunger: u32,
    /// Hunger gauge maximum
    #[serde(default = "default_gauge_max")]
    pub max_hunger: u32,
    /// Mood gauge
    #[serde(default)]
    pub mood: u32,
    /// Mood gauge maximum
    #[serde(default = "default_gauge_max")]
    pub max_mood: u32,
    /// Avatar reference, fixed at creation
    #[serde(rename = "petUrl", default)]
    pub avatar_url: String,
    /// Skills (always empty for now)
    #[serde(default)]
    pub skills: Vec<PetSkill>,
    /// Items (always empty for now)
    #[serde(default)]
    pub items: Vec<PetItem>,
    /// Achievements (always empty for now)
    #[serde(default)]
    pub achievements: Vec<PetAchievement>,
}

impl Default for PetSnapshot {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            level: 1,
            exp: 0,
            max_exp: DEFAULT_GAUGE_MAX,
            hunger: 0,
            max_hunger: DEFAULT_GAUGE_MAX,
            mood: 0,
            max_mood: DEFAULT_GAUGE_MAX,
            avatar_url: String::new(),
            skills: Vec::new(),
            items: Vec::new(),
            achievements: Vec::new(),
        }
    }
}

impl PetSnapshot {
    /// Create a snapshot with an id and a name, everything else defaulted
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(PetId::new(id)),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Level label, e.g. `Lv.3`
    #[must_use]
    pub fn level_label(&self) -> String {
        format!("Lv.{}", self.level.max(1))
    }

    /// Mood as a percentage of its maximum
    #[must_use]
    pub fn mood_percent(&self) -> u16 {
        gauge_percent(self.mood, self.max_mood)
    }

    /// Hunger as a percentage of its maximum
    #[must_use]
    pub fn hunger_percent(&self) -> u16 {
        gauge_percent(self.hunger, self.max_hunger)
    }

    /// Experience as a percentage of the next level
    #[must_use]
    pub fn exp_percent(&self) -> u16 {
        gauge_percent(self.exp, self.max_exp)
    }
}

/// `value / max * 100`, clamped to `0..=100`; a zero maximum reads as empty
#[must_use]
pub fn gauge_percent(value: u32, max: u32) -> u16 {
    if max == 0 {
        return 0;
    }
    let percent = (u64::from(value) * 100 / u64::from(max)).min(100);
    u16::try_from(percent).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_service_payload_with_numeric_id() {
        let json = r#"{
            "petId": 1024,
            "name": "Bubbles",
            "level": 3,
            "exp": 40,
            "hunger": 70,
            "mood": 55,
            "petUrl": "https://example.test/bubbles.png"
        }"#;

        let pet: PetSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(pet.id, Some(PetId::new("1024")));
        assert_eq!(pet.name, "Bubbles");
        assert_eq!(pet.level, 3);
        assert_eq!(pet.max_exp, 100);
        assert_eq!(pet.max_hunger, 100);
        assert_eq!(pet.max_mood, 100);
        assert_eq!(pet.avatar_url, "https://example.test/bubbles.png");
        assert!(pet.skills.is_empty());
        assert!(pet.items.is_empty());
        assert!(pet.achievements.is_empty());
    }

    #[test]
    fn test_parse_string_id_and_missing_fields() {
        let pet: PetSnapshot = serde_json::from_str(r#"{"petId": "p1"}"#).unwrap();
        assert_eq!(pet.id, Some(PetId::new("p1")));
        assert_eq!(pet.level, 1);
        assert_eq!(pet.exp, 0);
    }

    #[test]
    fn test_null_id_is_absent() {
        let pet: PetSnapshot = serde_json::from_str(r#"{"petId": null, "name": "x"}"#).unwrap();
        assert_eq!(pet.id, None);
    }

    #[test]
    fn test_serialize_uses_service_names() {
        let value = serde_json::to_value(PetSnapshot::new("p1", "Bubbles")).unwrap();
        assert_eq!(value["petId"], "p1");
        assert_eq!(value["petUrl"], "");
        assert_eq!(value["maxExp"], 100);
    }

    #[test]
    fn test_item_kind_wire_name() {
        let item: PetItem = serde_json::from_str(
            r#"{"id":"i1","name":"Bait","description":"","count":5,"icon":"","type":"food"}"#,
        )
        .unwrap();
        assert_eq!(item.kind, ItemKind::Food);
    }

    #[test]
    fn test_gauge_percent() {
        assert_eq!(gauge_percent(40, 100), 40);
        assert_eq!(gauge_percent(25, 50), 50);
        assert_eq!(gauge_percent(150, 100), 100);
        assert_eq!(gauge_percent(10, 0), 0);
    }

    #[test]
    fn test_level_label_never_below_one() {
        let mut pet = PetSnapshot::new("p1", "Bubbles");
        pet.level = 0;
        assert_eq!(pet.level_label(), "Lv.1");
        pet.level = 7;
        assert_eq!(pet.level_label(), "Lv.7");
    }
}
