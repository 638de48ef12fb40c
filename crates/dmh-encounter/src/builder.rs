//! Editing operations used while preparing an encounter.

use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::error::{EncounterError, EncounterResult};
use crate::model::{
    ArmorClass, BATTLE_TRACKER_VERSION, BattleTracker, Creature, Note, Spell, SpellLevel,
    SpellSlots,
};

/// Maximum length of a spell key derived from its label.
const SPELL_KEY_MAX_LEN: usize = 40;

/// Combining Diacritical Marks block.
const COMBINING_DIACRITICS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036f}';

/// Input for adding one or more identical creatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatureDraft {
    /// Name. Blank names get `"Creature #<n>"`.
    pub name: String,
    /// Initiative, if already rolled.
    pub initiative: Option<i64>,
    /// Hit points, used for both current and maximum.
    pub hp: Option<i64>,
    /// Armour class as typed. Plain integers are stored as numbers.
    pub ac: String,
    /// How many copies to add (at least 1).
    pub quantity: u32,
}

impl Default for CreatureDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            initiative: None,
            hp: None,
            ac: String::new(),
            quantity: 1,
        }
    }
}

impl CreatureDraft {
    /// Draft for a single named creature.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the initiative.
    pub fn with_initiative(mut self, initiative: i64) -> Self {
        self.initiative = Some(initiative);
        self
    }

    /// Set the hit points.
    pub fn with_hp(mut self, hp: i64) -> Self {
        self.hp = Some(hp);
        self
    }

    /// Set the armour class.
    pub fn with_ac(mut self, ac: impl Into<String>) -> Self {
        self.ac = ac.into();
        self
    }

    /// Set how many copies to add (clamped to at least 1).
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity.max(1);
        self
    }
}

/// Which spell slot table an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// Slots available.
    Total,
    /// Slots spent.
    Used,
}

impl BattleTracker {
    /// Add `draft.quantity` creatures with consecutive ids. Returns the new ids.
    pub fn add_creatures(&mut self, draft: &CreatureDraft) -> Vec<i64> {
        let quantity = draft.quantity.max(1);
        let name = draft.name.trim();
        let hp = draft.hp.unwrap_or(0);
        let ac = match draft.ac.trim().parse::<i64>() {
            Ok(n) => ArmorClass::Number(n.into()),
            Err(_) => ArmorClass::Text(draft.ac.clone()),
        };

        let mut ids = Vec::with_capacity(quantity as usize);
        for _ in 0..quantity {
            let id = self.creature_id_count;
            let mut creature = Creature::new(
                id,
                if name.is_empty() {
                    Creature::default_name(id)
                } else {
                    name.to_string()
                },
            );
            creature.initiative = draft.initiative;
            creature.health_points = hp;
            creature.max_health_points = hp;
            creature.armor_class = ac.clone();

            self.creatures.push(creature);
            self.creature_id_count = self.creature_id_count.saturating_add(1);
            ids.push(id);
        }

        self.share_enabled = false;
        self.battle_tracker_version = BATTLE_TRACKER_VERSION.to_string();
        self.shared_timestamp = None;

        debug!(count = ids.len(), "creatures added");
        ids
    }

    /// Mutable access to a creature by id.
    pub fn creature_mut(&mut self, id: i64) -> EncounterResult<&mut Creature> {
        self.creatures
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(EncounterError::CreatureNotFound(id))
    }

    /// Apply `patch` to the creature with the given id.
    pub fn update_creature(
        &mut self,
        id: i64,
        patch: impl FnOnce(&mut Creature),
    ) -> EncounterResult<()> {
        patch(self.creature_mut(id)?);
        Ok(())
    }

    /// Remove a creature and return it.
    pub fn remove_creature(&mut self, id: i64) -> EncounterResult<Creature> {
        let idx = self
            .creatures
            .iter()
            .position(|c| c.id == id)
            .ok_or(EncounterError::CreatureNotFound(id))?;
        Ok(self.creatures.remove(idx))
    }

    /// Attach a note. Blank text is ignored and yields `None`; otherwise the
    /// new note's id is returned.
    pub fn add_note(&mut self, creature_id: i64, text: &str) -> EncounterResult<Option<i64>> {
        let creature = self.creature_mut(creature_id)?;
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let id = creature
            .notes
            .iter()
            .map(|n| n.id)
            .max()
            .map_or(0, |max| max.saturating_add(1));
        creature.notes.push(Note {
            text: text.to_string(),
            applied_at_round: 0,
            applied_at_seconds: 0,
            id,
        });
        Ok(Some(id))
    }

    /// Remove a note from a creature. Unknown note ids are ignored.
    pub fn remove_note(&mut self, creature_id: i64, note_id: i64) -> EncounterResult<()> {
        self.creature_mut(creature_id)?
            .notes
            .retain(|n| n.id != note_id);
        Ok(())
    }

    /// Give a creature empty spell slot tables.
    pub fn enable_spellcasting(&mut self, creature_id: i64) -> EncounterResult<()> {
        let creature = self.creature_mut(creature_id)?;
        creature.total_spell_slots = Some(SpellSlots::new());
        creature.used_spell_slots = Some(SpellSlots::new());
        Ok(())
    }

    /// Set a spell slot count. Negative values count as 0.
    ///
    /// Setting a total for a level that had none also zeroes its used
    /// count, and used counts never exceed the total.
    pub fn set_spell_slot(
        &mut self,
        creature_id: i64,
        kind: SlotKind,
        level: SpellLevel,
        value: i64,
    ) -> EncounterResult<()> {
        let value = value.max(0);
        let creature = self.creature_mut(creature_id)?;
        let mut used = creature.used_spell_slots.take().unwrap_or_default();

        match kind {
            SlotKind::Total => {
                let mut total = creature.total_spell_slots.take().unwrap_or_default();
                let had_total = total.insert(level, value).is_some();
                if !had_total {
                    used.insert(level, 0);
                }
                if used.get(&level).copied().unwrap_or(0) > value {
                    used.insert(level, value);
                }
                creature.total_spell_slots = Some(total);
            }
            SlotKind::Used => {
                let max = creature
                    .total_spell_slots
                    .as_ref()
                    .and_then(|t| t.get(&level).copied())
                    .unwrap_or(value);
                used.insert(level, value.min(max));
            }
        }

        creature.used_spell_slots = Some(used);
        Ok(())
    }

    /// Add a limited-use spell. Blank labels are ignored and yield `None`;
    /// otherwise the key the spell was stored under is returned.
    pub fn add_spell(
        &mut self,
        creature_id: i64,
        label: &str,
        total: i64,
    ) -> EncounterResult<Option<String>> {
        let creature = self.creature_mut(creature_id)?;
        let label = label.trim();
        if label.is_empty() {
            return Ok(None);
        }
        let total = if total > 0 { total } else { 1 };
        let key = unique_spell_key(&creature.spells, label);
        creature.spells.insert(
            key.clone(),
            Spell {
                label: label.to_string(),
                total,
            },
        );
        Ok(Some(key))
    }

    /// Remove a spell by key. Unknown keys are ignored.
    pub fn remove_spell(&mut self, creature_id: i64, key: &str) -> EncounterResult<()> {
        self.creature_mut(creature_id)?.spells.remove(key);
        Ok(())
    }
}

/// Key for a new spell: the slug of its label, suffixed with 2, 3, ... on collision.
fn unique_spell_key<V>(spells: &std::collections::BTreeMap<String, V>, label: &str) -> String {
    let base = match slugify(label) {
        s if s.is_empty() => "spell".to_string(),
        s => s,
    };
    let mut key = base.clone();
    let mut i = 2;
    while spells.contains_key(&key) {
        key = format!("{base}{i}");
        i += 1;
    }
    key
}

/// Lowercase ASCII letters and digits only. The label is NFKD-decomposed
/// and combining diacritics are stripped, so accented letters keep their base
/// letter; everything else is dropped.
fn slugify(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .nfkd()
        .filter(|c| !COMBINING_DIACRITICS.contains(c))
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .take(SPELL_KEY_MAX_LEN)
        .collect()
}
