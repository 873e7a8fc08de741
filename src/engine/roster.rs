//! The fixed, ordered set of fighters

use std::ops::{Index, IndexMut};

use rand::Rng;

use crate::combat::Character;
use crate::core::types::CharacterId;
use crate::engine::events::Standing;

/// Roster size is fixed
pub const ROSTER_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    characters: Vec<Character>,
}

impl Roster {
    /// Characters must arrive in declaration order with ids 0, 1, 2
    pub fn new(characters: Vec<Character>) -> Self {
        debug_assert_eq!(characters.len(), ROSTER_SIZE);
        debug_assert!(characters
            .iter()
            .enumerate()
            .all(|(i, c)| c.id().index() == i));
        Self { characters }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Character> {
        self.characters.iter()
    }

    pub fn ids(&self) -> Vec<CharacterId> {
        self.characters.iter().map(Character::id).collect()
    }

    pub fn living_count(&self) -> usize {
        self.characters.iter().filter(|c| c.is_alive()).count()
    }

    /// Living characters other than `actor`, in roster order
    pub fn living_opponents(&self, actor: CharacterId) -> Vec<CharacterId> {
        self.characters
            .iter()
            .filter(|c| c.id() != actor && c.is_alive())
            .map(Character::id)
            .collect()
    }

    /// Uniform pick among living opponents; `None` when nobody is left
    pub fn pick_random_opponent<R: Rng>(
        &self,
        actor: CharacterId,
        rng: &mut R,
    ) -> Option<CharacterId> {
        let opponents = self.living_opponents(actor);
        if opponents.is_empty() {
            return None;
        }
        Some(opponents[rng.gen_range(0..opponents.len())])
    }

    /// Alive first, then dead; roster order within each group
    pub fn ranking(&self) -> Vec<Standing> {
        let (alive, dead): (Vec<&Character>, Vec<&Character>) =
            self.characters.iter().partition(|c| c.is_alive());
        alive
            .into_iter()
            .chain(dead)
            .enumerate()
            .map(|(i, c)| Standing {
                place: i + 1,
                name: c.name().to_string(),
                alive: c.is_alive(),
            })
            .collect()
    }
}

impl Index<CharacterId> for Roster {
    type Output = Character;

    fn index(&self, id: CharacterId) -> &Character {
        &self.characters[id.index()]
    }
}

impl IndexMut<CharacterId> for Roster {
    fn index_mut(&mut self, id: CharacterId) -> &mut Character {
        &mut self.characters[id.index()]
    }
}
