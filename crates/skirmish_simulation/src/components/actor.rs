//! Базовые компоненты акторов: Actor, Faction, Health, Enemy

use bevy::prelude::*;

use crate::clock::TimerInbox;
use crate::combat::{HitVolume, HurtVolume, Knockback};

/// Сторона конфликта. Sensing и hit detection работают только против
/// противоположной фракции.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum Faction {
    Player,
    #[default]
    Enemy,
}

impl Faction {
    pub fn opposing(self) -> Self {
        match self {
            Faction::Player => Faction::Enemy,
            Faction::Enemy => Faction::Player,
        }
    }
}

/// Актор (игрок или враг): базовый компонент для живых существ
///
/// Автоматически добавляет Health, Transform, volumes, knockback и inbox
/// через Required Components.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Health, Transform, HurtVolume, HitVolume, Knockback, TimerInbox)]
pub struct Actor {
    pub faction: Faction,
}

/// Marker: AI-controlled enemy (driven by `EnemyBrain`).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Enemy;

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max. `current == 0` ⇔ мёртв.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn is_dead(&self) -> bool {
        self.current == 0
    }

    /// Saturating: never goes below zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}
