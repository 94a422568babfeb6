//! Collision outcomes reported back to the orchestrator.
//!
//! The collision systems resolve hits immediately (damage, kills, explosion
//! spawns) and summarise what happened in a [`BulletReport`] so the caller can
//! award points and trigger sounds.

/// Summary of one bullets-versus-enemies pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulletReport {
    /// Bullets removed because they connected.
    pub bullets_spent: u32,
    /// Non-lethal hits (enemy flashed white).
    pub hits: u32,
    /// Enemies destroyed.
    pub kills: u32,
    /// Points awarded for the kills.
    pub points: u32,
}

impl BulletReport {
    pub fn merge(&mut self, other: BulletReport) {
        self.bullets_spent += other.bullets_spent;
        self.hits += other.hits;
        self.kills += other.kills;
        self.points += other.points;
    }
}
