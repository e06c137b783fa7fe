//! Automated participant profiles and their drift behavior.
//!
//! Profiles are configuration, not mutable state: each one describes a
//! simulated participant seeded into the global room at startup and driven
//! by its own timer task for the lifetime of the process.

use std::time::Duration;

use super::value_object::{DisplayName, ParticipantId};

/// Fraction of the remaining distance to the target pulled in per tick
/// (exponential approach).
pub const DRIFT_RATE: f64 = 0.1;

/// Configuration for one automated participant in the global room.
#[derive(Debug, Clone)]
pub struct BotProfile {
    pub id: ParticipantId,
    pub display_name: DisplayName,
    /// Value the bot drifts toward
    pub target: f64,
    /// Magnitude bounding the per-tick random perturbation
    pub volatility: f64,
    pub tick_interval: Duration,
}

impl BotProfile {
    fn new(id: &str, display_name: &str, target: f64, volatility: f64, tick_ms: u64) -> Self {
        Self {
            id: ParticipantId::new(id).expect("profile id is well-formed"),
            display_name: DisplayName::new(display_name).expect("profile name is non-empty"),
            target,
            volatility,
            tick_interval: Duration::from_millis(tick_ms),
        }
    }
}

/// The automated participants seeded into the global room at startup.
pub fn default_profiles() -> Vec<BotProfile> {
    vec![
        BotProfile::new("bot-kaigi", "Meeting Zombie", 85.0, 6.0, 4_000),
        BotProfile::new("bot-muzak", "Muzak Enjoyer", 70.0, 9.0, 3_000),
        BotProfile::new("bot-cafe", "Caffeinated", 15.0, 12.0, 2_200),
        BotProfile::new("bot-lurker", "Lurker", 50.0, 10.0, 3_600),
    ]
}

/// One drift step: pull 10% of the remaining distance to the target, plus
/// the already-scaled noise term. Clamping is the caller's concern
/// (`BoredomLevel::new`), rounding happens only at stats output.
pub fn drift_step(current: f64, target: f64, noise: f64) -> f64 {
    current + (target - current) * DRIFT_RATE + noise
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_drift_step_pulls_ten_percent_toward_target() {
        // テスト項目: ノイズなしの drift が目標との差の 10% を詰める
        // given (前提条件):
        let current = 50.0;
        let target = 80.0;

        // when (操作):
        let next = drift_step(current, target, 0.0);

        // then (期待する結果): 50 + (80 - 50) * 0.1 = 53
        assert!((next - 53.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_drift_step_converges_over_ticks() {
        // テスト項目: 繰り返し適用で値が目標に収束する
        // given (前提条件):
        let target = 20.0;
        let mut current = 90.0;

        // when (操作):
        for _ in 0..100 {
            current = drift_step(current, target, 0.0);
        }

        // then (期待する結果):
        assert!((current - target).abs() < 0.01);
    }

    #[test]
    fn test_drift_step_applies_noise_as_is() {
        // テスト項目: ノイズ項がそのまま加算される
        // given (前提条件):
        let current = 40.0;
        let target = 40.0; // no pull

        // when (操作):
        let next = drift_step(current, target, -2.5);

        // then (期待する結果):
        assert!((next - 37.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_profiles_are_well_formed() {
        // テスト項目: デフォルトプロファイルの各値が不変条件を満たす
        // given (前提条件):

        // when (操作):
        let profiles = default_profiles();

        // then (期待する結果):
        assert!(!profiles.is_empty());
        let ids: HashSet<&str> = profiles.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), profiles.len());
        for profile in &profiles {
            assert!((0.0..=100.0).contains(&profile.target));
            assert!(profile.volatility > 0.0);
            assert!(!profile.tick_interval.is_zero());
        }
    }
}
