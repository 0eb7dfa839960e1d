use std::time::Duration;

use crate::error::SettingsError;

pub const DEFAULT_WIDTH: u16 = 40;
pub const DEFAULT_HEIGHT: u16 = 20;
pub const DEFAULT_INITIAL_INTERVAL_MS: u64 = 100;
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 50;
pub const DEFAULT_SPEED_STEP: u32 = 5;
pub const DEFAULT_SPEED_FACTOR: f64 = 0.9;
pub const DEFAULT_INITIAL_LENGTH: usize = 1;

/// Fixed for the lifetime of a [`Game`](crate::game::Game).
///
/// `max_game_speed_ms` is the floor the tick interval never drops below, i.e. the
/// fastest the game will ever run.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSettings {
    pub width: u16,
    pub height: u16,
    pub initial_game_speed_ms: u64,
    pub max_game_speed_ms: u64,
    pub speed_increase_interval: u32,
    pub speed_increase_factor: f64,
    pub initial_snake_length: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            initial_game_speed_ms: DEFAULT_INITIAL_INTERVAL_MS,
            max_game_speed_ms: DEFAULT_MIN_INTERVAL_MS,
            speed_increase_interval: DEFAULT_SPEED_STEP,
            speed_increase_factor: DEFAULT_SPEED_FACTOR,
            initial_snake_length: DEFAULT_INITIAL_LENGTH,
        }
    }
}

impl GameSettings {
    pub fn with_grid(width: u16, height: u16) -> Self {
        GameSettings { width, height, ..GameSettings::default() }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 || u32::from(width) * u32::from(height) < 2 {
            return Err(SettingsError::GridTooSmall { width, height });
        }

        if self.initial_game_speed_ms == 0 || self.max_game_speed_ms == 0 {
            return Err(SettingsError::ZeroInterval);
        }

        if self.max_game_speed_ms > self.initial_game_speed_ms {
            return Err(SettingsError::MinimumAboveInitial {
                min_ms: self.max_game_speed_ms,
                initial_ms: self.initial_game_speed_ms,
            });
        }

        if self.speed_increase_interval == 0 {
            return Err(SettingsError::ZeroSpeedStep);
        }

        let factor = self.speed_increase_factor;
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(SettingsError::SpeedFactorOutOfRange(factor));
        }

        // The body trails left from the centre column and must leave a cell for food.
        let length = self.initial_snake_length;
        let room = usize::from(width / 2) + 1;
        if length == 0 || length > room || length >= usize::from(width) * usize::from(height) {
            return Err(SettingsError::InitialLengthOutOfRange { length, width });
        }

        Ok(())
    }

    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_game_speed_ms)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.max_game_speed_ms)
    }

    pub fn cell_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = GameSettings::default();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.initial_interval(), Duration::from_millis(100));
        assert_eq!(settings.min_interval(), Duration::from_millis(50));
        assert_eq!(settings.cell_count(), 800);
    }

    #[test]
    fn rejects_degenerate_grids() {
        assert!(matches!(
            GameSettings::with_grid(0, 10).validate(),
            Err(SettingsError::GridTooSmall { .. })
        ));
        assert!(matches!(
            GameSettings::with_grid(1, 1).validate(),
            Err(SettingsError::GridTooSmall { .. })
        ));
        assert_eq!(GameSettings::with_grid(1, 2).validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_speed_settings() {
        let settings = GameSettings { max_game_speed_ms: 200, ..GameSettings::default() };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::MinimumAboveInitial { min_ms: 200, initial_ms: 100 })
        );

        let settings = GameSettings { initial_game_speed_ms: 0, ..GameSettings::default() };
        assert_eq!(settings.validate(), Err(SettingsError::ZeroInterval));

        let settings = GameSettings { speed_increase_interval: 0, ..GameSettings::default() };
        assert_eq!(settings.validate(), Err(SettingsError::ZeroSpeedStep));

        for factor in [0.0, -0.5, 1.5, f64::NAN].iter().copied() {
            let settings = GameSettings { speed_increase_factor: factor, ..GameSettings::default() };
            assert!(matches!(settings.validate(), Err(SettingsError::SpeedFactorOutOfRange(_))));
        }
    }

    #[test]
    fn initial_length_must_fit() {
        let settings = GameSettings { initial_snake_length: 3, ..GameSettings::with_grid(5, 5) };
        assert_eq!(settings.validate(), Ok(()));

        let settings = GameSettings { initial_snake_length: 4, ..GameSettings::with_grid(5, 5) };
        assert!(matches!(settings.validate(), Err(SettingsError::InitialLengthOutOfRange { .. })));

        let settings = GameSettings { initial_snake_length: 0, ..GameSettings::default() };
        assert!(matches!(settings.validate(), Err(SettingsError::InitialLengthOutOfRange { .. })));
    }
}
