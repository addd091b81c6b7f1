use serde::{Deserialize, Serialize};

/// Map and rule parameters for one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameParams {
    /// Total number of planets, rounded down to an even number by map generation
    pub num_planets: usize,
    pub width: f64,
    pub height: f64,
    pub min_growth_rate: f64,
    pub max_growth_rate: f64,
    /// Initial ship range for neutral planets
    pub min_initial_ships: f64,
    pub max_initial_ships: f64,
    /// Initial ships on each player's home planet
    pub home_ships: f64,
    /// Distance a transporter covers per tick
    pub transporter_speed: f64,
    pub max_ticks: u32,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            num_planets: 20,
            width: 640.0,
            height: 480.0,
            min_growth_rate: 0.05,
            max_growth_rate: 0.2,
            min_initial_ships: 2.0,
            max_initial_ships: 20.0,
            home_ships: 20.0,
            transporter_speed: 3.0,
            max_ticks: 2000,
        }
    }
}

impl GameParams {
    /// Checks that map generation and turn resolution can run on these parameters.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.num_planets < 2 {
            return Err(ParamsError::TooFewPlanets {
                count: self.num_planets,
            });
        }
        let positive = |value: f64| value.is_finite() && value > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(ParamsError::MapSize {
                width: self.width,
                height: self.height,
            });
        }
        if !is_sorted_range(self.min_growth_rate, self.max_growth_rate) {
            return Err(ParamsError::GrowthRange {
                min: self.min_growth_rate,
                max: self.max_growth_rate,
            });
        }
        if !is_sorted_range(self.min_initial_ships, self.max_initial_ships) {
            return Err(ParamsError::InitialShips {
                min: self.min_initial_ships,
                max: self.max_initial_ships,
            });
        }
        if !(self.home_ships.is_finite() && self.home_ships >= 0.0) {
            return Err(ParamsError::HomeShips {
                ships: self.home_ships,
            });
        }
        if !positive(self.transporter_speed) {
            return Err(ParamsError::TransporterSpeed {
                speed: self.transporter_speed,
            });
        }
        Ok(())
    }
}

fn is_sorted_range(min: f64, max: f64) -> bool {
    min.is_finite() && max.is_finite() && 0.0 <= min && min <= max
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ParamsError {
    #[display("planet count must be at least 2, got {count}")]
    TooFewPlanets { count: usize },
    #[display("map size must be positive, got {width}x{height}")]
    MapSize { width: f64, height: f64 },
    #[display("growth rate range {min}..={max} is empty or negative")]
    GrowthRange { min: f64, max: f64 },
    #[display("initial ship range {min}..={max} is empty or negative")]
    InitialShips { min: f64, max: f64 },
    #[display("home ships must be non-negative, got {ships}")]
    HomeShips { ships: f64 },
    #[display("transporter speed must be positive, got {speed}")]
    TransporterSpeed { speed: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameStateFactory;

    #[test]
    fn test_default_is_valid() {
        GameParams::default().validate().unwrap();
    }

    #[test]
    fn test_inverted_ship_range_rejected() {
        let params = GameParams {
            min_initial_ships: 30.0,
            max_initial_ships: 20.0,
            ..GameParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ParamsError::InitialShips {
                min: 30.0,
                max: 20.0
            })
        );
    }

    #[test]
    fn test_degenerate_map_rejected() {
        let flat = GameParams {
            height: 0.0,
            ..GameParams::default()
        };
        assert!(matches!(flat.validate(), Err(ParamsError::MapSize { .. })));

        let lonely = GameParams {
            num_planets: 1,
            ..GameParams::default()
        };
        assert_eq!(
            lonely.validate(),
            Err(ParamsError::TooFewPlanets { count: 1 })
        );

        let stalled = GameParams {
            transporter_speed: f64::NAN,
            ..GameParams::default()
        };
        assert!(matches!(
            stalled.validate(),
            Err(ParamsError::TransporterSpeed { .. })
        ));
    }

    #[test]
    fn test_point_ranges_generate() {
        let params = GameParams {
            min_growth_rate: 0.1,
            max_growth_rate: 0.1,
            min_initial_ships: 5.0,
            max_initial_ships: 5.0,
            ..GameParams::default()
        };
        params.validate().unwrap();
        let state = GameStateFactory::new(params).create_game(1);
        assert!(state.planets.iter().all(|p| (p.growth_rate - 0.1).abs() < 1e-12));
    }
}
