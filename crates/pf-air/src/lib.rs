//! pf-air: moist-air (psychrometric) property resolution.
//!
//! Provides:
//! - Saturation vapor pressure over water and ice (Hyland–Wexler)
//! - Closed-form moist-air relations and the wet-bulb relation
//! - The resolver: any supported pair of properties plus pressure to a
//!   complete [`MoistAirState`]
//! - Standard-atmosphere pressure at altitude
//! - Unit-aware text parsing, sweeps and chart series
//!
//! # Example
//!
//! ```
//! use pf_air::{InputKind, resolve};
//!
//! let state = resolve(101_325.0, InputKind::DryBulb, 25.0, InputKind::RelativeHumidity, 0.5)
//!     .unwrap();
//! assert!((state.humidity_ratio() - 0.00988).abs() < 5e-5);
//! assert!(state.dew_point_c() < state.wet_bulb_c());
//! ```

pub mod atmosphere;
pub mod chart;
pub mod equations;
pub mod error;
pub mod input;
pub mod resolver;
pub mod saturation;
mod search;
pub mod state;
pub mod sweep_executor;
pub mod sweeps;
pub mod units;
pub mod wet_bulb;

// Re-exports for ergonomics
pub use atmosphere::{pressure_at, pressure_from_altitude};
pub use chart::{ChartCurve, ChartData, ChartSpec, CurveKind, generate_chart};
pub use error::{AirError, AirResult};
pub use input::{InputKind, ParseInputKindError};
pub use resolver::{InputPair, resolve, resolve_pair};
pub use saturation::{saturation_humidity_ratio, saturation_vapor_pressure};
pub use state::MoistAirState;
pub use sweep_executor::{SweepResult, SweptVariable, execute_input_sweep, execute_pressure_sweep};
pub use sweeps::{SweepDefinition, SweepError, SweepType};
pub use units::{Quantity, UnitError, UnitValue, parse_quantity};
pub use wet_bulb::{humidity_ratio_from_wet_bulb, wet_bulb_temperature};
