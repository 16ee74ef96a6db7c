// pf-core/src/units.rs

use uom::si::f64::{
    Length as UomLength, Pressure as UomPressure,
    TemperatureInterval as UomTemperatureInterval,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Length = UomLength;
pub type Pressure = UomPressure;
pub type TempInterval = UomTemperatureInterval;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn celsius(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

pub mod constants {
    /// Standard atmosphere at sea level [Pa].
    pub const STANDARD_PRESSURE_PA: f64 = 101_325.0;

    /// 0 °C expressed in kelvin.
    pub const ZERO_CELSIUS_K: f64 = 273.15;

    #[inline]
    pub fn standard_pressure() -> super::Pressure {
        super::pa(STANDARD_PRESSURE_PA)
    }
}
