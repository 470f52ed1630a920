// bhx-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, DynamicViscosity as UomDynamicViscosity, Energy as UomEnergy,
    Length as UomLength, MassDensity as UomMassDensity, Power as UomPower,
    Pressure as UomPressure, Ratio as UomRatio,
    SpecificHeatCapacity as UomSpecificHeatCapacity,
    TemperatureInterval as UomTemperatureInterval,
    ThermalConductivity as UomThermalConductivity,
    ThermodynamicTemperature as UomThermodynamicTemperature, Time as UomTime,
    Velocity as UomVelocity, VolumeRate as UomVolumeRate,
    VolumetricHeatCapacity as UomVolumetricHeatCapacity,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type DynVisc = UomDynamicViscosity;
pub type Energy = UomEnergy;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Ratio = UomRatio;
pub type SpecHeat = UomSpecificHeatCapacity;
pub type TempInterval = UomTemperatureInterval;
pub type ThermalCond = UomThermalConductivity;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;
pub type Velocity = UomVelocity;
pub type VolumeRate = UomVolumeRate;
pub type VolHeatCapacity = UomVolumetricHeatCapacity;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn hours(v: f64) -> Time {
    use uom::si::time::hour;
    Time::new::<hour>(v)
}

#[inline]
pub fn celsius(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn kelvin_interval(v: f64) -> TempInterval {
    use uom::si::temperature_interval::kelvin;
    TempInterval::new::<kelvin>(v)
}

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn watt(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn kw(v: f64) -> Power {
    use uom::si::power::kilowatt;
    Power::new::<kilowatt>(v)
}

#[inline]
pub fn kwh(v: f64) -> Energy {
    use uom::si::energy::kilowatt_hour;
    Energy::new::<kilowatt_hour>(v)
}

#[inline]
pub fn wpmk(v: f64) -> ThermalCond {
    use uom::si::thermal_conductivity::watt_per_meter_kelvin;
    ThermalCond::new::<watt_per_meter_kelvin>(v)
}

#[inline]
pub fn jpm3k(v: f64) -> VolHeatCapacity {
    use uom::si::volumetric_heat_capacity::joule_per_cubic_meter_kelvin;
    VolHeatCapacity::new::<joule_per_cubic_meter_kelvin>(v)
}

#[inline]
pub fn jpkgk(v: f64) -> SpecHeat {
    use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;
    SpecHeat::new::<joule_per_kilogram_kelvin>(v)
}

#[inline]
pub fn kgpm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn pa_s(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

#[inline]
pub fn m3ps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v)
}

#[inline]
pub fn m3ph(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_hour;
    VolumeRate::new::<cubic_meter_per_hour>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

/// Degrees Celsius of a thermodynamic temperature; the engine's boundary
/// convention is °C while uom's base value is kelvin.
#[inline]
pub fn to_celsius(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_celsius;
    t.get::<degree_celsius>()
}

pub mod constants {
    /// Euler-Mascheroni constant, used by the line-source solutions.
    pub const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
    pub const SECONDS_PER_YEAR: f64 = 365.25 * 24.0 * 3_600.0;

    /// Hours in a design year (VDI 4640 base-load horizon divisor).
    pub const HOURS_PER_YEAR: f64 = 8_760.0;

    /// Hours in a design month (VDI 4640 periodic-load divisor).
    pub const HOURS_PER_MONTH: f64 = 730.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _l = m(100.0);
        let _d = mm(32.0);
        let _t = celsius(10.0);
        let _dt = kelvin_interval(3.0);
        let _p = pa(101_325.0);
        let _q = kw(6.0);
        let _e = kwh(12_000.0);
        let _lam = wpmk(1.8);
        let _c = jpm3k(2.4e6);
        let _cp = jpkgk(4_000.0);
        let _rho = kgpm3(1_033.0);
        let _mu = pa_s(0.0019);
        let _v = m3ph(1.74);
        let _r = unitless(0.5);
    }

    #[test]
    fn celsius_round_trip() {
        let t = celsius(10.0);
        assert!((to_celsius(t) - 10.0).abs() < 1e-9);
        // uom stores kelvin internally
        assert!((t.value - 283.15).abs() < 1e-9);
    }

    #[test]
    fn energy_kwh_is_joules_internally() {
        let e = kwh(1.0);
        assert!((e.value - 3.6e6).abs() < 1.0);
    }
}
