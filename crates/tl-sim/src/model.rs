//! The four-tank process model.

use crate::alarm::{Alarm, AlarmKind, AlarmTransition};
use crate::constants::PlantConstants;
use crate::error::SimResult;
use crate::history::{TrendHistory, TrendSample};
use crate::layout::{
    HEATED_TANK, HEATER_NAME, HEATER_ORIGIN, JUNCTION, PUMP_CENTER, PUMP_NAME, PipeId, TankId,
};
use crate::params::StartupParams;
use crate::snapshot::{HeaterView, PipeView, PlantSnapshot, ProcessState, PumpView, TankView};
use serde::{Deserialize, Serialize};
use tl_components::{Heater, Instrumented, Pipe, Pump, Tank, l_path};
use tl_controls::{SampleAccumulator, SignalValue};
use tl_core::ensure_positive;

/// Volumes moved along each link during one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StepFlows {
    /// Drawn from T1 by the pump
    pub drawn: f64,
    /// Accepted by T2 at the junction
    pub to_t2: f64,
    /// Accepted by T3 at the junction
    pub to_t3: f64,
    /// Drawn but accepted by neither branch (leaves the plant)
    pub junction_loss: f64,
    pub t2_to_t4: f64,
    pub t3_to_t4: f64,
    /// Drained or returned but not accepted by a full receiving tank
    /// (leaves the plant)
    pub spill: f64,
    pub t4_to_t1: f64,
    /// Discharged through the T4 overflow valve (leaves the plant)
    pub overflow: f64,
}

impl StepFlows {
    /// Volume that left the plant during the step.
    pub fn lost(&self) -> f64 {
        self.junction_loss + self.spill + self.overflow
    }

    fn through(&self, pipe: PipeId) -> f64 {
        match pipe {
            PipeId::T1ToPump | PipeId::PumpToJunction => self.drawn,
            PipeId::JunctionToT2 => self.to_t2,
            PipeId::JunctionToT3 => self.to_t3,
            PipeId::T2ToT4 => self.t2_to_t4,
            PipeId::T3ToT4 => self.t3_to_t4,
            PipeId::T4ToT1 => self.t4_to_t1,
        }
    }
}

/// Outcome of one [`ProcessModel::step`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    /// Elapsed time after the step (s)
    pub time_s: f64,
    pub flows: StepFlows,
    /// Alarms that were raised or cleared by this step
    pub alarm_changes: Vec<AlarmTransition>,
    /// Whether a trend sample was recorded
    pub sampled: bool,
}

/// Fixed network of four tanks, pump, heater, seven pipes and five alarms.
///
/// The model is one exclusively owned value: every mutation goes through
/// `&mut self`, and readers get shared references or owned snapshots.
#[derive(Clone, Debug)]
pub struct ProcessModel {
    constants: PlantConstants,
    tanks: [Tank; 4],
    pump: Pump,
    heater: Heater,
    pipes: Vec<Pipe>,
    alarms: Vec<Alarm>,
    time_s: f64,
    sampler: SampleAccumulator,
    history: TrendHistory,
}

impl ProcessModel {
    /// Build the plant with default constants and apply the default startup
    /// parameters.
    pub fn new() -> SimResult<Self> {
        Self::with_constants(PlantConstants::default())
    }

    /// Build the plant with custom constants and apply the default startup
    /// parameters.
    pub fn with_constants(constants: PlantConstants) -> SimResult<Self> {
        constants.validate()?;

        let tank = |id: TankId| Tank::new(id.name(), constants.tank_capacity, id.outline());
        let tanks = [
            tank(TankId::T1)?,
            tank(TankId::T2)?,
            tank(TankId::T3)?,
            tank(TankId::T4)?,
        ];
        let pump = Pump::new(PUMP_NAME, PUMP_CENTER);
        let heater = Heater::new(HEATER_NAME, HEATER_ORIGIN);

        let top = |id: TankId| tanks[id.index()].outline.top_mid();
        let bottom = |id: TankId| tanks[id.index()].outline.bottom_mid();
        let routes = [
            (PipeId::T1ToPump, l_path(bottom(TankId::T1), pump.inlet())),
            (PipeId::PumpToJunction, l_path(pump.outlet(), JUNCTION)),
            (PipeId::JunctionToT2, l_path(JUNCTION, bottom(TankId::T2))),
            (PipeId::JunctionToT3, l_path(JUNCTION, bottom(TankId::T3))),
            (PipeId::T2ToT4, l_path(bottom(TankId::T2), top(TankId::T4))),
            (PipeId::T3ToT4, l_path(bottom(TankId::T3), top(TankId::T4))),
            (PipeId::T4ToT1, l_path(bottom(TankId::T4), top(TankId::T1))),
        ];
        let pipes = routes
            .into_iter()
            .map(|(id, route)| Pipe::new(id.name(), route, constants.flow_hold_s))
            .collect::<Result<Vec<_>, _>>()?;

        let mut model = Self {
            constants,
            tanks,
            pump,
            heater,
            pipes,
            alarms: AlarmKind::PLANT.into_iter().map(Alarm::new).collect(),
            time_s: 0.0,
            sampler: SampleAccumulator::new(constants.sample_period_s)?,
            history: TrendHistory::new(constants.history_len),
        };
        model.initialize(&StartupParams::default())?;
        Ok(model)
    }

    /// Apply startup parameters and reset time, trend sampling, history and
    /// pipe indicators.
    ///
    /// Parameters are validated first; on error the model is left untouched.
    pub fn initialize(&mut self, params: &StartupParams) -> SimResult<()> {
        params.validate()?;

        for (tank, fill_pct) in self.tanks.iter_mut().zip(params.fills_pct()) {
            tank.set_quantity(tank.capacity() * fill_pct / 100.0);
            tank.set_temperature(params.start_temp_c);
        }

        self.pump.set_speed(params.pump_speed)?;
        self.pump.set_running(params.pump_on);
        self.pump.reset_animation();
        self.heater.set_power(params.heater_power)?;
        self.heater.set_energised(params.heater_on);

        self.time_s = 0.0;
        self.sampler.reset();
        self.history.clear();
        for pipe in &mut self.pipes {
            pipe.reset();
        }

        let state = self.process_state();
        for alarm in &mut self.alarms {
            alarm.update(&state);
        }

        tracing::info!(
            fills = ?params.fills_pct(),
            pump_on = params.pump_on,
            pump_speed = params.pump_speed,
            heater_on = params.heater_on,
            heater_power = params.heater_power,
            start_temp_c = params.start_temp_c,
            "plant initialized"
        );
        Ok(())
    }

    /// Advance the plant by `dt` seconds.
    ///
    /// # Errors
    /// Returns error if `dt` is not finite and strictly positive. The model
    /// is not touched in that case.
    pub fn step(&mut self, dt: f64) -> SimResult<StepReport> {
        let dt = ensure_positive(dt, "dt")?;
        let c = self.constants;

        self.time_s += dt;
        self.pump.advance_animation(dt);

        let mut flows = StepFlows::default();

        // Pump: T1 -> junction
        let pump_flow = if self.pump.is_running() && !self.tank(TankId::T1).is_empty() {
            c.base_flow * self.pump.speed()
        } else {
            0.0
        };
        if pump_flow > 0.0 {
            flows.drawn = self.tank_mut(TankId::T1).remove(pump_flow * dt);
        }

        // Junction: split by free capacity
        let free_t2 = self.tank(TankId::T2).free_capacity();
        let free_t3 = self.tank(TankId::T3).free_capacity();
        let free_total = free_t2 + free_t3;
        if flows.drawn > 0.0 && free_total > 0.0 {
            flows.to_t2 = self
                .tank_mut(TankId::T2)
                .add(flows.drawn * free_t2 / free_total);
            flows.to_t3 = self.tank_mut(TankId::T3).add(flows.drawn - flows.to_t2);
        }
        flows.junction_loss = (flows.drawn - flows.to_t2 - flows.to_t3).max(0.0);
        if flows.junction_loss > 0.0 {
            tracing::debug!(
                time_s = self.time_s,
                lost = flows.junction_loss,
                "junction branches full, pumped volume discarded"
            );
        }

        // Gravity drain: T2, T3 -> T4
        let drain = c.drain_rate * dt;
        if self.tank(TankId::T2).quantity() > c.drain_floor {
            flows.t2_to_t4 = self.tank_mut(TankId::T2).remove(drain);
        }
        if self.tank(TankId::T3).quantity() > c.drain_floor {
            flows.t3_to_t4 = self.tank_mut(TankId::T3).remove(drain);
        }
        let drained = flows.t2_to_t4 + flows.t3_to_t4;
        let accepted = self.tank_mut(TankId::T4).add(drained);
        flows.spill = (drained - accepted).max(0.0);

        // Return: T4 -> T1, faster the fuller T4 is
        let return_rate = c.return_base + c.return_slope * self.tank(TankId::T4).level();
        if self.tank(TankId::T4).quantity() > c.return_floor {
            flows.t4_to_t1 = self.tank_mut(TankId::T4).remove(return_rate * dt);
        }
        let returned = self.tank_mut(TankId::T1).add(flows.t4_to_t1);
        flows.spill += (flows.t4_to_t1 - returned).max(0.0);

        // Overflow valve on T4
        if self.tank(TankId::T4).level() > c.overflow_level {
            flows.overflow = self.tank_mut(TankId::T4).remove(c.overflow_rate * dt);
            tracing::debug!(time_s = self.time_s, discharged = flows.overflow, "T4 overflow valve open");
        }

        // Heating, then first-order relaxation of every tank toward ambient
        if self.heater.is_energised() && self.tank(HEATED_TANK).level() > c.heater_min_level {
            let rise = self.heater.temperature_rise(c.heating_gain, dt);
            let heated = self.tank_mut(HEATED_TANK);
            heated.set_temperature(heated.temperature() + rise);
        }
        for tank in &mut self.tanks {
            let t = tank.temperature();
            tank.set_temperature(t + (c.ambient_temp_c - t) * (c.cooling_rate * dt));
        }

        // Pipe indicators
        for id in PipeId::ALL {
            let moved = flows.through(id) > c.flow_threshold;
            self.pipes[id.index()].update_flow(moved, dt);
        }

        // Alarms
        let state = self.process_state();
        let mut alarm_changes = Vec::new();
        for alarm in &mut self.alarms {
            let was_active = alarm.update(&state);
            if was_active != alarm.is_active() {
                let tag = alarm.kind.tag();
                if alarm.is_active() {
                    tracing::warn!(alarm = %tag, time_s = self.time_s, "alarm raised");
                } else {
                    tracing::info!(alarm = %tag, time_s = self.time_s, "alarm cleared");
                }
                alarm_changes.push(AlarmTransition {
                    tag,
                    raised: alarm.is_active(),
                });
            }
        }

        // Trend
        let sampled = self.sampler.advance(dt);
        if sampled {
            self.history.push(TrendSample {
                time_s: self.time_s,
                levels: state.levels,
                heated_temp_c: state.heated_temp_c(),
            });
        }

        Ok(StepReport {
            time_s: self.time_s,
            flows,
            alarm_changes,
            sampled,
        })
    }

    // --- operator commands ---

    pub fn set_pump_running(&mut self, running: bool) {
        self.pump.set_running(running);
    }

    pub fn set_pump_speed(&mut self, speed: f64) -> SimResult<()> {
        self.pump.set_speed(speed)?;
        Ok(())
    }

    pub fn set_heater_energised(&mut self, on: bool) {
        self.heater.set_energised(on);
    }

    pub fn set_heater_power(&mut self, power: f64) -> SimResult<()> {
        self.heater.set_power(power)?;
        Ok(())
    }

    /// Force a tank quantity (clamped). Used to stage test and training
    /// scenarios; alarms are re-evaluated on the next step.
    pub fn set_tank_quantity(&mut self, id: TankId, quantity: f64) {
        self.tank_mut(id).set_quantity(quantity);
    }

    // --- read-only access ---

    pub fn constants(&self) -> &PlantConstants {
        &self.constants
    }

    /// Elapsed simulated time (s).
    pub fn time(&self) -> f64 {
        self.time_s
    }

    pub fn tank(&self, id: TankId) -> &Tank {
        &self.tanks[id.index()]
    }

    pub fn tanks(&self) -> &[Tank] {
        &self.tanks
    }

    pub fn pipe(&self, id: PipeId) -> &Pipe {
        &self.pipes[id.index()]
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn pump(&self) -> &Pump {
        &self.pump
    }

    pub fn heater(&self) -> &Heater {
        &self.heater
    }

    pub fn alarms(&self) -> &[Alarm] {
        &self.alarms
    }

    pub fn history(&self) -> &TrendHistory {
        &self.history
    }

    /// Total liquid held in the four tanks.
    pub fn total_quantity(&self) -> f64 {
        self.tanks.iter().map(Tank::quantity).sum()
    }

    /// Current values alarms are evaluated against.
    pub fn process_state(&self) -> ProcessState {
        let mut levels = [0.0; 4];
        let mut temps_c = [0.0; 4];
        for (i, tank) in self.tanks.iter().enumerate() {
            levels[i] = tank.level();
            temps_c[i] = tank.temperature();
        }
        ProcessState {
            time_s: self.time_s,
            levels,
            temps_c,
            pump_running: self.pump.is_running(),
            pump_speed: self.pump.speed(),
            heater_on: self.heater.is_energised(),
            heater_power: self.heater.power(),
        }
    }

    /// Owned copy of everything presentation code reads.
    pub fn snapshot(&self) -> PlantSnapshot {
        PlantSnapshot {
            time_s: self.time_s,
            tanks: self
                .tanks
                .iter()
                .map(|t| TankView {
                    name: t.name().to_string(),
                    level: t.level(),
                    quantity: t.quantity(),
                    temp_c: t.temperature(),
                })
                .collect(),
            pipes: self
                .pipes
                .iter()
                .map(|p| PipeView {
                    name: p.name().to_string(),
                    waypoints: p.waypoints().to_vec(),
                    flowing: p.is_flowing(),
                })
                .collect(),
            pump: PumpView {
                name: self.pump.name().to_string(),
                running: self.pump.is_running(),
                speed: self.pump.speed(),
                angle_rad: self.pump.angle(),
            },
            heater: HeaterView {
                name: self.heater.name().to_string(),
                on: self.heater.is_energised(),
                power: self.heater.power(),
            },
            alarms: self.alarms.iter().map(Alarm::view).collect(),
        }
    }

    /// Read one instrument by tag, e.g. `T1.LEVEL`, `P1.RUN`, `J-T2.FLOW`
    /// or an alarm tag such as `T4.HH`.
    pub fn read_tag(&self, tag: &str) -> Option<SignalValue> {
        if let Some(alarm) = self
            .alarms
            .iter()
            .find(|a| a.kind.tag().eq_ignore_ascii_case(tag))
        {
            return Some(SignalValue::Bool(alarm.is_active()));
        }
        let (name, suffix) = tag.rsplit_once('.')?;
        self.instruments()
            .find(|c| c.name().eq_ignore_ascii_case(name))
            .and_then(|c| c.reading(suffix))
    }

    /// Every instrument reading as `(tag, value)`, in plant order.
    pub fn instrument_table(&self) -> Vec<(String, SignalValue)> {
        self.instruments()
            .flat_map(|c| {
                c.readings()
                    .into_iter()
                    .map(move |(suffix, v)| (format!("{}.{}", c.name(), suffix), v))
            })
            .collect()
    }

    fn instruments(&self) -> impl Iterator<Item = &dyn Instrumented> {
        self.tanks
            .iter()
            .map(|t| t as &dyn Instrumented)
            .chain(std::iter::once(&self.pump as &dyn Instrumented))
            .chain(std::iter::once(&self.heater as &dyn Instrumented))
            .chain(self.pipes.iter().map(|p| p as &dyn Instrumented))
    }

    fn tank_mut(&mut self, id: TankId) -> &mut Tank {
        &mut self.tanks[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ProcessModel {
        ProcessModel::new().unwrap()
    }

    #[test]
    fn new_applies_default_startup() {
        let m = model();
        assert_eq!(m.time(), 0.0);
        assert!((m.tank(TankId::T1).level() - 0.8).abs() < 1e-12);
        assert!((m.tank(TankId::T3).level() - 0.2).abs() < 1e-12);
        assert!(m.history().is_empty());
        assert_eq!(m.pipes().len(), 7);
        assert_eq!(m.alarms().len(), 5);
    }

    #[test]
    fn step_rejects_bad_dt_without_mutation() {
        let mut m = model();
        let before = m.total_quantity();
        assert!(m.step(0.0).is_err());
        assert!(m.step(-0.02).is_err());
        assert!(m.step(f64::NAN).is_err());
        assert_eq!(m.time(), 0.0);
        assert_eq!(m.total_quantity(), before);
    }

    #[test]
    fn pump_draws_base_flow_times_speed() {
        let mut m = model();
        m.set_pump_speed(1.5).unwrap();
        let report = m.step(0.02).unwrap();
        assert!((report.flows.drawn - 18.0 * 1.5 * 0.02).abs() < 1e-12);
    }

    #[test]
    fn empty_source_stops_pump_flow() {
        let mut m = model();
        m.set_tank_quantity(TankId::T1, 0.05);
        let report = m.step(0.02).unwrap();
        assert_eq!(report.flows.drawn, 0.0);
    }

    #[test]
    fn stopped_pump_draws_nothing_and_trips() {
        let mut m = model();
        m.set_pump_running(false);
        let report = m.step(0.02).unwrap();
        assert_eq!(report.flows.drawn, 0.0);
        assert_eq!(
            report.alarm_changes,
            vec![AlarmTransition {
                tag: "P1.TRIP".to_string(),
                raised: true
            }]
        );
        assert_eq!(m.read_tag("P1.TRIP"), Some(SignalValue::Bool(true)));
    }

    #[test]
    fn full_branches_discard_pumped_volume() {
        let mut m = model();
        m.set_tank_quantity(TankId::T2, 100.0);
        m.set_tank_quantity(TankId::T3, 100.0);
        let report = m.step(0.02).unwrap();
        assert!(report.flows.drawn > 0.0);
        assert_eq!(report.flows.to_t2, 0.0);
        assert_eq!(report.flows.to_t3, 0.0);
        assert!((report.flows.junction_loss - report.flows.drawn).abs() < 1e-12);
    }

    #[test]
    fn drain_respects_floor() {
        let mut m = model();
        m.set_tank_quantity(TankId::T2, 2.0);
        m.set_pump_running(false);
        let report = m.step(0.02).unwrap();
        assert_eq!(report.flows.t2_to_t4, 0.0);
        assert!(report.flows.t3_to_t4 > 0.0);
    }

    #[test]
    fn return_rate_grows_with_sump_level() {
        let mut low = model();
        low.set_pump_running(false);
        low.set_tank_quantity(TankId::T4, 10.0);
        let r_low = low.step(0.02).unwrap().flows.t4_to_t1;

        let mut high = model();
        high.set_pump_running(false);
        high.set_tank_quantity(TankId::T4, 90.0);
        let r_high = high.step(0.02).unwrap().flows.t4_to_t1;

        assert!(r_high > r_low);
    }

    #[test]
    fn overflow_valve_opens_above_threshold() {
        let mut m = model();
        m.set_tank_quantity(TankId::T4, 100.0);
        let report = m.step(0.02).unwrap();
        assert!((report.flows.overflow - 25.0 * 0.02).abs() < 1e-12);
    }

    #[test]
    fn heater_needs_immersion() {
        let mut m = model();
        m.set_tank_quantity(TankId::T3, 5.0);
        m.set_pump_running(false);
        m.step(0.02).unwrap();
        assert!(m.tank(TankId::T3).temperature() <= 20.0 + 1e-12);

        let mut m = model();
        m.step(0.02).unwrap();
        assert!(m.tank(TankId::T3).temperature() > 20.0);
    }

    #[test]
    fn heating_gain_comes_from_constants() {
        let mut m = ProcessModel::with_constants(PlantConstants {
            heating_gain: 5.0,
            cooling_rate: 0.0,
            ..Default::default()
        })
        .unwrap();
        m.step(0.02).unwrap();
        // 5.0 * power 3.0 * 0.02
        assert!((m.tank(TankId::T3).temperature() - 20.3).abs() < 1e-12);
        assert_eq!(m.tank(TankId::T2).temperature(), 20.0);
    }

    #[test]
    fn cooling_relaxes_toward_ambient() {
        let mut m = model();
        m.initialize(&StartupParams {
            start_temp_c: 60.0,
            heater_on: false,
            ..Default::default()
        })
        .unwrap();
        m.step(0.02).unwrap();
        let expected = 60.0 + (20.0 - 60.0) * 0.08 * 0.02;
        for tank in m.tanks() {
            assert!((tank.temperature() - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn initialize_rejects_bad_params_and_keeps_state() {
        let mut m = model();
        m.step(0.02).unwrap();
        let t = m.time();
        let bad = StartupParams {
            t2_fill_pct: 150.0,
            ..Default::default()
        };
        assert!(m.initialize(&bad).is_err());
        assert_eq!(m.time(), t);
    }

    #[test]
    fn read_tag_resolves_components() {
        let m = model();
        assert_eq!(
            m.read_tag("t1.level").and_then(|v| v.as_scalar_opt()),
            Some(m.tank(TankId::T1).level())
        );
        assert_eq!(m.read_tag("H1.ON"), Some(SignalValue::Bool(true)));
        assert_eq!(m.read_tag("J-T2.FLOW"), Some(SignalValue::Bool(false)));
        assert_eq!(m.read_tag("X9.LEVEL"), None);
        assert_eq!(m.read_tag("nodot"), None);
    }

    #[test]
    fn instrument_table_lists_every_component() {
        let m = model();
        let table = m.instrument_table();
        // 4 tanks x 3 + pump 2 + heater 2 + 7 pipes
        assert_eq!(table.len(), 4 * 3 + 2 + 2 + 7);
        assert_eq!(table[0].0, "T1.LEVEL");
    }

    #[test]
    fn snapshot_mirrors_model() {
        let mut m = model();
        m.step(0.02).unwrap();
        let snap = m.snapshot();
        assert_eq!(snap.tanks.len(), 4);
        assert_eq!(snap.pipes.len(), 7);
        assert_eq!(snap.alarms.len(), 5);
        assert_eq!(snap.tanks[2].name, "T3");
        assert_eq!(snap.pipes[0].waypoints.len(), 4);
        assert!(snap.pipes[0].flowing);
        assert!(snap.pump.angle_rad > 0.0);
        assert_eq!(snap.active_alarms().count(), 0);
    }
}
