//! The hero's light gauge.
//!
//! The gauge drains on a fixed period and when the hero is hit. Once empty the
//! light goes out and the darkness starts hurting the hero until the gauge is
//! refilled. The periodic parts are driven by the session scheduler; this
//! type only holds the state transitions.
use crate::common::ratio;
use crate::events::LightEvent;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LightConfig {
    pub max_gauge: f32,
    /// Gauge removed every `drain_period` seconds at Normal difficulty.
    pub base_drain: f32,
    pub drain_period: f32,
    /// Gauge removed by a hit, at most once per `hit_span` seconds.
    pub hit_drain: f32,
    pub hit_span: f32,
    /// Seconds between darkness hits while the light is out.
    pub darkness_period: f32,
    /// Radius of the light at a full gauge.
    pub max_size: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            max_gauge: 100.0,
            base_drain: 2.0,
            drain_period: 2.0,
            hit_drain: 5.0,
            hit_span: 1.0,
            darkness_period: 1.0,
            max_size: 10.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LightGauge {
    config: LightConfig,
    current: f32,
    is_on: bool,
    hit_timer: f32,
    drain_multiplier: f32,
    events: Vec<LightEvent>,
}

impl LightGauge {
    /// Starts lit at half capacity.
    pub fn new(config: LightConfig, drain_multiplier: f32) -> Self {
        Self {
            current: config.max_gauge / 2.0,
            config,
            is_on: true,
            hit_timer: 0.0,
            drain_multiplier,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &LightConfig {
        &self.config
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn is_on(&self) -> bool {
        self.is_on
    }

    pub fn ratio(&self) -> f32 {
        ratio(self.current, self.config.max_gauge)
    }

    /// Light radius proportional to the gauge.
    pub fn size(&self) -> f32 {
        (self.config.max_size * self.ratio()).min(self.config.max_size)
    }

    /// Effective periodic drain after the difficulty multiplier.
    pub fn drain_per_period(&self) -> f32 {
        self.config.base_drain * self.drain_multiplier
    }

    pub fn set_drain_multiplier(&mut self, multiplier: f32) {
        self.drain_multiplier = multiplier;
        tracing::debug!(drain = self.drain_per_period(), "light drain updated");
    }

    /// Counts down the hit cooldown.
    pub fn tick(&mut self, dt: f32) {
        if self.hit_timer > 0.0 {
            self.hit_timer = (self.hit_timer - dt).max(0.0);
        }
    }

    /// One periodic drain step; does nothing while the light is out.
    pub fn drain_step(&mut self) {
        if !self.is_on {
            return;
        }
        self.remove(self.drain_per_period());
    }

    /// Drains on a hit unless the hit cooldown is still running.
    pub fn on_hit(&mut self) {
        if self.hit_timer > 0.0 {
            return;
        }
        self.remove(self.config.hit_drain);
        self.hit_timer = self.config.hit_span;
    }

    /// Refills, capped at max. Any positive gauge relights the light.
    pub fn add(&mut self, amount: f32) {
        if amount <= 0.0 {
            return;
        }
        self.current = (self.current + amount).min(self.config.max_gauge);
        self.emit_gauge();
        if self.current > 0.0 && !self.is_on {
            self.set_on(true);
        }
    }

    pub fn drain_events(&mut self) -> Vec<LightEvent> {
        std::mem::take(&mut self.events)
    }

    fn remove(&mut self, amount: f32) {
        self.current -= amount;
        if self.current <= 0.0 {
            self.current = 0.0;
            self.emit_gauge();
            self.set_on(false);
        } else {
            self.emit_gauge();
        }
    }

    fn set_on(&mut self, on: bool) {
        if self.is_on == on {
            return;
        }
        self.is_on = on;
        if on {
            tracing::info!(gauge = self.current, "light restored");
        } else {
            tracing::info!("light went out");
        }
        self.events.push(LightEvent::Toggled { on });
    }

    fn emit_gauge(&mut self) {
        self.events.push(LightEvent::GaugeChanged {
            current: self.current,
            max: self.config.max_gauge,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gauge() -> LightGauge {
        LightGauge::new(
            LightConfig {
                max_gauge: 20.0,
                base_drain: 4.0,
                hit_drain: 3.0,
                hit_span: 1.0,
                ..LightConfig::default()
            },
            1.0,
        )
    }

    #[test]
    fn starts_lit_at_half() {
        let light = gauge();
        assert!(light.is_on());
        assert_eq!(light.current(), 10.0);
        assert_eq!(light.ratio(), 0.5);
        assert_eq!(light.size(), 5.0);
    }

    #[test]
    fn drain_turns_light_off_at_zero() {
        let mut light = gauge();
        light.set_drain_multiplier(1.5);
        light.drain_step();
        assert_eq!(light.current(), 4.0);
        light.drain_step();
        assert_eq!(light.current(), 0.0);
        assert!(!light.is_on());
        assert!(light.drain_events().contains(&LightEvent::Toggled { on: false }));

        light.drain_step();
        assert!(light.drain_events().is_empty());
    }

    #[test]
    fn hit_drain_respects_hit_span() {
        let mut light = gauge();
        light.on_hit();
        light.on_hit();
        assert_eq!(light.current(), 7.0);

        light.tick(1.0);
        light.on_hit();
        assert_eq!(light.current(), 4.0);
    }

    #[test]
    fn refill_caps_and_relights() {
        let mut light = gauge();
        light.drain_step();
        light.drain_step();
        light.drain_step();
        assert!(!light.is_on());

        light.add(100.0);
        assert!(light.is_on());
        assert_eq!(light.current(), 20.0);
    }
}
