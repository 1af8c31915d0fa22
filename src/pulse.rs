use crate::error::{SceneError, SceneResult};
use glam::Vec2;
use std::f32::consts::PI;

/// Symmetric oscillation around `base`, applied to both axes equally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseSettings {
    period: f32,
    amplitude: f32,
    base: Vec2,
}

impl Default for PulseSettings {
    fn default() -> Self {
        Self { period: 1.0, amplitude: 0.05, base: Vec2::ONE }
    }
}

impl PulseSettings {
    pub fn new(period: f32, amplitude: f32, base: Vec2) -> SceneResult<Self> {
        Ok(Self { period: validate_period(period)?, amplitude, base })
    }

    pub fn compute(&self, t: f32) -> Vec2 {
        let offset = self.amplitude * (PI * t / self.period).sin() / 2.0;
        self.base + Vec2::splat(offset)
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    pub fn set_period(&mut self, period: f32) -> SceneResult<&mut Self> {
        self.period = validate_period(period)?;
        Ok(self)
    }

    pub fn reduce_period(&mut self, by: f32) -> SceneResult<&mut Self> {
        self.set_period(self.period - by)
    }

    pub fn increase_period(&mut self, by: f32) -> SceneResult<&mut Self> {
        self.set_period(self.period + by)
    }

    pub fn multiply_period(&mut self, by: f32) -> SceneResult<&mut Self> {
        self.set_period(self.period * by)
    }

    pub fn divide_period(&mut self, by: f32) -> SceneResult<&mut Self> {
        self.set_period(self.period / by)
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn set_amp(&mut self, amplitude: f32) -> &mut Self {
        self.amplitude = amplitude;
        self
    }

    pub fn reduce_amp(&mut self, by: f32) -> &mut Self {
        self.amplitude -= by;
        self
    }

    pub fn increase_amp(&mut self, by: f32) -> &mut Self {
        self.amplitude += by;
        self
    }

    pub fn multiply_amp(&mut self, by: f32) -> &mut Self {
        self.amplitude *= by;
        self
    }

    pub fn divide_amp(&mut self, by: f32) -> &mut Self {
        self.amplitude /= by;
        self
    }

    pub fn base(&self) -> Vec2 {
        self.base
    }

    pub fn set_base(&mut self, base: Vec2) -> &mut Self {
        self.base = base;
        self
    }
}

fn validate_period(period: f32) -> SceneResult<f32> {
    if period > 0.0 && period.is_finite() {
        Ok(period)
    } else {
        Err(SceneError::InvalidPeriod(period))
    }
}
