//! A small polymorphic hierarchy for narrowing tests.
//!
//! - [`Shape`] — the base capability.
//! - [`Circle`] and [`Square`] — concrete shapes, optionally reporting their
//!   destruction to a [`DropCounter`].

use std::f64::consts::PI;

use crate::DropCounter;

/// Base capability shared by every fixture shape.
pub trait Shape {
    fn name(&self) -> &'static str;
    fn area(&self) -> f64;
}

#[derive(Debug)]
pub struct Circle {
    pub radius: f64,
    drops: Option<DropCounter>,
}

impl Circle {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            drops: None,
        }
    }

    /// A circle that bumps `drops` when it is destroyed.
    pub fn tracked(radius: f64, drops: &DropCounter) -> Self {
        Self {
            radius,
            drops: Some(drops.clone()),
        }
    }
}

impl Shape for Circle {
    fn name(&self) -> &'static str {
        "circle"
    }

    fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }
}

impl Drop for Circle {
    fn drop(&mut self) {
        if let Some(drops) = &self.drops {
            drops.record();
        }
    }
}

#[derive(Debug)]
pub struct Square {
    pub side: f64,
    drops: Option<DropCounter>,
}

impl Square {
    pub fn new(side: f64) -> Self {
        Self { side, drops: None }
    }

    /// A square that bumps `drops` when it is destroyed.
    pub fn tracked(side: f64, drops: &DropCounter) -> Self {
        Self {
            side,
            drops: Some(drops.clone()),
        }
    }
}

impl Shape for Square {
    fn name(&self) -> &'static str {
        "square"
    }

    fn area(&self) -> f64 {
        self.side * self.side
    }
}

impl Drop for Square {
    fn drop(&mut self) {
        if let Some(drops) = &self.drops {
            drops.record();
        }
    }
}
