use serde::{Deserialize, Serialize};
use std::fmt;

use slitscan_spacetime::{Bounds, Vec3};

use crate::frame::Sample;

/// Running min/max of every position observed since the last reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleBounds {
    extent: Option<Bounds>,
    count: usize,
}

impl SampleBounds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, p: Vec3) {
        self.count += 1;
        self.extent = Some(match self.extent {
            Some(b) => Bounds::new(b.min.min(p), b.max.max(p)),
            None => Bounds::new(p, p),
        });
    }

    pub fn observe_all<'a, I>(&mut self, samples: I)
    where
        I: IntoIterator<Item = &'a Sample>,
    {
        for s in samples {
            self.observe(s.position);
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// `None` until the first observation.
    pub fn bounds(&self) -> Option<Bounds> {
        self.extent
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for SampleBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.extent {
            Some(b) => write!(
                f,
                "Boundaries: ({}, {}, {}) - ({}, {}, {})",
                b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z
            ),
            None => f.write_str("Boundaries: none"),
        }
    }
}
