//! Per-frame sequencing between input, physics and presentation
//!
//! The driver owns no physics. Each frame it samples the pointer, kicks
//! nearby particles, steps the simulation once, then hands a [`Frame`] to
//! whatever presents it.

use crate::pointer::PointerState;
use crate::simulation::ParticleSimulation;
use glam::Vec2;
use particle_physics::ELEVATOR_COLOR;

/// Source of pointer samples and the run/stop signal
pub trait PointerSource {
    /// Pointer position in normalized canvas coordinates (y up)
    fn pointer_position(&mut self) -> Vec2;

    /// False once the window has been closed
    fn running(&self) -> bool;
}

/// Consumer of finished frames
pub trait FrameSink {
    fn present(&mut self, frame: &Frame<'_>);
}

/// Axis-aligned outline drawn over the particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    /// Lower-left corner, normalized
    pub min: [f32; 2],
    /// Upper-right corner, normalized
    pub max: [f32; 2],
    /// Packed 0xRRGGBB
    pub color: u32,
}

impl Overlay {
    /// Outline of the elevator strip
    pub fn elevator(elevator_fraction: f32) -> Self {
        Self {
            min: [0.0, 0.0],
            max: [elevator_fraction, 1.0],
            color: ELEVATOR_COLOR,
        }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub positions: &'a [[f32; 2]],
    pub colors: &'a [u32],
    /// Particle radius as a fraction of the canvas; the renderer scales it
    /// to pixels for its current surface
    pub radius: f32,
    pub overlay: Overlay,
}

/// Result of one [`FrameLoop::run_frame`] call
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Particles kicked by the pointer this frame
    pub pointer_hits: usize,
    /// Pair contacts resolved, zero while paused
    pub contacts: usize,
    pub stepped: bool,
}

/// Frame loop driver
pub struct FrameLoop {
    simulation: ParticleSimulation,
    pointer: PointerState,
    overlay: Overlay,
    paused: bool,
    frames: u64,

    // Reused between frames
    positions: Vec<[f32; 2]>,
    colors: Vec<u32>,
}

impl FrameLoop {
    pub fn new(simulation: ParticleSimulation) -> Self {
        let overlay = Overlay::elevator(simulation.params().elevator_fraction);
        let capacity = simulation.particle_count();
        Self {
            simulation,
            pointer: PointerState::new(),
            overlay,
            paused: false,
            frames: 0,
            positions: Vec::with_capacity(capacity),
            colors: Vec::with_capacity(capacity),
        }
    }

    /// Run one frame: sample, force, step, present, remember the pointer.
    ///
    /// While paused the pointer is still sampled and committed, so resuming
    /// does not produce a velocity spike from motion made during the pause.
    pub fn run_frame(
        &mut self,
        source: &mut impl PointerSource,
        sink: &mut impl FrameSink,
    ) -> FrameReport {
        self.pointer.sample(source.pointer_position());
        let pointer = self.pointer.position();

        let mut report = FrameReport::default();
        if !self.paused {
            report.pointer_hits = self
                .simulation
                .apply_pointer(pointer, self.pointer.velocity());
            report.contacts = self.simulation.step().contacts;
            report.stepped = true;
        }

        self.simulation.positions(&mut self.positions);
        self.simulation.display_colors(pointer, &mut self.colors);

        sink.present(&Frame {
            positions: &self.positions,
            colors: &self.colors,
            radius: self.simulation.params().particle_radius,
            overlay: self.overlay,
        });

        self.pointer.commit();
        self.frames += 1;

        if report.pointer_hits > 0 {
            log::trace!(
                "Frame {}: pointer touched {} particles",
                self.frames,
                report.pointer_hits
            );
        }
        report
    }

    /// Run frames until `source` stops. Returns the number of frames run.
    pub fn run(&mut self, source: &mut impl PointerSource, sink: &mut impl FrameSink) -> u64 {
        let start = self.frames;
        while source.running() {
            self.run_frame(source, sink);
        }
        self.frames - start
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        log::info!(
            "Simulation {}",
            if self.paused { "paused" } else { "resumed" }
        );
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Re-randomize the particles; the pointer history is kept
    pub fn reset(&mut self, seed: Option<u64>) {
        self.simulation.reset(seed);
    }

    pub fn simulation(&self) -> &ParticleSimulation {
        &self.simulation
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
