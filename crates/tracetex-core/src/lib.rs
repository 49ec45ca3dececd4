//! # tracetex-core: simulator trace data model
//!
//! Shared types for turning circuit-simulator trace files into plots.
//!
//! ## Design Philosophy
//!
//! A trace file becomes exactly one [`SimulationRecord`]. The record is built
//! once by a parser in `tracetex-io`, consumed once by a renderer in
//! `tracetex-viz`, and never mutated in between.
//!
//! AC sweeps are stored compressed: the independent axis is an
//! [`Axis::LogRange`] holding the first and last decade exponent plus the
//! sample count. The concrete frequencies are regenerated by [`log_axis`]
//! only when a [`PlotSeries`] is requested.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::path::PathBuf;
//! use tracetex_core::*;
//!
//! let record = SimulationRecord::new(
//!     PathBuf::from("simulation_data/sweep_ac.txt"),
//!     PathBuf::from("tex_files/sweep_ac.tex"),
//!     SimulationKind::Ac,
//!     Axis::LogRange { start_exponent: 6, end_exponent: 8, count: 3 },
//!     vec![0.5, 0.25, 0.1],
//! )?;
//!
//! let series = record.plot_series();
//! assert_eq!(series.x, vec![1e6, 1e7, 1e8]);
//! assert_eq!(series.scale, AxisScale::Log);
//! # Ok::<(), TraceError>(())
//! ```
//!
//! ## Modules
//!
//! - [`axis`] - [`Axis`] variants, [`AxisScale`], log-axis reconstruction
//! - [`record`] - [`SimulationRecord`], [`SimulationKind`], [`PlotSeries`]
//! - [`scale`] - [`Divisor`] and [`normalize`]
//! - [`error`] - [`TraceError`] and [`TraceResult`]

pub mod axis;
pub mod error;
pub mod record;
pub mod scale;

pub use axis::{decade, log_axis, Axis, AxisScale};
pub use error::{TraceError, TraceResult};
pub use record::{output_target_for, PlotSeries, SimulationKind, SimulationRecord};
pub use scale::{normalize, Divisor};
