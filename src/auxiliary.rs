// Released under MIT License.
// Copyright (c) 2023-2024 Ladislav Bartos

//! Constants used through the `gro_rs` library.

/// First line of every gro file written by `gro_rs`.
pub(crate) const GRO_BANNER: &str = "Generated by gro_rs";

/// Smallest coordinate supported by GRO. The actual minimal supported coordinate is
/// -999.999 nm but due to floating point shenanigans, we are slightly more restrictive to be safe.
pub(crate) const GRO_MIN_COORDINATE: f32 = -999.0;
/// Largest coordinate supported by GRO. The actual maximal supported coordinate is
/// 9999.999 nm but due to floating point shenanigans, we are slightly more restrictive to be safe.
pub(crate) const GRO_MAX_COORDINATE: f32 = 9999.0;
