// SPDX-License-Identifier: LGPL-3.0-or-later

//! Shared SIMD target configuration for `multiversion` dispatch.

/// Wrap one or more functions in `multiversion` with our standard target set.
///
/// Each function is compiled once per target and the best variant is
/// selected at runtime.
macro_rules! multiversioned {
    ($($(#[$meta:meta])* $vis:vis fn $name:ident $args:tt $body:block)*) => {
        $(
            $(#[$meta])*
            #[::multiversion::multiversion(targets(
                "x86_64+avx2+fma",
                "x86_64+avx",
                "x86_64+sse4.1",
                // sse2 is the x86_64 baseline, the generic fallback covers it
                "aarch64+neon",
            ))]
            $vis fn $name $args $body
        )*
    };
}
