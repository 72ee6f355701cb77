// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Inline conditional.  The 3×3 neighborhood lookups substitute the
/// center pixel for every missing neighbor, and a table of eight
/// `cq!(edge, center, neighbor)` rows reads far better than eight
/// `if` blocks after `cargo fmt` has had its way with them.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}
